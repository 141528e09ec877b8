use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring position one unit step away.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Snake body and current direction of travel.
///
/// The body is head-first; adjacency of consecutive segments is maintained
/// by only ever advancing one step at a time.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates the canonical two-cell starting body, heading right.
    ///
    /// The head sits at `(width / 2 - 2, height / 2)` with the tail one cell
    /// to its left, so a 20x20 grid starts at `[(8,10), (7,10)]`.
    #[must_use]
    pub fn starting_body(grid: GridSize) -> Self {
        let head = Position {
            x: i32::from(grid.width / 2) - 2,
            y: i32::from(grid.height / 2),
        };
        let tail = Position {
            x: head.x - 1,
            y: head.y,
        };

        Self::from_segments(vec![head, tail], Direction::Right)
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Returns the head position for the next movement step.
    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head().stepped(self.direction)
    }

    /// Moves the body forward onto `head`, keeping the tail when growing.
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Sets the direction of travel for subsequent steps.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn starting_body_matches_canonical_layout() {
        let snake = Snake::starting_body(GridSize {
            width: 20,
            height: 20,
        });

        let segments: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Position { x: 8, y: 10 }, Position { x: 7, y: 10 }]
        );
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn advance_translates_body_by_one_cell() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );

        let next = snake.next_head();
        snake.advance(next, false);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 2);
        assert!(!snake.occupies(Position { x: 4, y: 5 }));
    }

    #[test]
    fn growing_advance_keeps_previous_tail() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );

        let next = snake.next_head();
        snake.advance(next, true);

        assert_eq!(snake.len(), 3);
        assert!(snake.occupies(Position { x: 4, y: 5 }));
    }

    #[test]
    fn next_head_follows_each_direction() {
        let origin = Position { x: 3, y: 3 };

        let cases = [
            (Direction::Up, Position { x: 3, y: 2 }),
            (Direction::Down, Position { x: 3, y: 4 }),
            (Direction::Left, Position { x: 2, y: 3 }),
            (Direction::Right, Position { x: 4, y: 3 }),
        ];

        for (direction, expected) in cases {
            let snake = Snake::from_segments(vec![origin], direction);
            assert_eq!(snake.next_head(), expected);
        }
    }

    #[test]
    fn bounds_check_covers_all_edges() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Position { x: 0, y: 0 }.is_within_bounds(bounds));
        assert!(Position { x: 9, y: 7 }.is_within_bounds(bounds));
        assert!(!Position { x: -1, y: 0 }.is_within_bounds(bounds));
        assert!(!Position { x: 0, y: -1 }.is_within_bounds(bounds));
        assert!(!Position { x: 10, y: 0 }.is_within_bounds(bounds));
        assert!(!Position { x: 0, y: 8 }.is_within_bounds(bounds));
    }
}
