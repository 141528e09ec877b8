use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Uniform samples attempted before falling back to an exhaustive scan.
pub const SPAWN_SAMPLE_ATTEMPTS: u32 = 32;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell not occupied by the snake.
    ///
    /// Returns `None` when the snake covers the whole grid.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks a uniformly random free cell, or `None` when the grid is full.
///
/// Rejection sampling is cheap while the board is mostly empty, but its
/// expected cost blows up as the snake fills the grid, so after a fixed
/// number of misses we scan the free cells once and pick among them. Either
/// way the result is uniform over free cells and termination is guaranteed.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    for _ in 0..SPAWN_SAMPLE_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let mut free = Vec::new();
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                free.push(position);
            }
        }
    }

    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}
