use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GameConfig, GridSize};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::Snake;

/// Session lifecycle. `Running -> Over` is one-way; only `reset` goes back.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Running,
    Over,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can spawn.
    GridFull,
}

/// Result of one simulation step, for the scheduler and renderer to react to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Plain translation: no food, no collision.
    Continued,
    /// Food was eaten; `speed_changed` signals the scheduler to re-arm.
    Ate { speed_changed: bool },
    CollidedWall,
    CollidedSelf,
    GridFull,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
    pending_direction: Option<Direction>,
    tick_interval: Duration,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::new_with_seed(config, rand::random())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            snake: Snake::starting_body(config.grid),
            food: Food::new(Snake::starting_body(config.grid).head()),
            score: 0,
            phase: Phase::Running,
            end_reason: None,
            pending_direction: None,
            tick_interval: config.base_tick_interval,
            config,
            rng: StdRng::seed_from_u64(seed),
        };

        state.reset();
        state
    }

    /// Restores the initial session state, discarding all prior progress.
    pub fn reset(&mut self) {
        self.snake = Snake::starting_body(self.config.grid);
        self.score = 0;
        self.tick_interval = self.config.base_tick_interval;
        self.pending_direction = None;

        // A validated grid always has free cells around the starting body,
        // but spawning stays fail-closed rather than trusting that.
        match Food::spawn(&mut self.rng, self.config.grid, &self.snake) {
            Some(food) => {
                self.food = food;
                self.phase = Phase::Running;
                self.end_reason = None;
            }
            None => {
                self.phase = Phase::Over;
                self.end_reason = Some(EndReason::GridFull);
            }
        }
    }

    /// Latches a direction change for the next tick.
    ///
    /// Silently ignored when a change is already latched for the tick in
    /// progress, when `direction` reverses the current direction of travel,
    /// or when the session is over. One latch per tick debounces rapid key
    /// presses that would otherwise queue contradictory turns.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            return;
        }
        if self.pending_direction.is_some() {
            return;
        }
        if direction == self.snake.direction().opposite() {
            return;
        }

        self.pending_direction = Some(direction);
    }

    /// Advances the simulation by one tick.
    ///
    /// Collisions leave the body exactly as it was before the failed move.
    pub fn step(&mut self) -> StepOutcome {
        if self.phase != Phase::Running {
            return StepOutcome::Continued;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.snake.set_direction(direction);
        }

        let next = self.snake.next_head();
        if !next.is_within_bounds(self.config.grid) {
            return self.end_session(EndReason::WallCollision);
        }
        if self.snake.occupies(next) {
            return self.end_session(EndReason::SelfCollision);
        }

        let ate = next == self.food.position;
        self.snake.advance(next, ate);
        if !ate {
            return StepOutcome::Continued;
        }

        self.score += 1;
        let speed_changed = self.score % self.config.points_per_milestone == 0
            && self.lower_tick_interval();

        match Food::spawn(&mut self.rng, self.config.grid, &self.snake) {
            Some(food) => {
                self.food = food;
                StepOutcome::Ate { speed_changed }
            }
            None => self.end_session(EndReason::GridFull),
        }
    }

    /// Returns the current tick cadence.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Returns the grid dimensions for this session.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    fn end_session(&mut self, reason: EndReason) -> StepOutcome {
        self.phase = Phase::Over;
        self.end_reason = Some(reason);

        match reason {
            EndReason::WallCollision => StepOutcome::CollidedWall,
            EndReason::SelfCollision => StepOutcome::CollidedSelf,
            EndReason::GridFull => StepOutcome::GridFull,
        }
    }

    /// Shrinks the tick interval by one step, floored. Returns true on change.
    fn lower_tick_interval(&mut self) -> bool {
        let lowered = self
            .tick_interval
            .saturating_sub(self.config.tick_interval_step)
            .max(self.config.min_tick_interval);

        if lowered == self.tick_interval {
            return false;
        }

        self.tick_interval = lowered;
        true
    }
}
