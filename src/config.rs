use std::time::Duration;

use thiserror::Error;

/// Logical grid dimensions passed through the game as a named type.
///
/// Replaces the anonymous `(u16, u16)` tuple that was used for bounds,
/// making width vs. height unambiguous at every call site.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Base tick interval in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 120;

/// Amount the tick interval shrinks on each milestone, in milliseconds.
pub const TICK_INTERVAL_STEP_MS: u64 = 10;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Points between speed milestones.
pub const POINTS_PER_MILESTONE: u32 = 5;

/// Glyph drawn for the snake head.
pub const GLYPH_SNAKE_HEAD: &str = "█";

/// Glyph drawn for body segments.
pub const GLYPH_SNAKE_BODY: &str = "▓";

/// Glyph drawn for food.
pub const GLYPH_FOOD: &str = "●";

/// Smallest grid that fits the two-cell starting body with room to move.
const MIN_GRID_WIDTH: u16 = 6;
const MIN_GRID_HEIGHT: u16 = 4;

/// Configuration errors reported before the terminal enters raw mode.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small; need at least {min_width}x{min_height}")]
    GridTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("minimum tick interval {min_ms}ms exceeds base interval {base_ms}ms")]
    FloorAboveBase { min_ms: u64, base_ms: u64 },
    #[error("milestone interval must be at least 1 point")]
    ZeroMilestone,
}

/// Tuning values for one game session, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Tick interval at the start of a session.
    pub base_tick_interval: Duration,
    /// How much the interval shrinks per milestone.
    pub tick_interval_step: Duration,
    /// Lower bound the interval never crosses.
    pub min_tick_interval: Duration,
    /// Score between consecutive speed-ups.
    pub points_per_milestone: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            base_tick_interval: Duration::from_millis(BASE_TICK_INTERVAL_MS),
            tick_interval_step: Duration::from_millis(TICK_INTERVAL_STEP_MS),
            min_tick_interval: Duration::from_millis(MIN_TICK_INTERVAL_MS),
            points_per_milestone: POINTS_PER_MILESTONE,
        }
    }
}

impl GameConfig {
    /// Validates tuning values that would make a session unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width < MIN_GRID_WIDTH || self.grid.height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.grid.width,
                height: self.grid.height,
                min_width: MIN_GRID_WIDTH,
                min_height: MIN_GRID_HEIGHT,
            });
        }

        if self.min_tick_interval > self.base_tick_interval {
            return Err(ConfigError::FloorAboveBase {
                min_ms: self.min_tick_interval.as_millis() as u64,
                base_ms: self.base_tick_interval.as_millis() as u64,
            });
        }

        if self.points_per_milestone == 0 {
            return Err(ConfigError::ZeroMilestone);
        }

        Ok(())
    }
}
