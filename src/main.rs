use std::io;
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use arcade_snake::config::{
    GameConfig, GridSize, BASE_TICK_INTERVAL_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    MIN_TICK_INTERVAL_MS, POINTS_PER_MILESTONE, TICK_INTERVAL_STEP_MS,
};
use arcade_snake::engine::TickEngine;
use arcade_snake::game::{GameState, StepOutcome};
use arcade_snake::input::{GameInput, InputHandler};
use arcade_snake::renderer;
use arcade_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

/// Idle sleep between loop iterations, well under the fastest tick cadence.
const LOOP_SLEEP: Duration = Duration::from_millis(4);

#[derive(Debug, Parser)]
#[command(about = "Single-screen arcade Snake on a fixed grid")]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    cols: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    rows: u16,

    /// Base tick interval in milliseconds.
    #[arg(long = "tick-ms", default_value_t = BASE_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Milliseconds shaved off the interval at each milestone.
    #[arg(long = "speed-step-ms", default_value_t = TICK_INTERVAL_STEP_MS)]
    speed_step_ms: u64,

    /// Minimum tick interval in milliseconds.
    #[arg(long = "min-tick-ms", default_value_t = MIN_TICK_INTERVAL_MS)]
    min_tick_ms: u64,

    /// Points between speed milestones.
    #[arg(long, default_value_t = POINTS_PER_MILESTONE)]
    milestone: u32,

    /// RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid: GridSize {
                width: self.cols,
                height: self.rows,
            },
            base_tick_interval: Duration::from_millis(self.tick_ms),
            tick_interval_step: Duration::from_millis(self.speed_step_ms),
            min_tick_interval: Duration::from_millis(self.min_tick_ms),
            points_per_milestone: self.milestone,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config();
    config
        .validate()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();

    run(config, cli.seed)
}

fn run(config: GameConfig, seed: Option<u64>) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut state = match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };
    let mut engine = TickEngine::new();
    engine.start(state.tick_interval(), Instant::now());

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state))?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Restart => {
                    // The engine must be idle before the reset so the new
                    // session is never driven by the old cadence.
                    engine.stop();
                    state.reset();
                    engine.start(state.tick_interval(), Instant::now());
                }
                GameInput::Direction(direction) => state.set_pending_direction(direction),
            }
        }

        let now = Instant::now();
        if engine.poll(now) {
            match state.step() {
                StepOutcome::Ate { speed_changed: true } => {
                    engine.on_speed_changed(state.tick_interval(), now);
                }
                StepOutcome::CollidedWall | StepOutcome::CollidedSelf | StepOutcome::GridFull => {
                    engine.stop();
                }
                StepOutcome::Continued | StepOutcome::Ate { .. } => {}
            }
        }

        thread::sleep(LOOP_SLEEP);
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
