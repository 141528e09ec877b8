use std::time::{Duration, Instant};

use arcade_snake::config::GameConfig;
use arcade_snake::engine::TickEngine;
use arcade_snake::food::Food;
use arcade_snake::game::{EndReason, GameState, Phase, StepOutcome};
use arcade_snake::input::Direction;
use arcade_snake::snake::{Position, Snake};

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(GameConfig::default(), 42);

    state.snake = Snake::from_segments(
        vec![Position { x: 1, y: 1 }, Position { x: 0, y: 1 }],
        Direction::Right,
    );
    state.food = Food::new(Position { x: 2, y: 1 });

    assert_eq!(
        state.step(),
        StepOutcome::Ate {
            speed_changed: false
        }
    );
    assert_eq!(state.phase, Phase::Running);
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.snake.head(), Position { x: 2, y: 1 });

    state.set_pending_direction(Direction::Up);
    state.food = Food::new(Position { x: 10, y: 10 });
    assert_eq!(state.step(), StepOutcome::Continued);
    assert_eq!(state.snake.head(), Position { x: 2, y: 0 });

    assert_eq!(state.step(), StepOutcome::CollidedWall);
    assert_eq!(state.phase, Phase::Over);
    assert_eq!(state.end_reason, Some(EndReason::WallCollision));
}

#[test]
fn speed_ramps_per_milestone_and_clamps_at_floor() {
    let mut state = GameState::new_with_seed(GameConfig::default(), 7);
    let mut engine = TickEngine::new();
    let now = Instant::now();
    engine.start(state.tick_interval(), now);
    assert_eq!(engine.interval(), Some(Duration::from_millis(120)));

    // Twelve milestones, steering a staircase path so nothing collides.
    // The interval walks 120 -> 60 in 10ms steps, then stays at the floor.
    for milestone in 1_u32..=12 {
        state.score = milestone * 5 - 1;

        let turn = if milestone % 2 == 0 {
            Direction::Right
        } else {
            Direction::Up
        };
        state.set_pending_direction(turn);
        state.food = Food::new(state.snake.head().stepped(turn));

        let expected_ms = 120_u64.saturating_sub(u64::from(milestone) * 10).max(60);
        let should_change = state.tick_interval() != Duration::from_millis(expected_ms);

        let outcome = state.step();
        assert_eq!(
            outcome,
            StepOutcome::Ate {
                speed_changed: should_change
            }
        );
        assert_eq!(state.score, milestone * 5);
        assert_eq!(state.tick_interval(), Duration::from_millis(expected_ms));

        if let StepOutcome::Ate { speed_changed: true } = outcome {
            engine.on_speed_changed(state.tick_interval(), now);
        }
        assert_eq!(engine.interval(), Some(state.tick_interval()));
    }

    assert_eq!(state.tick_interval(), Duration::from_millis(60));
}

#[test]
fn restart_after_collision_rearms_at_base_speed() {
    let mut state = GameState::new_with_seed(GameConfig::default(), 11);
    let mut engine = TickEngine::new();
    engine.start(state.tick_interval(), Instant::now());

    state.snake = Snake::from_segments(
        vec![Position { x: 19, y: 10 }, Position { x: 18, y: 10 }],
        Direction::Right,
    );
    state.score = 9;

    assert_eq!(state.step(), StepOutcome::CollidedWall);
    engine.stop();
    assert!(!engine.is_armed());

    state.reset();
    engine.start(state.tick_interval(), Instant::now());

    let segments: Vec<Position> = state.snake.segments().copied().collect();
    assert_eq!(
        segments,
        vec![Position { x: 8, y: 10 }, Position { x: 7, y: 10 }]
    );
    assert_eq!(state.score, 0);
    assert_eq!(state.phase, Phase::Running);
    assert_eq!(state.tick_interval(), Duration::from_millis(120));
    assert_eq!(engine.interval(), Some(Duration::from_millis(120)));
    assert!(!state.snake.occupies(state.food.position));
}
