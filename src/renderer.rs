use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::{GridSize, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD};
use crate::game::{GameState, Phase};
use crate::snake::Position;
use crate::ui::overlay::render_game_over_overlay;

/// Renders the full game frame from immutable state.
///
/// Pure projection: reads the state, draws one frame, mutates nothing.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    let [score_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    render_score_line(frame, score_area, state);

    let block = Block::bordered().border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    if state.phase == Phase::Over {
        render_game_over_overlay(frame, play_area, state.score, state.end_reason);
    }
}

fn render_score_line(frame: &mut Frame<'_>, area: Rect, state: &GameState) {
    let interval_ms = state.tick_interval().as_millis();
    let line = Line::from(format!(
        "Score: {}   Speed: {}ms   [R] Restart  [Q] Quit",
        state.score, interval_ms
    ));

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Left)
            .style(Style::new().fg(Color::White)),
        area,
    );
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = logical_to_terminal(inner, state.grid(), state.food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let head = state.snake.head();

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            );
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
