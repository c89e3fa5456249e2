//! Dino run screen: play field, status bar and info panel.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_status_bar, required_size,
};
use super::terminal_renderer::TerminalRenderer;
use crate::game::scene::status_label;
use crate::game::{DinoGame, Phase};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the whole screen around an already drawn play field buffer.
pub fn render_dino_scene(
    frame: &mut Frame,
    area: Rect,
    game: &DinoGame,
    field: &TerminalRenderer<'_>,
) {
    let (need_w, need_h) = required_size(field.width(), field.height());
    if area.width < need_w || area.height < need_h {
        render_too_small(frame, area, need_w, need_h);
        return;
    }

    let layout = create_game_layout(
        frame,
        area,
        " Dino Run ",
        Color::LightYellow,
        field.width(),
        field.height(),
    );

    field.render(frame, layout.content);
    render_status_bar_content(frame, layout.status_bar, game);
    if let Some(panel) = layout.info_panel {
        render_info_panel(frame, panel, game);
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &DinoGame) {
    let label = status_label(game);
    match game.phase() {
        Phase::Idle => render_status_bar(
            frame,
            area,
            label,
            Color::LightYellow,
            &[("[Space/Up]", "Start"), ("[Esc/q]", "Quit")],
        ),
        Phase::GameOver => render_status_bar(
            frame,
            area,
            label,
            Color::LightRed,
            &[("[Space/Up]", "Restart"), ("[Esc/q]", "Quit")],
        ),
        Phase::Running => render_status_bar(
            frame,
            area,
            label,
            Color::LightYellow,
            &[("[Space/Up]", "Jump"), ("[Down]", "Duck"), ("[Esc/q]", "Quit")],
        ),
    }
}

/// Ground speed as a percentage of the way from base to cap.
pub fn speed_percent(game: &DinoGame) -> u32 {
    let base = game.tuning.base_ground_speed;
    let span = game.tuning.max_ground_speed - base;
    if span <= 0.0 {
        return 0;
    }
    ((game.ground_speed - base) / span * 100.0).round().clamp(0.0, 100.0) as u32
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &DinoGame) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                game.score.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", label),
            Span::styled(game.score.best.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{}%", speed_percent(game)),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Obstacles: ", label),
            Span::styled(
                game.obstacles.len().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_too_small(frame: &mut Frame, area: Rect, need_w: u16, need_h: u16) {
    let text = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "need {}x{}, have {}x{}",
            need_w, need_h, area.width, area.height
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
