//! Layout pieces around the play field.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel when it fits.
pub const INFO_PANEL_WIDTH: u16 = 18;

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field area, inside the outer border.
    pub content: Rect,
    /// Status bar area (2 lines) below the play field.
    pub status_bar: Rect,
    /// Info panel on the right, if the terminal is wide enough for it.
    pub info_panel: Option<Rect>,
}

/// Space needed around a `width` x `height` play field: borders plus the
/// two status lines.
pub fn required_size(width: u16, height: u16) -> (u16, u16) {
    (width.saturating_add(2), height.saturating_add(4))
}

/// Outer border titled `title`, play field sized to `field_width` x
/// `field_height`, status bar underneath, info panel to the right when
/// there is room.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [play field]                  │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    field_width: u16,
    field_height: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let with_panel = inner.width >= field_width.saturating_add(INFO_PANEL_WIDTH);
    let (left, info_panel) = if with_panel {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(field_width), Constraint::Length(INFO_PANEL_WIDTH)])
            .split(inner);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (inner, None)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(field_height), Constraint::Length(2)])
        .split(left);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel,
    }
}

/// Render a standardized status bar (2 lines: status message + controls).
///
/// `controls` holds (key, action) pairs, e.g. `[("[Space]", "Jump")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let controls_line = Paragraph::new(controls_line(controls)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

fn controls_line(controls: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Render an info panel frame with standard " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
