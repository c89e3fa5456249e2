//! Cell-buffer renderer.
//!
//! Sprites are stamped into a 2D grid of colored cells, then the grid is
//! turned into one ratatui line per row with runs of equal color merged
//! into a single span.

use crate::assets::{SpriteCatalog, SpriteId};
use crate::game::{Renderer, Rgb, Vec2, Viewport};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Foreground color for each kind of sprite.
pub fn sprite_color(id: SpriteId) -> Color {
    match id {
        SpriteId::Dino(_) => Color::Rgb(83, 83, 83),
        SpriteId::Cactus(_) => Color::Rgb(60, 110, 60),
        SpriteId::Pteranodon(_) => Color::Rgb(120, 70, 120),
        SpriteId::Cloud => Color::Rgb(170, 170, 170),
        SpriteId::Ground => Color::Rgb(110, 90, 70),
        SpriteId::Digit(_) | SpriteId::LetterH | SpriteId::LetterI => Color::Rgb(83, 83, 83),
        SpriteId::GameOver | SpriteId::Arrow => Color::Rgb(40, 40, 40),
    }
}

/// Renders sprites from `sprites` into a fixed-size cell grid.
pub struct TerminalRenderer<'a> {
    sprites: &'a SpriteCatalog,
    viewport: Viewport,
    cells: Vec<Vec<Cell>>,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(sprites: &'a SpriteCatalog, width: u16, height: u16) -> Self {
        Self {
            sprites,
            viewport: Viewport::new(width as f32, height as f32),
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.cells.first().map_or(0, |row| row.len() as u16)
    }

    pub fn height(&self) -> u16 {
        self.cells.len() as u16
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get(y).and_then(|row| row.get(x))
    }

    /// One row of the buffer as plain text.
    pub fn row_text(&self, y: usize) -> String {
        self.cells
            .get(y)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// The buffer as styled lines, adjacent cells of equal color merged.
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.cells.iter().map(|row| row_line(row)).collect()
    }

    /// Paint the buffer into `area`, clipped to whichever is smaller.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(self.width());
        for (row_idx, line) in self.lines().into_iter().enumerate() {
            let y = area.y + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }
            frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, width, 1));
        }
    }
}

fn row_line(row: &[Cell]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current_fg = Color::Reset;
    let mut current_bg = Color::Reset;
    let mut current_text = String::new();

    for &cell in row {
        if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
            spans.push(Span::styled(
                std::mem::take(&mut current_text),
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }
        current_fg = cell.fg;
        current_bg = cell.bg;
        current_text.push(cell.ch);
    }
    if !current_text.is_empty() {
        spans.push(Span::styled(
            current_text,
            Style::default().fg(current_fg).bg(current_bg),
        ));
    }
    Line::from(spans)
}

impl Renderer for TerminalRenderer<'_> {
    fn clear(&mut self, color: Rgb) {
        let bg = Color::Rgb(color.0, color.1, color.2);
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = Cell { ch: ' ', fg: bg, bg };
            }
        }
    }

    fn draw(&mut self, pos: Vec2, id: SpriteId) {
        let sprite = self.sprites.get(id);
        let fg = sprite_color(id);
        let left = pos.x.floor() as i64;
        let top = pos.y.floor() as i64;

        for sy in 0..sprite.height() {
            let y = top + sy as i64;
            if y < 0 || y >= self.cells.len() as i64 {
                continue;
            }
            let row = &mut self.cells[y as usize];
            for sx in 0..sprite.width() {
                let x = left + sx as i64;
                if x < 0 || x >= row.len() as i64 {
                    continue;
                }
                if let Some(ch) = sprite.glyph(sx, sy) {
                    let cell = &mut row[x as usize];
                    cell.ch = ch;
                    cell.fg = fg;
                }
            }
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
