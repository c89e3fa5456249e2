//! Terminal presentation: the cell-buffer renderer and the screen around it.

pub mod dino_scene;
pub mod game_common;
pub mod terminal_renderer;

pub use dino_scene::render_dino_scene;
pub use terminal_renderer::TerminalRenderer;
