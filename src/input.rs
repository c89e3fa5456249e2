//! Keyboard handling: crossterm key events to per-frame game input.

use crate::game::FrameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Outcome of handling one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Collects key events between frames.
///
/// Terminals with keyboard enhancement report key releases, so duck is
/// held for as long as Down is held. Elsewhere a second Down press stands
/// the dinosaur back up.
#[derive(Debug, Clone)]
pub struct InputTracker {
    release_events: bool,
    duck_held: bool,
    pending: FrameInput,
}

impl InputTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            duck_held: false,
            pending: FrameInput::default(),
        }
    }

    pub fn duck_held(&self) -> bool {
        self.duck_held
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'));

        match key.kind {
            KeyEventKind::Press => {}
            KeyEventKind::Release => {
                if key.code == KeyCode::Down && self.duck_held {
                    self.duck_held = false;
                    self.pending.duck_released = true;
                }
                return InputResult::Continue;
            }
            KeyEventKind::Repeat => return InputResult::Continue,
        }

        if ctrl_c {
            return InputResult::Quit;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return InputResult::Quit,
            KeyCode::Char(' ') | KeyCode::Up => self.pending.jump_pressed = true,
            KeyCode::Down => {
                if self.duck_held && !self.release_events {
                    self.duck_held = false;
                    self.pending.duck_released = true;
                } else {
                    self.duck_held = true;
                    self.pending.duck_pressed = true;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Input gathered since the last call.
    pub fn take_frame(&mut self) -> FrameInput {
        std::mem::take(&mut self.pending)
    }
}
