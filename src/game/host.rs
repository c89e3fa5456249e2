//! Collaborator seams between the game core and whatever hosts it.
//!
//! The core never talks to a terminal, a sound card or a clock directly.
//! The host hands it a [`FrameInput`] and the elapsed time each frame, and
//! the core answers through [`Renderer`] and [`AudioPlayer`].

use crate::assets::{SoundId, SpriteId};
use serde::{Deserialize, Serialize};

/// 2D position in playfield units (one unit = one terminal cell).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Logical size of the playfield. Fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Background color, stored as RGB so it can live in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Edge-triggered input for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Jump went down this frame.
    pub jump_pressed: bool,
    /// Duck went down this frame.
    pub duck_pressed: bool,
    /// Duck came up this frame.
    pub duck_released: bool,
}

impl FrameInput {
    pub fn jump() -> Self {
        Self {
            jump_pressed: true,
            ..Self::default()
        }
    }

    pub fn duck() -> Self {
        Self {
            duck_pressed: true,
            ..Self::default()
        }
    }

    pub fn release_duck() -> Self {
        Self {
            duck_released: true,
            ..Self::default()
        }
    }
}

/// Draw target for one frame.
pub trait Renderer {
    /// Fill the whole frame with `color`.
    fn clear(&mut self, color: Rgb);

    /// Draw `sprite` with its top-left corner at `pos`.
    fn draw(&mut self, pos: Vec2, sprite: SpriteId);

    /// Current playfield size.
    fn viewport(&self) -> Viewport;
}

/// Fire-and-forget sample playback. Overlapping plays are allowed.
pub trait AudioPlayer {
    fn play(&mut self, sound: SoundId);
}

impl<A: AudioPlayer + ?Sized> AudioPlayer for &mut A {
    fn play(&mut self, sound: SoundId) {
        (**self).play(sound);
    }
}

impl<A: AudioPlayer + ?Sized> AudioPlayer for Box<A> {
    fn play(&mut self, sound: SoundId) {
        (**self).play(sound);
    }
}

/// Audio sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, _sound: SoundId) {}
}

/// Audio sink that remembers what it was asked to play.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub played: Vec<SoundId>,
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, sound: SoundId) {
        self.played.push(sound);
    }
}

/// Renderer that records every call, for inspecting a drawn frame.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub viewport: Viewport,
    pub cleared: Vec<Rgb>,
    pub draws: Vec<(Vec2, SpriteId)>,
}

impl RecordingRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cleared: Vec::new(),
            draws: Vec::new(),
        }
    }

    /// Positions at which `sprite` was drawn, in draw order.
    pub fn positions_of(&self, sprite: SpriteId) -> Vec<Vec2> {
        self.draws
            .iter()
            .filter(|(_, id)| *id == sprite)
            .map(|(pos, _)| *pos)
            .collect()
    }

    pub fn drew(&self, sprite: SpriteId) -> bool {
        self.draws.iter().any(|(_, id)| *id == sprite)
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Rgb) {
        self.cleared.push(color);
    }

    fn draw(&mut self, pos: Vec2, sprite: SpriteId) {
        self.draws.push((pos, sprite));
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
