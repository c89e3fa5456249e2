//! The dino run game core.
//!
//! [`DinoGame`] owns every piece of mutable state. [`tick`] advances it by
//! one frame and [`draw`] renders it; both are free functions so the core
//! can be driven from tests without a terminal. [`GameLoop`] bundles the
//! state with its collaborators for the binary's frame loop.

pub mod host;
pub mod logic;
pub mod random;
pub mod scene;
pub mod spawn;
pub mod tuning;
pub mod types;

pub use host::{
    AudioPlayer, FrameInput, RecordingAudio, RecordingRenderer, Renderer, Rgb, SilentAudio, Vec2,
    Viewport,
};
pub use logic::{check_collision, end_run, process_input, tick};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use scene::draw;
pub use tuning::Tuning;
pub use types::{DinoGame, Obstacle, ObstacleKind, Phase, PlayerState, Rect, ScoreState};

use crate::assets::SpriteCatalog;

/// A game plus the collaborators it needs every frame.
pub struct GameLoop<'a, R, A> {
    pub game: DinoGame,
    sprites: &'a SpriteCatalog,
    rng: R,
    audio: A,
    background: Rgb,
}

impl<'a, R: RandomSource, A: AudioPlayer> GameLoop<'a, R, A> {
    pub fn new(
        tuning: Tuning,
        viewport: Viewport,
        sprites: &'a SpriteCatalog,
        rng: R,
        audio: A,
        background: Rgb,
    ) -> Self {
        Self {
            game: DinoGame::new(tuning, viewport, sprites),
            sprites,
            rng,
            audio,
            background,
        }
    }

    /// Update by `dt` seconds, then draw the result.
    pub fn frame<Rd: Renderer>(&mut self, dt: f32, input: FrameInput, renderer: &mut Rd) {
        self.update(dt, input);
        self.render(renderer);
    }

    pub fn update(&mut self, dt: f32, input: FrameInput) {
        tick(
            &mut self.game,
            self.sprites,
            &mut self.rng,
            &mut self.audio,
            input,
            dt,
        );
    }

    pub fn render<Rd: Renderer>(&self, renderer: &mut Rd) {
        draw(&self.game, self.sprites, renderer, self.background);
    }

    pub fn sprites(&self) -> &'a SpriteCatalog {
        self.sprites
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
