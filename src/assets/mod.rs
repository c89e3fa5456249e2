//! The fixed sprite and sound catalog.
//!
//! Sprites are resolved by [`SpriteId`] through an immutable
//! [`SpriteCatalog`] built before the first frame. Sounds are referenced by
//! [`SoundId`]; the audio backend decides how to realize them.

mod builtin;
pub mod sprites;

pub use sprites::{
    DinoFrame, Sprite, SpriteCatalog, SpriteId, CACTUS_VARIANTS, PTERANODON_VARIANTS, WIDE_CACTUS,
};

/// Audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    Score,
    GameOver,
}

impl SoundId {
    pub const ALL: [SoundId; 3] = [SoundId::Jump, SoundId::Score, SoundId::GameOver];

    /// File name inside the sound directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Jump => "jump.wav",
            Self::Score => "score.wav",
            Self::GameOver => "gameover.wav",
        }
    }
}
