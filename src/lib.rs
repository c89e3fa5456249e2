//! Dino Run - a terminal take on the offline dinosaur game.
//!
//! [`game`] holds the frame-by-frame core. Everything else hosts it in a
//! terminal: sprites, sound, keyboard, configuration and logging.

pub mod assets;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod ui;
pub mod utils;

pub use error::{DinoError, Result};
