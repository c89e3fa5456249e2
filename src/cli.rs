//! Command-line arguments.

use crate::config::{AudioMode, GameConfig};
use crate::error::{DinoError, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Dino Run - dodge cacti and pteranodons in your terminal

Usage: dinorun [options]

Options:
  --config <path>     Read settings from a JSON file
  --write-config      Write the default settings to ~/.dinorun/config.json
  --seed <n>          Seed the obstacle generator
  --sprites <dir>     Load sprites from <name>.txt files in <dir>
  --sounds <dir>      Play jump.wav, score.wav and gameover.wav from <dir>
  --silent            Disable sound
  --log-file <path>   Append log records to <path>
  --version           Show version information
  --help              Show this help message

Controls: Space/Up jump, Down duck, Esc/q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Play,
    Help,
    Version,
    WriteConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub command: Command,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub sprites: Option<PathBuf>,
    pub sounds: Option<PathBuf>,
    pub silent: bool,
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments, not including the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => parsed.command = Command::Help,
                "--version" | "-v" => parsed.command = Command::Version,
                "--write-config" => parsed.command = Command::WriteConfig,
                "--silent" => parsed.silent = true,
                "--config" => parsed.config = Some(value(&mut args, &arg)?.into()),
                "--sprites" => parsed.sprites = Some(value(&mut args, &arg)?.into()),
                "--sounds" => parsed.sounds = Some(value(&mut args, &arg)?.into()),
                "--log-file" => parsed.log_file = Some(value(&mut args, &arg)?.into()),
                "--seed" => {
                    let raw = value(&mut args, &arg)?;
                    let seed = raw
                        .parse()
                        .map_err(|_| DinoError::Usage(format!("invalid seed '{}'", raw)))?;
                    parsed.seed = Some(seed);
                }
                other => return Err(DinoError::Usage(format!("unknown option '{}'", other))),
            }
        }
        Ok(parsed)
    }

    /// Layer the command-line overrides over `config`.
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(dir) = &self.sprites {
            config.assets.sprite_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.sounds {
            config.audio.sound_dir = Some(dir.clone());
            config.audio.mode = AudioMode::Device;
        }
        if self.silent {
            config.audio.mode = AudioMode::Off;
        }
        if let Some(path) = &self.log_file {
            config.log.file = Some(path.clone());
        }
    }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| DinoError::Usage(format!("{} needs a value", flag)))
}
