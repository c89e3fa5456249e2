//! Game configuration.
//!
//! Looked up in order: an explicit `--config` file (strict), then
//! `~/.dinorun/config.json` (missing or bad falls back to defaults),
//! then command-line overrides applied by the binary.

use crate::error::{DinoError, Result};
use crate::game::{Rgb, Tuning, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the home directory that holds the home config.
pub const HOME_DIR: &str = ".dinorun";
/// File name of the home config inside `~/.dinorun/`.
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub tuning: Tuning,
    pub audio: AudioConfig,
    pub assets: AssetConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Playfield width in cells.
    pub width: u16,
    /// Playfield height in cells.
    pub height: u16,
    /// Host loop frames per second.
    pub frame_rate: u32,
    pub background: Rgb,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 25,
            frame_rate: 60,
            background: Rgb(230, 230, 230),
        }
    }
}

impl WindowConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    Off,
    #[default]
    Bell,
    Device,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub mode: AudioMode,
    /// Directory holding `jump.wav`, `score.wav` and `gameover.wav`.
    pub sound_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory of `<sprite>.txt` files. Built-in art when unset.
    pub sprite_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file. Logging is off when unset.
    pub file: Option<PathBuf>,
    /// `env_logger` filter, used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Read `path`. Unreadable or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            DinoError::Config(format!("could not read {}: {}", path.display(), e))
        })?;
        let config: GameConfig = serde_json::from_str(&json)
            .map_err(|e| DinoError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// `~/.dinorun/config.json`. Does not touch the filesystem.
    pub fn home_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DinoError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(HOME_DIR).join(CONFIG_FILE))
    }

    /// The home config, or defaults when it is missing, unparsable or invalid.
    pub fn load_home() -> Self {
        match Self::home_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                log::warn!("{}, using default config", e);
                Self::default()
            }
        }
    }

    /// Like [`GameConfig::load`], but any failure other than a missing file
    /// is logged and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("ignoring config: {}", e);
            Self::default()
        })
    }

    /// Write to the home config, creating `~/.dinorun/`, and return its path.
    pub fn save_home(&self) -> Result<PathBuf> {
        let path = Self::home_path()?;
        self.save(&path)?;
        Ok(path)
    }

    /// Write as pretty-printed JSON to `path`, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                DinoError::Config(format!("could not create {}: {}", dir.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DinoError::Config(format!("could not encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| DinoError::Config(format!("could not write {}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(invalid("window size must be non-zero"));
        }
        if w.frame_rate == 0 {
            return Err(invalid("frame_rate must be non-zero"));
        }

        let t = &self.tuning;
        let positive = [
            ("fps", t.fps),
            ("jump_duration", t.jump_duration),
            ("blink_duration", t.blink_duration),
            ("blink_rate", t.blink_rate),
            ("max_tick_seconds", t.max_tick_seconds),
            ("base_ground_speed", t.base_ground_speed),
            ("jump_height_factor", t.jump_height_factor),
        ];
        for (name, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(invalid(&format!("{} must be positive", name)));
            }
        }
        if t.max_ground_speed < t.base_ground_speed {
            return Err(invalid("max_ground_speed is below base_ground_speed"));
        }
        if t.ground_acceleration < 0.0 || t.cloud_speed < 0.0 {
            return Err(invalid("speeds must not be negative"));
        }

        let odds = [
            ("obstacle_spawn_odds", t.obstacle_spawn_odds),
            ("kind_roll_modulus", t.kind_roll_modulus),
            ("cloud_spawn_odds", t.cloud_spawn_odds),
            ("blink_odds", t.blink_odds),
            ("century", t.century),
        ];
        for (name, value) in odds {
            if value == 0 {
                return Err(invalid(&format!("{} must be non-zero", name)));
            }
        }
        if t.cactus_threshold >= t.kind_roll_modulus {
            return Err(invalid("cactus_threshold must be below kind_roll_modulus"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> DinoError {
    DinoError::Config(message.to_string())
}
