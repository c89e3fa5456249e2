//! Audio backends.
//!
//! The terminal bell is always available. The device backend is built on
//! kira and only compiled with the `audio` feature.

use crate::assets::SoundId;
use crate::config::{AudioConfig, AudioMode};
use crate::error::{DinoError, Result};
use crate::game::{AudioPlayer, SilentAudio};
use std::io::Write;

/// Rings the terminal bell for every cue.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioPlayer for TerminalBell<W> {
    fn play(&mut self, sound: SoundId) {
        let result = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("bell for {:?} failed: {}", sound, e);
        }
    }
}

/// Build the player selected by `config`.
pub fn open(config: &AudioConfig) -> Result<Box<dyn AudioPlayer>> {
    match config.mode {
        AudioMode::Off => Ok(Box::new(SilentAudio)),
        AudioMode::Bell => Ok(Box::new(TerminalBell::stdout())),
        AudioMode::Device => open_device(config),
    }
}

#[cfg(feature = "audio")]
fn open_device(config: &AudioConfig) -> Result<Box<dyn AudioPlayer>> {
    let dir = config
        .sound_dir
        .as_deref()
        .ok_or_else(|| DinoError::Audio("device audio needs a sound directory".to_string()))?;
    Ok(Box::new(device::KiraAudio::load(dir)?))
}

#[cfg(not(feature = "audio"))]
fn open_device(_config: &AudioConfig) -> Result<Box<dyn AudioPlayer>> {
    Err(DinoError::Audio(
        "device audio requires building with --features audio".to_string(),
    ))
}

#[cfg(feature = "audio")]
pub mod device {
    use crate::assets::SoundId;
    use crate::error::{AssetError, DinoError, Result};
    use crate::game::AudioPlayer;
    use kira::sound::static_sound::StaticSoundData;
    use kira::{AudioManager, DefaultBackend};
    use std::collections::HashMap;
    use std::path::Path;

    /// Sample playback on the default output device.
    ///
    /// With no device available the player stays silent instead of failing.
    pub struct KiraAudio {
        manager: Option<AudioManager<DefaultBackend>>,
        sounds: HashMap<SoundId, StaticSoundData>,
    }

    impl KiraAudio {
        /// Load every cue from `dir`. A missing file is an error even when
        /// there is no device, so a bad directory is caught at startup.
        pub fn load(dir: &Path) -> Result<Self> {
            let mut sounds = HashMap::new();
            for sound in SoundId::ALL {
                let path = dir.join(sound.file_name());
                if !path.is_file() {
                    return Err(AssetError::MissingSound {
                        name: sound.file_name().to_string(),
                        path,
                    }
                    .into());
                }
                let data = StaticSoundData::from_file(&path).map_err(|e| {
                    DinoError::Audio(format!("failed to load '{}': {}", path.display(), e))
                })?;
                sounds.insert(sound, data);
            }

            let manager =
                AudioManager::<DefaultBackend>::new(kira::AudioManagerSettings::default())
                    .map_err(|e| log::warn!("no audio device available ({}), running silent", e))
                    .ok();
            log::info!("loaded {} sounds from {}", sounds.len(), dir.display());

            Ok(Self { manager, sounds })
        }
    }

    impl AudioPlayer for KiraAudio {
        fn play(&mut self, sound: SoundId) {
            let Some(manager) = &mut self.manager else {
                return;
            };
            let Some(data) = self.sounds.get(&sound) else {
                return;
            };
            if let Err(e) = manager.play(data.clone()) {
                log::warn!("failed to play {:?}: {}", sound, e);
            }
        }
    }
}
