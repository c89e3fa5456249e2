//! Sprite handles and the immutable sprite table.

use super::builtin;
use crate::error::AssetError;
use std::fs;
use std::io;
use std::path::Path;

/// Number of cactus variants. The last one is the wide cactus.
pub const CACTUS_VARIANTS: u8 = 9;

/// Variant of the wide cactus, only ever placed on its own.
pub const WIDE_CACTUS: u8 = 9;

/// Number of pteranodon wing poses.
pub const PTERANODON_VARIANTS: u8 = 2;

/// Dinosaur animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DinoFrame {
    Standing,
    Blinking,
    RunLeft,
    RunRight,
    Dead,
    DuckLeft,
    DuckRight,
}

impl DinoFrame {
    pub const ALL: [DinoFrame; 7] = [
        DinoFrame::Standing,
        DinoFrame::Blinking,
        DinoFrame::RunLeft,
        DinoFrame::RunRight,
        DinoFrame::Dead,
        DinoFrame::DuckLeft,
        DinoFrame::DuckRight,
    ];

    fn ordinal(self) -> usize {
        match self {
            Self::Standing => 0,
            Self::Blinking => 1,
            Self::RunLeft => 2,
            Self::RunRight => 3,
            Self::Dead => 4,
            Self::DuckLeft => 5,
            Self::DuckRight => 6,
        }
    }

    /// Number used in the sprite file name (`dino_<n>.txt`).
    pub fn file_number(self) -> u8 {
        match self {
            Self::Standing => 1,
            Self::Blinking => 2,
            Self::RunLeft => 3,
            Self::RunRight => 4,
            Self::Dead => 6,
            Self::DuckLeft => 7,
            Self::DuckRight => 8,
        }
    }

    pub fn is_ducking(self) -> bool {
        matches!(self, Self::DuckLeft | Self::DuckRight)
    }
}

/// Stable handle into the [`SpriteCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Digit(u8),
    LetterH,
    LetterI,
    Arrow,
    /// Cactus variant, 1-based.
    Cactus(u8),
    /// Pteranodon wing pose, 1-based.
    Pteranodon(u8),
    Cloud,
    Dino(DinoFrame),
    Ground,
    GameOver,
}

impl SpriteId {
    /// Size of the catalog.
    pub const COUNT: usize = 10
        + 3
        + CACTUS_VARIANTS as usize
        + PTERANODON_VARIANTS as usize
        + 1
        + DinoFrame::ALL.len()
        + 2;

    /// Position in the catalog. Out-of-range variants are clamped so every
    /// handle resolves.
    pub fn index(self) -> usize {
        const CACTUS_BASE: usize = 13;
        const PTERANODON_BASE: usize = CACTUS_BASE + CACTUS_VARIANTS as usize;
        const CLOUD: usize = PTERANODON_BASE + PTERANODON_VARIANTS as usize;
        const DINO_BASE: usize = CLOUD + 1;
        const GROUND: usize = DINO_BASE + DinoFrame::ALL.len();

        match self {
            Self::Digit(d) => d.min(9) as usize,
            Self::LetterH => 10,
            Self::LetterI => 11,
            Self::Arrow => 12,
            Self::Cactus(v) => CACTUS_BASE + (v.clamp(1, CACTUS_VARIANTS) - 1) as usize,
            Self::Pteranodon(v) => {
                PTERANODON_BASE + (v.clamp(1, PTERANODON_VARIANTS) - 1) as usize
            }
            Self::Cloud => CLOUD,
            Self::Dino(frame) => DINO_BASE + frame.ordinal(),
            Self::Ground => GROUND,
            Self::GameOver => GROUND + 1,
        }
    }

    /// Every handle, in catalog order.
    pub fn all() -> Vec<SpriteId> {
        let mut ids: Vec<SpriteId> = (0..10).map(SpriteId::Digit).collect();
        ids.extend([SpriteId::LetterH, SpriteId::LetterI, SpriteId::Arrow]);
        ids.extend((1..=CACTUS_VARIANTS).map(SpriteId::Cactus));
        ids.extend((1..=PTERANODON_VARIANTS).map(SpriteId::Pteranodon));
        ids.push(SpriteId::Cloud);
        ids.extend(DinoFrame::ALL.iter().copied().map(SpriteId::Dino));
        ids.extend([SpriteId::Ground, SpriteId::GameOver]);
        ids
    }

    /// File stem used when loading from a sprite directory.
    pub fn file_stem(self) -> String {
        match self {
            Self::Digit(d) => d.min(9).to_string(),
            Self::LetterH => "H".to_string(),
            Self::LetterI => "I".to_string(),
            Self::Arrow => "arrow".to_string(),
            Self::Cactus(v) => format!("cactus_{}", v.clamp(1, CACTUS_VARIANTS)),
            Self::Pteranodon(v) => format!("pteranodon_{}", v.clamp(1, PTERANODON_VARIANTS)),
            Self::Cloud => "cloud".to_string(),
            Self::Dino(frame) => format!("dino_{}", frame.file_number()),
            Self::Ground => "ground".to_string(),
            Self::GameOver => "gameover".to_string(),
        }
    }
}

/// A text-art image. Spaces are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Parse a sprite file. Trailing blank lines are dropped so editors that
    /// append a newline do not change the sprite's height.
    pub fn parse(text: &str) -> Self {
        let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        Self::from_rows(&lines)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows.is_empty()
    }

    /// Opaque glyph at `(x, y)`, or `None` for transparent/out-of-range cells.
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .filter(|&ch| ch != ' ')
    }
}

/// Immutable, index-keyed sprite table. Constructed once before the first
/// frame and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    sprites: Vec<Sprite>,
}

impl SpriteCatalog {
    /// Text-art sprites compiled into the binary.
    pub fn builtin() -> Self {
        let sprites = SpriteId::all().into_iter().map(builtin::sprite).collect();
        Self { sprites }
    }

    /// Load `<stem>.txt` for every handle from `dir`. Fails on the first
    /// missing, unreadable or empty file.
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let mut sprites = Vec::with_capacity(SpriteId::COUNT);
        for id in SpriteId::all() {
            let name = id.file_stem();
            let path = dir.join(format!("{}.txt", name));
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(AssetError::MissingSprite { name, path });
                }
                Err(source) => return Err(AssetError::Unreadable { path, source }),
            };
            let sprite = Sprite::parse(&text);
            if sprite.is_empty() {
                return Err(AssetError::EmptySprite { name });
            }
            sprites.push(sprite);
        }
        log::info!("loaded {} sprites from {}", sprites.len(), dir.display());
        Ok(Self { sprites })
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        &self.sprites[id.index()]
    }

    pub fn width(&self, id: SpriteId) -> f32 {
        self.get(id).width() as f32
    }

    pub fn height(&self, id: SpriteId) -> f32 {
        self.get(id).height() as f32
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
