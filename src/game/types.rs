//! Dino run data structures.
//!
//! Coordinates are playfield cells with the origin at the top-left, so a
//! larger `y` is closer to the ground.

use super::host::{Vec2, Viewport};
use super::tuning::Tuning;
use crate::assets::{DinoFrame, SpriteCatalog, SpriteId};

/// Axis-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if the rectangles share any area. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Game phase, derived from the player's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Ground obstacle. Jump over it.
    Cactus,
    /// Flying obstacle. Duck under or jump over it depending on altitude.
    Pteranodon,
}

/// A single obstacle in the game world.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub width: f32,
    pub height: f32,
    /// 1-based sprite variant. Pteranodons flip between 1 and 2 as they flap.
    pub variant: u8,
    pub kind: ObstacleKind,
    /// Top-left corner.
    pub pos: Vec2,
}

impl Obstacle {
    pub fn sprite(&self) -> SpriteId {
        match self.kind {
            ObstacleKind::Cactus => SpriteId::Cactus(self.variant),
            ObstacleKind::Pteranodon => SpriteId::Pteranodon(self.variant),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }
}

/// The dinosaur.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Top-left corner of the current frame. `x` never changes.
    pub pos: Vec2,
    /// Size of the current frame.
    pub width: f32,
    pub height: f32,
    pub frame: DinoFrame,
    /// Seconds into the current jump.
    pub jump_timer: f32,
    pub jumping: bool,
    pub ducking: bool,
    pub started: bool,
    pub game_over: bool,
}

impl PlayerState {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }
}

/// Score, best score and the century blink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreState {
    pub score: u32,
    /// Highest score of any finished run. Never decreases.
    pub best: u32,
    pub blink_timer: f32,
    pub blinking: bool,
    /// Last century threshold that blinked, so each threshold blinks once.
    pub last_blink_at: u32,
}

impl ScoreState {
    /// Score shown on screen this frame, or `None` while a blink is in its
    /// "off" half. During a blink the score is rounded down to the century.
    pub fn displayed(&self, tuning: &Tuning) -> Option<u32> {
        if !self.blinking {
            return Some(self.score);
        }
        let phase = (self.blink_timer * tuning.blink_rate) as u32;
        if phase % 2 == 0 {
            Some(self.score / tuning.century * tuning.century)
        } else {
            None
        }
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct DinoGame {
    pub tuning: Tuning,
    pub viewport: Viewport,

    pub player: PlayerState,
    /// Ordered by spawn time, which is also increasing `x`.
    pub obstacles: Vec<Obstacle>,
    /// Cloud top-left corners.
    pub clouds: Vec<Vec2>,
    pub score: ScoreState,

    /// Current scroll speed in cells/s.
    pub ground_speed: f32,
    /// Horizontal scroll of the ground tile, in `[0, tile width)`.
    pub ground_offset: f32,

    // -- Timing --
    /// Time accumulated toward the next animation step.
    pub animation_timer: f32,
    /// Time accumulated toward the next wing flap.
    pub flap_timer: f32,

    /// Total obstacles ever spawned. New obstacles are always appended, so
    /// the last `spawned - previous` entries are the latest spawns.
    pub spawned: u64,
}

impl DinoGame {
    /// Create a new idle game. The catalog supplies the dinosaur's size.
    pub fn new(tuning: Tuning, viewport: Viewport, sprites: &SpriteCatalog) -> Self {
        let standing = SpriteId::Dino(DinoFrame::Standing);
        let width = sprites.width(standing);
        let height = sprites.height(standing);
        let ground_speed = tuning.base_ground_speed;
        let pos = Vec2::new(
            tuning.dino_x,
            viewport.height - height - tuning.ground_margin,
        );

        Self {
            tuning,
            viewport,
            player: PlayerState {
                pos,
                width,
                height,
                frame: DinoFrame::Standing,
                jump_timer: 0.0,
                jumping: false,
                ducking: false,
                started: false,
                game_over: false,
            },
            obstacles: Vec::new(),
            clouds: Vec::new(),
            score: ScoreState::default(),
            ground_speed,
            ground_offset: 0.0,
            animation_timer: 0.0,
            flap_timer: 0.0,
            spawned: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.player.game_over {
            Phase::GameOver
        } else if self.player.started {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Row of the ground line: every standing sprite's bottom edge.
    pub fn ground_line(&self) -> f32 {
        self.viewport.height - self.tuning.ground_margin
    }

    /// Ground covered during one jump at the current speed.
    pub fn jump_length(&self) -> f32 {
        self.tuning.jump_length(self.ground_speed)
    }
}
