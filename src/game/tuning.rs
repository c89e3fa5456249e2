//! Gameplay constants.
//!
//! Distances are in playfield cells, times in seconds. The defaults are
//! scaled for a 100x25 cell playfield.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ground scroll speed at the start of every run (cells/s).
    pub base_ground_speed: f32,
    /// Ground scroll speed cap (cells/s).
    pub max_ground_speed: f32,
    /// Speed gained per second of running (cells/s²).
    pub ground_acceleration: f32,
    /// Cloud drift speed (cells/s).
    pub cloud_speed: f32,
    /// Animation frame rate. One animation step is `3 / fps` seconds.
    pub fps: f32,
    /// Length of a full jump arc.
    pub jump_duration: f32,
    /// Peak jump height multiplier, applied to the dinosaur's height.
    pub jump_height_factor: f32,
    /// Fixed column of the dinosaur's left edge.
    pub dino_x: f32,
    /// Rows between the bottom of the playfield and the dinosaur's feet.
    pub ground_margin: f32,
    /// Score needed before obstacles start spawning.
    pub score_gate: u32,
    /// Per-tick spawn odds: an obstacle is attempted one tick in this many.
    pub obstacle_spawn_odds: u32,
    /// Range of the kind roll.
    pub kind_roll_modulus: u32,
    /// Kind rolls above this spawn a cactus, the rest a pteranodon.
    pub cactus_threshold: u32,
    /// Per-tick cloud odds.
    pub cloud_spawn_odds: u32,
    pub max_clouds: usize,
    /// Idle blink odds per animation step.
    pub blink_odds: u32,
    /// Score interval that triggers the century blink.
    pub century: u32,
    /// How long the century blink lasts.
    pub blink_duration: f32,
    /// Blink toggles per second.
    pub blink_rate: f32,
    /// Elapsed time fed to one tick is clamped to this.
    pub max_tick_seconds: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_ground_speed: 45.0,
            max_ground_speed: 90.0,
            ground_acceleration: 1.0,
            cloud_speed: 14.0,
            fps: 30.0,
            jump_duration: 0.75,
            jump_height_factor: 15.0,
            dino_x: 6.0,
            ground_margin: 1.0,
            score_gate: 25,
            obstacle_spawn_odds: 200,
            kind_roll_modulus: 200,
            cactus_threshold: 50,
            cloud_spawn_odds: 1000,
            max_clouds: 5,
            blink_odds: 15,
            century: 100,
            blink_duration: 4.0,
            blink_rate: 3.0,
            max_tick_seconds: 0.25,
        }
    }
}

impl Tuning {
    /// Seconds per animation frame.
    pub fn period(&self) -> f32 {
        1.0 / self.fps
    }

    /// Seconds between dinosaur animation steps (and score increments).
    pub fn animation_step(&self) -> f32 {
        self.period() * 3.0
    }

    /// Seconds between pteranodon wing flaps.
    pub fn flap_step(&self) -> f32 {
        self.period() * 5.0
    }

    /// Ground covered during one full jump at `ground_speed`.
    pub fn jump_length(&self, ground_speed: f32) -> f32 {
        self.jump_duration * ground_speed
    }

    /// Peak height multiplier for a dinosaur `dino_height` rows tall.
    pub fn max_jump_height(&self, dino_height: f32) -> f32 {
        dino_height * self.jump_height_factor
    }

    /// Height above the ground `t` seconds into a jump.
    ///
    /// `-max * (t² - duration * t)`: zero at both ends, peak at `duration / 2`.
    pub fn jump_height(&self, dino_height: f32, t: f32) -> f32 {
        let t = t.clamp(0.0, self.jump_duration);
        -self.max_jump_height(dino_height) * (t * t - self.jump_duration * t)
    }
}
