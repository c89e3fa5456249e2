//! Dino run game logic: the per-frame tick, input, collision detection.

use super::host::{AudioPlayer, FrameInput};
use super::random::RandomSource;
use super::spawn::{advance_clouds, advance_obstacles};
use super::types::DinoGame;
use crate::assets::{DinoFrame, SoundId, SpriteCatalog, SpriteId};

/// Advance the game by `dt` seconds. Called once per rendered frame.
///
/// Once the run is over every scrolling sub-update sees zero elapsed time,
/// so the scene freezes in place until the player restarts.
pub fn tick<R: RandomSource, A: AudioPlayer>(
    game: &mut DinoGame,
    sprites: &SpriteCatalog,
    rng: &mut R,
    audio: &mut A,
    input: FrameInput,
    dt: f32,
) {
    let dt = dt.clamp(0.0, game.tuning.max_tick_seconds);
    let frozen = if game.player.game_over { 0.0 } else { dt };

    update_blink(game, audio, frozen);
    advance_ground(game, sprites, frozen);
    advance_clouds(game, sprites, rng, frozen);
    advance_obstacles(game, sprites, rng, frozen);
    advance_animation(game, rng, dt);
    advance_jump(game, dt);
    place_player(game, sprites);
    process_input(game, audio, input);

    if !game.player.game_over && check_collision(game) {
        end_run(game, audio);
    }
}

/// Century blink: every `century` points the score flashes for
/// `blink_duration` seconds.
fn update_blink<A: AudioPlayer>(game: &mut DinoGame, audio: &mut A, dt: f32) {
    let century = game.tuning.century;
    let score = &mut game.score;

    // A slow frame can add several points, so look for a crossed threshold
    // rather than an exact multiple.
    let reached = score.score / century * century;
    if !score.blinking && reached > score.last_blink_at {
        score.blinking = true;
        score.blink_timer = 0.0;
        score.last_blink_at = reached;
        audio.play(SoundId::Score);
        log::debug!("century blink at {}", reached);
    }

    if score.blinking {
        score.blink_timer += dt;
        if score.blink_timer > game.tuning.blink_duration {
            score.blinking = false;
            score.blink_timer = 0.0;
        }
    }
}

/// Speed ramp and ground scroll.
fn advance_ground(game: &mut DinoGame, sprites: &SpriteCatalog, dt: f32) {
    if game.is_running() {
        game.ground_speed =
            (game.ground_speed + dt * game.tuning.ground_acceleration).min(game.tuning.max_ground_speed);
    }

    if game.player.started || game.player.game_over {
        let tile = sprites.width(SpriteId::Ground);
        game.ground_offset = (game.ground_offset + dt * game.ground_speed) % tile;
    }
}

/// Step the dinosaur's animation and the score cadence.
fn advance_animation<R: RandomSource>(game: &mut DinoGame, rng: &mut R, dt: f32) {
    let step = game.tuning.animation_step();
    game.animation_timer += dt;

    let mut steps = 0;
    while game.animation_timer >= step {
        game.animation_timer -= step;
        steps += 1;
    }
    if steps == 0 {
        return;
    }

    let player = &mut game.player;
    player.frame = if player.game_over {
        DinoFrame::Dead
    } else if player.jumping {
        DinoFrame::Standing
    } else if player.ducking {
        match player.frame {
            DinoFrame::DuckLeft => DinoFrame::DuckRight,
            _ => DinoFrame::DuckLeft,
        }
    } else if player.started {
        match player.frame {
            DinoFrame::RunLeft => DinoFrame::RunRight,
            _ => DinoFrame::RunLeft,
        }
    } else if rng.one_in(game.tuning.blink_odds) {
        DinoFrame::Blinking
    } else {
        DinoFrame::Standing
    };

    if player.started && !player.game_over {
        game.score.score += steps;
    }
}

fn advance_jump(game: &mut DinoGame, dt: f32) {
    let player = &mut game.player;
    if !player.jumping || player.game_over {
        return;
    }
    player.jump_timer += dt;
    if player.jump_timer > game.tuning.jump_duration {
        player.jumping = false;
        player.jump_timer = 0.0;
    }
}

/// Size the player to its current frame and lift it along the jump arc.
fn place_player(game: &mut DinoGame, sprites: &SpriteCatalog) {
    let frame = SpriteId::Dino(game.player.frame);
    let standing_height = sprites.height(SpriteId::Dino(DinoFrame::Standing));
    let lift = game.tuning.jump_height(standing_height, game.player.jump_timer);
    let ground = game.ground_line();

    let player = &mut game.player;
    player.width = sprites.width(frame);
    player.height = sprites.height(frame);
    player.pos.x = game.tuning.dino_x;
    player.pos.y = ground - player.height - lift;
}

/// Apply this frame's input. Jump starts (or restarts) a run and begins a
/// jump; duck is held between press and release.
pub fn process_input<A: AudioPlayer>(game: &mut DinoGame, audio: &mut A, input: FrameInput) {
    let player = &mut game.player;

    if input.jump_pressed {
        if !player.started {
            player.game_over = false;
            player.started = true;
            // A run that crashed mid-jump leaves a frozen arc behind
            player.jumping = false;
            player.jump_timer = 0.0;
            game.obstacles.clear();
            log::info!("run started (best {})", game.score.best);
        }
        if !player.jumping {
            player.jumping = true;
            audio.play(SoundId::Jump);
        }
    }

    if input.duck_pressed && player.started {
        player.ducking = true;
    }
    if input.duck_released {
        player.ducking = false;
    }
}

/// First obstacle overlapping the player, if any.
///
/// Obstacles are ordered by `x`, so the scan stops at the first one that
/// starts past the player's right edge.
pub fn check_collision(game: &DinoGame) -> bool {
    let player = game.player.rect();
    for obstacle in &game.obstacles {
        if obstacle.pos.x >= player.right() {
            break;
        }
        if player.overlaps(&obstacle.rect()) {
            return true;
        }
    }
    false
}

/// Game-over transition.
pub fn end_run<A: AudioPlayer>(game: &mut DinoGame, audio: &mut A) {
    let score = &mut game.score;
    log::info!("run over: score {} (best {})", score.score, score.best);

    game.player.game_over = true;
    game.player.started = false;
    score.best = score.best.max(score.score);
    score.score = 0;
    score.blink_timer = 0.0;
    score.blinking = false;
    score.last_blink_at = 0;
    game.ground_speed = game.tuning.base_ground_speed;
    audio.play(SoundId::GameOver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::host::{RecordingAudio, Vec2, Viewport};
    use crate::game::random::ScriptedRandom;
    use crate::game::tuning::Tuning;
    use crate::game::types::{Obstacle, ObstacleKind, Phase};

    struct Harness {
        game: DinoGame,
        sprites: SpriteCatalog,
        rng: ScriptedRandom,
        audio: RecordingAudio,
    }

    impl Harness {
        fn new() -> Self {
            let sprites = SpriteCatalog::builtin();
            let game = DinoGame::new(Tuning::default(), Viewport::new(100.0, 25.0), &sprites);
            Self {
                game,
                sprites,
                // Never hit a 1-in-N roll
                rng: ScriptedRandom::constant(1),
                audio: RecordingAudio::default(),
            }
        }

        /// Started game that has finished its opening jump.
        fn running() -> Self {
            let mut h = Self::new();
            h.step(FrameInput::jump(), 0.0);
            h.game.player.jumping = false;
            h.game.player.jump_timer = 0.0;
            h.audio.played.clear();
            h
        }

        fn step(&mut self, input: FrameInput, dt: f32) {
            tick(
                &mut self.game,
                &self.sprites,
                &mut self.rng,
                &mut self.audio,
                input,
                dt,
            );
        }

        fn idle(&mut self, dt: f32, ticks: usize) {
            for _ in 0..ticks {
                self.step(FrameInput::default(), dt);
            }
        }

        fn obstacle_on_player(&mut self) {
            let player = self.game.player.rect();
            self.game.obstacles.push(Obstacle {
                width: 1.0,
                height: 2.0,
                variant: 1,
                kind: ObstacleKind::Cactus,
                pos: Vec2::new(player.x + 1.0, player.bottom() - 2.0),
            });
        }
    }

    // ── Phase transitions ──

    #[test]
    fn test_jump_starts_run() {
        let mut h = Harness::new();
        h.game.obstacles.push(Obstacle {
            width: 1.0,
            height: 1.0,
            variant: 1,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(80.0, 23.0),
        });
        assert_eq!(h.game.phase(), Phase::Idle);

        h.step(FrameInput::jump(), 0.0);

        assert_eq!(h.game.phase(), Phase::Running);
        assert!(h.game.obstacles.is_empty());
        assert!(h.game.player.jumping);
        assert_eq!(h.audio.played, vec![SoundId::Jump]);
    }

    #[test]
    fn test_duck_ignored_while_idle() {
        let mut h = Harness::new();
        h.step(FrameInput::duck(), 0.0);
        assert!(!h.game.player.ducking);
        assert_eq!(h.game.phase(), Phase::Idle);
    }

    #[test]
    fn test_duck_is_held_until_release() {
        let mut h = Harness::running();
        h.step(FrameInput::duck(), 0.0);
        assert!(h.game.player.ducking);
        h.idle(0.05, 10);
        assert!(h.game.player.ducking);
        h.step(FrameInput::release_duck(), 0.0);
        assert!(!h.game.player.ducking);
    }

    #[test]
    fn test_ducking_shrinks_player_on_next_animation_step() {
        let mut h = Harness::running();
        let standing_height = h.game.player.height;
        h.step(FrameInput::duck(), 0.0);
        h.step(FrameInput::default(), h.game.tuning.animation_step());
        assert!(h.game.player.frame.is_ducking());
        assert!(h.game.player.height < standing_height);
        assert_eq!(h.game.player.rect().bottom(), h.game.ground_line());
    }

    #[test]
    fn test_jump_while_jumping_does_not_replay_sound() {
        let mut h = Harness::running();
        h.step(FrameInput::jump(), 0.0);
        h.step(FrameInput::jump(), 0.1);
        assert_eq!(h.audio.played, vec![SoundId::Jump]);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut h = Harness::running();
        h.game.score.score = 321;
        h.game.score.best = 100;
        h.game.ground_speed = 70.0;
        h.obstacle_on_player();

        h.step(FrameInput::default(), 0.0);

        assert_eq!(h.game.phase(), Phase::GameOver);
        assert!(h.game.player.game_over);
        assert!(!h.game.player.started);
        assert_eq!(h.game.score.best, 321);
        assert_eq!(h.game.score.score, 0);
        assert_eq!(h.game.score.blink_timer, 0.0);
        assert!(!h.game.score.blinking);
        assert_eq!(h.game.ground_speed, h.game.tuning.base_ground_speed);
        assert_eq!(h.audio.played, vec![SoundId::GameOver]);
    }

    #[test]
    fn test_best_score_never_decreases() {
        let mut h = Harness::running();
        h.game.score.score = 10;
        h.game.score.best = 500;
        h.obstacle_on_player();
        h.step(FrameInput::default(), 0.0);
        assert_eq!(h.game.score.best, 500);
    }

    #[test]
    fn test_game_over_freezes_scene() {
        let mut h = Harness::running();
        h.obstacle_on_player();
        h.game.clouds.push(Vec2::new(50.0, 3.0));
        h.step(FrameInput::default(), 0.0);
        assert!(h.game.player.game_over);

        let obstacles = h.game.obstacles.clone();
        let clouds = h.game.clouds.clone();
        let offset = h.game.ground_offset;
        h.idle(0.05, 40);

        assert_eq!(h.game.obstacles, obstacles);
        assert_eq!(h.game.clouds, clouds);
        assert_eq!(h.game.ground_offset, offset);
        assert_eq!(h.game.score.score, 0);
        assert_eq!(h.game.player.frame, DinoFrame::Dead);
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let mut h = Harness::running();
        h.obstacle_on_player();
        h.step(FrameInput::default(), 0.0);
        assert_eq!(h.game.phase(), Phase::GameOver);

        h.step(FrameInput::jump(), 0.0);

        assert_eq!(h.game.phase(), Phase::Running);
        assert!(h.game.obstacles.is_empty());
        assert!(!h.game.player.game_over);
    }

    #[test]
    fn test_restart_after_crash_mid_jump_starts_a_new_jump() {
        let mut h = Harness::running();
        h.step(FrameInput::jump(), 0.0);
        h.idle(0.05, 4);
        h.obstacle_on_player();
        h.step(FrameInput::default(), 0.0);
        assert_eq!(h.game.phase(), Phase::GameOver);
        h.idle(0.05, 10);
        let frozen_y = h.game.player.pos.y;
        assert!(frozen_y < h.game.ground_line() - h.game.player.height);
        h.idle(0.05, 10);
        assert_eq!(h.game.player.pos.y, frozen_y, "crashed dinosaur stays put");

        h.step(FrameInput::jump(), 0.0);

        assert!(h.game.player.jumping);
        assert_eq!(h.game.player.jump_timer, 0.0);
        assert_eq!(
            h.audio.played,
            vec![SoundId::Jump, SoundId::GameOver, SoundId::Jump]
        );
    }

    // ── Collision ──

    #[test]
    fn test_no_collision_with_distant_obstacle() {
        let mut h = Harness::running();
        h.game.obstacles.push(Obstacle {
            width: 2.0,
            height: 2.0,
            variant: 2,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(h.game.player.rect().right(), 22.0),
        });
        assert!(!check_collision(&h.game));
    }

    #[test]
    fn test_collision_scan_stops_past_player() {
        let mut h = Harness::running();
        let player = h.game.player.rect();
        // Out-of-order entry hidden behind one that is already past the player
        h.game.obstacles.push(Obstacle {
            width: 1.0,
            height: 1.0,
            variant: 1,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(player.right() + 5.0, 22.0),
        });
        h.game.obstacles.push(Obstacle {
            width: 1.0,
            height: 1.0,
            variant: 1,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(player.x, player.y),
        });
        assert!(!check_collision(&h.game));
    }

    #[test]
    fn test_ducking_passes_under_low_pteranodon() {
        let mut h = Harness::running();
        let height = h.sprites.height(SpriteId::Pteranodon(1));
        let (low, _) = crate::game::spawn::pteranodon_altitudes(&h.game, &h.sprites, height);
        let bird = Obstacle {
            width: 5.0,
            height,
            variant: 1,
            kind: ObstacleKind::Pteranodon,
            pos: Vec2::new(h.game.player.pos.x + 2.0, low),
        };
        h.game.obstacles.push(bird);
        assert!(check_collision(&h.game), "standing dinosaur is hit");

        h.game.player.frame = DinoFrame::DuckLeft;
        place_player(&mut h.game, &h.sprites);
        assert!(!check_collision(&h.game), "ducking dinosaur passes under");
    }

    #[test]
    fn test_jump_clears_cactus_at_apex() {
        let mut h = Harness::running();
        h.step(FrameInput::jump(), 0.0);
        let half = h.game.tuning.jump_duration / 2.0;
        h.idle(half / 10.0, 10);
        let player = h.game.player.rect();
        assert!(player.bottom() < h.game.ground_line() - 3.0);

        h.game.obstacles.push(Obstacle {
            width: 3.0,
            height: 3.0,
            variant: 6,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(player.x, h.game.ground_line() - 3.0),
        });
        assert!(!check_collision(&h.game));
    }

    // ── Jump ──

    #[test]
    fn test_jump_lands_after_duration() {
        let mut h = Harness::running();
        h.step(FrameInput::jump(), 0.0);
        let ground_y = h.game.ground_line() - h.game.player.height;

        let mut highest = h.game.player.pos.y;
        for _ in 0..40 {
            h.step(FrameInput::default(), 0.02);
            highest = highest.min(h.game.player.pos.y);
        }
        assert!(!h.game.player.jumping);
        assert_eq!(h.game.player.jump_timer, 0.0);
        assert_eq!(h.game.player.pos.y, ground_y);
        assert!(highest < ground_y - 8.0);
    }

    // ── Speed ──

    #[test]
    fn test_speed_ramps_to_cap() {
        let mut h = Harness::running();
        let mut previous = h.game.ground_speed;
        for _ in 0..2000 {
            h.step(FrameInput::default(), 0.05);
            assert!(h.game.ground_speed >= previous);
            assert!(h.game.ground_speed <= h.game.tuning.max_ground_speed);
            previous = h.game.ground_speed;
        }
        assert_eq!(h.game.ground_speed, h.game.tuning.max_ground_speed);
    }

    #[test]
    fn test_speed_constant_while_idle() {
        let mut h = Harness::new();
        h.idle(0.05, 100);
        assert_eq!(h.game.ground_speed, h.game.tuning.base_ground_speed);
        assert_eq!(h.game.ground_offset, 0.0);
    }

    #[test]
    fn test_large_frames_are_clamped() {
        let mut h = Harness::running();
        h.game.score.score = 0;
        h.game.obstacles.push(Obstacle {
            width: 1.0,
            height: 1.0,
            variant: 1,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(90.0, 23.0),
        });
        h.step(FrameInput::default(), 5.0);
        let moved = 90.0 - h.game.obstacles[0].pos.x;
        assert!(moved <= h.game.tuning.max_tick_seconds * h.game.tuning.max_ground_speed);
    }

    // ── Score ──

    #[test]
    fn test_score_increments_once_per_animation_step() {
        let mut h = Harness::running();
        let step = h.game.tuning.animation_step();
        h.game.animation_timer = 0.0;
        for expected in 1..=30 {
            h.step(FrameInput::default(), step);
            assert_eq!(h.game.score.score, expected);
        }
    }

    #[test]
    fn test_score_accumulates_sub_step_frames() {
        let mut h = Harness::running();
        h.game.animation_timer = 0.0;
        // 10 seconds in 16ms frames is 100 animation steps
        h.idle(0.016, 625);
        let score = h.game.score.score;
        assert!((99..=100).contains(&score), "score was {}", score);
    }

    #[test]
    fn test_no_score_while_idle() {
        let mut h = Harness::new();
        h.idle(0.1, 50);
        assert_eq!(h.game.score.score, 0);
    }

    #[test]
    fn test_idle_blink_frame() {
        let mut h = Harness::new();
        h.rng = ScriptedRandom::constant(0);
        h.step(FrameInput::default(), h.game.tuning.animation_step());
        assert_eq!(h.game.player.frame, DinoFrame::Blinking);

        h.rng = ScriptedRandom::constant(1);
        h.step(FrameInput::default(), h.game.tuning.animation_step());
        assert_eq!(h.game.player.frame, DinoFrame::Standing);
    }

    #[test]
    fn test_running_frames_alternate() {
        let mut h = Harness::running();
        let step = h.game.tuning.animation_step();
        h.step(FrameInput::default(), step);
        let first = h.game.player.frame;
        h.step(FrameInput::default(), step);
        let second = h.game.player.frame;
        assert_ne!(first, second);
        assert!(matches!(first, DinoFrame::RunLeft | DinoFrame::RunRight));
        assert!(matches!(second, DinoFrame::RunLeft | DinoFrame::RunRight));
    }

    #[test]
    fn test_century_blink_lasts_its_duration_once() {
        let mut h = Harness::running();
        h.game.score.score = 100;
        h.step(FrameInput::default(), 0.0);
        assert!(h.game.score.blinking);
        assert_eq!(h.audio.played, vec![SoundId::Score]);

        // Hold the score at 100 to make sure the threshold does not refire
        h.game.tuning.fps = 0.001;
        let mut elapsed = 0.0;
        while h.game.score.blinking {
            h.step(FrameInput::default(), 0.05);
            elapsed += 0.05;
            assert!(elapsed < 5.0);
        }
        assert!((elapsed - h.game.tuning.blink_duration).abs() <= 0.051);

        h.idle(0.05, 20);
        assert!(!h.game.score.blinking);
        assert_eq!(h.audio.played, vec![SoundId::Score]);
    }

    #[test]
    fn test_each_century_blinks() {
        let mut h = Harness::running();
        let step = h.game.tuning.animation_step();
        h.game.animation_timer = 0.0;
        h.game.score.score = 0;
        // The scripted rng never rolls a spawn. A threshold reached on one
        // tick is noticed on the next, hence the extra tick.
        for _ in 0..301 {
            h.step(FrameInput::default(), step);
        }
        let cues = h.audio.played.iter().filter(|s| **s == SoundId::Score).count();
        assert_eq!(cues, 3);
    }

    #[test]
    fn test_century_crossed_by_slow_frame_still_blinks() {
        let mut h = Harness::running();
        h.game.score.score = 99;
        h.game.animation_timer = 0.05;
        h.step(FrameInput::default(), 0.25);
        assert!(h.game.score.score > 100, "slow frame skipped past 100");

        h.idle(0.016, 50);

        assert!(h.game.score.blinking);
        assert_eq!(h.game.score.last_blink_at, 100);
        let cues = h.audio.played.iter().filter(|s| **s == SoundId::Score).count();
        assert_eq!(cues, 1);
    }
}
