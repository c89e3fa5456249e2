//! Obstacle and cloud spawning.
//!
//! Obstacles enter at the right edge of the playfield. A new obstacle or
//! cactus run is only placed once the previous spawn has scrolled far
//! enough left that the player can clear it with one full jump.

use super::host::Vec2;
use super::random::RandomSource;
use super::types::{DinoGame, Obstacle, ObstacleKind};
use crate::assets::{DinoFrame, SpriteCatalog, SpriteId, PTERANODON_VARIANTS, WIDE_CACTUS};

/// Cactus variants eligible for runs and for an empty field.
const NARROW_CACTUS_VARIANTS: u32 = WIDE_CACTUS as u32 - 1;

/// Longest cactus run.
const MAX_RUN: u32 = 4;

/// True if a new spawn keeps the spacing invariant.
pub fn has_room(game: &DinoGame) -> bool {
    match game.obstacles.last() {
        None => true,
        Some(last) => last.pos.x < game.viewport.width - last.width - game.jump_length(),
    }
}

/// Move, animate and cull obstacles, then maybe spawn new ones.
/// Returns how many obstacles were added.
pub fn advance_obstacles<R: RandomSource>(
    game: &mut DinoGame,
    sprites: &SpriteCatalog,
    rng: &mut R,
    dt: f32,
) -> usize {
    game.flap_timer += dt;
    if game.flap_timer >= game.tuning.flap_step() {
        game.flap_timer -= game.tuning.flap_step();
        for obstacle in &mut game.obstacles {
            if obstacle.kind == ObstacleKind::Pteranodon {
                obstacle.variant = obstacle.variant % PTERANODON_VARIANTS + 1;
            }
        }
    }

    let distance = dt * game.ground_speed;
    for obstacle in &mut game.obstacles {
        obstacle.pos.x -= distance;
    }
    game.obstacles.retain(|o| o.pos.x >= -o.width);

    if game.score.score < game.tuning.score_gate
        || !rng.one_in(game.tuning.obstacle_spawn_odds)
    {
        return 0;
    }

    let added = if rng.below(game.tuning.kind_roll_modulus) > game.tuning.cactus_threshold {
        add_cactus(game, sprites, rng)
    } else {
        add_pteranodon(game, sprites, rng)
    };
    game.spawned += added as u64;
    added
}

fn push_cactus(game: &mut DinoGame, sprites: &SpriteCatalog, variant: u8, x: f32) -> f32 {
    let id = SpriteId::Cactus(variant);
    let width = sprites.width(id);
    let height = sprites.height(id);
    game.obstacles.push(Obstacle {
        width,
        height,
        variant,
        kind: ObstacleKind::Cactus,
        pos: Vec2::new(x, game.ground_line() - height),
    });
    width
}

fn narrow_variant<R: RandomSource>(rng: &mut R) -> u8 {
    rng.below(NARROW_CACTUS_VARIANTS) as u8 + 1
}

/// Place one cactus, the wide cactus, or a run of 1-4 cacti.
pub fn add_cactus<R: RandomSource>(
    game: &mut DinoGame,
    sprites: &SpriteCatalog,
    rng: &mut R,
) -> usize {
    let right_edge = game.viewport.width;

    if game.obstacles.is_empty() {
        let variant = narrow_variant(rng);
        push_cactus(game, sprites, variant, right_edge);
        log::debug!("spawned cactus {} into an empty field", variant);
        return 1;
    }

    if !has_room(game) {
        return 0;
    }

    let jump_length = game.jump_length();
    let variant = rng.below(WIDE_CACTUS as u32) as u8 + 1;
    if variant == WIDE_CACTUS && sprites.width(SpriteId::Cactus(WIDE_CACTUS)) <= jump_length {
        push_cactus(game, sprites, WIDE_CACTUS, right_edge);
        log::debug!("spawned wide cactus");
        return 1;
    }

    let run = rng.below(MAX_RUN) + 1;
    let mut offset = 0.0;
    let mut added = 0;
    for _ in 0..run {
        if offset > jump_length {
            break;
        }
        let variant = narrow_variant(rng);
        offset += push_cactus(game, sprites, variant, right_edge + offset);
        added += 1;
    }
    log::debug!("spawned a run of {} cacti", added);
    added
}

/// Place a pteranodon at the low (duck under) or high (jump over) altitude.
pub fn add_pteranodon<R: RandomSource>(
    game: &mut DinoGame,
    sprites: &SpriteCatalog,
    rng: &mut R,
) -> usize {
    if !has_room(game) {
        return 0;
    }

    let variant = rng.below(PTERANODON_VARIANTS as u32) as u8 + 1;
    let id = SpriteId::Pteranodon(variant);
    let width = sprites.width(id);
    let height = sprites.height(id);

    let (low, high) = pteranodon_altitudes(game, sprites, height);
    let y = if rng.below(2) == 1 { low } else { high };

    game.obstacles.push(Obstacle {
        width,
        height,
        variant,
        kind: ObstacleKind::Pteranodon,
        pos: Vec2::new(game.viewport.width, y),
    });
    log::debug!("spawned pteranodon at y={}", y);
    1
}

/// Top edges for the two flying altitudes. The low one clears a ducking
/// dinosaur but hits a standing one; the high one clears a standing
/// dinosaur but hits a jumping one.
pub fn pteranodon_altitudes(game: &DinoGame, sprites: &SpriteCatalog, height: f32) -> (f32, f32) {
    let ground = game.ground_line();
    let standing = sprites.height(SpriteId::Dino(DinoFrame::Standing));
    let ducking = sprites.height(SpriteId::Dino(DinoFrame::DuckLeft));
    let low = ground - ducking - height;
    let high = ground - 2.0 * standing - height;
    (low, high)
}

/// Move and cull clouds, then maybe spawn one.
pub fn advance_clouds<R: RandomSource>(
    game: &mut DinoGame,
    sprites: &SpriteCatalog,
    rng: &mut R,
    dt: f32,
) {
    let cloud_width = sprites.width(SpriteId::Cloud);
    let cloud_height = sprites.height(SpriteId::Cloud);

    let distance = dt * game.tuning.cloud_speed;
    for cloud in &mut game.clouds {
        cloud.x -= distance;
    }
    game.clouds.retain(|c| c.x >= -cloud_width);

    if !game.player.started
        || game.clouds.len() >= game.tuning.max_clouds
        || !rng.one_in(game.tuning.cloud_spawn_odds)
    {
        return;
    }

    // Sky band: below the score row, above the dinosaur's head.
    let dino_height = sprites.height(SpriteId::Dino(DinoFrame::Standing));
    let begin = cloud_height;
    let end = game.ground_line() - cloud_height - dino_height;
    let y = if end > begin {
        begin + rng.below((end - begin) as u32) as f32
    } else {
        begin
    };

    let room = match game.clouds.last() {
        None => true,
        Some(last) => last.x < game.viewport.width - 1.5 * cloud_width,
    };
    if room {
        game.clouds.push(Vec2::new(game.viewport.width, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::host::Viewport;
    use crate::game::random::ScriptedRandom;
    use crate::game::tuning::Tuning;

    fn running_game(catalog: &SpriteCatalog) -> DinoGame {
        let mut game = DinoGame::new(Tuning::default(), Viewport::new(100.0, 25.0), catalog);
        game.player.started = true;
        game.score.score = 30;
        game
    }

    fn cactus_at(catalog: &SpriteCatalog, game: &mut DinoGame, x: f32) {
        push_cactus(game, catalog, 1, x);
    }

    #[test]
    fn test_no_spawn_below_score_gate() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        game.score.score = 24;
        let mut rng = ScriptedRandom::constant(0);

        for _ in 0..100 {
            assert_eq!(advance_obstacles(&mut game, &catalog, &mut rng, 0.0), 0);
        }
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_dice_gates_attempts() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        // Spawn roll of 1 misses the 1-in-200 chance
        let mut rng = ScriptedRandom::new([1]);
        assert_eq!(advance_obstacles(&mut game, &catalog, &mut rng, 0.0), 0);
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_kind_roll_above_threshold_spawns_cactus() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        // spawn hit, kind roll 51 > 50, variant roll 2 -> cactus 3
        let mut rng = ScriptedRandom::new([0, 51, 2]);
        assert_eq!(advance_obstacles(&mut game, &catalog, &mut rng, 0.0), 1);
        let obstacle = &game.obstacles[0];
        assert_eq!(obstacle.kind, ObstacleKind::Cactus);
        assert_eq!(obstacle.variant, 3);
        assert_eq!(obstacle.pos.x, 100.0);
        assert_eq!(obstacle.pos.y + obstacle.height, game.ground_line());
        assert_eq!(game.spawned, 1);
    }

    #[test]
    fn test_kind_roll_at_threshold_spawns_pteranodon() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        // spawn hit, kind roll 50, variant roll 1 -> pose 2, altitude roll 1 -> low
        let mut rng = ScriptedRandom::new([0, 50, 1, 1]);
        assert_eq!(advance_obstacles(&mut game, &catalog, &mut rng, 0.0), 1);
        let obstacle = &game.obstacles[0];
        assert_eq!(obstacle.kind, ObstacleKind::Pteranodon);
        assert_eq!(obstacle.variant, 2);
        let (low, _) = pteranodon_altitudes(&game, &catalog, obstacle.height);
        assert_eq!(obstacle.pos.y, low);
    }

    #[test]
    fn test_threshold_is_tunable() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        game.tuning.kind_roll_modulus = 300;
        game.tuning.cactus_threshold = 250;
        // kind roll 200 is a cactus with the default threshold but not here
        let mut rng = ScriptedRandom::new([0, 200, 0, 0]);
        advance_obstacles(&mut game, &catalog, &mut rng, 0.0);
        assert_eq!(game.obstacles[0].kind, ObstacleKind::Pteranodon);
    }

    #[test]
    fn test_spacing_blocks_spawn_near_right_edge() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        let jump_length = game.jump_length();
        // Exactly at the limit is not enough room
        let x = game.viewport.width - 1.0 - jump_length;
        cactus_at(&catalog, &mut game, x);
        assert!(!has_room(&game));

        let mut rng = ScriptedRandom::constant(0);
        assert_eq!(add_cactus(&mut game, &catalog, &mut rng), 0);
        assert_eq!(add_pteranodon(&mut game, &catalog, &mut rng), 0);
        assert_eq!(game.obstacles.len(), 1);

        game.obstacles[0].pos.x -= 0.5;
        assert!(has_room(&game));
    }

    #[test]
    fn test_wide_cactus_placed_alone() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        cactus_at(&catalog, &mut game, 0.0);
        // variant roll 8 -> the wide cactus
        let mut rng = ScriptedRandom::new([8]);
        assert_eq!(add_cactus(&mut game, &catalog, &mut rng), 1);
        assert_eq!(game.obstacles[1].variant, WIDE_CACTUS);
        assert_eq!(game.obstacles[1].pos.x, 100.0);
    }

    #[test]
    fn test_wide_cactus_that_does_not_fit_falls_back_to_a_run() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        // Crawl so slowly that the wide cactus is longer than a jump
        game.ground_speed = 4.0;
        cactus_at(&catalog, &mut game, 0.0);
        // wide roll, run of 1, variant roll 0 -> cactus 1
        let mut rng = ScriptedRandom::new([8, 0, 0]);
        assert_eq!(add_cactus(&mut game, &catalog, &mut rng), 1);
        assert_eq!(game.obstacles[1].variant, 1);
    }

    #[test]
    fn test_cactus_run_is_placed_end_to_end() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        cactus_at(&catalog, &mut game, 0.0);
        // variant roll 0 (not wide), run roll 3 -> 4 cacti, variants 3, 2, 8, 1
        let mut rng = ScriptedRandom::new([0, 3, 2, 1, 7, 0]);
        assert_eq!(add_cactus(&mut game, &catalog, &mut rng), 4);

        let run = &game.obstacles[1..];
        let variants: Vec<u8> = run.iter().map(|o| o.variant).collect();
        assert_eq!(variants, vec![3, 2, 8, 1]);
        assert_eq!(run[0].pos.x, 100.0);
        for pair in run.windows(2) {
            assert_eq!(pair[1].pos.x, pair[0].right());
        }
        assert!(run.iter().all(|o| o.kind == ObstacleKind::Cactus));
    }

    #[test]
    fn test_cactus_run_stops_past_jump_length() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        // One wide-ish cactus (width 4) already exceeds a 3-cell jump
        game.ground_speed = 4.0;
        cactus_at(&catalog, &mut game, -10.0);
        let mut rng = ScriptedRandom::new([0, 3, 7, 7, 7, 7]);
        assert_eq!(add_cactus(&mut game, &catalog, &mut rng), 1);
    }

    #[test]
    fn test_empty_field_never_gets_wide_cactus() {
        let catalog = SpriteCatalog::builtin();
        for roll in 0..20 {
            let mut game = running_game(&catalog);
            let mut rng = ScriptedRandom::constant(roll);
            add_cactus(&mut game, &catalog, &mut rng);
            assert!(game.obstacles[0].variant < WIDE_CACTUS);
        }
    }

    #[test]
    fn test_pteranodon_altitudes_against_dino() {
        let catalog = SpriteCatalog::builtin();
        let game = running_game(&catalog);
        let height = catalog.height(SpriteId::Pteranodon(1));
        let (low, high) = pteranodon_altitudes(&game, &catalog, height);
        let ground = game.ground_line();
        let standing_top = ground - catalog.height(SpriteId::Dino(DinoFrame::Standing));
        let ducking_top = ground - catalog.height(SpriteId::Dino(DinoFrame::DuckLeft));

        // Low: bottom edge between the standing head and the ducking head
        assert!(low + height > standing_top);
        assert!(low + height <= ducking_top);
        // High: fully above a standing dinosaur
        assert!(high + height <= standing_top);
        assert!(high >= 0.0);
    }

    #[test]
    fn test_obstacles_scroll_and_cull() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        game.score.score = 0;
        cactus_at(&catalog, &mut game, 50.0);
        cactus_at(&catalog, &mut game, -0.5);
        let mut rng = ScriptedRandom::constant(1);

        advance_obstacles(&mut game, &catalog, &mut rng, 0.1);
        // 0.1s at 45 cells/s
        assert_eq!(game.obstacles.len(), 1);
        assert!((game.obstacles[0].pos.x - 45.5).abs() < 1e-4);
    }

    #[test]
    fn test_pteranodons_flap() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        game.score.score = 0;
        let mut rng = ScriptedRandom::new([0, 0]);
        add_pteranodon(&mut game, &catalog, &mut rng);
        cactus_at(&catalog, &mut game, 200.0);
        let step = game.tuning.flap_step();

        advance_obstacles(&mut game, &catalog, &mut rng, step);
        assert_eq!(game.obstacles[0].variant, 2);
        assert_eq!(game.obstacles[1].variant, 1, "cacti do not flap");
        advance_obstacles(&mut game, &catalog, &mut rng, step);
        assert_eq!(game.obstacles[0].variant, 1);
    }

    #[test]
    fn test_clouds_only_spawn_while_started() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        game.player.started = false;
        let mut rng = ScriptedRandom::constant(0);
        advance_clouds(&mut game, &catalog, &mut rng, 0.0);
        assert!(game.clouds.is_empty());

        game.player.started = true;
        advance_clouds(&mut game, &catalog, &mut rng, 0.0);
        assert_eq!(game.clouds.len(), 1);
        let cloud = game.clouds[0];
        assert_eq!(cloud.x, 100.0);
        assert!(cloud.y >= catalog.height(SpriteId::Cloud));
    }

    #[test]
    fn test_cloud_spacing_and_limit() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        let mut rng = ScriptedRandom::constant(0);
        advance_clouds(&mut game, &catalog, &mut rng, 0.0);
        // The first cloud has not moved in yet
        advance_clouds(&mut game, &catalog, &mut rng, 0.0);
        assert_eq!(game.clouds.len(), 1);

        let cloud_width = catalog.width(SpriteId::Cloud);
        for _ in 0..10 {
            for cloud in &mut game.clouds {
                cloud.x -= 2.0 * cloud_width;
            }
            advance_clouds(&mut game, &catalog, &mut rng, 0.0);
        }
        assert!(game.clouds.len() <= game.tuning.max_clouds);
    }

    #[test]
    fn test_clouds_removed_off_screen() {
        let catalog = SpriteCatalog::builtin();
        let mut game = running_game(&catalog);
        let cloud_width = catalog.width(SpriteId::Cloud);
        game.clouds.push(Vec2::new(-cloud_width + 0.1, 3.0));
        game.clouds.push(Vec2::new(40.0, 3.0));
        let mut rng = ScriptedRandom::constant(1);

        advance_clouds(&mut game, &catalog, &mut rng, 0.1);
        assert_eq!(game.clouds.len(), 1);
        assert!((game.clouds[0].x - 38.6).abs() < 1e-4);
    }
}
