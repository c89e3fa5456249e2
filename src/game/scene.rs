//! Read-only drawing pass over the game state.

use super::host::{Renderer, Rgb, Vec2};
use super::types::DinoGame;
use crate::assets::{DinoFrame, SpriteCatalog, SpriteId};

/// Digits shown for the score and the best score.
const SCORE_DIGITS: u32 = 5;

/// Draw one frame of `game`.
///
/// Back to front: score, ground, clouds, obstacles, dinosaur, then the
/// game-over banner and restart arrow.
pub fn draw<Rd: Renderer>(
    game: &DinoGame,
    sprites: &SpriteCatalog,
    renderer: &mut Rd,
    background: Rgb,
) {
    renderer.clear(background);
    let viewport = renderer.viewport();
    let player = &game.player;
    let moving = player.started || player.game_over;

    if moving {
        draw_scores(game, sprites, renderer);
    }

    let tile = sprites.width(SpriteId::Ground);
    let ground_y = viewport.height - sprites.height(SpriteId::Ground);
    let mut x = if moving { -game.ground_offset } else { 0.0 };
    if tile > 0.0 {
        while x < viewport.width {
            renderer.draw(Vec2::new(x, ground_y), SpriteId::Ground);
            x += tile;
        }
    }

    for cloud in &game.clouds {
        renderer.draw(*cloud, SpriteId::Cloud);
    }
    for obstacle in &game.obstacles {
        renderer.draw(obstacle.pos, obstacle.sprite());
    }
    renderer.draw(player.pos, SpriteId::Dino(player.frame));

    if player.game_over {
        let half_h = viewport.height / 2.0;

        let banner_w = sprites.width(SpriteId::GameOver);
        let banner_h = sprites.height(SpriteId::GameOver);
        renderer.draw(
            Vec2::new(
                ((viewport.width - banner_w) / 2.0).floor(),
                (half_h - banner_h / 2.0 - viewport.height / 6.0).floor(),
            ),
            SpriteId::GameOver,
        );

        let arrow_w = sprites.width(SpriteId::Arrow);
        let arrow_h = sprites.height(SpriteId::Arrow);
        renderer.draw(
            Vec2::new(
                ((viewport.width - arrow_w) / 2.0).floor(),
                (half_h - arrow_h / 2.0 + viewport.height / 10.0).floor(),
            ),
            SpriteId::Arrow,
        );
    }
}

/// Top-right score readout: `HI bbbbb  sssss`.
fn draw_scores<Rd: Renderer>(game: &DinoGame, sprites: &SpriteCatalog, renderer: &mut Rd) {
    let digit_w = sprites.width(SpriteId::Digit(0));
    let width = renderer.viewport().width;
    let y = 1.0;

    let score_x = width - (SCORE_DIGITS as f32 + 2.0) * digit_w;
    if let Some(shown) = game.score.displayed(&game.tuning) {
        draw_number(renderer, sprites, shown, Vec2::new(score_x, y));
    }

    if game.score.best > 0 {
        let best_x = score_x - (SCORE_DIGITS as f32 + 1.0) * digit_w;
        draw_number(renderer, sprites, game.score.best, Vec2::new(best_x, y));

        let i_x = best_x - sprites.width(SpriteId::LetterI) - digit_w;
        let h_x = i_x - sprites.width(SpriteId::LetterH);
        renderer.draw(Vec2::new(i_x, y), SpriteId::LetterI);
        renderer.draw(Vec2::new(h_x, y), SpriteId::LetterH);
    }
}

/// Zero-padded, left-to-right from `origin`. Values past the digit count
/// keep their low digits.
fn draw_number<Rd: Renderer>(renderer: &mut Rd, sprites: &SpriteCatalog, value: u32, origin: Vec2) {
    let mut x = origin.x;
    for place in (0..SCORE_DIGITS).rev() {
        let digit = (value / 10u32.pow(place) % 10) as u8;
        let id = SpriteId::Digit(digit);
        renderer.draw(Vec2::new(x, origin.y), id);
        x += sprites.width(id);
    }
}

/// Frame the dinosaur shows in a still image of `game`, for status text.
pub fn status_label(game: &DinoGame) -> &'static str {
    match game.player.frame {
        DinoFrame::Dead => "Game over",
        frame if frame.is_ducking() => "Ducking",
        _ if game.player.jumping => "Jumping",
        _ if game.player.started => "Running",
        _ => "Ready",
    }
}
