//! Text-art sprites compiled into the binary.
//!
//! Standing frames are 10x4 cells, ducking frames 13x2. Spaces are
//! transparent, so the eye socket in the head shows the background.

use super::sprites::{DinoFrame, Sprite, SpriteId};

const DINO_HEAD: [&str; 2] = ["     ▄███▄", "     █ ███"];
const DINO_BODY: &str = "█▄▄▄███▀▀ ";

const DINO_STANDING: [&str; 4] = [DINO_HEAD[0], DINO_HEAD[1], DINO_BODY, "  ▐▌ ▐▌   "];
const DINO_BLINKING: [&str; 4] = [DINO_HEAD[0], "     █▄███", DINO_BODY, "  ▐▌ ▐▌   "];
const DINO_RUN_LEFT: [&str; 4] = [DINO_HEAD[0], DINO_HEAD[1], DINO_BODY, "  ▐▌  ▀   "];
const DINO_RUN_RIGHT: [&str; 4] = [DINO_HEAD[0], DINO_HEAD[1], DINO_BODY, "  ▀  ▐▌   "];
const DINO_DEAD: [&str; 4] = [DINO_HEAD[0], "     █x███", DINO_BODY, "  ▐▌ ▐▌   "];
const DINO_DUCK_LEFT: [&str; 2] = ["▄▄▄▄▄▄▄▄█ ██▄", " ▐▌  ▀       "];
const DINO_DUCK_RIGHT: [&str; 2] = ["▄▄▄▄▄▄▄▄█ ██▄", " ▀  ▐▌       "];

const CACTI: [&[&str]; 9] = [
    &["╻", "┃"],
    &["┃╻", "┣┛"],
    &["╻┃╻", "┗╋┛"],
    &[" ┃", "┃┃", "┗┫"],
    &["┃", "┃", "┃"],
    &[" ┃ ", "╻┃╻", "┗╋┛"],
    &["╻ ", "┣┓", "┃┃"],
    &["╻  ╻", "┗┳┳┛"],
    &["  ┃   ┃  ", "╻ ┃ ╻ ┃ ╻", "┗┳╋┳┻┳╋┳┛"],
];

const PTERANODON_WINGS_UP: [&str; 2] = ["╲   ╱", "◀━▀▀━"];
const PTERANODON_WINGS_DOWN: [&str; 2] = ["◀━▄▄━", "╱   ╲"];

const CLOUD: [&str; 2] = ["  .--.  ", "(______)"];
const ARROW: [&str; 2] = ["┌─┐", "└◄┘"];
const GAME_OVER: [&str; 1] = ["G A M E   O V E R"];

/// Ground tile width in cells.
const GROUND_WIDTH: usize = 64;

fn ground_tile() -> String {
    (0..GROUND_WIDTH)
        .map(|i| {
            if i % 17 == 5 {
                '┷'
            } else if i % 23 == 11 {
                '╍'
            } else {
                '━'
            }
        })
        .collect()
}

/// Art for `id`.
pub fn sprite(id: SpriteId) -> Sprite {
    match id {
        SpriteId::Digit(d) => Sprite::from_rows(&[d.min(9).to_string()]),
        SpriteId::LetterH => Sprite::from_rows(&["H"]),
        SpriteId::LetterI => Sprite::from_rows(&["I"]),
        SpriteId::Arrow => Sprite::from_rows(&ARROW),
        SpriteId::Cactus(v) => {
            let index = (v.clamp(1, CACTI.len() as u8) - 1) as usize;
            Sprite::from_rows(CACTI[index])
        }
        SpriteId::Pteranodon(1) => Sprite::from_rows(&PTERANODON_WINGS_UP),
        SpriteId::Pteranodon(_) => Sprite::from_rows(&PTERANODON_WINGS_DOWN),
        SpriteId::Cloud => Sprite::from_rows(&CLOUD),
        SpriteId::Dino(frame) => match frame {
            DinoFrame::Standing => Sprite::from_rows(&DINO_STANDING),
            DinoFrame::Blinking => Sprite::from_rows(&DINO_BLINKING),
            DinoFrame::RunLeft => Sprite::from_rows(&DINO_RUN_LEFT),
            DinoFrame::RunRight => Sprite::from_rows(&DINO_RUN_RIGHT),
            DinoFrame::Dead => Sprite::from_rows(&DINO_DEAD),
            DinoFrame::DuckLeft => Sprite::from_rows(&DINO_DUCK_LEFT),
            DinoFrame::DuckRight => Sprite::from_rows(&DINO_DUCK_RIGHT),
        },
        SpriteId::Ground => Sprite::from_rows(&[ground_tile()]),
        SpriteId::GameOver => Sprite::from_rows(&GAME_OVER),
    }
}
