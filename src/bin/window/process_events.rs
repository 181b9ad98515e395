use raylib::prelude::*;

use raycaster::core::maze::Maze;
use raycaster::core::player::{MoveInput, Player};

/// `1.0` while any key of `pos` is held, `-1.0` for `neg`, `0.0` for both or neither.
fn axis(rl: &RaylibHandle, pos: &[KeyboardKey], neg: &[KeyboardKey]) -> f32 {
    let held = |keys: &[KeyboardKey]| keys.iter().any(|&k| rl.is_key_down(k));
    (held(pos) as i32 - held(neg) as i32) as f32
}

/// W/S or Up/Down walk, A/D or Left/Right turn, Q/E strafe.
pub fn read_input(rl: &RaylibHandle) -> MoveInput {
    use KeyboardKey::*;
    MoveInput {
        forward: axis(rl, &[KEY_W, KEY_UP], &[KEY_S, KEY_DOWN]),
        strafe: axis(rl, &[KEY_E], &[KEY_Q]),
        turn: axis(rl, &[KEY_D, KEY_RIGHT], &[KEY_A, KEY_LEFT]),
    }
}

pub fn process_events(window: &RaylibHandle, player: &mut Player, maze: &Maze) {
    let dt = window.get_frame_time();
    let r = player.radius;
    player.update(read_input(window), dt, |x, y| maze.is_free_with_radius(x, y, r));
}
