//! Ray marching against the maze grid.
use glam::Vec2;

use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::Minimap;
use crate::render::settings::{MAX_MARCH_STEPS, RenderConfig};

/// Distances at or below this are treated as "touching the wall".
pub const MIN_DISTANCE: f32 = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersect {
    /// Ray length `t` at the hit, before fish-eye correction.
    pub distance: f32,
    pub impact: char,
    pub wall: usize,
    pub cell: (i64, i64),
    pub point: Vec2,
    /// The ray crossed an `x = const` cell boundary (a west/east face).
    pub vertical: bool,
    /// Horizontal texture coordinate along the struck face, in `[0, 1)`.
    pub tx: f32,
}

/// Marches from `origin` along angle `a` in `cfg.step` increments and returns
/// the first sample inside a wall cell. `on_step` sees every sample point
/// before it is tested.
///
/// Face detection nudges the hit point back along the ray's x component by
/// `cfg.face_probe`; if that crosses a cell boundary the hit is on a vertical
/// face. Exact corner hits may be classified either way.
///
/// Expects a config that passed [`RenderConfig::check`]; a step that is not
/// positive marches nothing.
pub fn march(
    maze: &Maze,
    origin: Vec2,
    a: f32,
    cfg: &RenderConfig,
    mut on_step: impl FnMut(f32, f32),
) -> Option<Intersect> {
    if !(cfg.step > 0.0) {
        return None;
    }
    let (sin, cos) = a.sin_cos();
    let steps = ((cfg.max_range / cfg.step) as usize).min(MAX_MARCH_STEPS);

    for k in 0..steps {
        let t = k as f32 * cfg.step;
        let cx = origin.x + t * cos;
        let cy = origin.y + t * sin;

        // a straight ray never re-enters the grid once it has left it
        if !maze.contains_point(cx, cy) {
            return None;
        }
        on_step(cx, cy);

        let (i, j) = (cx.floor() as i64, cy.floor() as i64);
        if let Some(wall) = maze.wall_at(i, j) {
            let probe = cx - cfg.face_probe * cos;
            let vertical = probe.floor() != cx.floor();
            let tx = if vertical { cy - cy.floor() } else { cx - cx.floor() };
            return Some(Intersect {
                distance: t,
                impact: maze.cell(i, j).unwrap_or(' '),
                wall,
                cell: (i, j),
                point: Vec2::new(cx, cy),
                vertical,
                tx,
            });
        }
    }
    None
}

/// Casts one ray from the player, tracing its path on the minimap when one
/// is given.
pub fn cast_ray(
    framebuffer: &mut Framebuffer,
    maze: &Maze,
    player: &Player,
    a: f32,
    cfg: &RenderConfig,
    minimap: Option<&Minimap>,
) -> Option<Intersect> {
    match minimap {
        Some(mm) => march(maze, player.pos, a, cfg, |x, y| mm.plot(framebuffer, x, y, cfg.trace_color)),
        None => march(maze, player.pos, a, cfg, |_, _| {}),
    }
}

/// Ray length projected onto the view axis, removing fish-eye bulge.
#[inline]
pub fn corrected_distance(t: f32, ray_a: f32, heading: f32) -> f32 {
    t * (ray_a - heading).cos()
}

/// On-screen height of a wall column at distance `dist` for a view of
/// `height` rows. Always in `1..=max_column_scale * height` for a non-empty
/// view.
#[inline]
pub fn column_height(height: i32, dist: f32, cfg: &RenderConfig) -> i32 {
    if height <= 0 {
        return 0;
    }
    let cap = (cfg.max_column_scale * height as f32).max(1.0);
    if !(dist > MIN_DISTANCE) {
        return cap as i32;
    }
    (height as f32 / dist).max(1.0).min(cap) as i32
}
