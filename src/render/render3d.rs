//! Wall pass of the 3-D view: one textured column per screen column.
use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::render::casters::{cast_ray, column_height, corrected_distance};
use crate::render::depth::DepthBuffer;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::{Minimap, Viewport};
use crate::render::settings::RenderConfig;
use crate::render::textures::TextureAtlas;

/// Casts `viewport.view_w` rays across the player's field of view, draws the
/// wall columns and leaves each column's corrected distance in `zbuffer`.
///
/// Columns without a hit keep [`DepthBuffer::FAR`]. Every wall index in
/// `maze` must name a sub-texture of `walls`; columns whose wall has no
/// texture are left undrawn.
pub fn render_3d(
    fb: &mut Framebuffer,
    maze: &Maze,
    player: &Player,
    walls: &TextureAtlas,
    zbuffer: &mut DepthBuffer,
    cfg: &RenderConfig,
    viewport: &Viewport,
    minimap: Option<&Minimap>,
) {
    let n = viewport.view_w;
    let h = viewport.height;
    zbuffer.reset();

    for i in 0..n {
        let t = i as f32 / n as f32;
        let ray_a = player.a - (player.fov * 0.5) + (player.fov * t);
        let Some(hit) = cast_ray(fb, maze, player, ray_a, cfg, minimap) else {
            continue;
        };

        let d = corrected_distance(hit.distance, ray_a, player.a);
        zbuffer.set(i as usize, d);

        let Some((row, col)) = walls.cell_of(hit.wall) else {
            continue;
        };
        let col_h = column_height(h, d, cfg);
        if col_h <= 0 {
            continue;
        }
        let top = h / 2 - col_h / 2;
        let x = viewport.view_left + i;
        let u = hit.tx.clamp(0.0, 1.0);

        // only the rows that land inside the frame
        let j0 = (-top).max(0);
        let j1 = (h - top).min(col_h);
        for j in j0..j1 {
            let v = j as f32 / col_h as f32;
            fb.set_pixel_color(x, top + j, walls.sample(row, col, u, v));
        }
    }
}
