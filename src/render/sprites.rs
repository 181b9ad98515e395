//! Billboard sprites.
//!
//! Actors are drawn in the order given. Occlusion is resolved per screen
//! column through the depth buffer the wall pass left behind: a column is
//! drawn only when the actor is nearer than what the buffer holds, and the
//! buffer then takes the actor's distance so farther actors drawn later stay
//! hidden behind it. Transparent texels skip the pixel write, not the depth
//! update.
use glam::Vec2;

use crate::core::actor::Actor;
use crate::core::angle::normalize_angle;
use crate::core::player::Player;
use crate::render::depth::DepthBuffer;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::{Minimap, Viewport};
use crate::render::settings::RenderConfig;
use crate::render::textures::{TextureAtlas, TextureManager};

/// Screen-space square an actor covers in the 3-D view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteProjection {
    /// Signed angle from the view direction, in `(-π, π]`.
    pub bearing: f32,
    pub distance: f32,
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

/// Projects `pos` into the 3-D view. `None` when the sprite cannot touch any
/// view column.
pub fn project_sprite(player: &Player, viewport: &Viewport, pos: Vec2) -> Option<SpriteProjection> {
    let dx = pos.x - player.pos.x;
    let dy = pos.y - player.pos.y;
    let distance = dx.hypot(dy);
    if !distance.is_finite() {
        return None;
    }
    let bearing = normalize_angle(dy.atan2(dx) - player.a);

    let n = viewport.view_w as f32;
    let h = viewport.height as f32;
    let center_x = viewport.view_left as f32 + n * 0.5 + (bearing / player.fov) * n;
    let size = (h / distance).min(h);
    let left = center_x - size * 0.5;

    if !left.is_finite() || left + size <= viewport.view_left as f32 || left >= viewport.view_right() as f32 {
        return None;
    }
    Some(SpriteProjection { bearing, distance, left, top: h * 0.5 - size * 0.5, size })
}

/// Draws one projected sprite with per-column depth testing. Every column that
/// passes the test takes the sprite's distance; texels with zero alpha are
/// only left unwritten.
pub fn draw_sprite(
    fb: &mut Framebuffer,
    atlas: &TextureAtlas,
    row: usize,
    col: usize,
    sprite: &SpriteProjection,
    zbuffer: &mut DepthBuffer,
    viewport: &Viewport,
) {
    let x0 = (sprite.left.floor() as i32).max(viewport.view_left);
    let x1 = ((sprite.left + sprite.size).ceil() as i32).min(viewport.view_right());
    let y0 = (sprite.top.floor() as i32).max(0);
    let y1 = ((sprite.top + sprite.size).ceil() as i32).min(viewport.height);

    for x in x0..x1 {
        let column = (x - viewport.view_left) as usize;
        if !(zbuffer.get(column) > sprite.distance) {
            continue;
        }
        // the column belongs to this sprite now, opaque texels or not
        zbuffer.set(column, sprite.distance);
        let u = ((x as f32 - sprite.left) / sprite.size).clamp(0.0, 1.0);
        for y in y0..y1 {
            let v = ((y as f32 - sprite.top) / sprite.size).clamp(0.0, 1.0);
            let texel = atlas.sample(row, col, u, v);
            if texel.is_transparent() {
                continue;
            }
            fb.set_pixel_color(x, y, texel);
        }
    }
}

/// Stamps every actor on the minimap and composites the visible ones into the
/// 3-D view. Must run after the wall pass has filled `zbuffer`.
pub fn render_sprites(
    fb: &mut Framebuffer,
    player: &Player,
    actors: &[Actor],
    textures: &TextureManager,
    zbuffer: &mut DepthBuffer,
    cfg: &RenderConfig,
    viewport: &Viewport,
    minimap: &Minimap,
) {
    for actor in actors {
        minimap.stamp(fb, actor.pos.x, actor.pos.y, cfg.marker_size, cfg.actor_color);

        let Some(atlas) = textures.get(actor.atlas) else { continue };
        let Some((row, col)) = atlas.cell_of(actor.texture) else { continue };
        if let Some(sprite) = project_sprite(player, viewport, actor.pos) {
            draw_sprite(fb, atlas, row, col, &sprite, zbuffer, viewport);
        }
    }
}
