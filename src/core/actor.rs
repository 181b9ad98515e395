use glam::Vec2;

use crate::render::textures::AtlasId;

/// A billboard in the world: position plus a sub-texture of a shared atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Actor {
    pub pos: Vec2,
    pub atlas: AtlasId,
    pub texture: usize,
}

impl Actor {
    pub fn new(x: f32, y: f32, atlas: AtlasId, texture: usize) -> Self {
        Self { pos: Vec2::new(x, y), atlas, texture }
    }
}
