//! A fully loaded scene: the data a frame renders, owned in one place.
use crate::core::actor::Actor;
use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::render::frame::Scene;
use crate::render::textures::{AtlasId, TextureManager};

pub struct World {
    pub maze: Maze,
    pub player: Player,
    pub actors: Vec<Actor>,
    pub textures: TextureManager,
    pub walls: AtlasId,
}

impl World {
    /// Borrowed view handed to the renderer each frame.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            maze: &self.maze,
            player: &self.player,
            actors: &self.actors,
            textures: &self.textures,
            walls: self.walls,
        }
    }
}
