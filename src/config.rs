//! Scene configuration, read from TOML once at startup.
//!
//! Every field has a default, so an empty file describes the demo scene: a
//! 16×16 maze, four actors and procedural textures.
use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::actor::Actor;
use crate::core::maze::{Maze, MapError};
use crate::core::player::Player;
use crate::render::palette::Palette;
use crate::render::pixel::Pixel;
use crate::render::settings::{InvalidSetting, RenderConfig, check_fov};
use crate::render::textures::{AtlasError, AtlasId, TextureAtlas, TextureManager};
use crate::world::World;

pub const DEFAULT_MAP: [&str; 16] = [
    "0000222222220000",
    "1              0",
    "1      11111   0",
    "1     0        0",
    "0     0  1110000",
    "0     3        0",
    "0   10000      0",
    "0   0   11100  0",
    "0   0   0      0",
    "0   0   1  00000",
    "0       1      0",
    "2       1      0",
    "0       0      0",
    "0 0000000      0",
    "0              0",
    "0002222222200000",
];

/// Colors of the procedural sprite atlas used when no sprite file is given.
const DEMO_SPRITE_COLORS: [Pixel; 4] = [
    Pixel::rgb(220, 60, 60),
    Pixel::rgb(60, 200, 90),
    Pixel::rgb(70, 110, 230),
    Pixel::rgb(240, 170, 40),
];

/// Side of each procedural texture, in texels.
const PROCEDURAL_TEXTURE_SIZE: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("map error: {0}")]
    Map(#[from] MapError),
    #[error("atlas {path}: {source}")]
    Atlas { path: String, source: AtlasError },
    #[error("procedural atlas: {0}")]
    Procedural(#[from] AtlasError),
    #[error("actor {actor} uses sprite atlas {sprite}, only {count} defined")]
    UnknownSprite { actor: usize, sprite: usize, count: usize },
    #[error("frame size {width}x{height} is too small")]
    FrameSize { width: u32, height: u32 },
    #[error("invalid render settings: {0}")]
    Render(#[from] InvalidSetting),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub fov: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { x: 3.456, y: 2.345, angle: PI / 2.05, fov: PI / 3.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtlasConfig {
    pub path: PathBuf,
    #[serde(default = "one")]
    pub rows: usize,
    pub cols: usize,
}

fn one() -> usize {
    1
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorConfig {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub sprite: usize,
    #[serde(default)]
    pub texture: usize,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub map: Vec<String>,
    pub player: PlayerConfig,
    pub walls: Option<AtlasConfig>,
    pub sprites: Vec<AtlasConfig>,
    pub actors: Vec<ActorConfig>,
    pub render: RenderConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let actor = |x, y, texture| ActorConfig { x, y, sprite: 0, texture };
        Self {
            width: 1024,
            height: 512,
            map: DEFAULT_MAP.iter().map(|r| r.to_string()).collect(),
            player: PlayerConfig::default(),
            walls: None,
            sprites: Vec::new(),
            actors: vec![
                actor(3.523, 3.812, 2),
                actor(1.834, 8.765, 0),
                actor(5.323, 5.365, 1),
                actor(4.123, 10.265, 1),
            ],
            render: RenderConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::parse(&fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    /// Loads the config at `path` and builds its world, resolving atlas paths
    /// against the config file's directory.
    pub fn load_world(path: impl AsRef<Path>) -> Result<(Self, World), ConfigError> {
        let path = path.as_ref();
        let config = Self::load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let world = config.build(base)?;
        Ok((config, world))
    }

    /// Turns the config into owned world data. Relative atlas paths are
    /// resolved against `base_dir`.
    pub fn build(&self, base_dir: &Path) -> Result<World, ConfigError> {
        if self.width < 2 || self.height == 0 {
            return Err(ConfigError::FrameSize { width: self.width, height: self.height });
        }
        self.render.check()?;
        check_fov(self.player.fov)?;
        let maze = Maze::from_rows(&self.map)?;
        let player = Player::new(self.player.x, self.player.y, self.player.angle).with_fov(self.player.fov);
        let mut textures = TextureManager::new();

        let walls = match &self.walls {
            Some(atlas) => textures.insert(load_atlas(base_dir, atlas)?),
            None => {
                let kinds = maze.max_wall_index().map_or(1, |m| m + 1);
                tracing::warn!(kinds, "no wall atlas configured, using procedural checker textures");
                // same seed as the minimap palette, so tiles and walls agree
                let palette = Palette::seeded(self.render.palette_seed, kinds);
                let size = PROCEDURAL_TEXTURE_SIZE;
                textures.insert(TextureAtlas::checker(size, size, palette.colors())?)
            }
        };

        let mut sprite_ids: Vec<AtlasId> = Vec::with_capacity(self.sprites.len());
        for atlas in &self.sprites {
            sprite_ids.push(textures.insert(load_atlas(base_dir, atlas)?));
        }
        if sprite_ids.is_empty() && !self.actors.is_empty() {
            tracing::warn!("no sprite atlas configured, using procedural sprites");
            sprite_ids.push(textures.insert(TextureAtlas::discs(PROCEDURAL_TEXTURE_SIZE, &DEMO_SPRITE_COLORS)?));
        }

        let actors = self
            .actors
            .iter()
            .enumerate()
            .map(|(k, a)| {
                let atlas = sprite_ids.get(a.sprite).copied().ok_or(ConfigError::UnknownSprite {
                    actor: k,
                    sprite: a.sprite,
                    count: sprite_ids.len(),
                })?;
                Ok(Actor::new(a.x, a.y, atlas, a.texture))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        tracing::info!(
            map_w = maze.width(),
            map_h = maze.height(),
            atlases = textures.len(),
            actors = actors.len(),
            "scene built"
        );
        Ok(World { maze, player, actors, textures, walls })
    }
}

fn load_atlas(base_dir: &Path, atlas: &AtlasConfig) -> Result<TextureAtlas, ConfigError> {
    let path = if atlas.path.is_absolute() { atlas.path.clone() } else { base_dir.join(&atlas.path) };
    TextureAtlas::load_png(&path, atlas.rows, atlas.cols).map_err(|source| ConfigError::Atlas {
        path: path.display().to_string(),
        source,
    })
}
