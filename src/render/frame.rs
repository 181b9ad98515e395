//! One-frame orchestration.
//!
//! Order within a frame is fixed: clear, minimap tiles, player marker, wall
//! pass (which also traces rays on the minimap and fills the depth buffer),
//! sprite pass, then hand-off to a sink.
use crate::core::actor::Actor;
use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::render::depth::DepthBuffer;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::{Minimap, Viewport};
use crate::render::palette::{Palette, WALL_KINDS};
use crate::render::render3d::render_3d;
use crate::render::settings::{InvalidSetting, RenderConfig, check_fov};
use crate::render::sprites::render_sprites;
use crate::render::textures::{AtlasId, TextureManager};
use crate::sink::{FrameSink, SinkError};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("frame {width}x{height} is too small to split into minimap and view")]
    FrameTooSmall { width: u32, height: u32 },
    #[error("depth buffer has {actual} columns, view has {expected}")]
    DepthSize { expected: usize, actual: usize },
    #[error("no texture atlas registered under {0:?}")]
    MissingAtlas(AtlasId),
    #[error("wall index {index} has no texture (wall atlas holds {count})")]
    WallOutOfAtlas { index: usize, count: usize },
    #[error("actor {actor} uses texture {index}, its atlas holds {count}")]
    ActorOutOfAtlas { actor: usize, index: usize, count: usize },
    #[error("invalid render settings: {0}")]
    Settings(#[from] InvalidSetting),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Everything a frame reads. All borrowed; the renderer never mutates it.
#[derive(Copy, Clone)]
pub struct Scene<'a> {
    pub maze: &'a Maze,
    pub player: &'a Player,
    pub actors: &'a [Actor],
    pub textures: &'a TextureManager,
    pub walls: AtlasId,
}

pub struct FrameRenderer {
    config: RenderConfig,
    palette: Palette,
}

impl FrameRenderer {
    pub fn new(config: RenderConfig) -> Self {
        let palette = Palette::seeded(config.palette_seed, WALL_KINDS);
        Self { config, palette }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A framebuffer and a matching depth buffer for `width × height` frames.
    pub fn allocate(&self, width: u32, height: u32) -> (Framebuffer, DepthBuffer) {
        let mut fb = Framebuffer::new(width, height);
        fb.set_background_color(self.config.background);
        fb.clear();
        let columns = Viewport::split(width, height).view_w.max(0) as usize;
        (fb, DepthBuffer::new(columns))
    }

    /// Checks the settings, the buffers and every texture reference the frame
    /// will follow.
    pub fn validate(&self, fb: &Framebuffer, zbuffer: &DepthBuffer, scene: &Scene<'_>) -> Result<(), RenderError> {
        self.config.check()?;
        check_fov(scene.player.fov)?;
        if fb.width < 2 || fb.height == 0 {
            return Err(RenderError::FrameTooSmall { width: fb.width, height: fb.height });
        }
        let viewport = Viewport::of(fb);
        if zbuffer.len() != viewport.view_w as usize {
            return Err(RenderError::DepthSize { expected: viewport.view_w as usize, actual: zbuffer.len() });
        }

        let walls = scene.textures.get(scene.walls).ok_or(RenderError::MissingAtlas(scene.walls))?;
        if let Some(index) = scene.maze.max_wall_index() {
            if index >= walls.texture_count() {
                return Err(RenderError::WallOutOfAtlas { index, count: walls.texture_count() });
            }
        }

        for (k, actor) in scene.actors.iter().enumerate() {
            let atlas = scene.textures.get(actor.atlas).ok_or(RenderError::MissingAtlas(actor.atlas))?;
            if actor.texture >= atlas.texture_count() {
                return Err(RenderError::ActorOutOfAtlas {
                    actor: k,
                    index: actor.texture,
                    count: atlas.texture_count(),
                });
            }
        }
        Ok(())
    }

    /// Renders one complete frame into `fb`.
    pub fn render(&self, fb: &mut Framebuffer, zbuffer: &mut DepthBuffer, scene: &Scene<'_>) -> Result<(), RenderError> {
        self.validate(fb, zbuffer, scene)?;
        let _span = tracing::info_span!("frame").entered();
        let cfg = &self.config;

        let walls = scene.textures.get(scene.walls).ok_or(RenderError::MissingAtlas(scene.walls))?;
        let viewport = Viewport::of(fb);
        let minimap = Minimap::new(&viewport, scene.maze);
        let player = scene.player;

        fb.set_background_color(cfg.background);
        fb.clear();

        minimap.draw_tiles(fb, scene.maze, &self.palette);
        minimap.stamp(fb, player.pos.x, player.pos.y, cfg.marker_size, cfg.player_color);

        render_3d(fb, scene.maze, player, walls, zbuffer, cfg, &viewport, Some(&minimap));
        render_sprites(fb, player, scene.actors, scene.textures, zbuffer, cfg, &viewport, &minimap);

        tracing::debug!(
            x = player.pos.x,
            y = player.pos.y,
            heading = player.a,
            actors = scene.actors.len(),
            "frame rendered"
        );
        Ok(())
    }

    /// Renders one frame and passes it to `sink`.
    pub fn render_to(
        &self,
        fb: &mut Framebuffer,
        zbuffer: &mut DepthBuffer,
        scene: &Scene<'_>,
        sink: &mut dyn FrameSink,
    ) -> Result<(), RenderError> {
        self.render(fb, zbuffer, scene)?;
        sink.present(fb)?;
        Ok(())
    }
}
