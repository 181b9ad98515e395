//! Software raycaster: a top-down minimap and a textured first-person view
//! rendered side by side into one CPU pixel buffer.
//!
//! Re-exports:
//! - `core`: maze, player, actors, angle math
//! - `render`: pixel buffer, atlases, wall caster, sprites, frame driver
//! - `sink`: PPM/PNG frame output
//! - `config`: TOML scene description
//! - `world`: owned scene data

pub mod config;
pub mod core;
pub mod render;
pub mod sink;
pub mod world;

pub use config::{ConfigError, SceneConfig};
pub use render::frame::{FrameRenderer, RenderError, Scene};
pub use render::framebuffer::Framebuffer;
pub use render::pixel::Pixel;
pub use world::World;
