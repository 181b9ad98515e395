//! Rendering utilities and 3D renderer.
//!
//! Re-exports:
//! - `pixel`: packed RGBA color
//! - `framebuffer`: CPU framebuffer with clipped writes
//! - `depth`: per-column depth buffer
//! - `textures`: texture atlases and the atlas registry
//! - `palette`: seeded minimap colors
//! - `minimap`: screen split and top-down map drawing
//! - `settings`: caster and compositor tunables
//! - `casters`: ray marching and projection helpers
//! - `render3d`: column renderer for walls
//! - `sprites`: billboard projection and compositing
//! - `frame`: per-frame orchestration

pub mod casters;
pub mod depth;
pub mod frame;
pub mod framebuffer;
pub mod minimap;
pub mod palette;
pub mod pixel;
pub mod render3d;
pub mod settings;
pub mod sprites;
pub mod textures;
