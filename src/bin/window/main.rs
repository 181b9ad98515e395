//! Live view: renders the scene every frame into the CPU framebuffer and
//! streams it to a raylib texture.
mod process_events;

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::Parser;
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use tracing_subscriber::EnvFilter;

use raycaster::config::SceneConfig;
use raycaster::render::frame::FrameRenderer;
use process_events::process_events;

#[derive(Parser)]
#[command(name = "raycaster-window", about = "Walk a raycaster scene in a window")]
struct Cli {
    /// Scene file (TOML); the built-in demo scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let (config, mut world) = match &cli.scene {
        Some(p) => SceneConfig::load_world(p).with_context(|| format!("loading scene {}", p.display()))?,
        None => {
            let config = SceneConfig::default();
            let world = config.build(Path::new("."))?;
            (config, world)
        }
    };

    let renderer = FrameRenderer::new(config.render.clone());
    let (mut framebuffer, mut zbuffer) = renderer.allocate(config.width, config.height);
    // fail before opening a window if the scene cannot be drawn
    renderer.validate(&framebuffer, &zbuffer, &world.scene())?;

    let (mut window, raylib_thread) = raylib::init()
        .size(config.width as i32, config.height as i32)
        .title("Raycaster")
        .build();
    window.set_target_fps(60);

    // persistent GPU texture, re-uploaded every frame
    let image = Image::gen_image_color(config.width as i32, config.height as i32, Color::BLACK);
    let mut texture = window
        .load_texture_from_image(&raylib_thread, &image)
        .map_err(|e| anyhow!("{e:?}"))?;

    while !window.window_should_close() {
        process_events(&window, &mut world.player, &world.maze);

        renderer.render(&mut framebuffer, &mut zbuffer, &world.scene())?;
        let _ = texture.update_texture(framebuffer.as_bytes());

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&texture, 0, 0, Color::WHITE);
        d.draw_fps(10, 10);
    }
    Ok(())
}
