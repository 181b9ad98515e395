use std::f32::consts::TAU;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use raycaster::config::SceneConfig;
use raycaster::core::angle::normalize_angle;
use raycaster::render::frame::FrameRenderer;
use raycaster::sink::{ImageFormat, ImageSequence};
use raycaster::world::World;

#[derive(Parser)]
#[command(name = "raycaster", version, about = "Render raycaster frames to image files")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a full turn in place as a numbered image sequence
    Render {
        /// Scene file (TOML); the built-in demo scene when omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// Output directory
        #[arg(short, long, default_value = "frames")]
        out: PathBuf,
        /// Number of frames in the turn
        #[arg(short = 'n', long, default_value = "360")]
        frames: usize,
        /// Image format of the written frames
        #[arg(short, long, value_enum, default_value_t = Format::Ppm)]
        format: Format,
    },
    /// Print a summary of a scene
    Info {
        /// Scene file (TOML); the built-in demo scene when omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Ppm,
    Png,
}

impl From<Format> for ImageFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Ppm => ImageFormat::Ppm,
            Format::Png => ImageFormat::Png,
        }
    }
}

fn load_scene(path: Option<&Path>) -> anyhow::Result<(SceneConfig, World)> {
    match path {
        Some(p) => SceneConfig::load_world(p).with_context(|| format!("loading scene {}", p.display())),
        None => {
            let config = SceneConfig::default();
            let world = config.build(Path::new(".")).context("building demo scene")?;
            Ok((config, world))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Render { scene, out, frames, format } => {
            let (config, mut world) = load_scene(scene.as_deref())?;
            let renderer = FrameRenderer::new(config.render.clone());
            let (mut fb, mut zbuffer) = renderer.allocate(config.width, config.height);
            let mut sink = ImageSequence::new(&out, format.into())
                .with_context(|| format!("creating output directory {}", out.display()))?;

            let turn = if frames == 0 { 0.0 } else { TAU / frames as f32 };
            let started = Instant::now();
            for _ in 0..frames {
                world.player.a = normalize_angle(world.player.a + turn);
                renderer.render_to(&mut fb, &mut zbuffer, &world.scene(), &mut sink)?;
            }
            tracing::info!(
                frames = sink.written(),
                dir = %sink.dir().display(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "sequence written"
            );
        }
        Commands::Info { scene } => {
            let (config, world) = load_scene(scene.as_deref())?;
            println!("raycaster v{}", env!("CARGO_PKG_VERSION"));
            println!("frame: {}x{}", config.width, config.height);
            println!(
                "map: {}x{}, {} wall cells, highest wall index {:?}",
                world.maze.width(),
                world.maze.height(),
                world.maze.walls().count(),
                world.maze.max_wall_index()
            );
            println!(
                "player: ({:.3}, {:.3}) heading {:.3} fov {:.3}",
                world.player.pos.x, world.player.pos.y, world.player.a, world.player.fov
            );
            for (id, atlas) in world.textures.iter() {
                let (w, h) = atlas.size();
                println!(
                    "atlas {}: {w}x{h}, {}x{} textures of {}x{}",
                    id.0,
                    atlas.rows(),
                    atlas.cols(),
                    atlas.texture_width(),
                    atlas.texture_height()
                );
            }
            println!("actors: {}", world.actors.len());
        }
    }
    Ok(())
}
