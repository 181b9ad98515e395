//! End-to-end frames through the public API.
use std::fs;

use raycaster::config::{ConfigError, SceneConfig};
use raycaster::core::actor::Actor;
use raycaster::core::maze::Maze;
use raycaster::core::player::Player;
use raycaster::render::depth::DepthBuffer;
use raycaster::render::frame::{FrameRenderer, RenderError, Scene};
use raycaster::render::framebuffer::Framebuffer;
use raycaster::render::pixel::Pixel;
use raycaster::render::settings::{InvalidSetting, RenderConfig};
use raycaster::render::textures::{AtlasId, TextureAtlas, TextureManager};
use raycaster::sink::{ImageFormat, ImageSequence};

const W: u32 = 256;
const H: u32 = 128;
// centre of the 3-D half
const CX: i32 = 192;
const CY: i32 = 64;

const WALL: Pixel = Pixel::rgb(0, 0, 255);

fn solid(color: Pixel) -> TextureAtlas {
    TextureAtlas::from_pixels(4, 4, vec![color; 16], 1, 1).unwrap()
}

fn open_map(size: usize) -> Maze {
    Maze::from_rows(&vec![" ".repeat(size); size]).unwrap()
}

struct Stage {
    maze: Maze,
    player: Player,
    textures: TextureManager,
    walls: AtlasId,
}

impl Stage {
    fn new(maze: Maze, player: Player) -> Self {
        let mut textures = TextureManager::new();
        let walls = textures.insert(solid(WALL));
        Self { maze, player, textures, walls }
    }

    fn scene<'a>(&'a self, actors: &'a [Actor]) -> Scene<'a> {
        Scene {
            maze: &self.maze,
            player: &self.player,
            actors,
            textures: &self.textures,
            walls: self.walls,
        }
    }

    fn render(&self, actors: &[Actor]) -> (Framebuffer, DepthBuffer) {
        let renderer = FrameRenderer::new(RenderConfig::default());
        let (mut fb, mut z) = renderer.allocate(W, H);
        renderer.render(&mut fb, &mut z, &self.scene(actors)).unwrap();
        (fb, z)
    }
}

fn view_pixels(fb: &Framebuffer) -> impl Iterator<Item = Pixel> + '_ {
    (0..H as i32).flat_map(move |y| (W as i32 / 2..W as i32).map(move |x| fb.get_pixel(x, y)))
}

#[test]
fn open_map_shows_only_background_in_the_view() {
    let stage = Stage::new(open_map(16), Player::new(8.0, 8.0, 1.0));
    let (fb, z) = stage.render(&[]);
    let bg = RenderConfig::default().background;
    assert!(view_pixels(&fb).all(|p| p == bg));
    assert!(z.as_slice().iter().all(|&d| d == DepthBuffer::FAR));
}

#[test]
fn box_room_distance_is_within_one_step() {
    let maze = Maze::parse("11111\n1   1\n1   1\n1   1\n11111").unwrap();
    let stage = Stage::new(maze, Player::new(2.5, 2.5, 0.0));
    let (fb, z) = stage.render(&[]);
    let step = RenderConfig::default().step;

    // the centre ray runs along the heading, so corrected == true distance
    let centre = z.get((CX - W as i32 / 2) as usize);
    assert!((centre - 1.5).abs() <= step + 1e-4, "{centre}");
    assert_eq!(fb.get_pixel(CX, CY), WALL);
    // 128 / 1.5 rows tall, centred: the top rows stay clear
    assert_eq!(fb.get_pixel(CX, 5), RenderConfig::default().background);
}

#[test]
fn closer_walls_draw_taller_columns() {
    let maze = Maze::parse("1111111111\n1        1\n1        1\n1111111111").unwrap();
    let column = |x: f32| {
        let stage = Stage::new(maze.clone(), Player::new(x, 2.0, 0.0));
        let (fb, _) = stage.render(&[]);
        (0..H as i32).filter(|&y| fb.get_pixel(CX, y) == WALL).count()
    };
    assert!(column(7.0) > column(3.0));
}

#[test]
fn near_actor_covers_far_actor_in_either_order() {
    let mut stage = Stage::new(open_map(16), Player::new(1.0, 8.0, 0.0));
    let far_tex = stage.textures.insert(solid(Pixel::RED));
    let near_tex = stage.textures.insert(solid(Pixel::WHITE));
    let far = Actor::new(10.0, 8.0, far_tex, 0);
    let near = Actor::new(5.0, 8.0, near_tex, 0);

    for order in [[far, near], [near, far]] {
        let (fb, z) = stage.render(&order);
        assert_eq!(fb.get_pixel(CX, CY), Pixel::WHITE);
        assert_eq!(z.get((CX - W as i32 / 2) as usize), 4.0);
    }
}

#[test]
fn walls_hide_actors_behind_them() {
    let maze = Maze::parse("11111111\n1      1\n1  1   1\n1      1\n11111111").unwrap();
    let mut stage = Stage::new(maze, Player::new(1.5, 2.5, 0.0));
    let tex = stage.textures.insert(solid(Pixel::WHITE));
    let (fb, _) = stage.render(&[Actor::new(5.5, 2.5, tex, 0)]);
    assert_eq!(fb.get_pixel(CX, CY), WALL);
    assert!(view_pixels(&fb).all(|p| p != Pixel::WHITE));
}

#[test]
fn transparent_texels_let_the_background_through() {
    let mut stage = Stage::new(open_map(16), Player::new(1.0, 8.0, 0.0));
    // left half transparent, right half red
    let atlas = TextureAtlas::from_pixels(2, 1, vec![Pixel::TRANSPARENT, Pixel::RED], 1, 1).unwrap();
    let tex = stage.textures.insert(atlas);
    let (fb, _) = stage.render(&[Actor::new(5.0, 8.0, tex, 0)]);

    // size 32 centred on column 192: spans 176..208
    assert_eq!(fb.get_pixel(180, CY), RenderConfig::default().background);
    assert_eq!(fb.get_pixel(200, CY), Pixel::RED);
}

#[test]
fn transparent_near_actor_occludes_a_farther_actor() {
    let mut stage = Stage::new(open_map(16), Player::new(1.0, 8.0, 0.0));
    let clear = stage.textures.insert(solid(Pixel::TRANSPARENT));
    let white = stage.textures.insert(solid(Pixel::WHITE));
    let (fb, z) = stage.render(&[Actor::new(5.0, 8.0, clear, 0), Actor::new(10.0, 8.0, white, 0)]);
    assert_eq!(z.get((CX - W as i32 / 2) as usize), 4.0);
    assert_eq!(fb.get_pixel(CX, CY), RenderConfig::default().background);
}

#[test]
fn zero_step_scene_is_rejected_instead_of_rendered() {
    let cfg = SceneConfig::parse(
        r#"
        map = ["111", "1 1", "111"]
        [player]
        x = 1.5
        y = 1.5
        [render]
        step = 0.0
        "#,
    )
    .unwrap();
    let err = cfg.build(std::path::Path::new(".")).err().unwrap();
    assert!(matches!(err, ConfigError::Render(InvalidSetting::NotPositive { name: "step", .. })));

    // a renderer handed the same settings directly refuses before marching
    let world = SceneConfig { render: RenderConfig::default(), ..cfg.clone() }
        .build(std::path::Path::new("."))
        .unwrap();
    let renderer = FrameRenderer::new(cfg.render.clone());
    let (mut fb, mut z) = renderer.allocate(64, 32);
    let err = renderer.render(&mut fb, &mut z, &world.scene()).unwrap_err();
    assert!(matches!(err, RenderError::Settings(InvalidSetting::NotPositive { name: "step", .. })));
}

#[test]
fn actors_behind_the_player_are_not_drawn() {
    let mut stage = Stage::new(open_map(16), Player::new(8.0, 8.0, 0.0));
    let tex = stage.textures.insert(solid(Pixel::WHITE));
    let (fb, _) = stage.render(&[Actor::new(4.0, 8.0, tex, 0)]);
    assert!(view_pixels(&fb).all(|p| p != Pixel::WHITE));
}

#[test]
fn identical_inputs_render_identical_frames() {
    let world = SceneConfig::default().build(std::path::Path::new(".")).unwrap();
    let renderer = FrameRenderer::new(RenderConfig::default());
    let (mut a, mut za) = renderer.allocate(W, H);
    let (mut b, mut zb) = renderer.allocate(W, H);
    renderer.render(&mut a, &mut za, &world.scene()).unwrap();
    renderer.render(&mut b, &mut zb, &world.scene()).unwrap();
    assert_eq!(a.color_buffer, b.color_buffer);
    assert_eq!(za.as_slice(), zb.as_slice());
}

#[test]
fn scene_file_renders_a_numbered_ppm_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let scene = dir.path().join("scene.toml");
    fs::write(
        &scene,
        r#"
        width = 64
        height = 32
        map = ["1111", "1  1", "1  1", "1111"]

        [player]
        x = 1.5
        y = 1.5

        [[actors]]
        x = 2.5
        y = 2.5
        texture = 1
        "#,
    )
    .unwrap();

    let (config, world) = SceneConfig::load_world(&scene).unwrap();
    let renderer = FrameRenderer::new(config.render.clone());
    let (mut fb, mut z) = renderer.allocate(config.width, config.height);
    let mut sink = ImageSequence::new(dir.path().join("frames"), ImageFormat::Ppm).unwrap();
    for _ in 0..3 {
        renderer.render_to(&mut fb, &mut z, &world.scene(), &mut sink).unwrap();
    }

    let header = b"P6\n64 32\n255\n".len() as u64;
    for k in 0..3 {
        let meta = fs::metadata(dir.path().join(format!("frames/frame_{k:03}.ppm"))).unwrap();
        assert_eq!(meta.len(), header + 64 * 32 * 3);
    }
    assert!(!dir.path().join("frames/frame_003.ppm").exists());
}
