//! Screen split and the top-down minimap.
//!
//! The frame is split in two: the minimap takes the left half, the 3-D view
//! the remaining columns. Map units scale independently on each axis so any
//! map fits the minimap rectangle.
use crate::core::maze::Maze;
use crate::render::framebuffer::Framebuffer;
use crate::render::palette::Palette;
use crate::render::pixel::Pixel;

/// Column ranges of the two halves of a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub minimap_w: i32,
    pub view_left: i32,
    pub view_w: i32,
    pub height: i32,
}

impl Viewport {
    pub fn split(width: u32, height: u32) -> Self {
        let minimap_w = (width / 2) as i32;
        Self {
            minimap_w,
            view_left: minimap_w,
            view_w: width as i32 - minimap_w,
            height: height as i32,
        }
    }

    pub fn of(fb: &Framebuffer) -> Self {
        Self::split(fb.width, fb.height)
    }

    #[inline]
    pub fn view_right(&self) -> i32 {
        self.view_left + self.view_w
    }
}

/// Map-space to minimap-space transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Minimap {
    pub width: i32,
    pub height: i32,
    scale_x: f32,
    scale_y: f32,
}

impl Minimap {
    pub fn new(viewport: &Viewport, maze: &Maze) -> Self {
        Self {
            width: viewport.minimap_w,
            height: viewport.height,
            scale_x: viewport.minimap_w as f32 / maze.width() as f32,
            scale_y: viewport.height as f32 / maze.height() as f32,
        }
    }

    #[inline]
    pub fn to_screen(&self, x: f32, y: f32) -> (i32, i32) {
        ((x * self.scale_x).floor() as i32, (y * self.scale_y).floor() as i32)
    }

    #[inline]
    pub fn contains(&self, sx: i32, sy: i32) -> bool {
        sx >= 0 && sy >= 0 && sx < self.width && sy < self.height
    }

    /// Writes one pixel at map point `(x, y)` if it falls inside the minimap.
    #[inline]
    pub fn plot(&self, fb: &mut Framebuffer, x: f32, y: f32, color: Pixel) {
        let (sx, sy) = self.to_screen(x, y);
        if self.contains(sx, sy) {
            fb.set_pixel_color(sx, sy, color);
        }
    }

    /// One filled tile per wall cell, colored by wall index.
    pub fn draw_tiles(&self, fb: &mut Framebuffer, maze: &Maze, palette: &Palette) {
        for (i, j, w) in maze.walls() {
            let (x0, y0) = self.to_screen(i as f32, j as f32);
            let (x1, y1) = self.to_screen(i as f32 + 1.0, j as f32 + 1.0);
            fb.set_current_color(palette.color(w));
            fb.fill_rect(x0, y0, x1.min(self.width), y1.min(self.height));
        }
    }

    /// Square marker of `size` pixels centred on map point `(x, y)`, clipped to
    /// the minimap.
    pub fn stamp(&self, fb: &mut Framebuffer, x: f32, y: f32, size: i32, color: Pixel) {
        let (sx, sy) = self.to_screen(x, y);
        let x0 = (sx - size / 2).max(0);
        let y0 = (sy - size / 2).max(0);
        let x1 = (sx - size / 2 + size).min(self.width);
        let y1 = (sy - size / 2 + size).min(self.height);
        fb.set_current_color(color);
        fb.fill_rect(x0, y0, x1, y1);
    }
}
