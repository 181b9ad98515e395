//! CPU framebuffer: the single mutable render target of a frame.
use crate::render::pixel::Pixel;

pub struct Framebuffer {
    pub color_buffer: Vec<Pixel>,
    pub width: u32,
    pub height: u32,
    pub background_color: Pixel,
    pub current_color: Pixel,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        let bg = Pixel::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Pixel::WHITE,
        }
    }

    /// Buffer index of `(x, y)`, or `None` outside the frame.
    ///
    /// Every 2-D access in the crate goes through here.
    #[inline]
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        let c = self.current_color;
        self.set_pixel_color(x, y, c);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: i32, y: i32, color: Pixel) {
        if let Some(i) = self.offset(x, y) {
            self.color_buffer[i] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        match self.offset(x, y) {
            Some(i) => self.color_buffer[i],
            None => self.background_color,
        }
    }

    #[inline] pub fn set_current_color(&mut self, c: Pixel) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: Pixel) { self.background_color = c; }

    /// Fills `[x0, x1) × [y0, y1)` with the current color, clipped to the frame.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i32);
        let y1 = y1.min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y);
            }
        }
    }

    /// Raw packed words as bytes, for handing the frame to a texture upload
    /// without copying. On little-endian targets this is RGBA8.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// RGBA8 bytes independent of target endianness.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        self.color_buffer.iter().flat_map(|p| p.to_rgba8()).collect()
    }

    /// RGB8 bytes, alpha dropped.
    pub fn rgb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|p| {
                let (r, g, b, _) = p.unpack();
                [r, g, b]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_out_of_frame_coordinates() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.offset(0, 0), Some(0));
        assert_eq!(fb.offset(3, 2), Some(11));
        assert_eq!(fb.offset(4, 0), None);
        assert_eq!(fb.offset(0, 3), None);
        assert_eq!(fb.offset(-1, 1), None);
    }

    #[test]
    fn writes_outside_the_frame_are_ignored() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_pixel_color(-1, 0, Pixel::RED);
        fb.set_pixel_color(2, 1, Pixel::RED);
        assert!(fb.color_buffer.iter().all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn clear_uses_background_color() {
        let mut fb = Framebuffer::new(3, 3);
        fb.set_background_color(Pixel::rgb(60, 60, 60));
        fb.set_pixel_color(1, 1, Pixel::RED);
        fb.clear();
        assert!(fb.color_buffer.iter().all(|&p| p == Pixel::rgb(60, 60, 60)));
    }

    #[test]
    fn fill_rect_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_current_color(Pixel::RED);
        fb.fill_rect(-2, -2, 2, 2);
        assert_eq!(fb.get_pixel(0, 0), Pixel::RED);
        assert_eq!(fb.get_pixel(1, 1), Pixel::RED);
        assert_eq!(fb.get_pixel(2, 2), Pixel::BLACK);
        assert_eq!(fb.color_buffer.iter().filter(|&&p| p == Pixel::RED).count(), 4);
    }

    #[test]
    fn byte_views_have_expected_lengths() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel_color(1, 0, Pixel::rgba(1, 2, 3, 4));
        assert_eq!(fb.as_bytes().len(), 8);
        assert_eq!(fb.rgba_bytes()[4..], [1, 2, 3, 4]);
        assert_eq!(fb.rgb_bytes(), vec![0, 0, 0, 1, 2, 3]);
    }
}
