//! Packed RGBA pixel.
//!
//! Byte order is `r | g << 8 | b << 16 | a << 24`, so a slice of pixels laid
//! out in memory on a little-endian target reads as plain RGBA8 bytes.
use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

/// Written as `[r, g, b]` or `[r, g, b, a]` in config files.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Deserialize)]
#[serde(from = "ColorSpec")]
pub struct Pixel(pub u32);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Rgba([u8; 4]),
    Rgb([u8; 3]),
}

impl From<ColorSpec> for Pixel {
    fn from(c: ColorSpec) -> Self {
        match c {
            ColorSpec::Rgba(c) => c.into(),
            ColorSpec::Rgb(c) => c.into(),
        }
    }
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
    pub const RED: Pixel = Pixel::rgb(255, 0, 0);
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel((r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24))
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn unpack(self) -> (u8, u8, u8, u8) {
        (
            (self.0 & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 24) & 0xff) as u8,
        )
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Zero alpha means "do not draw" for sprite texels.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    #[inline]
    pub const fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b, a) = self.unpack();
        [r, g, b, a]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Pixel::rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Pixel::rgba(r, g, b, a)
    }
}
