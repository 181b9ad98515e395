//! Minimap tile colors, generated from an explicit seed so frames are
//! reproducible.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::pixel::Pixel;

/// One color per possible wall index (`'0'..'9'`, `'a'..'z'`).
pub const WALL_KINDS: usize = 36;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Pixel>,
}

impl Palette {
    pub fn seeded(seed: u64, len: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let colors = (0..len.max(1))
            .map(|_| Pixel::rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255)))
            .collect();
        Self { colors }
    }

    pub fn from_colors(colors: Vec<Pixel>) -> Self {
        if colors.is_empty() {
            return Self { colors: vec![Pixel::WHITE] };
        }
        Self { colors }
    }

    /// Color for wall index `index`; indices past the end wrap around.
    #[inline]
    pub fn color(&self, index: usize) -> Pixel {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Pixel] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_palette() {
        assert_eq!(Palette::seeded(123456, 10), Palette::seeded(123456, 10));
        assert_ne!(Palette::seeded(1, 10), Palette::seeded(2, 10));
    }

    #[test]
    fn colors_are_opaque_and_wrap() {
        let p = Palette::seeded(7, 4);
        assert!(p.colors().iter().all(|c| c.alpha() == 255));
        assert_eq!(p.color(5), p.color(1));
        assert_eq!(Palette::seeded(7, 0).len(), 1);
    }
}
