//! Texture atlases and the table that owns them.
//!
//! An atlas is one RGBA image cut into `rows × cols` equally sized
//! sub-textures. Walls and actors refer to atlases through [`AtlasId`]
//! handles into a [`TextureManager`], never by owning them.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::render::pixel::Pixel;

#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("atlas image must have 4 channels (RGBA), got {0}")]
    Channels(usize),
    #[error("atlas image must use 8 bits per channel")]
    BitDepth,
    #[error("atlas rows and columns must be positive (rows={rows}, cols={cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("atlas {width}x{height} does not divide into {rows} rows x {cols} columns")]
    NotDivisible { width: usize, height: usize, rows: usize, cols: usize },
    #[error("expected {expected} pixels of atlas data, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

/// Immutable, decoded texture atlas.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    width: usize,
    height: usize,
    rows: usize,
    cols: usize,
    tex_w: usize,
    tex_h: usize,
    data: Vec<Pixel>,
}

impl TextureAtlas {
    /// Builds an atlas from already packed pixels.
    pub fn from_pixels(
        width: usize,
        height: usize,
        data: Vec<Pixel>,
        rows: usize,
        cols: usize,
    ) -> Result<Self, AtlasError> {
        if rows == 0 || cols == 0 {
            return Err(AtlasError::EmptyGrid { rows, cols });
        }
        if width == 0 || height == 0 || width % cols != 0 || height % rows != 0 {
            return Err(AtlasError::NotDivisible { width, height, rows, cols });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(AtlasError::BufferSize { expected, actual: data.len() });
        }
        Ok(Self {
            width,
            height,
            rows,
            cols,
            tex_w: width / cols,
            tex_h: height / rows,
            data,
        })
    }

    /// Builds an atlas from a decoded byte buffer. Only 4-channel RGBA input is
    /// accepted.
    pub fn from_rgba(
        bytes: &[u8],
        width: u32,
        height: u32,
        channels: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Self, AtlasError> {
        if channels != 4 {
            return Err(AtlasError::Channels(channels));
        }
        let expected = width as usize * height as usize;
        if bytes.len() != expected * 4 {
            return Err(AtlasError::BufferSize { expected, actual: bytes.len() / 4 });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| Pixel::rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_pixels(width as usize, height as usize, data, rows, cols)
    }

    /// Decodes an 8-bit RGBA PNG file.
    pub fn load_png(path: impl AsRef<Path>, rows: usize, cols: usize) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        let decoder = png::Decoder::new(BufReader::new(File::open(path)?));
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        if info.bit_depth != png::BitDepth::Eight {
            return Err(AtlasError::BitDepth);
        }
        let atlas = Self::from_rgba(
            &buf[..info.buffer_size()],
            info.width,
            info.height,
            info.color_type.samples(),
            rows,
            cols,
        )?;
        tracing::info!(
            path = %path.display(),
            width = atlas.width,
            height = atlas.height,
            textures = atlas.texture_count(),
            "loaded texture atlas"
        );
        Ok(atlas)
    }

    /// Procedural wall atlas: one row of checkerboard textures, one per color.
    pub fn checker(tex_w: usize, tex_h: usize, colors: &[Pixel]) -> Result<Self, AtlasError> {
        let cols = colors.len();
        let width = tex_w * cols;
        let mut px = vec![Pixel::BLACK; width * tex_h];
        let cell = 8usize;
        for (k, &base) in colors.iter().enumerate() {
            for y in 0..tex_h {
                for x in 0..tex_w {
                    let lit = ((x / cell) + (y / cell)) % 2 == 0;
                    px[y * width + k * tex_w + x] = if lit { mix(base, Pixel::WHITE, 48) } else { base };
                }
            }
        }
        Self::from_pixels(width, tex_h, px, 1, cols)
    }

    /// Procedural sprite atlas: one row of filled ellipses on a transparent
    /// background, one per color.
    pub fn discs(size: usize, colors: &[Pixel]) -> Result<Self, AtlasError> {
        let cols = colors.len();
        let width = size * cols;
        let mut px = vec![Pixel::TRANSPARENT; width * size];
        let cx = size as f32 * 0.5;
        let cy = size as f32 * 0.6;
        let rx = size as f32 * 0.3;
        let ry = size as f32 * 0.38;
        for (k, &body) in colors.iter().enumerate() {
            for y in 0..size {
                for x in 0..size {
                    let nx = (x as f32 + 0.5 - cx) / rx;
                    let ny = (y as f32 + 0.5 - cy) / ry;
                    if nx * nx + ny * ny <= 1.0 {
                        px[y * width + k * size + x] = body;
                    }
                }
            }
        }
        Self::from_pixels(width, size, px, 1, cols)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn texture_count(&self) -> usize { self.rows * self.cols }
    pub fn texture_width(&self) -> usize { self.tex_w }
    pub fn texture_height(&self) -> usize { self.tex_h }
    pub fn size(&self) -> (usize, usize) { (self.width, self.height) }

    /// Row/column of the `index`-th sub-texture, counted row-major.
    pub fn cell_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.texture_count()).then(|| (index / self.cols, index % self.cols))
    }

    /// Nearest-neighbour lookup inside sub-texture `(row, col)` at normalized
    /// `(u, v)`.
    ///
    /// # Panics
    /// When `row`/`col` are outside the grid or `u`/`v` outside `[0, 1]`.
    /// Callers clamp before sampling.
    #[inline]
    pub fn sample(&self, row: usize, col: usize, u: f32, v: f32) -> Pixel {
        assert!(row < self.rows, "atlas row {row} out of range (rows={})", self.rows);
        assert!(col < self.cols, "atlas column {col} out of range (cols={})", self.cols);
        assert!((0.0..=1.0).contains(&u), "u={u} outside [0, 1]");
        assert!((0.0..=1.0).contains(&v), "v={v} outside [0, 1]");
        // u == 1.0 lands on the last texel, not the neighbouring texture
        let tx = ((u * self.tex_w as f32) as usize).min(self.tex_w - 1);
        let ty = ((v * self.tex_h as f32) as usize).min(self.tex_h - 1);
        self.data[(row * self.tex_h + ty) * self.width + col * self.tex_w + tx]
    }
}

#[inline]
fn mix(a: Pixel, b: Pixel, t: u8) -> Pixel {
    let (ar, ag, ab, aa) = a.unpack();
    let (br, bg, bb, _) = b.unpack();
    let ta = t as u16;
    let na = 255u16 - ta;
    let m = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
    Pixel::rgba(m(ar, br), m(ag, bg), m(ab, bb), aa)
}

/// Handle into a [`TextureManager`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtlasId(pub usize);

/// Owns every atlas of a scene; walls and actors borrow through handles.
#[derive(Default)]
pub struct TextureManager {
    atlases: Vec<TextureAtlas>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, atlas: TextureAtlas) -> AtlasId {
        self.atlases.push(atlas);
        AtlasId(self.atlases.len() - 1)
    }

    pub fn get(&self, id: AtlasId) -> Option<&TextureAtlas> {
        self.atlases.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AtlasId, &TextureAtlas)> {
        self.atlases.iter().enumerate().map(|(i, a)| (AtlasId(i), a))
    }
}
