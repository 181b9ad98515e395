//! Frame sinks: where finished frames go.
//!
//! The renderer only knows the [`FrameSink`] trait. File sequences (PPM or
//! PNG) live here; the live window lives in the `raycaster-window` binary.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::render::framebuffer::Framebuffer;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),
}

pub trait FrameSink {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SinkError>;
}

/// Binary PPM (`P6`), alpha dropped.
pub fn write_ppm(mut w: impl Write, frame: &Framebuffer) -> std::io::Result<()> {
    write!(w, "P6\n{} {}\n255\n", frame.width, frame.height)?;
    w.write_all(&frame.rgb_bytes())?;
    w.flush()
}

/// 8-bit RGBA PNG.
pub fn write_png(w: impl Write, frame: &Framebuffer) -> Result<(), SinkError> {
    let mut encoder = png::Encoder::new(w, frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.rgba_bytes())?;
    writer.finish()?;
    Ok(())
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Ppm,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Ppm => "ppm",
            ImageFormat::Png => "png",
        }
    }
}

/// Writes `frame_000.ppm`, `frame_001.ppm`, ... into a directory.
pub struct ImageSequence {
    dir: PathBuf,
    format: ImageFormat,
    next: usize,
}

impl ImageSequence {
    /// Creates `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>, format: ImageFormat) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, format, next: 0 })
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:03}.{}", self.format.extension()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written so far.
    pub fn written(&self) -> usize {
        self.next
    }
}

impl FrameSink for ImageSequence {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SinkError> {
        let path = self.path_for(self.next);
        let out = BufWriter::new(File::create(&path)?);
        match self.format {
            ImageFormat::Ppm => write_ppm(out, frame)?,
            ImageFormat::Png => write_png(out, frame)?,
        }
        tracing::debug!(path = %path.display(), "frame written");
        self.next += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pixel::Pixel;

    #[test]
    fn ppm_header_and_payload() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel_color(0, 0, Pixel::rgba(1, 2, 3, 0));
        fb.set_pixel_color(1, 0, Pixel::rgb(4, 5, 6));
        let mut out = Vec::new();
        write_ppm(&mut out, &fb).unwrap();
        assert_eq!(out, b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06");
    }

    #[test]
    fn sequence_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = ImageSequence::new(dir.path().join("out"), ImageFormat::Png).unwrap();
        let fb = Framebuffer::new(3, 2);
        seq.present(&fb).unwrap();
        seq.present(&fb).unwrap();
        assert_eq!(seq.written(), 2);
        assert!(dir.path().join("out/frame_000.png").is_file());
        assert!(dir.path().join("out/frame_001.png").is_file());
        assert_eq!(seq.path_for(12).file_name().unwrap(), "frame_012.png");
    }
}
