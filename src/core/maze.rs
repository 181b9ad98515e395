//! Maze loading and cell queries.
//!
//! A maze is a rectangular grid of glyphs. `' '` is walkable; every ASCII
//! letter or digit is a wall whose base-36 value picks its palette color and
//! its sub-texture in the wall atlas.
use std::fs;
use std::path::Path;

pub const EMPTY: char = ' ';

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("map has no cells")]
    Empty,
    #[error("map row {row} has {actual} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, actual: usize },
    #[error("unknown map glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// Wall index of a glyph, or `None` for empty cells.
#[inline]
pub fn wall_index(glyph: char) -> Option<usize> {
    if glyph == EMPTY {
        return None;
    }
    glyph.to_digit(36).map(|d| d as usize)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Maze {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(MapError::Ragged { row, expected: width, actual });
            }
            for (col, glyph) in line.chars().enumerate() {
                if glyph != EMPTY && !glyph.is_ascii_alphanumeric() {
                    return Err(MapError::UnknownGlyph { glyph, row, col });
                }
                cells.push(glyph);
            }
        }
        Ok(Self { width, height: rows.len(), cells })
    }

    /// One row per line; a trailing newline is ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Glyph at cell `(i, j)` (column, row); `None` outside the grid.
    #[inline]
    pub fn cell(&self, i: i64, j: i64) -> Option<char> {
        if i < 0 || j < 0 || i as usize >= self.width || j as usize >= self.height {
            return None;
        }
        Some(self.cells[j as usize * self.width + i as usize])
    }

    /// Wall index at cell `(i, j)`; `None` for empty or off-grid cells.
    #[inline]
    pub fn wall_at(&self, i: i64, j: i64) -> Option<usize> {
        self.cell(i, j).and_then(wall_index)
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    /// Every wall cell as `(i, j, wall index)`.
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(k, &c)| {
            wall_index(c).map(|w| (k % self.width, k / self.width, w))
        })
    }

    /// Largest wall index used, if the maze has any wall.
    pub fn max_wall_index(&self) -> Option<usize> {
        self.walls().map(|(_, _, w)| w).max()
    }

    /// Solid test in map units; off-grid counts as solid for movement.
    pub fn is_solid(&self, wx: f32, wy: f32) -> bool {
        let i = wx.floor() as i64;
        let j = wy.floor() as i64;
        match self.cell(i, j) {
            Some(c) => c != EMPTY,
            None => true,
        }
    }

    /// Whether a circle of radius `r` centred at `(wx, wy)` fits without
    /// touching a wall. Samples the centre and eight points on the rim.
    pub fn is_free_with_radius(&self, wx: f32, wy: f32, r: f32) -> bool {
        let d = r * std::f32::consts::FRAC_1_SQRT_2;
        let samples = [
            (wx, wy),
            (wx + r, wy),
            (wx - r, wy),
            (wx, wy + r),
            (wx, wy - r),
            (wx + d, wy + d),
            (wx - d, wy + d),
            (wx + d, wy - d),
            (wx - d, wy - d),
        ];
        samples.iter().all(|&(sx, sy)| !self.is_solid(sx, sy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_indices() {
        assert_eq!(wall_index(' '), None);
        assert_eq!(wall_index('0'), Some(0));
        assert_eq!(wall_index('3'), Some(3));
        assert_eq!(wall_index('a'), Some(10));
        assert_eq!(wall_index('Z'), Some(35));
        assert_eq!(wall_index('#'), None);
    }

    #[test]
    fn parses_rectangular_grid() {
        let m = Maze::parse("010\n0 0\n000\n").unwrap();
        assert_eq!((m.width(), m.height()), (3, 3));
        assert_eq!(m.cell(1, 0), Some('1'));
        assert_eq!(m.cell(1, 1), Some(' '));
        assert_eq!(m.cell(3, 0), None);
        assert_eq!(m.cell(-1, 0), None);
        assert_eq!(m.wall_at(1, 1), None);
        assert_eq!(m.max_wall_index(), Some(1));
        assert_eq!(m.walls().count(), 8);
    }

    #[test]
    fn rejects_malformed_maps() {
        assert!(matches!(Maze::parse(""), Err(MapError::Empty)));
        assert!(matches!(
            Maze::parse("000\n00\n"),
            Err(MapError::Ragged { row: 1, expected: 3, actual: 2 })
        ));
        assert!(matches!(
            Maze::parse("0#0"),
            Err(MapError::UnknownGlyph { glyph: '#', row: 0, col: 1 })
        ));
    }

    #[test]
    fn radius_probe_respects_walls() {
        let m = Maze::parse("000\n0 0\n000").unwrap();
        assert!(m.is_free_with_radius(1.5, 1.5, 0.2));
        assert!(!m.is_free_with_radius(1.5, 1.5, 0.6));
        assert!(!m.is_free_with_radius(0.5, 0.5, 0.1));
        assert!(m.is_solid(-0.5, 1.5));
    }
}
