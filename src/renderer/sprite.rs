//! Pixel-art player sprite
//!
//! The asset is a text grid, one character per pixel:
//! `.` transparent, `h` hair, `s` skin, `b` shirt, `p` pants, `k` shoes,
//! `d` deck, `w` wheels. Blank lines are ignored.

use std::fmt;

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

/// Skater sprite shipped with the game
pub const SKATER: &str = include_str!("../../assets/skater.txt");

/// Why a sprite asset could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteError {
    Empty,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownPixel {
        row: usize,
        col: usize,
        ch: char,
    },
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::Empty => write!(f, "sprite has no pixels"),
            SpriteError::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} pixels, expected {expected}"),
            SpriteError::UnknownPixel { row, col, ch } => {
                write!(f, "unknown pixel '{ch}' at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for SpriteError {}

fn palette(ch: char) -> Option<Option<[f32; 4]>> {
    let color = match ch {
        '.' => return Some(None),
        'h' => [0.35, 0.2, 0.1, 1.0],
        's' => [0.96, 0.78, 0.62, 1.0],
        'b' => [0.2, 0.5, 0.9, 1.0],
        'p' => [0.15, 0.15, 0.25, 1.0],
        'k' => [0.05, 0.05, 0.05, 1.0],
        'd' => [0.95, 0.75, 0.2, 1.0],
        'w' => [0.85, 0.85, 0.85, 1.0],
        _ => return None,
    };
    Some(Some(color))
}

/// Decoded sprite, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    cols: usize,
    rows: usize,
    pixels: Vec<Option<[f32; 4]>>,
}

impl Sprite {
    pub fn parse(src: &str) -> Result<Self, SpriteError> {
        let mut cols = 0;
        let mut rows = 0;
        let mut pixels = Vec::new();

        for line in src.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let found = line.chars().count();
            if rows == 0 {
                cols = found;
            } else if found != cols {
                return Err(SpriteError::RaggedRow {
                    row: rows,
                    expected: cols,
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let pixel = palette(ch).ok_or(SpriteError::UnknownPixel { row: rows, col, ch })?;
                pixels.push(pixel);
            }
            rows += 1;
        }

        if rows == 0 || cols == 0 {
            return Err(SpriteError::Empty);
        }
        Ok(Self { cols, rows, pixels })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Height over width
    pub fn aspect(&self) -> f32 {
        self.rows as f32 / self.cols as f32
    }

    /// Stretch the grid over the given box, one quad per opaque pixel
    pub fn vertices(&self, min: Vec2, size: Vec2) -> Vec<Vertex> {
        let cell = Vec2::new(size.x / self.cols as f32, size.y / self.rows as f32);
        let mut vertices = Vec::new();

        for (i, pixel) in self.pixels.iter().enumerate() {
            let Some(color) = pixel else { continue };
            let (col, row) = (i % self.cols, i / self.cols);
            let origin = min + Vec2::new(col as f32, row as f32) * cell;
            vertices.extend_from_slice(&shapes::rect(origin, cell, *color));
        }

        vertices
    }
}
