//! Fixed-size character grid that every generator draws into.

use std::fmt;

/// The symbol an untouched cell holds.
pub const BLANK: char = ' ';

/// A row-major grid of single-width display symbols.
///
/// Writes outside the grid are dropped rather than reported, so a generator
/// with an off-by-one in its geometry degrades to a sparser picture instead
/// of taking down the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    /// Create a canvas filled with [`BLANK`].
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, BLANK)
    }

    /// Create a canvas with every cell set to `symbol`.
    pub fn filled(width: usize, height: usize, symbol: char) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![symbol; width]; height],
        }
    }

    /// Build a canvas from text lines, padding short lines with blanks and
    /// truncating long ones.
    pub fn from_lines<S: AsRef<str>>(width: usize, height: usize, lines: &[S]) -> Self {
        let mut canvas = Self::new(width, height);
        for (y, line) in lines.iter().take(height).enumerate() {
            for (x, ch) in line.as_ref().chars().take(width).enumerate() {
                canvas.cells[y][x] = ch;
            }
        }
        canvas
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a cell, `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Write a cell. Out-of-bounds writes are a no-op.
    pub fn set(&mut self, x: usize, y: usize, symbol: char) {
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = symbol;
        }
    }

    /// Write a cell addressed by signed coordinates, for geometry that can
    /// wander past the left or top edge.
    pub fn plot(&mut self, x: i64, y: i64, symbol: char) {
        if x >= 0 && y >= 0 {
            self.set(x as usize, y as usize, symbol);
        }
    }

    /// Whether a cell holds anything but [`BLANK`].
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|c| c != BLANK)
    }

    /// Number of non-blank cells.
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c != BLANK)
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Each row rendered as a string.
    pub fn lines(&self) -> Vec<String> {
        self.cells.iter().map(|row| row.iter().collect()).collect()
    }

    /// Rows joined with line breaks.
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
