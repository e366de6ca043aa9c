//! Conway's Game of Life on a bounded grid.

use super::Generator;
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

/// A bounded life grid. Cells past the edge count as dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl LifeGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Every cell alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let cells = (0..width * height)
            .map(|_| rng.gen::<f64>() < density)
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse rows of `#` (alive) and anything else (dead).
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                grid.set(x, y, c == '#');
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = alive;
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn live_neighbours(&self, x: usize, y: usize) -> usize {
        let mut count = 0;
        for ny in y.saturating_sub(1)..=y + 1 {
            for nx in x.saturating_sub(1)..=x + 1 {
                if (nx, ny) != (x, y) && self.is_alive(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Next generation: birth on exactly three neighbours, death below two
    /// or above three.
    pub fn step(&self) -> Self {
        let mut next = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let n = self.live_neighbours(x, y);
                let alive = if self.is_alive(x, y) {
                    n == 2 || n == 3
                } else {
                    n == 3
                };
                next.set(x, y, alive);
            }
        }
        next
    }

    /// Rows rendered as `#` and `.`.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.is_alive(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

pub struct CellularGenerator {
    pub generations: usize,
    /// Initial share of live cells.
    pub density: f64,
    pub alive: char,
}

impl Default for CellularGenerator {
    fn default() -> Self {
        Self {
            generations: 5,
            density: 0.3,
            alive: '█',
        }
    }
}

impl Generator for CellularGenerator {
    fn name(&self) -> &'static str {
        "cellular_automata"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut grid = LifeGrid::random(width, height, self.density, rng);
        for _ in 0..self.generations {
            grid = grid.step();
        }

        let mut canvas = Canvas::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if grid.is_alive(x, y) {
                    canvas.set(x, y, self.alive);
                }
            }
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glider_advances_one_phase() {
        let grid = LifeGrid::from_rows(&[
            ".#...", //
            "..#..",
            "###..",
            ".....",
            ".....",
        ]);
        assert_eq!(
            grid.step().to_rows(),
            vec![
                ".....", //
                "#.#..",
                ".##..",
                ".#...",
                ".....",
            ]
        );
    }

    #[test]
    fn test_blinker_oscillates() {
        let vertical = LifeGrid::from_rows(&[".....", "..#..", "..#..", "..#..", "....."]);
        let horizontal = vertical.step();
        assert_eq!(
            horizontal.to_rows(),
            vec![".....", ".....", ".###.", ".....", "....."]
        );
        assert_eq!(horizontal.step(), vertical);
    }

    #[test]
    fn test_block_is_still_life_in_corner() {
        let block = LifeGrid::from_rows(&["##...", "##...", ".....", ".....", "....."]);
        assert_eq!(block.step(), block);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = LifeGrid::from_rows(&["...", ".#.", "..."]);
        assert_eq!(grid.step().population(), 0);
    }
}
