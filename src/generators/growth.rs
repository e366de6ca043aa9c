//! Organic growth from a few point sources under life-like rules.
//!
//! Rather than the binary live/dead picture of the plain automaton, each
//! cell is shaded by how many generations it spent alive, so the trails
//! colonies leave behind read as denser tissue.

use super::cellular::LifeGrid;
use super::{ramp, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

const TISSUE: &[char] = &[' ', '·', '∙', '▪', '▫', '■'];

pub struct GrowthGenerator {
    pub sources: usize,
    pub generations: usize,
    /// Half-size of the square patch scattered around each source.
    pub seed_radius: usize,
    /// Share of patch cells seeded alive.
    pub seed_density: f64,
}

impl Default for GrowthGenerator {
    fn default() -> Self {
        Self {
            sources: 3,
            generations: 10,
            seed_radius: 2,
            seed_density: 0.55,
        }
    }
}

impl GrowthGenerator {
    fn seed<R: Rng + ?Sized>(&self, width: usize, height: usize, rng: &mut R) -> LifeGrid {
        let mut grid = LifeGrid::new(width, height);
        if width == 0 || height == 0 {
            return grid;
        }
        let r = self.seed_radius as i64;
        for _ in 0..self.sources {
            let sx = rng.gen_range(0..width) as i64;
            let sy = rng.gen_range(0..height) as i64;
            for dy in -r..=r {
                for dx in -r..=r {
                    let (x, y) = (sx + dx, sy + dy);
                    if x >= 0 && y >= 0 && rng.gen::<f64>() < self.seed_density {
                        grid.set(x as usize, y as usize, true);
                    }
                }
            }
            grid.set(sx as usize, sy as usize, true);
        }
        grid
    }
}

/// Per-cell share of `generations` steps spent alive, starting after the
/// seed.
pub fn occupancy(seed: &LifeGrid, generations: usize) -> Vec<f64> {
    let (width, height) = (seed.width(), seed.height());
    let mut counts = vec![0usize; width * height];
    let mut grid = seed.clone();
    for _ in 0..generations {
        grid = grid.step();
        for y in 0..height {
            for x in 0..width {
                if grid.is_alive(x, y) {
                    counts[y * width + x] += 1;
                }
            }
        }
    }
    let total = generations.max(1) as f64;
    counts.into_iter().map(|c| c as f64 / total).collect()
}

impl Generator for GrowthGenerator {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let seed = self.seed(width, height, rng);
        let density = occupancy(&seed, self.generations);

        for y in 0..height {
            for x in 0..width {
                canvas.set(x, y, ramp(TISSUE, density[y * width + x]));
            }
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_life_has_full_occupancy() {
        let block = LifeGrid::from_rows(&["....", ".##.", ".##.", "...."]);
        let density = occupancy(&block, 10);
        assert_eq!(density[5], 1.0);
        assert_eq!(density[0], 0.0);
    }

    #[test]
    fn test_blinker_ends_are_half_occupied() {
        let blinker = LifeGrid::from_rows(&[".....", "..#..", "..#..", "..#..", "....."]);
        let density = occupancy(&blinker, 10);
        // centre always alive, the arm tips alternate
        assert_eq!(density[12], 1.0);
        assert_eq!(density[7], 0.5);
        assert_eq!(density[11], 0.5);
    }

    #[test]
    fn test_dense_cells_get_the_heaviest_glyph() {
        assert_eq!(ramp(TISSUE, 1.0), '■');
        assert_eq!(ramp(TISSUE, 0.0), ' ');
    }
}
