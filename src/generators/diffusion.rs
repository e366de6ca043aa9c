//! Reaction-diffusion style banding from repeated neighbourhood averaging.

use super::{ramp, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

const DENSITY: &[char] = &[' ', '░', '▒', '▓', '█'];

pub struct DiffusionGenerator {
    pub passes: usize,
    /// Fraction of the gap to the neighbourhood mean closed per pass.
    pub rate: f64,
}

impl Default for DiffusionGenerator {
    fn default() -> Self {
        Self {
            passes: 5,
            rate: 0.2,
        }
    }
}

/// One relaxation pass over a row-major field. Each cell moves `rate` of
/// the way toward the mean of its 3×3 neighbourhood, clipped at the edges.
pub fn relax(field: &[f64], width: usize, height: usize, rate: f64) -> Vec<f64> {
    let mut next = field.to_vec();
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut count = 0usize;
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    sum += field[ny * width + nx];
                    count += 1;
                }
            }
            let idx = y * width + x;
            let mean = sum / count as f64;
            next[idx] += rate * (mean - field[idx]);
        }
    }
    next
}

impl Generator for DiffusionGenerator {
    fn name(&self) -> &'static str {
        "reaction_diffusion"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        if width == 0 || height == 0 {
            return canvas;
        }

        let mut field: Vec<f64> = (0..width * height).map(|_| rng.gen::<f64>()).collect();
        for _ in 0..self.passes {
            field = relax(&field, width, height, self.rate);
        }

        for y in 0..height {
            for x in 0..width {
                canvas.set(x, y, ramp(DENSITY, field[y * width + x]));
            }
        }
        canvas
    }
}
