//! Dreamlike composite of random sinusoids and fractal Perlin noise.

use super::Generator;
use crate::canvas::Canvas;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::{Rng, RngCore};
use std::f64::consts::TAU;

const DREAMSCAPE: &[char] = &[
    '·', '∙', '▪', '▫', '■', '□', '▢', '▣', '▤', '▥', '▦', '▧', '▨', '▩', '▪', '▫', '▬', '▭', '▮',
    '▯', '▰', '▱', '▲', '▼', '◄', '►', '◆', '◇', '○', '●', '◐', '◑', '◒', '◓', '◔', '◕',
];

pub struct DreamGenerator {
    pub waves: usize,
    /// Range each wave's spatial frequency is drawn from.
    pub frequency_range: (f64, f64),
    /// Cells per unit of noise input.
    pub noise_scale: f64,
    pub octaves: usize,
}

impl Default for DreamGenerator {
    fn default() -> Self {
        Self {
            waves: 3,
            frequency_range: (0.1, 0.3),
            noise_scale: 10.0,
            octaves: 4,
        }
    }
}

/// Rescale to [0, 1]. A flat field maps to all zeros.
pub fn normalize(values: &mut [f64]) {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;
    for v in values.iter_mut() {
        *v = if span > f64::EPSILON { (*v - min) / span } else { 0.0 };
    }
}

impl Generator for DreamGenerator {
    fn name(&self) -> &'static str {
        "dream"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let mut field = vec![0.0; width * height];

        let (lo, hi) = self.frequency_range;
        for _ in 0..self.waves {
            let fx = rng.gen_range(lo..=hi);
            let fy = rng.gen_range(lo..=hi);
            let phase = rng.gen_range(0.0..TAU);
            for y in 0..height {
                for x in 0..width {
                    field[y * width + x] += (x as f64 * fx + y as f64 * fy + phase).sin();
                }
            }
        }

        let noise = Fbm::<Perlin>::new(rng.gen_range(0..=1000))
            .set_octaves(self.octaves)
            .set_persistence(0.5)
            .set_lacunarity(2.0);
        let scale = self.noise_scale.max(f64::EPSILON);
        for y in 0..height {
            for x in 0..width {
                field[y * width + x] += noise.get([x as f64 / scale, y as f64 / scale]);
            }
        }

        normalize(&mut field);

        for y in 0..height {
            for x in 0..width {
                let idx = (field[y * width + x] * DREAMSCAPE.len() as f64) as usize;
                canvas.set(x, y, DREAMSCAPE[idx.min(DREAMSCAPE.len() - 1)]);
            }
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_spans_unit_interval() {
        let mut values = vec![-3.0, 0.0, 5.0];
        normalize(&mut values);
        assert_eq!(values, vec![0.0, 0.375, 1.0]);
    }

    #[test]
    fn test_flat_field_does_not_divide_by_zero() {
        let mut values = vec![2.5; 6];
        normalize(&mut values);
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_every_cell_is_painted() {
        let canvas = DreamGenerator::default().generate(30, 12, &mut StdRng::seed_from_u64(6));
        assert_eq!(canvas.filled_count(), 30 * 12);
    }
}
