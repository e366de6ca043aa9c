//! Layered symbol halos around the centre, overlaid with sparse markers.

use super::{palette, pick, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

const INNERMOST: &[char] = &['∞', '∆', '◊'];
const THOUGHTS: &[char] = &['∞', '∆', '◊', '○', '●'];

pub struct ConsciousnessGenerator {
    /// Distance over which layer probability falls by a factor of e.
    pub falloff: f64,
    /// Layer weights, drawn in order so later layers overwrite earlier ones.
    pub layer_weights: [f64; 4],
}

impl Default for ConsciousnessGenerator {
    fn default() -> Self {
        Self {
            falloff: 10.0,
            layer_weights: [0.8, 0.6, 0.4, 0.2],
        }
    }
}

impl Generator for ConsciousnessGenerator {
    fn name(&self) -> &'static str {
        "consciousness"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let layers: [&[char]; 4] = [
            palette::CONSCIOUSNESS,
            palette::MYSTICAL,
            palette::QUANTUM,
            INNERMOST,
        ];
        let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
        let falloff = self.falloff.max(f64::EPSILON);

        for y in 0..height {
            for x in 0..width {
                let distance = (x as f64 - cx).hypot(y as f64 - cy);
                let base = (-distance / falloff).exp();
                for (symbols, weight) in layers.iter().zip(self.layer_weights) {
                    if rng.gen::<f64>() < base * weight {
                        canvas.set(x, y, pick(rng, symbols));
                    }
                }
            }
        }

        let thoughts = if height == 0 { 0 } else { width / 4 };
        for _ in 0..thoughts {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            canvas.set(x, y, pick(rng, THOUGHTS));
        }

        canvas
    }
}
