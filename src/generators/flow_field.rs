//! Directional flow field quantised to compass arrows.

use super::{pick, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};
use std::f64::consts::{PI, TAU};

const ARROWS: &[char] = &['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];
const RIPPLES: &[char] = &['∿', '≈', '≋', '~'];

pub struct FlowFieldGenerator {
    pub max_time: f64,
    /// Chance of a cell showing a ripple instead of its arrow.
    pub ripple_chance: f64,
}

impl Default for FlowFieldGenerator {
    fn default() -> Self {
        Self {
            max_time: 10.0,
            ripple_chance: 0.3,
        }
    }
}

/// Arrow for the field at (`x`, `y`) and `time`.
pub fn direction(x: f64, y: f64, time: f64) -> char {
    let angle = (x / 10.0 + time).sin() * (y / 8.0).cos();
    let idx = ((angle + PI) / TAU * ARROWS.len() as f64) as usize;
    ARROWS[idx % ARROWS.len()]
}

impl Generator for FlowFieldGenerator {
    fn name(&self) -> &'static str {
        "flow_field"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let time = rng.gen::<f64>() * self.max_time;

        for y in 0..height {
            for x in 0..width {
                let symbol = if rng.gen::<f64>() < self.ripple_chance {
                    pick(rng, RIPPLES)
                } else {
                    direction(x as f64, y as f64, time)
                };
                canvas.set(x, y, symbol);
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
    fn test_field_covers_every_cell() {
        let canvas = FlowFieldGenerator::default().generate(30, 12, &mut StdRng::seed_from_u64(2));
        assert_eq!(canvas.filled_count(), 30 * 12);
    }

    #[test]
    fn test_neutral_angle_points_left() {
        // angle 0 sits half way round the compass
        assert_eq!(direction(0.0, 0.0, 0.0), '←');
    }

    #[test]
    fn test_without_ripples_only_arrows_appear() {
        let gen = FlowFieldGenerator {
            ripple_chance: 0.0,
            ..FlowFieldGenerator::default()
        };
        let canvas = gen.generate(25, 10, &mut StdRng::seed_from_u64(4));
        assert!(canvas.rows().flatten().all(|c| ARROWS.contains(c)));
    }
}
