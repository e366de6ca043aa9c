//! Interference of several sinusoids, banded into four symbol tiers.

use super::{palette, pick, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

pub struct WaveGenerator {
    /// Upper bound of the random time offset.
    pub max_time: f64,
    /// Band edges, highest first.
    pub bands: [f64; 3],
}

impl Default for WaveGenerator {
    fn default() -> Self {
        Self {
            max_time: 10.0,
            bands: [0.7, 0.3, -0.3],
        }
    }
}

/// Product of four waves sampled at (`x`, `y`) and `time`. Always in [-1, 1].
pub fn interference(x: f64, y: f64, time: f64) -> f64 {
    (x / 5.0 + time).sin()
        * (y / 3.0).cos()
        * ((x + y) / 7.0).sin()
        * (x.hypot(y) / 4.0).cos()
}

impl Generator for WaveGenerator {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let time = rng.gen::<f64>() * self.max_time;
        let [high, mid, low] = self.bands;

        for y in 0..height {
            for x in 0..width {
                let value = interference(x as f64, y as f64, time);
                let symbol = if value > high {
                    pick(rng, palette::QUANTUM)
                } else if value > mid {
                    pick(rng, palette::WAVES)
                } else if value > low {
                    '·'
                } else {
                    continue;
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

    #[test]
    fn test_interference_is_bounded() {
        for y in 0..50 {
            for x in 0..120 {
                let v = interference(x as f64, y as f64, 3.3);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_origin_is_zero_at_time_zero() {
        assert_eq!(interference(0.0, 0.0, 0.0), 0.0);
    }
}
