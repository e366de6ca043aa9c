//! Spiral arms radiating from the canvas centre.

use super::{palette, Generator};
use crate::canvas::Canvas;
use rand::RngCore;
use std::f64::consts::TAU;

pub struct SpiralGenerator {
    /// Number of arms.
    pub arms: f64,
    /// Radius over which an arm turns by one radian.
    pub tightness: f64,
    /// Cells with `|sin|` above this are filled.
    pub threshold: f64,
}

impl Default for SpiralGenerator {
    fn default() -> Self {
        Self {
            arms: 5.0,
            tightness: 5.0,
            threshold: 0.7,
        }
    }
}

impl SpiralGenerator {
    /// Whether the cell at offset (`dx`, `dy`) from the centre lies on an arm.
    pub fn on_arm(&self, dx: f64, dy: f64) -> bool {
        let angle = dy.atan2(dx);
        let distance = dx.hypot(dy);
        let phase = (angle + distance / self.tightness).rem_euclid(TAU);
        (phase * self.arms).sin().abs() > self.threshold
    }
}

impl Generator for SpiralGenerator {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn generate(&self, width: usize, height: usize, _rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
        let mut symbols = palette::CONSCIOUSNESS.iter().cycle();

        for y in 0..height {
            for x in 0..width {
                if self.on_arm(x as f64 - cx, y as f64 - cy) {
                    if let Some(&c) = symbols.next() {
                        canvas.set(x, y, c);
                    }
                }
            }
        }

        canvas
    }
}
