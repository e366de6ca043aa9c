//! Stylised water: a wave field with waterfalls, whirlpools and springs
//! stamped on top.

use super::{pick, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};
use std::f64::consts::FRAC_PI_4;

const WATER: &[char] = &['≋', '∼', '∿', '≈', '░', '▒', '▓'];
const SPLASH: &[char] = &['○', '◌', '◍', '◎', '●'];
const FLOW: &[char] = &['╱', '╲', '│', '─'];
const BUBBLES: &[char] = &['˚', '°', '•'];
const STREAM: char = '║';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Waterfall,
    Whirlpool,
    Spring,
}

/// Where and how strongly a water motif is stamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidSource {
    pub kind: SourceKind,
    pub x: usize,
    pub y: usize,
    /// In (0, 1].
    pub strength: f64,
}

impl FluidSource {
    pub fn new(kind: SourceKind, x: usize, y: usize, strength: f64) -> Self {
        let strength = if strength.is_finite() {
            strength.clamp(f64::EPSILON, 1.0)
        } else {
            1.0
        };
        Self {
            kind,
            x,
            y,
            strength,
        }
    }

    /// The usual trio: a waterfall upper left, a whirlpool in the middle and
    /// a spring lower right.
    pub fn defaults_for(width: usize, height: usize) -> Vec<FluidSource> {
        vec![
            FluidSource::new(SourceKind::Waterfall, width / 4, height / 3, 0.8),
            FluidSource::new(SourceKind::Whirlpool, width / 2, height / 2, 0.6),
            FluidSource::new(SourceKind::Spring, 3 * width / 4, 2 * height / 3, 0.7),
        ]
    }

    pub fn stamp<R: Rng + ?Sized>(&self, canvas: &mut Canvas, rng: &mut R) {
        match self.kind {
            SourceKind::Waterfall => self.stamp_waterfall(canvas, rng),
            SourceKind::Whirlpool => self.stamp_whirlpool(canvas, rng),
            SourceKind::Spring => self.stamp_spring(canvas, rng),
        }
    }

    fn stamp_waterfall<R: Rng + ?Sized>(&self, canvas: &mut Canvas, rng: &mut R) {
        let (x, y) = (self.x as i64, self.y as i64);
        let drop = (canvas.height() as f64 * 0.6) as i64;
        for dy in 0..drop {
            let row = y + dy;
            canvas.plot(x, row, STREAM);
            if rng.gen::<f64>() < self.strength * 0.3 {
                canvas.plot(x + rng.gen_range(-2..=2), row, pick(rng, SPLASH));
            }
            if rng.gen::<f64>() < self.strength * 0.2 {
                let side = if rng.gen::<bool>() { 1 } else { -1 };
                canvas.plot(x + side, row, pick(rng, FLOW));
            }
        }
    }

    fn stamp_whirlpool<R: Rng + ?Sized>(&self, canvas: &mut Canvas, rng: &mut R) {
        let (cx, cy) = (self.x as f64, self.y as f64);
        for radius in 1..=7 {
            let r = radius as f64;
            for sample in 0..8 {
                let angle = sample as f64 * FRAC_PI_4;
                let px = (cx + r * angle.cos()).round() as i64;
                let py = (cy + r * angle.sin()).round() as i64;
                let bubbly =
                    radius < 3 || (radius < 4 && rng.gen::<f64>() < self.strength * 0.3);
                let symbol = pick(rng, if bubbly { BUBBLES } else { FLOW });
                canvas.plot(px, py, symbol);
            }
        }
    }

    fn stamp_spring<R: Rng + ?Sized>(&self, canvas: &mut Canvas, rng: &mut R) {
        let (x, y) = (self.x as i64, self.y as i64);
        for dy in -3i64..=3 {
            for dx in -3i64..=3 {
                if ((dx * dx + dy * dy) as f64).sqrt() >= 3.0 {
                    continue;
                }
                let symbol = if rng.gen::<f64>() < self.strength {
                    pick(rng, BUBBLES)
                } else {
                    pick(rng, SPLASH)
                };
                canvas.plot(x + dx, y + dy, symbol);
            }
        }
    }
}

pub struct FluidGenerator {
    /// Time offset of the base wave; drawn at random when `None`.
    pub phase: Option<f64>,
    /// Sources to stamp; the default trio when empty.
    pub sources: Vec<FluidSource>,
    /// Share of cells that receive a ripple or bubble in the final pass.
    pub ripple_coverage: f64,
}

impl Default for FluidGenerator {
    fn default() -> Self {
        Self {
            phase: None,
            sources: Vec::new(),
            ripple_coverage: 0.1,
        }
    }
}

/// Base water texture for a cell, `None` where the wave is in a trough.
fn water_at<R: Rng + ?Sized>(x: f64, y: f64, time: f64, rng: &mut R) -> Option<char> {
    let wave = (x / 3.0 + time).sin() * (y / 2.0 + time).cos();
    if wave > 0.7 {
        Some(pick(rng, &WATER[0..2]))
    } else if wave > 0.3 {
        Some(pick(rng, &WATER[2..4]))
    } else if wave > 0.0 {
        Some(pick(rng, &WATER[4..]))
    } else {
        None
    }
}

impl Generator for FluidGenerator {
    fn name(&self) -> &'static str {
        "fluid"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let time = self.phase.unwrap_or_else(|| rng.gen_range(0.0..1000.0));

        for y in 0..height {
            for x in 0..width {
                if let Some(symbol) = water_at(x as f64, y as f64, time, rng) {
                    canvas.set(x, y, symbol);
                }
            }
        }

        let sources = if self.sources.is_empty() {
            FluidSource::defaults_for(width, height)
        } else {
            self.sources.clone()
        };
        for source in &sources {
            source.stamp(&mut canvas, rng);
        }

        if width > 0 && height > 0 {
            let touches = (width as f64 * height as f64 * self.ripple_coverage) as usize;
            for _ in 0..touches {
                let x = rng.gen_range(0..width);
                let y = rng.gen_range(0..height);
                if rng.gen::<f64>() < 0.3 {
                    canvas.set(x, y, pick(rng, WATER));
                } else if rng.gen::<f64>() < 0.2 {
                    canvas.set(x, y, pick(rng, BUBBLES));
                }
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
    fn test_waterfall_draws_a_stream() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut canvas = Canvas::new(40, 20);
        FluidSource::new(SourceKind::Waterfall, 10, 2, 0.01).stamp(&mut canvas, &mut rng);
        // 60% of the height, starting at the anchor row
        assert!((2..14).all(|y| canvas.is_filled(10, y)));
        assert!(!canvas.is_filled(10, 1));
        assert!(!canvas.is_filled(10, 14));
        assert!((2..14).filter(|&y| canvas.get(10, y) == Some(STREAM)).count() >= 10);
    }

    #[test]
    fn test_whirlpool_rings_use_expected_symbols() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut canvas = Canvas::new(40, 20);
        FluidSource::new(SourceKind::Whirlpool, 20, 10, 0.5).stamp(&mut canvas, &mut rng);
        // innermost ring is bubbles, outermost is flow lines
        assert!(BUBBLES.contains(&canvas.get(21, 10).unwrap()));
        assert!(FLOW.contains(&canvas.get(27, 10).unwrap()));
    }

    #[test]
    fn test_spring_stays_within_its_cluster() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut canvas = Canvas::new(40, 20);
        FluidSource::new(SourceKind::Spring, 20, 10, 0.7).stamp(&mut canvas, &mut rng);
        for y in 0..20 {
            for x in 0..40 {
                if canvas.is_filled(x, y) {
                    assert!((x as i64 - 20).abs() <= 3 && (y as i64 - 10).abs() <= 3);
                }
            }
        }
        assert!(canvas.is_filled(20, 10));
    }

    #[test]
    fn test_sources_near_edges_are_clipped() {
        let gen = FluidGenerator {
            sources: vec![
                FluidSource::new(SourceKind::Whirlpool, 0, 0, 1.0),
                FluidSource::new(SourceKind::Waterfall, 39, 19, 1.0),
                FluidSource::new(SourceKind::Spring, 500, 500, 1.0),
            ],
            ..FluidGenerator::default()
        };
        let canvas = gen.generate(40, 20, &mut StdRng::seed_from_u64(4));
        assert_eq!((canvas.width(), canvas.height()), (40, 20));
    }

    #[test]
    fn test_strength_is_clamped() {
        assert_eq!(FluidSource::new(SourceKind::Spring, 0, 0, 4.0).strength, 1.0);
        assert!(FluidSource::new(SourceKind::Spring, 0, 0, -1.0).strength > 0.0);
        assert_eq!(FluidSource::new(SourceKind::Spring, 0, 0, f64::NAN).strength, 1.0);
    }
}
