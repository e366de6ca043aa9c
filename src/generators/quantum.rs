//! Probability cloud: Gaussian falloff around the centre, sampled per cell.

use super::Generator;
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

const CLOUD: &[char] = &['ψ', 'Ψ', '∫', '⟨', '⟩', '|'];

pub struct QuantumGenerator {
    /// Denominator of each Gaussian exponent; larger spreads the cloud.
    pub spread: f64,
}

impl Default for QuantumGenerator {
    fn default() -> Self {
        Self { spread: 100.0 }
    }
}

impl QuantumGenerator {
    /// Fill probability of a cell.
    pub fn probability(&self, x: f64, y: f64, width: f64, height: f64) -> f64 {
        if self.spread <= f64::EPSILON {
            return 0.0;
        }
        let gx = (-(x - width / 2.0).powi(2) / self.spread).exp();
        let gy = (-(y - height / 2.0).powi(2) / self.spread).exp();
        gx * gy
    }
}

impl Generator for QuantumGenerator {
    fn name(&self) -> &'static str {
        "quantum"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let mut symbols = CLOUD.iter().cycle();

        for y in 0..height {
            for x in 0..width {
                let p = self.probability(x as f64, y as f64, width as f64, height as f64);
                if rng.gen::<f64>() < p {
                    if let Some(&c) = symbols.next() {
                        canvas.set(x, y, c);
                    }
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
    fn test_probability_peaks_at_centre() {
        let q = QuantumGenerator::default();
        assert!((q.probability(20.0, 10.0, 40.0, 20.0) - 1.0).abs() < 1e-12);
        assert!(q.probability(0.0, 0.0, 40.0, 20.0) < 0.05);
    }

    #[test]
    fn test_zero_spread_is_empty() {
        let q = QuantumGenerator { spread: 0.0 };
        let canvas = q.generate(30, 12, &mut StdRng::seed_from_u64(1));
        assert_eq!(canvas.filled_count(), 0);
    }

    #[test]
    fn test_cloud_is_denser_in_the_middle() {
        let canvas = QuantumGenerator::default().generate(60, 30, &mut StdRng::seed_from_u64(8));
        let centre = (25..35)
            .flat_map(|x| (10..20).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.is_filled(x, y))
            .count();
        let corner = (0..10)
            .flat_map(|x| (0..10).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.is_filled(x, y))
            .count();
        assert!(centre > corner);
    }
}
