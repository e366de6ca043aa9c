//! Escape-time fractals: Mandelbrot and Julia sets.
//!
//! Each pixel maps to a point in the complex plane and is iterated under
//! `z = z² + c` until it leaves a disc or the iteration cap is reached.
//! The iteration count then picks a symbol through one of several
//! nonlinear mappings, chosen at random per call so the same region can
//! come out banded, smooth or compressed.

use super::{palette, pick, Generator};
use crate::canvas::Canvas;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Alternative symbol ramps for the Mandelbrot set, lightest first.
pub const MANDELBROT_RAMPS: [&str; 6] = [
    " .:;+=xX$&@",
    " .:-=+*#%@",
    " ░▒▓█",
    " ⠁⠂⠃⠄⠅⠆⠇⠈",
    " ○◔◑◕●",
    " ·∙▪▫■",
];

/// How an iteration count is spread across a symbol ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationMapping {
    Linear,
    Sinusoidal,
    Logarithmic,
}

impl IterationMapping {
    pub const ALL: [IterationMapping; 3] = [
        IterationMapping::Linear,
        IterationMapping::Sinusoidal,
        IterationMapping::Logarithmic,
    ];

    /// Ramp index for `count` out of `max_iter`, always below `len`.
    pub fn index(self, count: u32, max_iter: u32, len: usize) -> usize {
        if len == 0 || max_iter == 0 {
            return 0;
        }
        let top = (len - 1) as f64;
        let t = count.min(max_iter) as f64 / max_iter as f64;
        let raw = match self {
            IterationMapping::Linear => t * top,
            IterationMapping::Sinusoidal => ((t * PI).sin() + 1.0) * top / 2.0,
            IterationMapping::Logarithmic => {
                (count as f64 + 1.0).ln() * top / (max_iter as f64 + 1.0).ln()
            }
        };
        (raw.max(0.0) as usize).min(len - 1)
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Iterate `z = z² + c` from `z`. Returns the iteration on which `|z|`
/// first exceeded `radius`, or `max_iter` if it never did.
pub fn escape_iterations(z: (f64, f64), c: (f64, f64), max_iter: u32, radius: f64) -> u32 {
    let (mut zr, mut zi) = z;
    let limit = radius * radius;
    for i in 0..max_iter {
        let next_r = zr * zr - zi * zi + c.0;
        zi = 2.0 * zr * zi + c.1;
        zr = next_r;
        if zr * zr + zi * zi > limit {
            return i;
        }
    }
    max_iter
}

/// Region of the complex plane a Mandelbrot canvas covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub zoom: f64,
    pub offset: (f64, f64),
}

impl View {
    /// Complex point under pixel (`x`, `y`).
    pub fn point(&self, x: usize, y: usize, width: usize, height: usize) -> (f64, f64) {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        (
            self.zoom * x as f64 / w - self.zoom / 2.0 + self.offset.0,
            self.zoom * y as f64 / h - self.zoom / 2.0 + self.offset.1,
        )
    }
}

pub struct MandelbrotGenerator {
    pub min_iter: u32,
    pub max_iter: u32,
    pub zoom_range: (f64, f64),
    pub offset_range: f64,
    pub escape_radius_range: (f64, f64),
    /// Chance of scattering sparkles over the result.
    pub decoration_chance: f64,
}

impl Default for MandelbrotGenerator {
    fn default() -> Self {
        Self {
            min_iter: 20,
            max_iter: 40,
            zoom_range: (2.5, 3.5),
            offset_range: 0.5,
            escape_radius_range: (1.9, 2.1),
            decoration_chance: 0.3,
        }
    }
}

impl MandelbrotGenerator {
    /// Render a fixed view with a fixed ramp and mapping.
    pub fn render(
        &self,
        width: usize,
        height: usize,
        view: View,
        max_iter: u32,
        radius: f64,
        ramp: &[char],
        mapping: IterationMapping,
    ) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let c = view.point(x, y, width, height);
                let count = escape_iterations((0.0, 0.0), c, max_iter, radius);
                if let Some(&symbol) = ramp.get(mapping.index(count, max_iter, ramp.len())) {
                    canvas.set(x, y, symbol);
                }
            }
        }
        canvas
    }
}

impl Generator for MandelbrotGenerator {
    fn name(&self) -> &'static str {
        "mandelbrot"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let ramp: Vec<char> = MANDELBROT_RAMPS[rng.gen_range(0..MANDELBROT_RAMPS.len())]
            .chars()
            .collect();
        let max_iter = rng.gen_range(self.min_iter..=self.max_iter.max(self.min_iter));
        let view = View {
            zoom: rng.gen_range(self.zoom_range.0..=self.zoom_range.1),
            offset: (
                rng.gen_range(-self.offset_range..=self.offset_range),
                rng.gen_range(-self.offset_range..=self.offset_range),
            ),
        };
        let radius = rng.gen_range(self.escape_radius_range.0..=self.escape_radius_range.1);
        let mapping = IterationMapping::random(rng);

        tracing::debug!(max_iter, ?mapping, zoom = view.zoom, "mandelbrot view");

        let mut canvas = self.render(width, height, view, max_iter, radius, &ramp, mapping);

        if width > 0 && height > 0 && rng.gen::<f64>() < self.decoration_chance {
            for _ in 0..rng.gen_range(3..=7) {
                let x = rng.gen_range(0..width);
                let y = rng.gen_range(0..height);
                canvas.set(x, y, pick(rng, palette::SPARKLES));
            }
        }

        canvas
    }
}

pub struct JuliaGenerator {
    pub min_iter: u32,
    pub max_iter: u32,
    /// Half-width of the square of the plane that is sampled.
    pub extent: f64,
}

impl Default for JuliaGenerator {
    fn default() -> Self {
        Self {
            min_iter: 20,
            max_iter: 40,
            extent: 1.5,
        }
    }
}

impl Generator for JuliaGenerator {
    fn name(&self) -> &'static str {
        "julia"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let c = (rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        let max_iter = rng.gen_range(self.min_iter..=self.max_iter.max(self.min_iter));
        let mapping = IterationMapping::random(rng);
        let symbols = palette::CONSCIOUSNESS;
        let span = 2.0 * self.extent;

        for y in 0..height {
            for x in 0..width {
                let z = (
                    span * x as f64 / width as f64 - self.extent,
                    span * y as f64 / height as f64 - self.extent,
                );
                let count = escape_iterations(z, c, max_iter, 2.0);
                // Only points that linger near the set are drawn.
                if count > max_iter / 2 {
                    canvas.set(x, y, symbols[mapping.index(count, max_iter, symbols.len())]);
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
    fn test_origin_never_escapes() {
        for max_iter in [1, 20, 33, 40] {
            assert_eq!(escape_iterations((0.0, 0.0), (0.0, 0.0), max_iter, 2.0), max_iter);
        }
    }

    #[test]
    fn test_canvas_centre_maps_to_origin_and_hits_cap() {
        let view = View {
            zoom: 3.0,
            offset: (0.0, 0.0),
        };
        let (width, height) = (40, 20);
        let c = view.point(width / 2, height / 2, width, height);
        assert_eq!(c, (0.0, 0.0));
        assert_eq!(escape_iterations((0.0, 0.0), c, 37, 2.0), 37);
    }

    #[test]
    fn test_far_point_escapes_immediately() {
        assert_eq!(escape_iterations((0.0, 0.0), (3.0, 0.0), 30, 2.0), 0);
    }

    #[test]
    fn test_mappings_stay_in_range() {
        for mapping in IterationMapping::ALL {
            for count in 0..=40 {
                assert!(mapping.index(count, 40, 11) < 11);
            }
            assert_eq!(mapping.index(0, 40, 0), 0);
        }
        assert_eq!(IterationMapping::Linear.index(40, 40, 11), 10);
        assert_eq!(IterationMapping::Linear.index(0, 40, 11), 0);
    }

    #[test]
    fn test_centre_of_fixed_view_is_densest_symbol() {
        let ramp: Vec<char> = MANDELBROT_RAMPS[0].chars().collect();
        let view = View {
            zoom: 3.0,
            offset: (0.0, 0.0),
        };
        let canvas = MandelbrotGenerator::default().render(
            40,
            20,
            view,
            30,
            2.0,
            &ramp,
            IterationMapping::Linear,
        );
        assert_eq!(canvas.get(20, 10), Some('@'));
    }
}
