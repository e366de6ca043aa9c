//! Pattern generators - each fills a canvas with a different algorithm.
//!
//! Every generator is a plain value holding its tuning parameters and
//! reads all randomness from the `rng` it is handed, so two calls with
//! identically seeded sources draw identical pictures.

pub mod cellular;
pub mod consciousness;
pub mod diffusion;
pub mod dream;
pub mod escape_time;
pub mod flow_field;
pub mod fluid;
pub mod fractal;
pub mod growth;
pub mod neural;
pub mod particles;
pub mod quantum;
pub mod spiral;
pub mod wave;

use crate::canvas::{Canvas, BLANK};
use crate::error::Error;
use crate::sizing::clamp_dimensions;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol palettes shared by several generators.
pub mod palette {
    pub const CONSCIOUSNESS: &[char] = &[
        '∞', '∆', '◊', '○', '●', '◐', '◑', '◒', '◓', '◔', '◕', '⊕', '⊖', '⊗', '⊘', '⊙', '⊚', '⊛',
        '⊜', '⊝',
    ];
    pub const QUANTUM: &[char] = &[
        'ψ', 'Ψ', '∫', '∮', '∯', '∰', '∱', '∲', '∳', '⟨', '⟩', '⟪', '⟫', '⦀', '⦁', '⦂', '⦃', '⦄',
    ];
    pub const MYSTICAL: &[char] = &['✧', '✦', '⋆', '∗', '⁕', '✺', '✹', '⭑', '⭒'];
    pub const SPARKLES: &[char] = &['✧', '✦', '⋆', '∗'];
    pub const WAVES: &[char] = &['∿', '≈', '≋'];
}

/// Trait for all pattern generators.
pub trait Generator {
    /// Registry name of this generator.
    fn name(&self) -> &'static str;

    /// Fill a `width` × `height` canvas. No minimum size is applied here;
    /// a zero-sized request yields an empty canvas.
    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas;
}

/// Every generator the engine can dispatch to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Fractal,
    Spiral,
    Wave,
    Quantum,
    Consciousness,
    Mandelbrot,
    Julia,
    FlowField,
    ReactionDiffusion,
    CellularAutomata,
    Growth,
    Neural,
    Fluid,
    Particle,
    Dream,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 15] = [
        GeneratorKind::Fractal,
        GeneratorKind::Spiral,
        GeneratorKind::Wave,
        GeneratorKind::Quantum,
        GeneratorKind::Consciousness,
        GeneratorKind::Mandelbrot,
        GeneratorKind::Julia,
        GeneratorKind::FlowField,
        GeneratorKind::ReactionDiffusion,
        GeneratorKind::CellularAutomata,
        GeneratorKind::Growth,
        GeneratorKind::Neural,
        GeneratorKind::Fluid,
        GeneratorKind::Particle,
        GeneratorKind::Dream,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Fractal => "fractal",
            GeneratorKind::Spiral => "spiral",
            GeneratorKind::Wave => "wave",
            GeneratorKind::Quantum => "quantum",
            GeneratorKind::Consciousness => "consciousness",
            GeneratorKind::Mandelbrot => "mandelbrot",
            GeneratorKind::Julia => "julia",
            GeneratorKind::FlowField => "flow_field",
            GeneratorKind::ReactionDiffusion => "reaction_diffusion",
            GeneratorKind::CellularAutomata => "cellular_automata",
            GeneratorKind::Growth => "growth",
            GeneratorKind::Neural => "neural",
            GeneratorKind::Fluid => "fluid",
            GeneratorKind::Particle => "particle",
            GeneratorKind::Dream => "dream",
        }
    }

    /// Run this generator with its default parameters. Dimensions below the
    /// minimum are raised to it first.
    pub fn generate(self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let (width, height) = clamp_dimensions(width, height);
        match self {
            GeneratorKind::Fractal => fractal::FractalGenerator::default().generate(width, height, rng),
            GeneratorKind::Spiral => spiral::SpiralGenerator::default().generate(width, height, rng),
            GeneratorKind::Wave => wave::WaveGenerator::default().generate(width, height, rng),
            GeneratorKind::Quantum => quantum::QuantumGenerator::default().generate(width, height, rng),
            GeneratorKind::Consciousness => {
                consciousness::ConsciousnessGenerator::default().generate(width, height, rng)
            }
            GeneratorKind::Mandelbrot => {
                escape_time::MandelbrotGenerator::default().generate(width, height, rng)
            }
            GeneratorKind::Julia => escape_time::JuliaGenerator::default().generate(width, height, rng),
            GeneratorKind::FlowField => {
                flow_field::FlowFieldGenerator::default().generate(width, height, rng)
            }
            GeneratorKind::ReactionDiffusion => {
                diffusion::DiffusionGenerator::default().generate(width, height, rng)
            }
            GeneratorKind::CellularAutomata => {
                cellular::CellularGenerator::default().generate(width, height, rng)
            }
            GeneratorKind::Growth => growth::GrowthGenerator::default().generate(width, height, rng),
            GeneratorKind::Neural => neural::NeuralGenerator::default().generate(width, height, rng),
            GeneratorKind::Fluid => fluid::FluidGenerator::default().generate(width, height, rng),
            GeneratorKind::Particle => {
                particles::ParticleGenerator::default().generate(width, height, rng)
            }
            GeneratorKind::Dream => dream::DreamGenerator::default().generate(width, height, rng),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownGenerator(s.to_string()))
    }
}

/// Uniform pick from a palette, blank for an empty one.
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, symbols: &[char]) -> char {
    if symbols.is_empty() {
        BLANK
    } else {
        symbols[rng.gen_range(0..symbols.len())]
    }
}

/// Map a value in [0, 1] onto a ramp, clamping out-of-range input.
pub(crate) fn ramp(symbols: &[char], value: f64) -> char {
    if symbols.is_empty() || !value.is_finite() {
        return BLANK;
    }
    let idx = (value.clamp(0.0, 1.0) * (symbols.len() - 1) as f64) as usize;
    symbols[idx.min(symbols.len() - 1)]
}
