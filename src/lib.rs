//! Glyphweave - Procedural character art from free-text prompts.
//!
//! A prompt picks one or more pattern generators (fractals, escape-time
//! sets, cellular automata, spiking neurons, particles, water and more),
//! each fills a grid of printable symbols, and the results are layered
//! and framed into a single block of text.

pub mod canvas;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod generators;
pub mod motifs;
pub mod selector;
pub mod sizing;

pub use canvas::Canvas;
pub use compositor::Artwork;
pub use config::GlyphweaveConfig;
pub use engine::ArtEngine;
pub use error::{Error, Result};
pub use generators::{Generator, GeneratorKind};
pub use selector::StyleSelector;
pub use sizing::{SizeClass, SizingAdapter};
