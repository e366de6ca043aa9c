//! Error types for the library surface.
//!
//! Generation itself never fails: bad dimensions are clamped, unmatched
//! prompts fall back to random styles and stray writes are dropped. What
//! remains are lookups by name and configuration loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("unknown size class: {0} (expected tiny, small, medium, large or full)")]
    UnknownSizeClass(String),

    #[error("no canvases to merge")]
    NothingToMerge,

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
