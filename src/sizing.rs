//! Target dimensions from a size class and the caller's display area.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest canvas width any generator is asked to fill.
pub const MIN_WIDTH: usize = 20;
/// Smallest canvas height any generator is asked to fill.
pub const MIN_HEIGHT: usize = 10;
/// Cells reserved on each axis for borders.
pub const DEFAULT_MARGIN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl SizeClass {
    pub const ALL: [SizeClass; 5] = [
        SizeClass::Tiny,
        SizeClass::Small,
        SizeClass::Medium,
        SizeClass::Large,
        SizeClass::Full,
    ];

    /// Fraction of the usable display taken on each axis.
    pub fn fractions(self) -> (f64, f64) {
        match self {
            SizeClass::Tiny => (0.2, 0.2),
            SizeClass::Small => (0.3, 0.3),
            SizeClass::Medium => (0.5, 0.5),
            SizeClass::Large => (0.7, 0.7),
            SizeClass::Full => (0.9, 0.9),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SizeClass::Tiny => "tiny",
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
            SizeClass::Full => "full",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeClass::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSizeClass(s.to_string()))
    }
}

/// Raise dimensions below the minimum up to it.
pub fn clamp_dimensions(width: usize, height: usize) -> (usize, usize) {
    (width.max(MIN_WIDTH), height.max(MIN_HEIGHT))
}

/// Holds the last known display area; the caller refreshes it whenever the
/// display may have been resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingAdapter {
    available_width: usize,
    available_height: usize,
    margin: usize,
}

impl Default for SizingAdapter {
    fn default() -> Self {
        Self::new(80, 24, DEFAULT_MARGIN)
    }
}

impl SizingAdapter {
    pub fn new(available_width: usize, available_height: usize, margin: usize) -> Self {
        Self {
            available_width,
            available_height,
            margin,
        }
    }

    /// Replace the stored display area.
    pub fn refresh(&mut self, available_width: usize, available_height: usize) {
        self.available_width = available_width;
        self.available_height = available_height;
    }

    pub fn available(&self) -> (usize, usize) {
        (self.available_width, self.available_height)
    }

    /// Dimensions for `class` within the stored display area.
    pub fn size_for(&self, class: SizeClass) -> (usize, usize) {
        size_for(
            class,
            self.available_width,
            self.available_height,
            self.margin,
        )
    }
}

/// Dimensions for `class` inside a display of the given size, never below
/// [`MIN_WIDTH`] × [`MIN_HEIGHT`].
pub fn size_for(
    class: SizeClass,
    available_width: usize,
    available_height: usize,
    margin: usize,
) -> (usize, usize) {
    let (fw, fh) = class.fractions();
    let usable_width = available_width.saturating_sub(margin) as f64;
    let usable_height = available_height.saturating_sub(margin) as f64;
    clamp_dimensions(
        (usable_width * fw).floor() as usize,
        (usable_height * fh).floor() as usize,
    )
}
