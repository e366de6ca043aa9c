//! Configuration loading for Glyphweave.
//!
//! Configuration is loaded from TOML files with environment variable overrides.
//! Environment keys nest with a double underscore, so
//! `GLYPHWEAVE_SELECTOR__MAX_STYLES=2` sets `selector.max_styles`.

use crate::error::Result;
use crate::generators::GeneratorKind;
use crate::selector::{StyleRule, StyleSelector};
use crate::sizing::{SizeClass, SizingAdapter, DEFAULT_MARGIN};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";
pub const ENV_PREFIX: &str = "GLYPHWEAVE";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GlyphweaveConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub selector: SelectorConfig,
}

/// Initial display bounds for the sizing adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: usize,

    #[serde(default = "default_height")]
    pub height: usize,

    #[serde(default = "default_margin")]
    pub margin: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
        }
    }
}

fn default_width() -> usize {
    80
}

fn default_height() -> usize {
    24
}

fn default_margin() -> usize {
    DEFAULT_MARGIN
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub size: SizeClass,

    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            size: SizeClass::default(),
            directory: default_directory(),
            json: false,
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_max_styles")]
    pub max_styles: usize,

    /// Extra trigger words per generator name, added as new table rows.
    #[serde(default)]
    pub extra_keywords: BTreeMap<String, Vec<String>>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_styles: default_max_styles(),
            extra_keywords: BTreeMap::new(),
        }
    }
}

fn default_max_styles() -> usize {
    crate::selector::DEFAULT_MAX_STYLES
}

impl GlyphweaveConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn sizing(&self) -> SizingAdapter {
        SizingAdapter::new(self.display.width, self.display.height, self.display.margin)
    }

    /// The default keyword table plus any configured rows. Rows naming an
    /// unknown generator are skipped with a warning.
    pub fn selector(&self) -> StyleSelector {
        let mut selector = StyleSelector::default().with_max_styles(self.selector.max_styles);
        for (name, words) in &self.selector.extra_keywords {
            match name.parse::<GeneratorKind>() {
                Ok(kind) => selector = selector.with_rule(StyleRule::new(kind, words.as_slice())),
                Err(e) => tracing::warn!(%e, "ignoring extra keywords"),
            }
        }
        selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_default_file() {
        let config = GlyphweaveConfig::default();
        assert_eq!(config.display.width, 80);
        assert_eq!(config.display.height, 24);
        assert_eq!(config.display.margin, 10);
        assert_eq!(config.output.size, SizeClass::Medium);
        assert_eq!(config.output.directory, "output");
        assert_eq!(config.selector.max_styles, 3);
    }

    #[test]
    fn test_extra_keywords_extend_selector() {
        let mut config = GlyphweaveConfig::default();
        config
            .selector
            .extra_keywords
            .insert("julia".to_string(), vec!["seahorse".to_string()]);
        config
            .selector
            .extra_keywords
            .insert("nonsense".to_string(), vec!["anything".to_string()]);

        let selector = config.selector();
        assert_eq!(selector.matches("a seahorse valley"), vec![GeneratorKind::Julia]);
        assert_eq!(selector.rules().len(), 16);
    }

    #[test]
    fn test_env_overrides_keys_with_underscores() {
        std::env::set_var("GLYPHWEAVE_DISPLAY__MARGIN", "4");
        std::env::set_var("GLYPHWEAVE_OUTPUT__SIZE", "large");
        let config = GlyphweaveConfig::load(Path::new("does-not-exist.toml"));
        std::env::remove_var("GLYPHWEAVE_DISPLAY__MARGIN");
        std::env::remove_var("GLYPHWEAVE_OUTPUT__SIZE");

        let config = config.unwrap();
        assert_eq!(config.display.margin, 4);
        assert_eq!(config.output.size, SizeClass::Large);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config = GlyphweaveConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.selector.max_styles, 3);
    }
}
