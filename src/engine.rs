//! The pipeline entry point: sizing, style selection, generation and
//! compositing.

use crate::compositor::{self, Artwork, FRAME_SYMBOLS, WAVE_FRAME_SYMBOLS};
use crate::error::Result;
use crate::generators::GeneratorKind;
use crate::motifs;
use crate::selector::StyleSelector;
use crate::sizing::{SizeClass, SizingAdapter};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Style name reported for the fixed abstract pieces.
pub const ABSTRACT_STYLE: &str = "abstract";

#[derive(Debug, Clone, Default)]
pub struct ArtEngine {
    sizing: SizingAdapter,
    selector: StyleSelector,
}

impl ArtEngine {
    pub fn new(sizing: SizingAdapter, selector: StyleSelector) -> Self {
        Self { sizing, selector }
    }

    pub fn sizing(&self) -> &SizingAdapter {
        &self.sizing
    }

    pub fn selector(&self) -> &StyleSelector {
        &self.selector
    }

    /// Record the caller's current display area. Call before a request
    /// whenever the display may have been resized.
    pub fn refresh_display_bounds(&mut self, width: usize, height: usize) {
        tracing::debug!(width, height, "display bounds refreshed");
        self.sizing.refresh(width, height);
    }

    /// Run the whole pipeline for `prompt`. A missing size class means
    /// medium. A blank prompt gets one of the fixed abstract pieces instead.
    pub fn generate_art(
        &self,
        prompt: &str,
        size: Option<SizeClass>,
        rng: &mut dyn RngCore,
    ) -> Result<Artwork> {
        if prompt.trim().is_empty() {
            return Ok(Self::abstract_art(rng));
        }

        let class = size.unwrap_or_default();
        let (width, height) = self.sizing.size_for(class);
        let styles = self.selector.select(prompt, rng);
        tracing::debug!(%class, width, height, ?styles, "generating art");

        let canvases: Vec<_> = styles
            .iter()
            .map(|kind| kind.generate(width, height, rng))
            .collect();

        let charset = if styles.first() == Some(&GeneratorKind::Fluid) {
            WAVE_FRAME_SYMBOLS
        } else {
            FRAME_SYMBOLS
        };
        let names = styles.iter().map(|k| k.name().to_string()).collect();
        compositor::compose(&canvases, names, charset, rng)
    }

    /// A fixed abstract piece, unframed.
    pub fn abstract_art(rng: &mut dyn RngCore) -> Artwork {
        let lines = motifs::abstract_art(rng);
        Artwork {
            width: lines.first().map_or(0, |l| l.chars().count()),
            height: lines.len(),
            lines,
            styles: vec![ABSTRACT_STYLE.to_string()],
        }
    }

    /// A seed derived from the prompt text, so the same prompt can be
    /// redrawn identically.
    pub fn seed_for_prompt(prompt: &str) -> u64 {
        let digest = Sha256::digest(prompt.trim().to_lowercase().as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_art_fits_the_size_class() {
        let engine = ArtEngine::default();
        let art = engine
            .generate_art("a growing organism", Some(SizeClass::Tiny), &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(art.width, 20);
        assert_eq!(art.height, 10 + 2);
        assert_eq!(art.lines.len(), art.height);
        assert_eq!(art.styles, vec!["growth".to_string()]);
        for line in &art.lines[1..art.height - 1] {
            assert_eq!(line.chars().count(), art.width);
        }
    }

    #[test]
    fn test_refresh_changes_dimensions() {
        let mut engine = ArtEngine::default();
        engine.refresh_display_bounds(210, 110);
        let art = engine
            .generate_art("a dream", Some(SizeClass::Medium), &mut StdRng::seed_from_u64(2))
            .unwrap();
        assert_eq!(art.width, 100);
        assert_eq!(art.height, 50 + 2);
    }

    #[test]
    fn test_same_seed_same_art() {
        let engine = ArtEngine::default();
        let draw = |seed| {
            engine
                .generate_art("anything at all", None, &mut StdRng::seed_from_u64(seed))
                .unwrap()
        };
        assert_eq!(draw(9), draw(9));
    }

    #[test]
    fn test_blank_prompt_returns_an_abstract_piece() {
        let engine = ArtEngine::default();
        for prompt in ["", "   ", "\n\t"] {
            let art = engine
                .generate_art(prompt, Some(SizeClass::Large), &mut StdRng::seed_from_u64(5))
                .unwrap();
            assert_eq!(art.styles, vec![ABSTRACT_STYLE.to_string()]);
            assert_eq!(art.height, art.lines.len());
            assert!(art.lines.iter().all(|l| l.chars().count() == art.width));
            let text = art.text();
            assert!(motifs::ABSTRACT_ART
                .iter()
                .any(|rows| rows.iter().all(|r| text.contains(r))));
        }
    }

    #[test]
    fn test_prompt_seed_ignores_case_and_padding() {
        assert_eq!(
            ArtEngine::seed_for_prompt("  Ocean Waves "),
            ArtEngine::seed_for_prompt("ocean waves")
        );
        assert_ne!(
            ArtEngine::seed_for_prompt("ocean waves"),
            ArtEngine::seed_for_prompt("ocean wave")
        );
    }
}
