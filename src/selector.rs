//! Prompt to generator selection.
//!
//! A fixed table maps trigger words to generators; a prompt picks every
//! generator whose words it contains. Adding a style means adding a row,
//! the matching itself never changes. Prompts that hit nothing get a
//! random handful of generators instead.

use crate::generators::GeneratorKind;
use rand::seq::SliceRandom;
use rand::Rng;

/// Most generators layered into one piece.
pub const DEFAULT_MAX_STYLES: usize = 3;

/// One table row: a generator and the words that summon it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub kind: GeneratorKind,
    pub keywords: Vec<String>,
}

impl StyleRule {
    pub fn new<S: AsRef<str>>(kind: GeneratorKind, keywords: &[S]) -> Self {
        Self {
            kind,
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// `prompt` must already be lowercase.
    fn matches(&self, prompt: &str) -> bool {
        self.keywords.iter().any(|k| prompt.contains(k.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct StyleSelector {
    rules: Vec<StyleRule>,
    max_styles: usize,
}

impl Default for StyleSelector {
    fn default() -> Self {
        use GeneratorKind::*;

        let table: [(GeneratorKind, &[&str]); 15] = [
            (Neural, &["think", "brain", "mind", "neural"]),
            (Fluid, &["flow", "fluid", "water", "wave"]),
            (Particle, &["particle", "energy", "dynamic"]),
            (Growth, &["grow", "organic", "life", "nature"]),
            (Dream, &["dream", "abstract", "surreal"]),
            (Fractal, &["fractal", "recursive", "sierpinski", "triangle"]),
            (Spiral, &["spiral", "vortex", "swirl"]),
            (Wave, &["interference", "ripple", "oscillat"]),
            (Quantum, &["quantum", "physics", "probability"]),
            (Consciousness, &["conscious", "soul", "introspect", "aware"]),
            (Mandelbrot, &["mandelbrot", "infinite", "chaos"]),
            (Julia, &["julia", "complex"]),
            (FlowField, &["field", "current", "wind", "arrow"]),
            (ReactionDiffusion, &["turing", "reaction", "diffusion", "texture"]),
            (CellularAutomata, &["cellular", "automat", "conway", "pixel"]),
        ];

        Self {
            rules: table
                .iter()
                .map(|(kind, words)| StyleRule::new(*kind, *words))
                .collect(),
            max_styles: DEFAULT_MAX_STYLES,
        }
    }
}

impl StyleSelector {
    /// A selector with no rules; every prompt falls back to random styles.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            max_styles: DEFAULT_MAX_STYLES,
        }
    }

    /// Cap on layered styles, held within 1..=3.
    pub fn with_max_styles(mut self, max_styles: usize) -> Self {
        self.max_styles = max_styles.clamp(1, DEFAULT_MAX_STYLES);
        self
    }

    /// Append a table row.
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Generators whose keywords appear in `prompt`, in table order,
    /// without duplicates and capped at the style limit.
    pub fn matches(&self, prompt: &str) -> Vec<GeneratorKind> {
        let prompt = prompt.to_lowercase();
        let mut chosen: Vec<GeneratorKind> = Vec::new();
        for rule in self.rules.iter().filter(|r| r.matches(&prompt)) {
            if !chosen.contains(&rule.kind) {
                chosen.push(rule.kind);
            }
            if chosen.len() == self.max_styles {
                break;
            }
        }
        chosen
    }

    /// Keyword matches, or one to three distinct random generators when
    /// nothing matches.
    pub fn select<R: Rng + ?Sized>(&self, prompt: &str, rng: &mut R) -> Vec<GeneratorKind> {
        let matched = self.matches(prompt);
        if !matched.is_empty() {
            tracing::debug!(?matched, "styles matched by keyword");
            return matched;
        }

        let count = rng.gen_range(1..=self.max_styles);
        let picked: Vec<GeneratorKind> = GeneratorKind::ALL
            .choose_multiple(rng, count)
            .copied()
            .collect();
        tracing::debug!(?picked, "no keyword matched, picked styles at random");
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_growth_prompt_is_deterministic() {
        let selector = StyleSelector::default();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                selector.select("make me a growth pattern please", &mut rng),
                vec![GeneratorKind::Growth]
            );
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let selector = StyleSelector::default();
        assert_eq!(
            selector.matches("A BRAIN full of Thoughts"),
            vec![GeneratorKind::Neural]
        );
    }

    #[test]
    fn test_multiple_families_in_table_order_capped() {
        let selector = StyleSelector::default();
        let picked = selector.matches("a surreal dream of water, particles and a thinking mind");
        assert_eq!(
            picked,
            vec![
                GeneratorKind::Neural,
                GeneratorKind::Fluid,
                GeneratorKind::Particle
            ]
        );
    }

    #[test]
    fn test_style_cap_never_exceeds_three() {
        let prompt = "a brain of water, particle energy, organic dream fractal spiral";
        let mut rng = StdRng::seed_from_u64(0);
        let wide = StyleSelector::default().with_max_styles(10);
        assert_eq!(wide.select(prompt, &mut rng).len(), 3);

        let narrow = StyleSelector::default().with_max_styles(0);
        assert_eq!(narrow.select(prompt, &mut rng), vec![GeneratorKind::Neural]);
    }

    #[test]
    fn test_fallback_is_one_to_three_distinct() {
        let selector = StyleSelector::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = selector.select("hello there", &mut rng);
            assert!((1..=3).contains(&picked.len()));
            let mut unique = picked.clone();
            unique.sort_by_key(|k| k.name());
            unique.dedup();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn test_empty_prompt_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!StyleSelector::default().select("", &mut rng).is_empty());
    }

    #[test]
    fn test_new_rows_extend_matching() {
        let selector = StyleSelector::empty()
            .with_rule(StyleRule::new(GeneratorKind::Julia, &["Sea Horse"]))
            .with_rule(StyleRule::new(GeneratorKind::Julia, &["seahorse"]));
        assert!(selector.matches("draw a sea horse").contains(&GeneratorKind::Julia));
        assert_eq!(selector.matches("a seahorse, a sea horse").len(), 1);
        assert!(selector.matches("nothing here").is_empty());
    }
}
