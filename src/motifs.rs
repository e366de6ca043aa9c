//! Fixed motifs: abstract pieces, small emotion faces and two text
//! stylizers.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BLOCKS: &[char] = &['█', '▀', '▄', '▌', '▐', '░', '▒', '▓'];

/// Braille cells for the first ten letters.
const BRAILLE: [(char, char); 10] = [
    ('a', '⠁'),
    ('b', '⠃'),
    ('c', '⠉'),
    ('d', '⠙'),
    ('e', '⠑'),
    ('f', '⠋'),
    ('g', '⠛'),
    ('h', '⠓'),
    ('i', '⠊'),
    ('j', '⠚'),
];

/// Hand-drawn pieces shown when there is no prompt to work from.
pub const ABSTRACT_ART: [&[&str]; 3] = [
    &[
        "   ╭∞∞∞∞∞╮",
        "  ╭┴─────┴╮",
        " ╭┴───────┴╮",
        "╭┴─────────┴╮",
        "│ ▓▒░ ∆ ░▒▓ │",
        "│ ▒░ ◊ ░▒  │",
        "│  ░ ○ ░   │",
        "│   ◌     │",
        "╰─────────╯",
    ],
    &["  ⠋⠗⠕⠍⠀", " ⠮⠀⠎⠞⠁⠗⠎", "⠞⠕⠀⠮⠀⠥⠝⠊⠧⠻⠎⠑"],
    &["   ▓▒░∆░▒▓", "  ▒░◊░▒", " ░○░", "◌"],
];

/// One of the abstract pieces, rows padded to a common width.
pub fn abstract_art<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let rows = ABSTRACT_ART[rng.gen_range(0..ABSTRACT_ART.len())];
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|r| format!("{:<width$}", r, width = width))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Excited,
    #[default]
    Calm,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [Emotion::Happy, Emotion::Sad, Emotion::Excited, Emotion::Calm];

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
        }
    }

    /// The face for this emotion, one string per row.
    pub fn face(self) -> &'static [&'static str] {
        match self {
            Emotion::Happy => &[
                "╭────────╮",
                "│ ◠  ◠  │",
                "│   ◡   │",
                "╰────────╯",
                " \\    /",
                "  \\∞/",
            ],
            Emotion::Sad => &[
                "╭────────╮",
                "│ ◠  ◠  │",
                "│   ⋎   │",
                "╰────────╯",
                " //  \\\\",
                "//    \\\\",
            ],
            Emotion::Excited => &[
                "ϟ╭────────╮ϟ",
                " │ ◉  ◉  │",
                " │   ▲   │",
                " ╰────────╯",
                "  ↑↑  ↑↑",
                " ϟ    ϟ",
            ],
            Emotion::Calm => &[
                "╭────────╮",
                "│ ◇  ◇  │",
                "│   ○   │",
                "╰────────╯",
                " ~    ~",
                "∞    ∞",
            ],
        }
    }

    pub fn art(self) -> String {
        self.face().join("\n")
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised names get the neutral face.
impl FromStr for Emotion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Emotion::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default())
    }
}

/// Lowercase the text and swap a..j for their braille cells. Everything
/// else passes through.
pub fn to_braille(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            BRAILLE
                .iter()
                .find(|(letter, _)| *letter == c)
                .map_or(c, |&(_, cell)| cell)
        })
        .collect()
}

/// Replace every character with a random block glyph.
pub fn to_blocks<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    text.chars()
        .map(|_| BLOCKS.choose(rng).copied().unwrap_or('█'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_abstract_art_rows_share_a_width() {
        for seed in 0..12 {
            let rows = abstract_art(&mut StdRng::seed_from_u64(seed));
            assert!(!rows.is_empty());
            let width = rows[0].chars().count();
            assert!(rows.iter().all(|r| r.chars().count() == width));
        }
    }

    #[test]
    fn test_braille_maps_first_ten_letters() {
        assert_eq!(to_braille("abcdefghij"), "⠁⠃⠉⠙⠑⠋⠛⠓⠊⠚");
    }

    #[test]
    fn test_braille_lowercases_and_passes_through() {
        assert_eq!(to_braille("Bad Zoo!"), "⠃⠁⠙ zoo!");
    }

    #[test]
    fn test_blocks_keep_length() {
        let mut rng = StdRng::seed_from_u64(3);
        let out = to_blocks("hello world", &mut rng);
        assert_eq!(out.chars().count(), 11);
        assert!(out.chars().all(|c| BLOCKS.contains(&c)));
    }

    #[test]
    fn test_unknown_emotion_is_calm() {
        assert_eq!("HAPPY".parse::<Emotion>(), Ok(Emotion::Happy));
        assert_eq!("bored".parse::<Emotion>(), Ok(Emotion::Calm));
    }

    #[test]
    fn test_faces_differ() {
        let faces: Vec<String> = Emotion::ALL.iter().map(|e| e.art()).collect();
        for (i, a) in faces.iter().enumerate() {
            for b in &faces[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
