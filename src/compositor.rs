//! Layering of generator outputs and the decorative frame around them.

use crate::canvas::{Canvas, BLANK};
use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default frame alphabet.
pub const FRAME_SYMBOLS: &[char] = &['∞', '∆', '◊', '○', '●', '◐', '◑', '∫', 'ψ'];

/// Frame alphabet used when water is the dominant motif.
pub const WAVE_FRAME_SYMBOLS: &[char] = &['∿', '≈', '≋', '~'];

const TOP_FRAME_LEN: usize = 5;
const BOTTOM_FRAME_LEN: usize = 4;

/// A finished, framed piece ready to hand to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Frame line, canvas rows, frame line.
    pub lines: Vec<String>,
    /// Width of the canvas body in cells.
    pub width: usize,
    /// Height of the whole block, frame rows included.
    pub height: usize,
    /// Generators that contributed, in priority order.
    pub styles: Vec<String>,
}

impl Artwork {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Merge canvases by per-cell priority: the first non-blank symbol in list
/// order wins. The result takes the first canvas's dimensions; cells that a
/// smaller canvas does not cover count as blank.
pub fn merge(canvases: &[Canvas]) -> Result<Canvas> {
    let first = canvases.first().ok_or(Error::NothingToMerge)?;
    let (width, height) = (first.width(), first.height());

    let mut merged = Canvas::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let symbol = canvases
                .iter()
                .filter_map(|c| c.get(x, y))
                .find(|&c| c != BLANK)
                .unwrap_or(BLANK);
            merged.set(x, y, symbol);
        }
    }
    Ok(merged)
}

/// Wrap a canvas in one decorative line above and one below.
///
/// The top line carries five symbols and the bottom four, spaced out and
/// centred over the canvas width.
pub fn frame(canvas: &Canvas, charset: &[char], rng: &mut (impl Rng + ?Sized)) -> Vec<String> {
    let mut lines = Vec::with_capacity(canvas.height() + 2);
    lines.push(frame_line(TOP_FRAME_LEN, canvas.width(), charset, rng));
    lines.extend(canvas.lines());
    lines.push(frame_line(BOTTOM_FRAME_LEN, canvas.width(), charset, rng));
    lines
}

/// Merge, frame and package in one step.
pub fn compose(
    canvases: &[Canvas],
    styles: Vec<String>,
    charset: &[char],
    rng: &mut (impl Rng + ?Sized),
) -> Result<Artwork> {
    let merged = merge(canvases)?;
    let lines = frame(&merged, charset, rng);
    Ok(Artwork {
        width: merged.width(),
        height: lines.len(),
        lines,
        styles,
    })
}

fn frame_line(
    count: usize,
    width: usize,
    charset: &[char],
    rng: &mut (impl Rng + ?Sized),
) -> String {
    let charset = if charset.is_empty() {
        FRAME_SYMBOLS
    } else {
        charset
    };
    let symbols: Vec<String> = (0..count)
        .map(|_| charset[rng.gen_range(0..charset.len())].to_string())
        .collect();
    let body = symbols.join(" ");
    let pad = width.saturating_sub(body.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_blank_under_solid_yields_solid() {
        let blank = Canvas::new(20, 10);
        let solid = Canvas::filled(20, 10, '#');
        assert_eq!(merge(&[blank, solid.clone()]).unwrap(), solid);
    }

    #[test]
    fn test_merge_is_idempotent_for_identical_inputs() {
        let mut a = Canvas::new(20, 10);
        a.set(3, 4, '◉');
        a.set(19, 9, '·');
        assert_eq!(merge(&[a.clone(), a.clone()]).unwrap(), a);
    }

    #[test]
    fn test_first_non_blank_wins() {
        let mut a = Canvas::new(3, 1);
        let mut b = Canvas::new(3, 1);
        a.set(0, 0, 'a');
        b.set(0, 0, 'b');
        b.set(1, 0, 'b');
        let merged = merge(&[a, b]).unwrap();
        assert_eq!(merged.to_text(), "ab ");
    }

    #[test]
    fn test_merge_rejects_empty_input() {
        assert!(matches!(merge(&[]), Err(Error::NothingToMerge)));
    }

    #[test]
    fn test_frame_adds_exactly_two_rows() {
        let mut rng = StdRng::seed_from_u64(7);
        let canvas = Canvas::filled(30, 12, '.');
        let lines = frame(&canvas, FRAME_SYMBOLS, &mut rng);
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0].split_whitespace().count(), 5);
        assert_eq!(lines[13].split_whitespace().count(), 4);
        assert!(lines[1..13].iter().all(|l| l.chars().count() == 30));
    }

    #[test]
    fn test_compose_reports_block_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let art = compose(
            &[Canvas::new(25, 10)],
            vec!["spiral".to_string()],
            FRAME_SYMBOLS,
            &mut rng,
        )
        .unwrap();
        assert_eq!(art.width, 25);
        assert_eq!(art.height, 12);
        assert_eq!(art.text().lines().count(), 12);
    }
}
