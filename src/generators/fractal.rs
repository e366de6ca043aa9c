//! Recursive Sierpinski triangle with mystical side decorations.

use super::{palette, pick, Generator};
use crate::canvas::{Canvas, BLANK};
use rand::{Rng, RngCore};

/// Depth beyond which the triangle would dwarf any sensible canvas.
const MAX_DEPTH: u32 = 8;

pub struct FractalGenerator {
    /// Recursion depth of the subdivision.
    pub depth: u32,
    /// Glyph for each solid triangle.
    pub glyph: char,
    /// Chance that a row gets a decoration on either side.
    pub decoration_chance: f64,
}

impl Default for FractalGenerator {
    fn default() -> Self {
        Self {
            depth: 4,
            glyph: '▲',
            decoration_chance: 0.2,
        }
    }
}

impl FractalGenerator {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Rows of a Sierpinski triangle: `2^depth` rows, each `2^(depth+1) - 1`
/// cells wide.
pub fn sierpinski(depth: u32, glyph: char) -> Vec<Vec<char>> {
    if depth == 0 {
        return vec![vec![glyph]];
    }
    let smaller = sierpinski(depth - 1, glyph);
    let pad = vec![BLANK; 1 << (depth - 1)];

    let top = smaller.iter().map(|row| {
        let mut line = pad.clone();
        line.extend(row);
        line.extend(&pad);
        line
    });
    let bottom = smaller.iter().map(|row| {
        let mut line = row.clone();
        line.push(BLANK);
        line.extend(row);
        line
    });
    top.chain(bottom).collect()
}

impl Generator for FractalGenerator {
    fn name(&self) -> &'static str {
        "fractal"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let rows = sierpinski(self.depth.min(MAX_DEPTH), self.glyph);
        let tri_width = rows.first().map_or(0, Vec::len) as i64;

        let left = (width as i64 - tri_width) / 2;
        let top = (height as i64 - rows.len() as i64) / 2;

        for (dy, row) in rows.iter().enumerate() {
            let y = top + dy as i64;
            for (dx, &c) in row.iter().enumerate() {
                if c != BLANK {
                    canvas.plot(left + dx as i64, y, c);
                }
            }
            if rng.gen::<f64>() < self.decoration_chance {
                canvas.plot(left - 2, y, pick(rng, palette::MYSTICAL));
                canvas.plot(left + tri_width + 1, y, pick(rng, palette::MYSTICAL));
            }
        }

        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sierpinski_shape() {
        let rows = sierpinski(4, '▲');
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|r| r.len() == 31));
        // 3^4 solid triangles at depth 4
        let solid = rows.iter().flatten().filter(|&&c| c == '▲').count();
        assert_eq!(solid, 81);
    }

    #[test]
    fn test_small_depth_layout() {
        let rows: Vec<String> = sierpinski(1, '^')
            .into_iter()
            .map(|r| r.into_iter().collect())
            .collect();
        assert_eq!(rows, vec![" ^ ", "^ ^"]);
    }

    #[test]
    fn test_triangle_clipped_on_small_canvas() {
        let mut rng = StdRng::seed_from_u64(5);
        let canvas = FractalGenerator::default().generate(20, 10, &mut rng);
        assert_eq!((canvas.width(), canvas.height()), (20, 10));
        assert!(canvas.filled_count() > 0);
    }
}
