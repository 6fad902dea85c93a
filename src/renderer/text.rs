//! Bitmap text
//!
//! Glyphs are 5x7 cells drawn as one quad per lit cell. Meshes are laid out
//! once per distinct string and reused until the string changes, so a score
//! that stays the same costs no layout work.

use std::collections::HashMap;

use super::shapes;
use super::vertex::Vertex;

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Cells between glyphs
const SPACING: u32 = 1;

/// Rows top to bottom, bit 4 is the leftmost column
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    };
    Some(rows)
}

/// Laid-out text with its top-left corner at the origin
#[derive(Debug, Clone, PartialEq)]
pub struct TextMesh {
    pub vertices: Vec<Vertex>,
    pub width: f32,
    pub height: f32,
}

impl TextMesh {
    /// Lay out `text` with each glyph cell `scale` pixels square.
    ///
    /// Characters without a glyph advance like a space.
    pub fn layout(text: &str, scale: f32, color: [f32; 4]) -> Self {
        let mut vertices = Vec::new();
        let advance = (GLYPH_COLS + SPACING) as f32 * scale;
        let count = text.chars().count();

        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyph(c) else { continue };
            let x0 = i as f32 * advance;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                        vertices.extend(shapes::quad(
                            x0 + col as f32 * scale,
                            row as f32 * scale,
                            scale,
                            scale,
                            color,
                        ));
                    }
                }
            }
        }

        let width = if count == 0 {
            0.0
        } else {
            count as f32 * advance - SPACING as f32 * scale
        };
        Self {
            vertices,
            width,
            height: GLYPH_ROWS as f32 * scale,
        }
    }

    /// Vertices moved so the top-left corner sits at (x, y)
    pub fn placed(&self, x: f32, y: f32) -> impl Iterator<Item = Vertex> + '_ {
        self.vertices.iter().map(move |v| v.offset(x, y))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TextKey {
    text: String,
    scale: u32,
    color: [u32; 4],
}

impl TextKey {
    fn new(text: &str, scale: f32, color: [f32; 4]) -> Self {
        Self {
            text: text.to_owned(),
            scale: scale.to_bits(),
            color: color.map(f32::to_bits),
        }
    }
}

/// Text meshes keyed by content, scale and color
#[derive(Debug, Default)]
pub struct TextCache {
    meshes: HashMap<TextKey, TextMesh>,
    builds: usize,
}

impl TextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mesh for `text`, laid out on first use
    pub fn get(&mut self, text: &str, scale: f32, color: [f32; 4]) -> &TextMesh {
        let builds = &mut self.builds;
        self.meshes
            .entry(TextKey::new(text, scale, color))
            .or_insert_with(|| {
                *builds += 1;
                TextMesh::layout(text, scale, color)
            })
    }

    /// Number of layouts performed so far
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_layout_size() {
        let mesh = TextMesh::layout("10", 2.0, WHITE);
        // Two glyphs of 5 cells with one cell between them
        assert_eq!(mesh.width, 22.0);
        assert_eq!(mesh.height, 14.0);
    }

    #[test]
    fn test_one_quad_per_lit_cell() {
        let mesh = TextMesh::layout("1", 1.0, WHITE);
        let lit: u32 = glyph('1')
            .unwrap()
            .iter()
            .map(|row| row.count_ones())
            .sum();
        assert_eq!(mesh.vertices.len(), lit as usize * 6);
    }

    #[test]
    fn test_space_and_unknown_advance() {
        let spaced = TextMesh::layout("A B", 1.0, WHITE);
        let odd = TextMesh::layout("A#B", 1.0, WHITE);
        assert_eq!(spaced.width, odd.width);
        assert_eq!(spaced.vertices, odd.vertices);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(
            TextMesh::layout("start", 3.0, WHITE),
            TextMesh::layout("START", 3.0, WHITE)
        );
    }

    #[test]
    fn test_placed_offsets_vertices() {
        let mesh = TextMesh::layout("7", 1.0, WHITE);
        let first = mesh.placed(100.0, 50.0).next().unwrap();
        assert_eq!(first.position, [100.0, 50.0]);
    }

    #[test]
    fn test_cache_reuses_layout() {
        let mut cache = TextCache::new();
        cache.get("3", 5.0, WHITE);
        cache.get("3", 5.0, WHITE);
        assert_eq!(cache.builds(), 1);

        cache.get("4", 5.0, WHITE);
        cache.get("3", 6.0, WHITE);
        assert_eq!(cache.builds(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_every_digit_has_a_glyph() {
        for c in '0'..='9' {
            assert!(glyph(c).is_some(), "missing glyph for {c}");
        }
    }
}
