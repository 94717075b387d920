#![forbid(unsafe_code)]

//! Filler glyph palette for the scrambling phase.
//!
//! While a slot is scrambling it displays noise glyphs drawn from a fixed
//! palette. The default palette is symbol-only and underscore-weighted, so
//! mid-transition text reads as static rather than as words.

use crate::rng::Rng;

/// Default noise glyphs. Underscore appears several times on purpose: the
/// repeated entries weight the draw toward a quiet baseline glyph.
const DEFAULT_GLYPHS: &[char] = &[
    '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '=', '+', '*', '^', '?', '@', '$',
    '%', '&', '(', ')', ';', '~', '#', '_', '_', '_', '_', '_', '_', '_', '_',
];

/// An ordered, non-empty set of filler glyphs.
#[derive(Debug, Clone)]
pub struct GlyphPalette {
    glyphs: Vec<char>,
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_GLYPHS.to_vec(),
        }
    }
}

impl GlyphPalette {
    /// Build a palette from the given glyphs. An empty input falls back to
    /// the default palette so [`GlyphPalette::random`] always has a draw.
    #[must_use]
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Self {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.is_empty() {
            Self::default()
        } else {
            Self { glyphs }
        }
    }

    /// Uniform random glyph from the palette.
    pub fn random(&self, rng: &mut Rng) -> char {
        // The palette is never empty, but stay total anyway.
        rng.pick(&self.glyphs).copied().unwrap_or('_')
    }

    /// Whether `ch` is a member of the palette.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }

    /// Number of entries (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with collection types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_nonempty() {
        let palette = GlyphPalette::default();
        assert!(!palette.is_empty());
        assert!(palette.len() >= 20);
    }

    #[test]
    fn default_palette_is_non_alphanumeric() {
        let palette = GlyphPalette::default();
        for ch in DEFAULT_GLYPHS {
            assert!(!ch.is_alphanumeric(), "alphanumeric glyph: {ch}");
            assert!(palette.contains(*ch));
        }
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        let palette = GlyphPalette::new(std::iter::empty());
        assert_eq!(palette.len(), DEFAULT_GLYPHS.len());
    }

    #[test]
    fn random_draws_are_members() {
        let palette = GlyphPalette::default();
        let mut rng = Rng::new(42);
        for _ in 0..500 {
            assert!(palette.contains(palette.random(&mut rng)));
        }
    }

    #[test]
    fn custom_palette_draws_only_its_members() {
        let palette = GlyphPalette::new(['#', '%']);
        let mut rng = Rng::new(7);
        for _ in 0..100 {
            let ch = palette.random(&mut rng);
            assert!(ch == '#' || ch == '%');
        }
    }

    #[test]
    fn underscore_is_weighted() {
        let underscores = DEFAULT_GLYPHS.iter().filter(|c| **c == '_').count();
        assert!(underscores > 1);
    }
}
