//! Font rasterization collaborator.

use std::collections::BTreeMap;

use tracing::trace;

use super::atlas::{build_atlas, GlyphAtlas, RasterizedGlyph};
use super::atlas::{DEFAULT_ATLAS_WIDTH, DEFAULT_GLYPH_PADDING};
use super::LoaderError;

/// An inclusive range of Unicode scalar values to rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterRange {
    pub start: char,
    pub end: char,
}

impl CharacterRange {
    /// Printable ASCII, U+0020 to U+007E.
    pub const BASIC_LATIN: CharacterRange = CharacterRange::new(' ', '~');

    /// Printable Latin-1 supplement, U+00A0 to U+00FF.
    pub const LATIN_1_SUPPLEMENT: CharacterRange = CharacterRange::new('\u{a0}', '\u{ff}');

    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    /// Characters in the range. Empty if `start > end`.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        self.start..=self.end
    }
}

/// Rasterizes a font into a glyph atlas.
pub trait FontRasterizer {
    fn rasterize(
        &self,
        font_bytes: &[u8],
        px_size: f32,
        ranges: &[CharacterRange],
    ) -> Result<GlyphAtlas, LoaderError>;
}

/// [`FontRasterizer`] backed by `fontdue`.
///
/// Characters the font has no glyph for are skipped. Characters listed in
/// more than one range are rasterized once.
#[derive(Debug, Clone)]
pub struct FontdueRasterizer {
    atlas_width: u32,
    padding: u32,
}

impl Default for FontdueRasterizer {
    fn default() -> Self {
        Self {
            atlas_width: DEFAULT_ATLAS_WIDTH,
            padding: DEFAULT_GLYPH_PADDING,
        }
    }
}

impl FontdueRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_atlas_width(mut self, width: u32) -> Self {
        self.atlas_width = width;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }
}

impl FontRasterizer for FontdueRasterizer {
    fn rasterize(
        &self,
        font_bytes: &[u8],
        px_size: f32,
        ranges: &[CharacterRange],
    ) -> Result<GlyphAtlas, LoaderError> {
        use fontdue::{Font, FontSettings};

        if !(px_size.is_finite() && px_size > 0.0) {
            return Err(LoaderError::FontParse(format!(
                "invalid pixel size {px_size}"
            )));
        }

        let font = Font::from_bytes(font_bytes, FontSettings::default())
            .map_err(|e| LoaderError::FontParse(e.to_string()))?;

        let mut glyphs = BTreeMap::new();
        for ch in ranges.iter().flat_map(CharacterRange::chars) {
            if glyphs.contains_key(&ch) || font.lookup_glyph_index(ch) == 0 {
                continue;
            }
            let (metrics, bitmap) = font.rasterize(ch, px_size);
            glyphs.insert(
                ch,
                RasterizedGlyph {
                    ch,
                    width: metrics.width as u32,
                    height: metrics.height as u32,
                    coverage: bitmap,
                    advance: metrics.advance_width,
                    offset_x: metrics.xmin as f32,
                    offset_y: metrics.ymin as f32,
                },
            );
        }
        trace!(glyphs = glyphs.len(), px_size, "Rasterized font");

        let line_height = font
            .horizontal_line_metrics(px_size)
            .map(|m| m.new_line_size)
            .unwrap_or(px_size);

        let glyphs: Vec<_> = glyphs.into_values().collect();
        build_atlas(&glyphs, self.atlas_width, self.padding, line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_latin_bounds() {
        let chars: Vec<char> = CharacterRange::BASIC_LATIN.chars().collect();
        assert_eq!(chars.len(), 95);
        assert_eq!(chars.first(), Some(&' '));
        assert_eq!(chars.last(), Some(&'~'));
    }

    #[test]
    fn test_latin_1_supplement_bounds() {
        assert_eq!(CharacterRange::LATIN_1_SUPPLEMENT.chars().count(), 96);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert_eq!(CharacterRange::new('z', 'a').chars().count(), 0);
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = FontdueRasterizer::new().rasterize(
            b"not a font",
            16.0,
            &[CharacterRange::BASIC_LATIN],
        );
        assert!(matches!(result, Err(LoaderError::FontParse(_))));
    }

    #[test]
    fn test_invalid_pixel_size() {
        let result = FontdueRasterizer::new().rasterize(b"", 0.0, &[CharacterRange::BASIC_LATIN]);
        assert!(matches!(result, Err(LoaderError::FontParse(_))));
    }

    #[test]
    fn test_builder() {
        let rasterizer = FontdueRasterizer::new().with_atlas_width(256).with_padding(2);
        assert_eq!(rasterizer.atlas_width, 256);
        assert_eq!(rasterizer.padding, 2);
    }
}
