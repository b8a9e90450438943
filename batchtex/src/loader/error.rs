//! Error types for asset loading.

use thiserror::Error;

use crate::texture::TextureError;

/// Errors that can occur while turning an asset into a texture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoaderError {
    /// The image codec could not decode the bytes.
    #[error("Image decode failed: {0}")]
    Decode(String),

    /// The font file could not be parsed.
    #[error("Font parse failed: {0}")]
    FontParse(String),

    /// The requested character ranges produced no glyphs.
    #[error("No glyphs found in the requested character ranges")]
    EmptyRange,

    /// A glyph does not fit the atlas width.
    #[error("Glyph {glyph:?} is {width}px wide, atlas is {atlas_width}px")]
    AtlasOverflow {
        glyph: char,
        width: u32,
        atlas_width: u32,
    },

    /// A glyph's coverage buffer does not match its bitmap size.
    #[error("Glyph {glyph:?} has {actual} coverage values, expected {expected}")]
    GlyphBitmapMismatch {
        glyph: char,
        expected: usize,
        actual: usize,
    },

    /// Creating or uploading the texture failed.
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}
