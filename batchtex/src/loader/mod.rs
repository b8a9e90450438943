//! Asset loading on top of a [`TextureStore`].
//!
//! Loaders turn encoded assets into live textures. Decoding and font
//! rasterization are delegated to small collaborator traits so the core
//! never depends on a particular codec or font library:
//!
//! ```text
//! bytes ──► ImageDecoder   ──► DecodedImage ──┐
//!                                             ├──► create_texture + set_data ──► TextureId
//! bytes ──► FontRasterizer ──► GlyphAtlas ────┘
//! ```
//!
//! Every loader creates an `Rgba8` texture and uploads into it. If the
//! upload fails the new texture is destroyed again before the error is
//! returned, so a failed load never leaves a stray id behind.
//!
//! # Example
//!
//! ```
//! use batchtex::loader::load_pixels;
//! use batchtex::texture::{Color, SoftwareBackend, TextureRegistry};
//!
//! let mut registry = TextureRegistry::new(SoftwareBackend::new());
//! let id = load_pixels(&mut registry, 2, 1, &[Color::RED, Color::BLUE]).unwrap();
//! assert!(registry.has_texture(id));
//!
//! // Wrong pixel count: the texture is not kept.
//! assert!(load_pixels(&mut registry, 2, 2, &[Color::RED]).is_err());
//! assert_eq!(registry.texture_count(), 1);
//! ```

mod atlas;
mod error;
mod font;
mod image;

pub use atlas::{
    build_atlas, GlyphAtlas, GlyphRegion, RasterizedGlyph, ShelfPacker, DEFAULT_ATLAS_WIDTH,
    DEFAULT_GLYPH_PADDING,
};
pub use error::LoaderError;
pub use font::{CharacterRange, FontRasterizer, FontdueRasterizer};
pub use image::{DecodedImage, ImageCrateDecoder, ImageDecoder};

use std::collections::HashMap;

use tracing::debug;

use crate::texture::{Color, TextureFormat, TextureId, TextureStore};

/// A font atlas uploaded as a texture, with its glyph table.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFont {
    pub texture: TextureId,
    pub glyphs: HashMap<char, GlyphRegion>,
    pub line_height: f32,
}

impl LoadedFont {
    /// Atlas region and metrics for `ch`, if the font covers it.
    pub fn glyph(&self, ch: char) -> Option<&GlyphRegion> {
        self.glyphs.get(&ch)
    }
}

/// Create an `Rgba8` texture of `width × height` and fill it with `pixels`.
pub fn load_pixels<S: TextureStore>(
    store: &mut S,
    width: u32,
    height: u32,
    pixels: &[Color],
) -> Result<TextureId, LoaderError> {
    let id = store.create_texture(width, height, TextureFormat::Rgba8)?;
    if let Err(e) = store.set_data(id, pixels) {
        store.destroy_texture(id);
        return Err(e.into());
    }
    Ok(id)
}

/// Decode `bytes` with `decoder` and upload the result.
pub fn load_image<S, D>(store: &mut S, decoder: &D, bytes: &[u8]) -> Result<TextureId, LoaderError>
where
    S: TextureStore,
    D: ImageDecoder + ?Sized,
{
    let image = decoder.decode(bytes)?;
    let id = load_pixels(store, image.width, image.height, &image.pixels)?;
    debug!(%id, width = image.width, height = image.height, "Image loaded");
    Ok(id)
}

/// Rasterize `ranges` of a font at `px_size` and upload the atlas.
pub fn load_font<S, R>(
    store: &mut S,
    rasterizer: &R,
    bytes: &[u8],
    px_size: f32,
    ranges: &[CharacterRange],
) -> Result<LoadedFont, LoaderError>
where
    S: TextureStore,
    R: FontRasterizer + ?Sized,
{
    let atlas = rasterizer.rasterize(bytes, px_size, ranges)?;
    let texture = load_pixels(store, atlas.width, atlas.height, &atlas.pixels)?;
    debug!(
        id = %texture,
        glyphs = atlas.glyphs.len(),
        width = atlas.width,
        height = atlas.height,
        px_size,
        "Font atlas loaded"
    );

    Ok(LoadedFont {
        texture,
        glyphs: atlas.glyphs,
        line_height: atlas.line_height,
    })
}
