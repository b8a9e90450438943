//! Glyph atlas assembly.
//!
//! Glyph bitmaps are packed left to right into rows ("shelves"). A row is
//! as tall as its tallest glyph; when the next glyph does not fit the
//! remaining width a new row starts below. The final atlas height is
//! rounded up to a power of two.

use std::collections::HashMap;

use super::LoaderError;
use crate::texture::{Color, Rect};

/// Default atlas width in pixels.
pub const DEFAULT_ATLAS_WIDTH: u32 = 512;

/// Default empty border kept around every glyph, in pixels.
pub const DEFAULT_GLYPH_PADDING: u32 = 1;

/// A single rasterized glyph, as produced by a font library.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub ch: char,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage values, `width * height` long.
    pub coverage: Vec<u8>,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// Left edge of the bitmap relative to the pen position.
    pub offset_x: f32,
    /// Bottom edge of the bitmap relative to the baseline, y up.
    pub offset_y: f32,
}

/// Where a glyph lives inside an atlas texture, plus its metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRegion {
    /// Pixel rectangle in the atlas. Empty for blank glyphs like space.
    pub rect: Rect,
    /// Normalized `[min_u, min_v, max_u, max_v]`.
    pub uv: [f32; 4],
    pub advance: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// An RGBA glyph atlas ready for upload.
///
/// Coverage is stored as white with alpha equal to coverage, so tinting
/// a glyph is a plain color multiply.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphAtlas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
    pub glyphs: HashMap<char, GlyphRegion>,
    /// Distance between consecutive baselines in pixels.
    pub line_height: f32,
}

/// Tallest atlas whose height still rounds up to a power of two in `u32`.
const MAX_ATLAS_HEIGHT: u32 = 1 << 31;

/// Row-based rectangle packer.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    width: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    shelf_height: u32,
}

impl ShelfPacker {
    pub fn new(width: u32, padding: u32) -> Self {
        Self {
            width,
            padding,
            cursor_x: 0,
            cursor_y: 0,
            shelf_height: 0,
        }
    }

    /// Reserve a `width × height` slot. Returns its top-left corner, or
    /// `None` if the padded slot is wider than the atlas or would end below
    /// the tallest supported atlas. A rejected slot leaves the packer
    /// unchanged.
    pub fn pack(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let border = self.padding.checked_mul(2)?;
        let padded_w = width.checked_add(border)?;
        let padded_h = height.checked_add(border)?;
        if padded_w > self.width {
            return None;
        }

        let (mut x, mut y) = (self.cursor_x, self.cursor_y);
        let mut shelf_height = self.shelf_height;
        if padded_w > self.width - x {
            y = y.checked_add(shelf_height)?;
            x = 0;
            shelf_height = 0;
        }
        if y.checked_add(padded_h)? > MAX_ATLAS_HEIGHT {
            return None;
        }

        self.cursor_x = x + padded_w;
        self.cursor_y = y;
        self.shelf_height = shelf_height.max(padded_h);
        Some((x + self.padding, y + self.padding))
    }

    /// Height used so far, including the open row.
    pub fn used_height(&self) -> u32 {
        self.cursor_y + self.shelf_height
    }
}

/// Pack glyph bitmaps into a single RGBA atlas.
///
/// Glyphs with an empty bitmap (space, control characters) are recorded
/// with an empty rectangle and zero UVs so their advance is still
/// available for layout.
pub fn build_atlas(
    glyphs: &[RasterizedGlyph],
    atlas_width: u32,
    padding: u32,
    line_height: f32,
) -> Result<GlyphAtlas, LoaderError> {
    if glyphs.is_empty() {
        return Err(LoaderError::EmptyRange);
    }

    for glyph in glyphs {
        let expected = glyph.width as usize * glyph.height as usize;
        if glyph.coverage.len() != expected {
            return Err(LoaderError::GlyphBitmapMismatch {
                glyph: glyph.ch,
                expected,
                actual: glyph.coverage.len(),
            });
        }
    }

    let mut packer = ShelfPacker::new(atlas_width, padding);
    let mut placed = Vec::with_capacity(glyphs.len());
    for glyph in glyphs {
        if glyph.width == 0 || glyph.height == 0 {
            placed.push((glyph, None));
            continue;
        }
        let (x, y) = packer
            .pack(glyph.width, glyph.height)
            .ok_or(LoaderError::AtlasOverflow {
                glyph: glyph.ch,
                width: glyph.width,
                atlas_width,
            })?;
        placed.push((glyph, Some((x, y))));
    }

    let height = packer.used_height().max(1).next_power_of_two();
    let mut pixels = vec![Color::TRANSPARENT; atlas_width as usize * height as usize];
    let mut regions = HashMap::with_capacity(placed.len());

    for (glyph, slot) in placed {
        let (rect, uv) = match slot {
            Some((x, y)) => {
                blit_coverage(&mut pixels, atlas_width, x, y, glyph);
                let uv = [
                    x as f32 / atlas_width as f32,
                    y as f32 / height as f32,
                    (x + glyph.width) as f32 / atlas_width as f32,
                    (y + glyph.height) as f32 / height as f32,
                ];
                (Rect::new(x as i32, y as i32, glyph.width, glyph.height), uv)
            }
            None => (Rect::new(0, 0, 0, 0), [0.0; 4]),
        };

        regions.insert(
            glyph.ch,
            GlyphRegion {
                rect,
                uv,
                advance: glyph.advance,
                offset_x: glyph.offset_x,
                offset_y: glyph.offset_y,
            },
        );
    }

    Ok(GlyphAtlas {
        width: atlas_width,
        height,
        pixels,
        glyphs: regions,
        line_height,
    })
}

fn blit_coverage(pixels: &mut [Color], stride: u32, x: u32, y: u32, glyph: &RasterizedGlyph) {
    let width = glyph.width as usize;
    for (row, src) in glyph.coverage.chunks_exact(width).enumerate() {
        let start = (y as usize + row) * stride as usize + x as usize;
        for (dst, &alpha) in pixels[start..start + width].iter_mut().zip(src) {
            *dst = Color::rgba(255, 255, 255, alpha);
        }
    }
}
