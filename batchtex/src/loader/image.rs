//! Image decoding collaborator.

use super::LoaderError;
use crate::texture::Color;

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels, `width * height` long.
    pub pixels: Vec<Color>,
}

impl DecodedImage {
    /// Multiply every color channel by its alpha, rounding to nearest.
    pub fn premultiply_alpha(&mut self) {
        for pixel in &mut self.pixels {
            let a = u16::from(pixel.a);
            let scale = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
            pixel.r = scale(pixel.r);
            pixel.g = scale(pixel.g);
            pixel.b = scale(pixel.b);
        }
    }
}

/// Turns encoded image bytes into pixels.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoaderError>;
}

/// [`ImageDecoder`] backed by the `image` crate.
///
/// Accepts any format the crate recognizes from the byte signature and
/// converts it to RGBA8.
#[derive(Debug, Clone, Default)]
pub struct ImageCrateDecoder {
    premultiply: bool,
}

impl ImageCrateDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Premultiply alpha after decoding, for batchers that blend with
    /// premultiplied alpha.
    pub fn with_premultiplied_alpha(mut self, premultiply: bool) -> Self {
        self.premultiply = premultiply;
        self
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoaderError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| LoaderError::Decode(e.to_string()))?
            .to_rgba8();

        let mut decoded = DecodedImage {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.pixels().map(|p| Color::from(*p)).collect(),
        };
        if self.premultiply {
            decoded.premultiply_alpha();
        }
        Ok(decoded)
    }
}
