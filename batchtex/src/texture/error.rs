//! Error types for texture registry operations.

use thiserror::Error;

use super::{Rect, Size, TextureFormat, TextureId};

/// Errors that can occur while creating or uploading into textures.
///
/// Every variant is a local, synchronous condition that is reported to the
/// caller immediately. Destroying an id that is not live is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    /// The id does not refer to a live texture.
    #[error("Texture not found: {id}")]
    NotFound { id: TextureId },

    /// Invalid dimensions, empty rectangles, or an exhausted id space.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Uploaded element count does not match the target pixel count.
    #[error("Length mismatch: expected {expected} pixels, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Upload rectangle is not fully inside the texture.
    #[error("Rectangle {rect} is out of bounds for a {size} texture")]
    OutOfBounds { rect: Rect, size: Size },

    /// Element byte size is incompatible with the texture format.
    #[error(
        "Format mismatch: {format} expects {expected_bytes} bytes per pixel, element has {actual_bytes}"
    )]
    FormatMismatch {
        format: TextureFormat,
        expected_bytes: usize,
        actual_bytes: usize,
    },

    /// The backend failed to create or update the native resource.
    #[error("Backend error: {0}")]
    Backend(String),
}
