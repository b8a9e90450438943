//! Native resource seam between the registry and a graphics backend.

use std::fmt::Debug;

use super::{Region, Size, TextureError, TextureFormat};

/// Creates, updates and releases the native resource behind a texture.
///
/// The registry owns every native handle a backend hands out and is the
/// only caller of [`upload`](TextureBackend::upload) and
/// [`release`](TextureBackend::release). All arguments arrive already
/// validated: sizes are non-zero, regions lie inside the surface and
/// `bytes` holds exactly `region.pixel_count() * format.bytes_per_pixel()`
/// tightly packed bytes, row by row.
///
/// Implementations do their native work synchronously. A backend that
/// mirrors resources into a graphics context must have the resource
/// ready by the time `create` returns, since callers may upload into it
/// immediately.
pub trait TextureBackend {
    /// Backend-specific handle (a GPU texture object, a surface index, ...).
    type Native: Clone + Debug;

    /// Allocate a native resource. Contents are unspecified until uploaded.
    fn create(&mut self, size: Size, format: TextureFormat) -> Result<Self::Native, TextureError>;

    /// Replace the pixels of `region` with `bytes`.
    fn upload(
        &mut self,
        native: &Self::Native,
        format: TextureFormat,
        region: Region,
        bytes: &[u8],
    ) -> Result<(), TextureError>;

    /// Free a native resource. Called exactly once per created handle.
    fn release(&mut self, native: Self::Native);

    /// Human-readable backend name for diagnostics.
    fn name(&self) -> &str;
}
