//! CPU-side surface backend.
//!
//! Keeps every texture as a plain byte buffer. Useful for headless hosts,
//! software rasterizers and tests that need to read pixels back.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use super::{Region, Size, TextureBackend, TextureError, TextureFormat};

/// Handle to a surface owned by a [`SoftwareBackend`].
///
/// Handles are issued from 0 upward, so `SurfaceHandle(0)` is a perfectly
/// valid surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(pub u32);

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[derive(Debug)]
struct Surface {
    size: Size,
    format: TextureFormat,
    pixels: Vec<u8>,
}

/// Backend storing textures in system memory.
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    surfaces: HashMap<SurfaceHandle, Surface>,
    next_handle: u32,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of a surface, row-major and tightly packed.
    pub fn pixels(&self, handle: SurfaceHandle) -> Option<&[u8]> {
        self.surfaces.get(&handle).map(|s| s.pixels.as_slice())
    }

    /// Size and format of a surface.
    pub fn surface_info(&self, handle: SurfaceHandle) -> Option<(Size, TextureFormat)> {
        self.surfaces.get(&handle).map(|s| (s.size, s.format))
    }

    /// Next handle not held by a live surface. The counter wraps, skipping
    /// handles that are still in use.
    fn next_free_handle(&mut self) -> Result<SurfaceHandle, TextureError> {
        if self.surfaces.len() as u64 > u64::from(u32::MAX) {
            return Err(TextureError::Backend(
                "surface handle space exhausted".to_string(),
            ));
        }
        loop {
            let handle = SurfaceHandle(self.next_handle);
            self.next_handle = self.next_handle.wrapping_add(1);
            if !self.surfaces.contains_key(&handle) {
                return Ok(handle);
            }
        }
    }

    /// Number of surfaces currently allocated.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

impl TextureBackend for SoftwareBackend {
    type Native = SurfaceHandle;

    fn create(&mut self, size: Size, format: TextureFormat) -> Result<SurfaceHandle, TextureError> {
        let len = size
            .pixel_count()
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| {
                TextureError::Backend(format!("surface {} {} is too large", size, format))
            })?;

        let handle = self.next_free_handle()?;
        self.surfaces.insert(
            handle,
            Surface {
                size,
                format,
                pixels: vec![0; len],
            },
        );
        Ok(handle)
    }

    fn upload(
        &mut self,
        native: &SurfaceHandle,
        format: TextureFormat,
        region: Region,
        bytes: &[u8],
    ) -> Result<(), TextureError> {
        let surface = self
            .surfaces
            .get_mut(native)
            .ok_or_else(|| TextureError::Backend(format!("unknown {}", native)))?;

        let bpp = format.bytes_per_pixel();
        if region.covers(surface.size) {
            surface.pixels.copy_from_slice(bytes);
        } else {
            let stride = surface.size.width as usize * bpp;
            let row_len = region.width as usize * bpp;
            for (row, src) in bytes.chunks_exact(row_len).enumerate() {
                let start = (region.y as usize + row) * stride + region.x as usize * bpp;
                surface.pixels[start..start + row_len].copy_from_slice(src);
            }
        }

        trace!(handle = %native, bytes = bytes.len(), "surface updated");
        Ok(())
    }

    fn release(&mut self, native: SurfaceHandle) {
        self.surfaces.remove(&native);
    }

    fn name(&self) -> &str {
        "software"
    }
}
