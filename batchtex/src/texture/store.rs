//! Backend-agnostic texture capability interface.

use bytemuck::Pod;

use super::{Rect, Size, TextureBackend, TextureError, TextureFormat, TextureId, TextureRegistry};

/// The capability set every texture store offers.
///
/// Loaders and other collaborators are written against this trait so
/// they work with any registry/backend combination without naming the
/// backend.
pub trait TextureStore {
    /// Native handle type of the underlying backend.
    type Native;

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<TextureId, TextureError>;

    /// Destroy a texture; non-live ids are ignored and return `false`.
    fn destroy_texture(&mut self, id: TextureId) -> bool;

    fn has_texture(&self, id: TextureId) -> bool;

    fn texture_size(&self, id: TextureId) -> Result<Size, TextureError>;

    fn texture_format(&self, id: TextureId) -> Result<TextureFormat, TextureError>;

    /// Full-surface upload.
    fn set_data<T: Pod>(&mut self, id: TextureId, data: &[T]) -> Result<(), TextureError>;

    /// Sub-rectangle upload.
    fn set_data_region<T: Pod>(
        &mut self,
        id: TextureId,
        rect: Rect,
        data: &[T],
    ) -> Result<(), TextureError>;

    /// Native handle, or `None` when `id` is not live.
    fn texture(&self, id: TextureId) -> Option<&Self::Native>;

    fn texture_count(&self) -> usize;
}

impl<B: TextureBackend> TextureStore for TextureRegistry<B> {
    type Native = B::Native;

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<TextureId, TextureError> {
        TextureRegistry::create_texture(self, width, height, format)
    }

    fn destroy_texture(&mut self, id: TextureId) -> bool {
        TextureRegistry::destroy_texture(self, id)
    }

    fn has_texture(&self, id: TextureId) -> bool {
        TextureRegistry::has_texture(self, id)
    }

    fn texture_size(&self, id: TextureId) -> Result<Size, TextureError> {
        TextureRegistry::texture_size(self, id)
    }

    fn texture_format(&self, id: TextureId) -> Result<TextureFormat, TextureError> {
        TextureRegistry::texture_format(self, id)
    }

    fn set_data<T: Pod>(&mut self, id: TextureId, data: &[T]) -> Result<(), TextureError> {
        TextureRegistry::set_data(self, id, data)
    }

    fn set_data_region<T: Pod>(
        &mut self,
        id: TextureId,
        rect: Rect,
        data: &[T],
    ) -> Result<(), TextureError> {
        TextureRegistry::set_data_region(self, id, rect, data)
    }

    fn texture(&self, id: TextureId) -> Option<&B::Native> {
        TextureRegistry::texture(self, id)
    }

    fn texture_count(&self) -> usize {
        TextureRegistry::texture_count(self)
    }
}
