//! `wgpu` texture backend (enabled with the `gpu` feature).

use std::sync::Arc;

use tracing::debug;

use super::{Region, Size, TextureBackend, TextureError, TextureFormat};

/// Backend allocating `wgpu` textures on a device.
///
/// Textures are created with `TEXTURE_BINDING | COPY_DST` usage and a
/// single mip level. Uploads go through [`wgpu::Queue::write_texture`],
/// which stages the data and does not require row alignment.
#[derive(Debug)]
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    usage: wgpu::TextureUsages,
}

impl WgpuBackend {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        }
    }

    /// Add extra usages (e.g. `RENDER_ATTACHMENT` for render targets).
    pub fn with_extra_usage(mut self, usage: wgpu::TextureUsages) -> Self {
        self.usage |= usage;
        self
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

/// Map a registry format to the `wgpu` format used for storage.
pub fn wgpu_format(format: TextureFormat) -> wgpu::TextureFormat {
    match format {
        TextureFormat::Rgba8 => wgpu::TextureFormat::Rgba8Unorm,
        TextureFormat::Bgra8 => wgpu::TextureFormat::Bgra8Unorm,
        TextureFormat::R8 => wgpu::TextureFormat::R8Unorm,
        TextureFormat::Rg8 => wgpu::TextureFormat::Rg8Unorm,
        TextureFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
        TextureFormat::Rgba32Float => wgpu::TextureFormat::Rgba32Float,
    }
}

impl TextureBackend for WgpuBackend {
    type Native = Arc<wgpu::Texture>;

    fn create(&mut self, size: Size, format: TextureFormat) -> Result<Self::Native, TextureError> {
        let limit = self.device.limits().max_texture_dimension_2d;
        if size.width > limit || size.height > limit {
            return Err(TextureError::Backend(format!(
                "{} exceeds device limit of {}",
                size, limit
            )));
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("batchtex texture"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu_format(format),
            usage: self.usage,
            view_formats: &[],
        });

        debug!(%size, %format, "wgpu texture allocated");
        Ok(Arc::new(texture))
    }

    fn upload(
        &mut self,
        native: &Self::Native,
        format: TextureFormat,
        region: Region,
        bytes: &[u8],
    ) -> Result<(), TextureError> {
        let bytes_per_row = region
            .width
            .checked_mul(format.bytes_per_pixel() as u32)
            .ok_or_else(|| TextureError::Backend("row size overflows u32".to_string()))?;

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: native.as_ref(),
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: region.x,
                    y: region.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(region.height),
            },
            wgpu::Extent3d {
                width: region.width,
                height: region.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    fn release(&mut self, native: Self::Native) {
        native.destroy();
    }

    fn name(&self) -> &str {
        "wgpu"
    }
}
