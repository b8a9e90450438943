//! Texture registry and the types around it.
//!
//! A [`TextureRegistry`] hands out [`TextureId`] handles, records the size
//! and format of each texture, validates uploads, and announces lifecycle
//! events. The native resource behind every id is created and released
//! by a [`TextureBackend`], so the same registry logic drives a CPU
//! surface store or a GPU device.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Loader / Batcher  │
//! │                     │
//! │ impl TextureStore   │
//! └──────────┬──────────┘
//!            │ TextureId
//!            ▼
//! ┌─────────────────────┐      ┌──────────────┐
//! │  TextureRegistry<B> │─────►│ EventChannel │──► observers
//! └──────────┬──────────┘      └──────────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  TextureBackend     │ (trait)
//! └──────────┬──────────┘
//!       ┌────┴────┐
//!       ▼         ▼
//! ┌──────────┐ ┌──────────┐
//! │ Software │ │   Wgpu   │
//! │ Backend  │ │ Backend  │
//! └──────────┘ └──────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use batchtex::texture::{Color, Rect, SoftwareBackend, TextureError, TextureFormat, TextureRegistry};
//!
//! let mut registry = TextureRegistry::new(SoftwareBackend::new());
//! let id = registry.create_texture(2, 2, TextureFormat::Rgba8).unwrap();
//!
//! registry
//!     .set_data(id, &[Color::RED, Color::GREEN, Color::BLUE, Color::WHITE])
//!     .unwrap();
//!
//! // Uploads are checked against the texture bounds and pixel size.
//! let err = registry
//!     .set_data_region(id, Rect::new(1, 1, 2, 2), &[Color::BLACK; 4])
//!     .unwrap_err();
//! assert!(matches!(err, TextureError::OutOfBounds { .. }));
//! ```

mod backend;
mod error;
mod format;
#[cfg(feature = "gpu")]
mod gpu;
mod id;
mod pixel;
mod registry;
mod software;
mod store;

pub use backend::TextureBackend;
pub use error::TextureError;
pub use format::{Rect, Region, Size, TextureFormat};
#[cfg(feature = "gpu")]
pub use gpu::{wgpu_format, WgpuBackend};
pub use id::TextureId;
pub use pixel::Color;
pub use registry::{SharedTextureRegistry, TextureInfo, TextureRegistry};
pub use software::{SoftwareBackend, SurfaceHandle};
pub use store::TextureStore;
