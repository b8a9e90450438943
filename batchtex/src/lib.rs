//! batchtex - Texture registry for 2D sprite batchers
//!
//! This library keeps track of the textures a sprite batcher draws from.
//! Callers work with small copyable [`TextureId`] handles; the registry
//! owns the native resources behind them, validates every pixel upload,
//! and tells subscribers when textures come and go.
//!
//! # Modules
//!
//! - [`texture`]: ids, formats, the registry, and the backends that own
//!   native resources (CPU surfaces, or wgpu textures with the `gpu`
//!   feature)
//! - [`events`]: lifecycle events and the observers that receive them
//! - [`loader`]: helpers that decode images and rasterize fonts into
//!   textures
//! - [`config`]: registry configuration, optionally read from an INI file
//!
//! # Example
//!
//! ```
//! use batchtex::{Color, SoftwareBackend, TextureFormat, TextureRegistry};
//!
//! let mut registry = TextureRegistry::new(SoftwareBackend::new());
//! let id = registry.create_texture(2, 2, TextureFormat::Rgba8).unwrap();
//! registry
//!     .set_data(id, &[Color::RED, Color::GREEN, Color::BLUE, Color::WHITE])
//!     .unwrap();
//!
//! assert!(registry.texture(id).is_some());
//! registry.destroy_texture(id);
//! assert!(registry.texture(id).is_none());
//! ```

pub mod config;
pub mod events;
pub mod loader;
pub mod texture;

pub use config::{IdAllocation, RegistryConfig};
pub use events::{TextureEvent, TextureObserver};
pub use texture::{
    Color, Rect, SharedTextureRegistry, Size, SoftwareBackend, TextureError, TextureFormat,
    TextureId, TextureRegistry, TextureStore,
};
