//! Texture handle type.

use std::fmt;

/// Opaque handle referencing a live texture inside one registry.
///
/// Ids are unique among the textures that are currently live in the
/// registry that issued them. After a texture is destroyed its id may be
/// handed out again, so holders must not assume an id stays meaningful
/// once the texture behind it is gone. Ids carry no meaning across
/// registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u32);

impl TextureId {
    /// Wrap a raw id value.
    ///
    /// Mostly useful for hosts that pass ids through an untyped channel
    /// (e.g. a shader-side texture index) and need to rebuild the handle.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value of this id.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

impl From<TextureId> for u32 {
    fn from(id: TextureId) -> Self {
        id.0
    }
}
