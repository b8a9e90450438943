//! Pixel format and geometry value types.

use std::fmt;

/// Pixel layout of a texture.
///
/// Fixed when the texture is created and immutable for its lifetime.
/// Every upload is checked against [`TextureFormat::bytes_per_pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGBA, 4 bytes per pixel.
    Rgba8,
    /// 8-bit BGRA, 4 bytes per pixel.
    Bgra8,
    /// Single 8-bit channel (alpha masks, glyph coverage).
    R8,
    /// Two 8-bit channels.
    Rg8,
    /// RGBA half floats, 8 bytes per pixel.
    Rgba16Float,
    /// RGBA single floats, 16 bytes per pixel.
    Rgba32Float,
}

impl TextureFormat {
    /// Every supported format.
    pub const ALL: [TextureFormat; 6] = [
        TextureFormat::Rgba8,
        TextureFormat::Bgra8,
        TextureFormat::R8,
        TextureFormat::Rg8,
        TextureFormat::Rgba16Float,
        TextureFormat::Rgba32Float,
    ];

    /// Size of one pixel in bytes.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8 | TextureFormat::Bgra8 => 4,
            TextureFormat::R8 => 1,
            TextureFormat::Rg8 => 2,
            TextureFormat::Rgba16Float => 8,
            TextureFormat::Rgba32Float => 16,
        }
    }

    /// Short lowercase name, used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            TextureFormat::Rgba8 => "rgba8",
            TextureFormat::Bgra8 => "bgra8",
            TextureFormat::R8 => "r8",
            TextureFormat::Rg8 => "rg8",
            TextureFormat::Rgba16Float => "rgba16f",
            TextureFormat::Rgba32Float => "rgba32f",
        }
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Texture dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered, `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The rectangle covering the whole surface.
    pub fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle in texture pixel space, as supplied by callers.
///
/// The origin is signed so rectangles hanging off the top or left edge
/// can be expressed (and rejected). Use [`Rect::within`] to turn it into
/// a [`Region`] that is known to fit a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered, `width * height`.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip-free containment check against `[0, width) × [0, height)`.
    ///
    /// Returns the equivalent unsigned [`Region`] when every pixel of the
    /// rectangle lies on the surface, `None` otherwise. Empty rectangles
    /// are never contained.
    pub fn within(&self, size: Size) -> Option<Region> {
        if self.is_empty() {
            return None;
        }
        let x = u32::try_from(self.x).ok()?;
        let y = u32::try_from(self.y).ok()?;
        let right = u64::from(x) + u64::from(self.width);
        let bottom = u64::from(y) + u64::from(self.height);
        if right > u64::from(size.width) || bottom > u64::from(size.height) {
            return None;
        }
        Some(Region {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}×{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// A validated, non-empty rectangle that lies fully on a surface.
///
/// Backends receive regions only after the registry has checked them, so
/// they can index into their storage without re-validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Region covering a whole surface of the given size.
    pub fn full(size: Size) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the region spans the whole surface of `size`.
    pub fn covers(&self, size: Size) -> bool {
        self.x == 0 && self.y == 0 && self.width == size.width && self.height == size.height
    }
}
