use crate::foundation::error::{SatmarkError, SatmarkResult};

pub use kurbo::{Point, Rect};

/// 0-based index of a frame (atlas cell) in playback order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Return the index as `usize` for slice addressing.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point or direction in scene (world) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component (up).
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply each component by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Square cell of the atlas in pixel space (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Side length in pixels.
    pub size: u32,
}

impl CellRect {
    /// Convert to a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.size),
            f64::from(self.y) + f64::from(self.size),
        )
    }

    /// Return `true` when the pixel `(px, py)` lies inside the cell.
    pub fn contains(self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && px - self.x < self.size && py - self.y < self.size
    }
}

/// Normalized texture transform selecting one atlas cell.
///
/// Uses a bottom-left texture origin, so row 0 maps to the top band of the texture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextureWindow {
    /// `(u, v)` offset of the visible cell.
    pub offset: (f64, f64),
    /// `(u, v)` scale of one cell.
    pub repeat: (f64, f64),
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Read one pixel from a tightly packed premultiplied RGBA8 slice.
    pub fn from_slice(px: &[u8]) -> SatmarkResult<Self> {
        match px {
            [r, g, b, a, ..] => Ok(Self {
                r: *r,
                g: *g,
                b: *b,
                a: *a,
            }),
            _ => Err(SatmarkError::invalid_argument(
                "pixel slice must hold 4 bytes",
            )),
        }
    }

    /// Convert back to straight-alpha RGBA8.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u16::from(self.a);
        let unpremul = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
