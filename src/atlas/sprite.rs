use std::path::Path;

use xxhash_rust::xxh3::Xxh3;

use crate::atlas::config::{AtlasLayout, DerivedTiming};
use crate::foundation::core::{CellRect, FrameIndex, Rgba8Premul};
use crate::foundation::error::{SatmarkError, SatmarkResult};

const XXH3_SEED: u64 = 0x5a7e_117e_a71a_5000;

/// RGBA8 pixels, tightly packed, row-major.
///
/// Atlas output is **premultiplied alpha**; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Return straight-alpha bytes, converting if needed.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let p = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&p.to_straight_rgba());
        }
        out
    }

    /// Write the pixels as a straight-alpha PNG, creating parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> SatmarkResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SatmarkError::render(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| SatmarkError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Stable content hash of an atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtlasFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for AtlasFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// A rasterized animation: every frame laid out on one surface.
///
/// Produced once by [`crate::AtlasGenerator`] and read-only afterwards. Share it with
/// `Arc<SpriteAtlas>`.
#[derive(Clone, Debug)]
pub struct SpriteAtlas {
    layout: AtlasLayout,
    timing: DerivedTiming,
    data: Vec<u8>,
}

impl SpriteAtlas {
    pub(crate) fn from_premul_bytes(
        layout: AtlasLayout,
        timing: DerivedTiming,
        data: Vec<u8>,
    ) -> SatmarkResult<Self> {
        let expected = (layout.width() as usize)
            .saturating_mul(layout.height() as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(SatmarkError::render(format!(
                "atlas byte len mismatch: got {}, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            layout,
            timing,
            data,
        })
    }

    /// Grid layout.
    pub fn layout(&self) -> AtlasLayout {
        self.layout
    }

    /// Timing the atlas was drawn with.
    pub fn timing(&self) -> &DerivedTiming {
        &self.timing
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.layout.height()
    }

    /// Number of frames.
    pub fn total_frames(&self) -> u32 {
        self.layout.total_frames
    }

    /// Premultiplied RGBA8 bytes of the whole atlas.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        Rgba8Premul::from_slice(&self.data[idx..idx + 4]).ok()
    }

    /// Pixel rectangle of `frame`'s cell.
    pub fn cell_rect(&self, frame: FrameIndex) -> Option<CellRect> {
        self.layout.cell_rect(frame)
    }

    /// Copy a single frame out of the atlas.
    pub fn frame_rgba(&self, frame: FrameIndex) -> SatmarkResult<FrameRGBA> {
        let cell = self.cell_rect(frame).ok_or_else(|| {
            SatmarkError::invalid_argument(format!(
                "frame {frame} out of range (atlas has {} frames)",
                self.total_frames()
            ))
        })?;
        let stride = self.width() as usize * 4;
        let row_bytes = cell.size as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * cell.size as usize);
        for y in cell.y..cell.y + cell.size {
            let start = y as usize * stride + cell.x as usize * 4;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Ok(FrameRGBA {
            width: cell.size,
            height: cell.size,
            data,
            premultiplied: true,
        })
    }

    /// The whole atlas as a frame buffer.
    pub fn to_frame_rgba(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.data.clone(),
            premultiplied: true,
        }
    }

    /// Write the atlas as a straight-alpha PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> SatmarkResult<()> {
        self.to_frame_rgba().save_png(path)
    }

    /// Content hash over dimensions and pixels.
    pub fn fingerprint(&self) -> AtlasFingerprint {
        let mut h = Xxh3::with_seed(XXH3_SEED);
        for v in [
            self.layout.total_frames,
            self.layout.rows,
            self.layout.cols,
            self.layout.frame_pixels,
        ] {
            h.update(&v.to_le_bytes());
        }
        h.update(&self.data);
        let v = h.digest128();
        AtlasFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/sprite.rs"]
mod tests;
