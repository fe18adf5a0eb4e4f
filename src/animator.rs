//! Time-driven frame selection over a sprite atlas.
//!
//! Frames `0..loop_start` play once as an intro; afterwards playback cycles
//! `loop_start..total_frames` forever. Selection depends only on elapsed time.

use crate::atlas::config::{AtlasLayout, DEFAULT_FRAME_DURATION_MS};
use crate::atlas::sprite::SpriteAtlas;
use crate::foundation::core::{CellRect, FrameIndex, TextureWindow};
use crate::foundation::error::{SatmarkError, SatmarkResult};

/// Maps elapsed playback time onto atlas cells.
///
/// Holds the grid layout and timing constants only, never pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAnimator {
    layout: AtlasLayout,
    frame_duration_ms: u32,
    loop_start: u32,
    elapsed_ms: f64,
    current: FrameIndex,
}

impl FrameAnimator {
    /// Build an animator over `layout`.
    ///
    /// Rejects a zero frame duration and a loop start that leaves no frames to cycle.
    pub fn new(layout: AtlasLayout, frame_duration_ms: u32, loop_start: u32) -> SatmarkResult<Self> {
        if frame_duration_ms == 0 {
            return Err(SatmarkError::invalid_argument(
                "frame_duration_ms must be > 0",
            ));
        }
        if loop_start >= layout.total_frames {
            return Err(SatmarkError::invalid_argument(format!(
                "loop_start ({loop_start}) must be < total_frames ({})",
                layout.total_frames
            )));
        }
        Ok(Self {
            layout,
            frame_duration_ms,
            loop_start,
            elapsed_ms: 0.0,
            current: FrameIndex(0),
        })
    }

    /// Animator for `atlas`, looping from its derived loop start at the default frame rate.
    pub fn for_atlas(atlas: &SpriteAtlas) -> SatmarkResult<Self> {
        Self::new(
            atlas.layout(),
            DEFAULT_FRAME_DURATION_MS,
            atlas.timing().loop_start_frame,
        )
    }

    /// Frame visible `elapsed_ms` after playback started.
    pub fn frame_at(&self, elapsed_ms: f64) -> SatmarkResult<FrameIndex> {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return Err(SatmarkError::invalid_argument(format!(
                "elapsed time must be finite and >= 0, got {elapsed_ms}"
            )));
        }
        let total = u64::from(self.layout.total_frames);
        let raw = (elapsed_ms / f64::from(self.frame_duration_ms)).floor() as u64;
        if raw < total {
            return Ok(FrameIndex(raw as u32));
        }
        let loop_len = total - u64::from(self.loop_start);
        let frame = u64::from(self.loop_start) + (raw - total) % loop_len;
        Ok(FrameIndex(frame as u32))
    }

    /// Move playback to `elapsed_ms` and return the visible frame.
    ///
    /// Calling again with the same time yields the same frame.
    pub fn advance(&mut self, elapsed_ms: f64) -> SatmarkResult<FrameIndex> {
        let frame = self.frame_at(elapsed_ms)?;
        if frame != self.current {
            tracing::trace!(from = %self.current, to = %frame, elapsed_ms, "frame change");
        }
        self.elapsed_ms = elapsed_ms;
        self.current = frame;
        Ok(frame)
    }

    /// Frame selected by the last `advance`.
    pub fn current_frame(&self) -> FrameIndex {
        self.current
    }

    /// Elapsed time passed to the last `advance`.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// First frame of the endless loop.
    pub fn loop_start(&self) -> FrameIndex {
        FrameIndex(self.loop_start)
    }

    /// Playback duration of one frame.
    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    /// Grid layout this animator walks.
    pub fn layout(&self) -> AtlasLayout {
        self.layout
    }

    /// Pixel rectangle of the current frame's cell.
    pub fn cell_rect(&self) -> CellRect {
        self.layout.cell_rect(self.current).unwrap_or(CellRect {
            x: 0,
            y: 0,
            size: self.layout.frame_pixels,
        })
    }

    /// Texture transform showing the current cell.
    pub fn texture_window(&self) -> TextureWindow {
        texture_window(&self.layout, self.current)
    }
}

/// Texture transform showing `frame`'s cell, for samplers with a bottom-left origin.
pub fn texture_window(layout: &AtlasLayout, frame: FrameIndex) -> TextureWindow {
    let (col, row) = layout.cell_coords(frame).unwrap_or((0, 0));
    let cols = f64::from(layout.cols);
    let rows = f64::from(layout.rows);
    TextureWindow {
        offset: (
            f64::from(col) / cols,
            1.0 - (f64::from(row) / rows + 1.0 / rows),
        ),
        repeat: (1.0 / cols, 1.0 / rows),
    }
}

#[cfg(test)]
#[path = "../tests/unit/animator.rs"]
mod tests;
