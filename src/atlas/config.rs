use crate::foundation::color::Color;
use crate::foundation::core::{CellRect, FrameIndex};
use crate::foundation::error::{SatmarkError, SatmarkResult};

/// Horizontal offset of the satellite body inside each cell. Tuned by eye.
pub const CORE_ANCHOR_X: f64 = 25.0;
/// Frames in the default profile.
pub const DEFAULT_TOTAL_FRAMES: u32 = 50;
/// Atlas rows in the default profile.
pub const DEFAULT_ROWS: u32 = 10;
/// Cell side in the default profile.
pub const DEFAULT_FRAME_PIXELS: u32 = 100;
/// Pulses emitted per cycle unless configured otherwise.
pub const DEFAULT_NUM_WAVES: u32 = 8;
/// Playback duration of one frame in the default profile.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 80;

// vello_cpu surfaces are addressed with u16 dimensions.
const MAX_SURFACE_SIDE: u32 = u16::MAX as u32;
/// Largest atlas accepted, in RGBA8 bytes (256 MiB).
pub const MAX_ATLAS_BYTES: u64 = 256 * 1024 * 1024;

/// Everything the atlas generator needs to draw the choreography.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Number of frames in the atlas.
    pub total_frames: u32,
    /// Atlas grid rows; columns are `total_frames / rows`.
    pub rows: u32,
    /// Side of one square cell, in pixels.
    pub frame_pixels: u32,
    /// Frame at which fade-in ends. `None` means `total_frames / 8`.
    pub wave_start_frame: Option<u32>,
    /// Staggered outward pulses per cycle.
    pub num_waves: u32,
    /// Pulse wedge color.
    pub wave_color: Color,
    /// Core ring color.
    pub core_color: Color,
    /// Shield arc color.
    pub shield_color: Color,
    /// Mesh scale factor. Not used by the atlas.
    pub scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            total_frames: DEFAULT_TOTAL_FRAMES,
            rows: DEFAULT_ROWS,
            frame_pixels: DEFAULT_FRAME_PIXELS,
            wave_start_frame: None,
            num_waves: DEFAULT_NUM_WAVES,
            wave_color: Color::WHITE,
            core_color: Color::RED,
            shield_color: Color::WHITE,
            scale: 1.0,
        }
    }
}

impl AnimationConfig {
    /// Resolved fade-in end frame.
    pub fn wave_start_frame(&self) -> u32 {
        self.wave_start_frame.unwrap_or(self.total_frames / 8)
    }

    /// Validate the grid and return its layout.
    pub fn layout(&self) -> SatmarkResult<AtlasLayout> {
        AtlasLayout::new(self.total_frames, self.rows, self.frame_pixels)
    }

    /// Validate the configuration and derive its timing constants.
    pub fn timing(&self) -> SatmarkResult<DerivedTiming> {
        DerivedTiming::derive(self)
    }
}

/// Grid arrangement of frames inside the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AtlasLayout {
    /// Number of frames.
    pub total_frames: u32,
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Cell side in pixels.
    pub frame_pixels: u32,
}

impl AtlasLayout {
    /// Build a validated layout. `total_frames` must split evenly into `rows`.
    pub fn new(total_frames: u32, rows: u32, frame_pixels: u32) -> SatmarkResult<Self> {
        if total_frames == 0 {
            return Err(SatmarkError::config("total_frames must be > 0"));
        }
        if rows == 0 {
            return Err(SatmarkError::config("rows must be > 0"));
        }
        if total_frames % rows != 0 {
            return Err(SatmarkError::config(format!(
                "total_frames ({total_frames}) must be divisible by rows ({rows})"
            )));
        }
        if f64::from(frame_pixels) <= CORE_ANCHOR_X {
            return Err(SatmarkError::config(format!(
                "frame_pixels ({frame_pixels}) must exceed the core anchor offset ({CORE_ANCHOR_X})"
            )));
        }
        let cols = total_frames / rows;
        let layout = Self {
            total_frames,
            rows,
            cols,
            frame_pixels,
        };
        let (w, h) = (
            u64::from(cols) * u64::from(frame_pixels),
            u64::from(rows) * u64::from(frame_pixels),
        );
        if w > u64::from(MAX_SURFACE_SIDE) || h > u64::from(MAX_SURFACE_SIDE) {
            return Err(SatmarkError::config(format!(
                "atlas {w}x{h} exceeds the {MAX_SURFACE_SIDE}px surface limit"
            )));
        }
        let bytes = w * h * 4;
        if bytes > MAX_ATLAS_BYTES {
            return Err(SatmarkError::config(format!(
                "atlas {w}x{h} needs {bytes} bytes, over the {MAX_ATLAS_BYTES} byte limit"
            )));
        }
        Ok(layout)
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.cols * self.frame_pixels
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.rows * self.frame_pixels
    }

    /// `(column, row)` of a frame. Frames fill rows left-to-right, top-to-bottom.
    pub fn cell_coords(&self, frame: FrameIndex) -> Option<(u32, u32)> {
        if frame.0 >= self.total_frames {
            return None;
        }
        Some((frame.0 % self.cols, frame.0 / self.cols))
    }

    /// Pixel rectangle of a frame's cell.
    pub fn cell_rect(&self, frame: FrameIndex) -> Option<CellRect> {
        let (col, row) = self.cell_coords(frame)?;
        Some(CellRect {
            x: col * self.frame_pixels,
            y: row * self.frame_pixels,
            size: self.frame_pixels,
        })
    }
}

/// Timing constants derived once from an [`AnimationConfig`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DerivedTiming {
    /// Number of frames.
    pub total_frames: u32,
    /// End of the fade-in; motion begins here.
    pub wave_start_frame: u32,
    /// Pulses emitted per cycle.
    pub num_waves: u32,
    /// Frames between consecutive pulse emissions.
    pub wave_interval: u32,
    /// Outward travel of a pulse per frame, in pixels.
    pub dist_per_frame: f64,
    /// Radius at which a pulse disappears (`frame_pixels - 25`).
    pub wave_reach: f64,
    /// First frame after the shared swirl.
    pub swirl_done_frame: u32,
    /// First frame of the endless loop.
    pub loop_start_frame: u32,
}

impl DerivedTiming {
    /// Derive and validate timing for `config`.
    ///
    /// Requires `0 < wave_start < swirl_done < loop_start < total_frames`.
    pub fn derive(config: &AnimationConfig) -> SatmarkResult<Self> {
        let layout = config.layout()?;
        if config.num_waves < 1 {
            return Err(SatmarkError::config("num_waves must be >= 1"));
        }

        let total = layout.total_frames;
        let wave_start = config.wave_start_frame();
        if wave_start == 0 || wave_start >= total {
            return Err(SatmarkError::config(format!(
                "wave_start_frame ({wave_start}) must lie in 1..{total}"
            )));
        }

        let moving = total - wave_start;
        let wave_interval = moving / config.num_waves;
        let wave_reach = f64::from(layout.frame_pixels) - CORE_ANCHOR_X;
        let dist_per_frame = wave_reach / f64::from(moving);

        let loop_start =
            (f64::from(total) - 2.0 * f64::from(moving) / f64::from(config.num_waves)).floor()
                + 1.0;
        // Few waves pull the loop start back into the fade-in; very many push it to the end.
        if loop_start <= f64::from(wave_start) || loop_start >= f64::from(total) {
            return Err(SatmarkError::config(format!(
                "num_waves ({}) yields loop start {loop_start} outside ({wave_start}, {total})",
                config.num_waves
            )));
        }
        let loop_start_frame = loop_start as u32;
        let swirl_done_frame = (loop_start_frame - wave_start) / 2 + wave_start;

        if !(wave_start < swirl_done_frame && swirl_done_frame < loop_start_frame) {
            return Err(SatmarkError::config(format!(
                "num_waves ({}) leaves no room for the swirl: wave_start={wave_start}, \
                 swirl_done={swirl_done_frame}, loop_start={loop_start_frame}",
                config.num_waves
            )));
        }

        Ok(Self {
            total_frames: total,
            wave_start_frame: wave_start,
            num_waves: config.num_waves,
            wave_interval,
            dist_per_frame,
            wave_reach,
            swirl_done_frame,
            loop_start_frame,
        })
    }

    /// Frames in the endless loop.
    pub fn loop_length(&self) -> u32 {
        self.total_frames - self.loop_start_frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/config.rs"]
mod tests;
