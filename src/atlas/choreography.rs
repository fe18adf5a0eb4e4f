//! Per-frame geometry of the satellite animation.
//!
//! Everything here is pure: a frame index plus [`DerivedTiming`] fully determines what the
//! rasterizer draws. The angle formulas are tuned by eye, and the phase transitions depend on
//! their exact form.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::atlas::config::DerivedTiming;
use crate::foundation::core::FrameIndex;
use crate::foundation::math::{canvas_arc_sweep, linear_step};

/// Angular gap trimmed from each side of a shield arc so neighbours never touch.
pub const SHIELD_BUFFER: f64 = PI / 16.0;
/// Resting start angle of shield arc 0.
pub const SHIELD_BASE: f64 = -PI + FRAC_PI_4;
/// Shield radius once the fade-in completes.
pub const SHIELD_RADIUS: f64 = 8.0;
/// Core ring radius once the fade-in completes; also the backing disc radius.
pub const CORE_RADIUS: f64 = 3.0;
/// Half the angular width of a pulse wedge.
pub const WEDGE_HALF_ANGLE: f64 = PI / 12.0;
/// Stroke width shared by arcs, wedges and the core ring.
pub const STROKE_WIDTH: f64 = 2.0;
/// Opacity of a pulse at the moment it leaves the core.
pub const WAVE_START_ALPHA: f64 = 0.9;
/// Number of shield arcs.
pub const SHIELD_ARCS: usize = 4;

const SWIRL_SWEEP: f64 = 3.0 * PI / 2.0;
const REDISTRIBUTE_PIVOT: f64 = FRAC_PI_2 + FRAC_PI_4 + SHIELD_BUFFER;

/// Angular extent of a stroke, swept clockwise (screen space) from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcSector {
    /// Start angle in radians.
    pub start: f64,
    /// End angle in radians.
    pub end: f64,
}

impl ArcSector {
    /// Sector starting at `start` with the standard shield span.
    fn shield_span_from(start: f64) -> Self {
        Self {
            start,
            end: start + FRAC_PI_2 - 2.0 * SHIELD_BUFFER,
        }
    }

    /// Clockwise sweep in radians, with canvas wrap rules.
    pub fn sweep(&self) -> f64 {
        canvas_arc_sweep(self.start, self.end)
    }
}

/// Which part of the choreography the shield arcs are in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ShieldPhase {
    /// Arcs rest at their base sectors (fade-in and tail frames).
    Static,
    /// All four arcs sweep together in a closing swirl.
    Swirl,
    /// Each arc travels from a shared pivot to its own offset.
    Redistribute,
    /// Arcs ease a further quarter turn into the loop pose.
    Settle,
}

/// One outward pulse visible in a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PulseWedge {
    /// Wave index in emission order.
    pub wave: u32,
    /// Distance from the core, in pixels.
    pub radius: f64,
    /// Opacity multiplier in `[0, 1]`.
    pub alpha: f64,
}

impl PulseWedge {
    /// The fixed narrow direction every pulse is drawn in.
    pub fn sector() -> ArcSector {
        ArcSector {
            start: -WEDGE_HALF_ANGLE,
            end: WEDGE_HALF_ANGLE,
        }
    }
}

/// Everything drawn in one frame, relative to the core anchor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FramePose {
    /// Frame this pose describes.
    pub frame: FrameIndex,
    /// Shield phase selected for the frame.
    pub phase: ShieldPhase,
    /// Radius of the shield arcs.
    pub shield_radius: f64,
    /// Sectors of the four shield arcs.
    pub shield: [ArcSector; SHIELD_ARCS],
    /// Visible pulses, in wave order.
    pub pulses: Vec<PulseWedge>,
    /// Radius of the core ring.
    pub core_radius: f64,
}

/// Compute the full pose for `frame`.
pub fn frame_pose(frame: FrameIndex, timing: &DerivedTiming) -> FramePose {
    let phase = shield_phase(frame, timing);
    FramePose {
        frame,
        phase,
        shield_radius: fade_in(frame, timing, SHIELD_RADIUS),
        shield: std::array::from_fn(|n| shield_sector(n, frame, phase, timing)),
        pulses: pulses(frame, timing),
        core_radius: core_radius(frame, timing),
    }
}

/// Select the shield phase for `frame`.
pub fn shield_phase(frame: FrameIndex, t: &DerivedTiming) -> ShieldPhase {
    let i = frame.0;
    if i < t.wave_start_frame || i >= t.total_frames {
        return ShieldPhase::Static;
    }
    if i < t.swirl_done_frame {
        return ShieldPhase::Swirl;
    }
    if i < t.loop_start_frame {
        return ShieldPhase::Redistribute;
    }
    if f64::from(i) < f64::from(t.loop_start_frame) + settle_frames(t) {
        return ShieldPhase::Settle;
    }
    ShieldPhase::Static
}

/// Radius of the core ring: ramps `0 -> 3` during the fade-in, then holds.
pub fn core_radius(frame: FrameIndex, timing: &DerivedTiming) -> f64 {
    fade_in(frame, timing, CORE_RADIUS)
}

fn fade_in(frame: FrameIndex, t: &DerivedTiming, full: f64) -> f64 {
    if frame.0 < t.wave_start_frame {
        return full * f64::from(frame.0) / f64::from(t.wave_start_frame);
    }
    full
}

fn settle_frames(t: &DerivedTiming) -> f64 {
    f64::from(t.total_frames - t.loop_start_frame) / 2.0
}

/// Sector of shield arc `n` (0..4) at `frame`.
pub fn shield_sector(
    n: usize,
    frame: FrameIndex,
    phase: ShieldPhase,
    t: &DerivedTiming,
) -> ArcSector {
    let quarter = n as f64 * FRAC_PI_2;
    let i = f64::from(frame.0);
    match phase {
        ShieldPhase::Static => ArcSector {
            start: quarter + SHIELD_BASE + SHIELD_BUFFER,
            end: quarter + SHIELD_BASE + FRAC_PI_2 - 2.0 * SHIELD_BUFFER,
        },
        ShieldPhase::Swirl => {
            let steps = f64::from(t.swirl_done_frame - t.wave_start_frame);
            let step = i - f64::from(t.wave_start_frame);
            let swept = ArcSector::shield_span_from(
                SHIELD_BASE + SHIELD_BUFFER + linear_step(SWIRL_SWEEP, steps, step),
            );
            let rest = ArcSector::shield_span_from(quarter + SHIELD_BASE);
            // An arc only moves once the sweep has caught up with it.
            ArcSector {
                start: rest.start.max(swept.start),
                end: rest.end.max(swept.end),
            }
        }
        ShieldPhase::Redistribute => {
            let steps = f64::from(t.loop_start_frame - t.swirl_done_frame);
            let step = i - f64::from(t.swirl_done_frame);
            ArcSector::shield_span_from(REDISTRIBUTE_PIVOT + linear_step(quarter, steps, step))
        }
        ShieldPhase::Settle => {
            let step = i - f64::from(t.loop_start_frame);
            ArcSector::shield_span_from(
                quarter
                    + FRAC_PI_4
                    + SHIELD_BUFFER
                    + linear_step(FRAC_PI_2, settle_frames(t), step),
            )
        }
    }
}

/// Pulses visible at `frame`, each at its own radius and opacity.
pub fn pulses(frame: FrameIndex, t: &DerivedTiming) -> Vec<PulseWedge> {
    let i = i64::from(frame.0);
    (0..t.num_waves)
        .filter_map(|w| {
            let since = i
                - i64::from(t.wave_interval) * i64::from(w)
                - i64::from(t.wave_start_frame);
            if since <= 0 {
                return None;
            }
            let radius = since as f64 * t.dist_per_frame;
            if radius >= t.wave_reach {
                return None;
            }
            Some(PulseWedge {
                wave: w,
                radius,
                alpha: (WAVE_START_ALPHA - radius / t.wave_reach).clamp(0.0, 1.0),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/choreography.rs"]
mod tests;
