use std::f64::consts::TAU;

/// Clockwise sweep from `start` to `end`, following HTML canvas `arc()` rules.
///
/// A difference of a full turn or more strokes the whole circle; otherwise the end angle wraps
/// into `[start, start + 2π)`.
pub(crate) fn canvas_arc_sweep(start: f64, end: f64) -> f64 {
    let d = end - start;
    if d >= TAU {
        return TAU;
    }
    d.rem_euclid(TAU)
}

/// Linear interpolation step: `total` spread over `steps`, evaluated at `step`.
pub(crate) fn linear_step(total: f64, steps: f64, step: f64) -> f64 {
    if steps <= 0.0 {
        return 0.0;
    }
    total / steps * step
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
