//! Easing curves for playback progress.

/// Quadratic ease-in/ease-out over `[0, 1]`.
///
/// Input outside the unit interval is clamped first.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
