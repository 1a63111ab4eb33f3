//! Pointer-distance falloff for grab lines.
//!
//! Grab lines fade linearly from the configured base opacity at distance 0
//! down to 0 at the threshold distance. Beyond the threshold the falloff is
//! not evaluated at all.

/// Linear falloff with a hard distance gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    /// Threshold distance; nothing is evaluated beyond it.
    pub max_distance: f64,
    /// Opacity at distance zero.
    pub base_opacity: f64,
}

impl Falloff {
    pub fn new(max_distance: f64, base_opacity: f64) -> Self {
        Self { max_distance, base_opacity }
    }

    /// Line opacity at `distance`, or `None` past the threshold.
    ///
    /// The result can be `<= 0` at or near the threshold; callers treat that
    /// as "too far".
    pub fn opacity_at(&self, distance: f64) -> Option<f64> {
        if distance <= self.max_distance {
            Some(line_opacity(distance, self.max_distance, self.base_opacity))
        } else {
            None
        }
    }

    /// Line opacity at `distance` when a line should be drawn at all.
    pub fn visible_opacity_at(&self, distance: f64) -> Option<f64> {
        self.opacity_at(distance).filter(|o| *o > 0.0)
    }
}

/// `base − (distance / (1 / base)) / max_distance`.
///
/// Algebraically `base − distance·base/max_distance`; kept in this operation
/// order so rounding matches existing output.
pub fn line_opacity(distance: f64, max_distance: f64, base_opacity: f64) -> f64 {
    base_opacity - (distance / (1.0 / base_opacity)) / max_distance
}
