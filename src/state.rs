//! Per-frame visual state resolution.
//!
//! A particle has a baseline opacity and radius (animated by the motion and
//! opacity updaters) and, near the pointer, a transient [`BubbleOverride`].
//! [`resolve`] merges the two field by field. No clamping happens here; the
//! override producer owns its ranges.

use crate::color::{Rgb, Rgba};

/// Transient radius/opacity substitution produced by the bubble effect.
///
/// Either field may be absent independently. Recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BubbleOverride {
    pub radius: Option<f64>,
    pub opacity: Option<f64>,
}

impl BubbleOverride {
    /// No override: baseline values pass through.
    pub const NONE: Self = Self { radius: None, opacity: None };

    pub fn radius(radius: f64) -> Self {
        Self { radius: Some(radius), opacity: None }
    }

    pub fn opacity(opacity: f64) -> Self {
        Self { radius: None, opacity: Some(opacity) }
    }
}

/// Final render attributes for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub opacity: f64,
    pub radius: f64,
}

impl Resolved {
    /// Fill color for a particle, or `None` when it has no color this frame.
    pub fn fill_color(&self, color: Option<Rgb>) -> Option<Rgba> {
        color.map(|rgb| rgb.with_alpha(self.opacity))
    }
}

/// Merge baseline attributes with an override; each field independently.
pub fn resolve(baseline_opacity: f64, baseline_radius: f64, over: &BubbleOverride) -> Resolved {
    Resolved {
        opacity: over.opacity.unwrap_or(baseline_opacity),
        radius: over.radius.unwrap_or(baseline_radius),
    }
}
