//! Grab lines from the pointer to nearby particles.
//!
//! While hover interaction is on with the grab mode and the pointer is
//! moving, every particle within the grab distance gets a line to the
//! pointer. Line opacity follows [`Falloff`]; line color comes from a
//! [`LineColorCache`] shared by the whole session.
//!
//! # Line Colors
//!
//! The configured link color is resolved once and cached. A fixed color is
//! reused on every draw. The `"random"` setting is cached as
//! [`LineColor::Random`], and a fresh color is sampled on every draw: the
//! cache never collapses to a single random pick.

use glam::DVec2;
use rand::Rng;

use crate::color::{Rgb, RANDOM};
use crate::config::DrawConfig;
use crate::falloff::Falloff;
use crate::particle::Particle;
use crate::pointer::Pointer;
use crate::surface::{Surface, SurfaceScope};

/// Used when the configured link color cannot be parsed.
pub const FALLBACK_LINE_COLOR: Rgb = Rgb::new(127, 127, 127);

/// A resolved link color setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    Fixed(Rgb),
    /// Sample a new color on every draw.
    Random,
}

impl LineColor {
    /// Resolve a configured color string.
    pub fn from_config(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(RANDOM) {
            return LineColor::Random;
        }
        match Rgb::parse(value) {
            Some(rgb) => LineColor::Fixed(rgb),
            None => {
                log::warn!("unrecognized line color `{value}`, using grey");
                LineColor::Fixed(FALLBACK_LINE_COLOR)
            }
        }
    }
}

/// Session-wide cache of the grab line color.
///
/// Filled lazily on the first grab line; cleared only by [`reset`](Self::reset)
/// when the configuration changes.
#[derive(Debug, Clone, Default)]
pub struct LineColorCache {
    resolved: Option<LineColor>,
}

impl LineColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached setting, if it has been resolved.
    pub fn get(&self) -> Option<LineColor> {
        self.resolved
    }

    /// Forget the cached setting.
    pub fn reset(&mut self) {
        self.resolved = None;
    }

    /// The color for one line, resolving `configured` on first use.
    pub fn color_for<R: Rng + ?Sized>(&mut self, configured: &str, rng: &mut R) -> Rgb {
        let setting = *self
            .resolved
            .get_or_insert_with(|| LineColor::from_config(configured));
        match setting {
            LineColor::Fixed(rgb) => rgb,
            LineColor::Random => Rgb::random(rng),
        }
    }
}

/// Draw the grab line for one particle.
///
/// Returns the opacity of the line drawn, or `None` when nothing was drawn
/// (interaction off, pointer not moving, particle out of range, or faded out).
pub fn draw_grab_line<S, R>(
    surface: &mut S,
    particle: &Particle,
    pointer: &Pointer,
    config: &DrawConfig,
    cache: &mut LineColorCache,
    rng: &mut R,
) -> Option<f64>
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    if !config.grab_enabled() || !pointer.is_moving() {
        return None;
    }

    let target = pointer.position_or_origin();
    let distance = particle.position.distance(target);
    let falloff = Falloff::new(
        config.grab_distance(),
        config.interactivity.modes.grab.line_linked.opacity,
    );
    let opacity = falloff.visible_opacity_at(distance)?;

    let rgb = cache.color_for(&config.particles.line_linked.color, rng);
    let style = rgb.with_alpha(opacity).to_css_compact();
    stroke_link(surface, particle.render_position(), target, &style, config.line_linked_width());
    Some(opacity)
}

fn stroke_link<S: Surface + ?Sized>(surface: &mut S, from: DVec2, to: DVec2, style: &str, width: f64) {
    let mut scope = SurfaceScope::new(surface);
    scope.set_stroke_style(style);
    scope.set_line_width(width);
    scope.begin_path();
    scope.move_to(from);
    scope.line_to(to);
    scope.stroke();
    scope.close_path();
}
