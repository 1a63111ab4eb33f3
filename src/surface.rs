//! The immediate-mode drawing surface consumed by the renderers.
//!
//! [`Surface`] mirrors a 2D canvas context: a save/restore state stack,
//! affine transforms, path construction, fill/stroke with settable styles,
//! a composite mode switch, text and image blitting. The crate never owns a
//! real surface; callers implement the trait over whatever backend they draw
//! with. [`Recorder`](crate::Recorder) is the in-memory implementation.
//!
//! Per-particle drawing always runs inside a [`SurfaceScope`], so style and
//! transform changes made for one particle cannot leak into the next.

use glam::DVec2;
use image::RgbaImage;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Shared handle to a decoded raster asset.
pub type Raster = Arc<RgbaImage>;

/// Compositing mode for subsequent draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Draw over existing content (default).
    #[default]
    SourceOver,
    /// Erase existing content where the shape is drawn. Used by background masks.
    DestinationOut,
}

/// An immediate-mode 2D drawing API.
///
/// Angles are in radians. Coordinates are in the current transformed space.
pub trait Surface {
    /// Push the current drawing state (styles, transform, composite mode).
    fn save(&mut self);
    /// Pop the drawing state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);

    /// Move the origin by `offset`.
    fn translate(&mut self, offset: DVec2);
    /// Rotate the coordinate frame by `angle` radians.
    fn rotate(&mut self, angle: f64);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);
    /// Start a new subpath at `point`.
    fn move_to(&mut self, point: DVec2);
    /// Add a straight segment to `point`.
    fn line_to(&mut self, point: DVec2);
    /// Add a quadratic Bézier segment through `control` to `to`.
    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2);
    /// Add a circular arc from `start` to `end` radians around `center`.
    fn arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, counter_clockwise: bool);
    /// Add a closed rectangle subpath.
    fn rect(&mut self, origin: DVec2, size: DVec2);
    /// Close the current subpath back to its start.
    fn close_path(&mut self);

    /// Fill the current path with the fill style.
    fn fill(&mut self);
    /// Stroke the current path with the stroke style and line width.
    fn stroke(&mut self);

    /// Set the fill style as a CSS color string.
    fn set_fill_style(&mut self, style: &str);
    /// Set the stroke style as a CSS color string.
    fn set_stroke_style(&mut self, style: &str);
    /// Set the stroke width in surface units.
    fn set_line_width(&mut self, width: f64);
    /// Set how subsequent draws combine with existing content.
    fn set_composite(&mut self, mode: CompositeMode);

    /// Set the font as a CSS font shorthand, e.g. `"normal 400 12px Verdana"`.
    fn set_font(&mut self, font: &str);
    /// Fill `text` with its baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: DVec2);
    /// Stroke the outline of `text` with its baseline starting at `at`.
    fn stroke_text(&mut self, text: &str, at: DVec2);

    /// Blit `image` scaled into the rectangle at `origin` with `size`.
    fn draw_image(&mut self, image: &Raster, origin: DVec2, size: DVec2);
}

/// A save/restore pair bound to a lexical scope.
///
/// Creating the scope calls [`Surface::save`]; dropping it calls
/// [`Surface::restore`], on every exit path including early returns.
/// The scope dereferences to the surface, so drawing goes through it.
pub struct SurfaceScope<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SurfaceScope<'a, S> {
    /// Save the surface state and return a guard that restores it.
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SurfaceScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SurfaceScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SurfaceScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
