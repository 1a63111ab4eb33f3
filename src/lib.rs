//! # particle-canvas
//!
//! Procedural 2D particle shapes, per-frame visual state composition, and
//! pointer grab lines, drawn through an immediate-mode canvas API.
//!
//! The crate does not own a window or a canvas. You implement [`Surface`]
//! over your backend (or use [`Recorder`] to capture draw calls), keep your
//! particles moving, and hand everything to the renderers once per frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_canvas::prelude::*;
//!
//! let config = DrawConfig::from_json(r#"{"particles": {"shape": {"type": "star"}}}"#)?;
//! let mut rng = rand::thread_rng();
//! let mut scene = Scene::new(config);
//!
//! scene.spawn(
//!     Particle::new(DVec2::new(120.0, 80.0), 6.0).with_color(Rgb::new(255, 200, 0)),
//!     &mut rng,
//! );
//!
//! let mut pointer = Pointer::new();
//! pointer.moved(DVec2::new(100.0, 90.0));
//!
//! let mut canvas = Recorder::new();
//! scene.draw(&mut canvas, &pointer, |_, _| BubbleOverride::NONE, &mut rng);
//! ```
//!
//! ## Core Concepts
//!
//! ### Resolved State
//!
//! Each frame a particle's baseline opacity and radius are merged with an
//! optional [`BubbleOverride`] by [`state::resolve`]. Fields override
//! independently.
//!
//! ### Shapes
//!
//! | Shape | Geometry |
//! |-------|----------|
//! | [`ShapeKind::Circle`] | full arc of radius `r` |
//! | [`ShapeKind::Square`] | `2r` square (alias `edge`) |
//! | [`ShapeKind::Line`] | stroked vertical segment of length `r` |
//! | [`ShapeKind::Triangle`], [`ShapeKind::Polygon`], [`ShapeKind::Star`] | turtle-walked [`ShapeDescriptor`] |
//! | [`ShapeKind::Heart`] | quadratic curves |
//! | [`ShapeKind::Character`] | a glyph (alias `char`) |
//! | [`ShapeKind::Image`] | bound raster in a `2r` box |
//!
//! ### Grab Lines
//!
//! With hover grab enabled, particles within the grab distance get a line
//! to the pointer whose opacity falls off linearly with distance. The line
//! color is cached per session in a [`LineColorCache`].

pub mod animation;
pub mod color;
pub mod config;
pub mod drawer;
pub mod error;
pub mod falloff;
pub mod geometry;
pub mod grab;
pub mod particle;
pub mod pointer;
pub mod recorder;
pub mod scene;
pub mod state;
pub mod surface;

pub use animation::{OpacityAnimation, OpacityState};
pub use color::{Rgb, Rgba};
pub use config::DrawConfig;
pub use drawer::ParticleDrawer;
pub use error::{AssetError, ConfigError};
pub use falloff::Falloff;
pub use geometry::{Outline, PathSegment, ShapeDescriptor, ShapeKind};
pub use glam::DVec2;
pub use grab::{draw_grab_line, LineColor, LineColorCache};
pub use particle::{ImageBinding, Particle};
pub use pointer::{InteractionStatus, Pointer};
pub use recorder::{DrawCall, Recorder};
pub use scene::{FrameStats, Scene};
pub use state::{BubbleOverride, Resolved};
pub use surface::{CompositeMode, Surface, SurfaceScope};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use particle_canvas::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{OpacityAnimation, OpacityState};
    pub use crate::color::{Rgb, Rgba};
    pub use crate::config::{DrawConfig, GlyphSource, HoverMode};
    pub use crate::drawer::ParticleDrawer;
    pub use crate::grab::{draw_grab_line, LineColorCache};
    pub use crate::particle::{ImageBinding, Particle};
    pub use crate::pointer::Pointer;
    pub use crate::recorder::Recorder;
    pub use crate::scene::Scene;
    pub use crate::state::BubbleOverride;
    pub use crate::surface::{CompositeMode, Surface};
    pub use crate::geometry::ShapeKind;
    pub use crate::DVec2;
}
