//! Per-particle attributes read by the renderers.
//!
//! The motion integrator owns particles and updates position, angle and the
//! baseline opacity/radius every frame. The renderers only read them.
//!
//! # Image Shapes
//!
//! Particles drawn with [`ShapeKind::Image`] carry an [`ImageBinding`]: a
//! shared raster plus its aspect ratio, so the renderer can draw it into a
//! `2r × 2r/ratio` box without distortion.
//!
//! ```ignore
//! let logo = ImageBinding::from_file("assets/logo.png")?;
//! let p = Particle::new(DVec2::new(40.0, 80.0), 12.0)
//!     .with_shape(ShapeKind::Image)
//!     .with_image(logo);
//! ```

use glam::DVec2;
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

use crate::color::Rgb;
use crate::error::AssetError;
use crate::geometry::ShapeKind;
use crate::surface::Raster;

/// A raster bound to a particle, with its width/height ratio.
#[derive(Debug, Clone)]
pub struct ImageBinding {
    /// The decoded image.
    pub raster: Raster,
    /// `width / height`. Drawn height is `2r / ratio`.
    pub ratio: f64,
}

impl ImageBinding {
    /// Bind an already decoded image.
    pub fn from_image(img: RgbaImage) -> Result<Self, AssetError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage { width, height });
        }
        Ok(Self {
            ratio: f64::from(width) / f64::from(height),
            raster: Arc::new(img),
        })
    }

    /// Decode an encoded PNG or JPEG buffer.
    pub fn from_memory(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?.into_rgba8();
        Self::from_image(img)
    }

    /// Load and decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("loaded image asset {}", path.as_ref().display());
        Self::from_memory(&bytes)
    }
}

/// Render-relevant state of one particle.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in canvas space.
    pub position: DVec2,
    /// Render-space adjustment added to the position for circle centres and grab lines.
    pub offset: DVec2,
    /// Rotation in degrees.
    pub angle: f64,
    /// Baseline (animated) opacity.
    pub opacity: f64,
    /// Baseline radius.
    pub radius: f64,
    /// `None` when the configured shape name was not recognized.
    pub shape: Option<ShapeKind>,
    /// `None` means the particle is not drawn this frame.
    pub color: Option<Rgb>,
    pub image: Option<ImageBinding>,
}

impl Particle {
    /// A circle at `position` with full opacity and no color yet.
    pub fn new(position: DVec2, radius: f64) -> Self {
        Self {
            position,
            offset: DVec2::ZERO,
            angle: 0.0,
            opacity: 1.0,
            radius,
            shape: Some(ShapeKind::Circle),
            color: None,
            image: None,
        }
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_image(mut self, image: ImageBinding) -> Self {
        self.image = Some(image);
        self
    }

    /// Where grab lines attach: position plus offset.
    pub fn render_position(&self) -> DVec2 {
        self.position + self.offset
    }
}
