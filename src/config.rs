//! Draw configuration.
//!
//! Everything the renderers read from configuration lives in [`DrawConfig`].
//! Each section has defaults, so a JSON document only needs the keys it
//! changes:
//!
//! ```ignore
//! let config = DrawConfig::from_json(r##"{
//!     "particles": {
//!         "shape": { "type": "star", "polygon": { "sides": 6 } },
//!         "line_linked": { "color": "random" }
//!     },
//!     "interactivity": {
//!         "events": { "on_hover": { "enable": true, "mode": ["grab"] } },
//!         "modes": { "grab": { "distance": 140.0 } }
//!     },
//!     "pixel_ratio": 2.0
//! }"##)?;
//! ```
//!
//! [`DrawConfig::from_json`] validates the result; the side count bounds
//! (3 to [`MAX_SIDES`]) are enforced here and nowhere else.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animation::OpacityAnimation;
use crate::error::ConfigError;
use crate::geometry::{ShapeKind, MAX_SIDES};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub particles: ParticlesConfig,
    pub interactivity: InteractivityConfig,
    pub background_mask: BackgroundMaskConfig,
    /// Device pixel ratio applied to grab distance and line width.
    pub pixel_ratio: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            particles: ParticlesConfig::default(),
            interactivity: InteractivityConfig::default(),
            background_mask: BackgroundMaskConfig::default(),
            pixel_ratio: 1.0,
        }
    }
}

impl DrawConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DrawConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "loaded draw config: shape={}, grab={}",
            config.particles.shape.kind_name,
            config.grab_enabled()
        );
        Ok(config)
    }

    /// Check the values geometry and falloff cannot handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = self.particles.shape.polygon.sides;
        if sides < 3 {
            log::warn!("rejected polygon side count {sides}");
            return Err(ConfigError::TooFewSides(sides));
        }
        if sides > MAX_SIDES {
            log::warn!("rejected polygon side count {sides}");
            return Err(ConfigError::TooManySides { sides, max: MAX_SIDES });
        }

        let checks = [
            ("particles.shape.stroke.width", self.particles.shape.stroke.width),
            ("particles.line_linked.width", self.particles.line_linked.width),
            ("interactivity.modes.grab.distance", self.interactivity.modes.grab.distance),
            ("pixel_ratio", self.pixel_ratio),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                log::warn!("rejected {field} = {value}");
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if self.particles.shape.character.value.is_empty() {
            return Err(ConfigError::EmptyGlyphSet);
        }
        Ok(())
    }

    /// Grab threshold distance scaled by the pixel ratio.
    pub fn grab_distance(&self) -> f64 {
        self.interactivity.modes.grab.distance * self.pixel_ratio
    }

    /// Link line width scaled by the pixel ratio.
    pub fn line_linked_width(&self) -> f64 {
        self.particles.line_linked.width * self.pixel_ratio
    }

    /// Hover events are on and include the grab mode.
    pub fn grab_enabled(&self) -> bool {
        let hover = &self.interactivity.events.on_hover;
        hover.enable && hover.mode.contains(&HoverMode::Grab)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub shape: ShapeConfig,
    pub line_linked: LineLinkedConfig,
    pub opacity: OpacityConfig,
}

/// Shape selection and shape-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Shape name; see [`ShapeKind::from_name`].
    #[serde(rename = "type")]
    pub kind_name: String,
    pub stroke: StrokeConfig,
    pub polygon: PolygonConfig,
    pub character: CharacterConfig,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            kind_name: ShapeKind::Circle.name().to_owned(),
            stroke: StrokeConfig::default(),
            polygon: PolygonConfig::default(),
            character: CharacterConfig::default(),
        }
    }
}

impl ShapeConfig {
    /// The configured shape, or `None` (drawn as nothing) when unrecognized.
    pub fn kind(&self) -> Option<ShapeKind> {
        let kind = ShapeKind::from_name(&self.kind_name);
        if kind.is_none() {
            log::warn!("unknown particle shape `{}`, particles will not be drawn", self.kind_name);
        }
        kind
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Stroke width; zero disables the outline stroke.
    pub width: f64,
    /// Any canvas color string.
    pub color: String,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self { width: 0.0, color: "#000000".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonConfig {
    /// Sides of polygons, points of stars.
    pub sides: u32,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self { sides: 5 }
    }
}

/// Glyphs for the character shape: one string, or a set sampled per particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlyphSource {
    Single(String),
    Set(Vec<String>),
}

impl GlyphSource {
    pub fn is_empty(&self) -> bool {
        match self {
            GlyphSource::Single(s) => s.is_empty(),
            GlyphSource::Set(set) => set.is_empty(),
        }
    }

    /// Choose the glyph for a new particle. A set is sampled uniformly.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        match self {
            GlyphSource::Single(s) => Some(s.clone()),
            GlyphSource::Set(set) if set.is_empty() => None,
            GlyphSource::Set(set) => Some(set[rng.gen_range(0..set.len())].clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub value: GlyphSource,
    /// Font family.
    pub font: String,
    pub style: String,
    pub weight: String,
    /// Fill the glyph when true, stroke it otherwise.
    pub fill: bool,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            value: GlyphSource::Single("*".to_owned()),
            font: "Verdana".to_owned(),
            style: "normal".to_owned(),
            weight: "400".to_owned(),
            fill: true,
        }
    }
}

/// Link line styling, shared by grab lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLinkedConfig {
    /// Hex color, color name, or `"random"`.
    pub color: String,
    /// Unscaled width; see [`DrawConfig::line_linked_width`].
    pub width: f64,
}

impl Default for LineLinkedConfig {
    fn default() -> Self {
        Self { color: "#ffffff".to_owned(), width: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityConfig {
    /// Maximum (and initial) baseline opacity.
    pub value: f64,
    pub animation: OpacityAnimation,
}

impl Default for OpacityConfig {
    fn default() -> Self {
        Self { value: 1.0, animation: OpacityAnimation::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundMaskConfig {
    /// Particles erase the background instead of painting over it.
    pub enable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractivityConfig {
    pub events: EventsConfig,
    pub modes: ModesConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    pub on_hover: HoverEvent,
}

/// Pointer-hover interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// Link lines from the pointer to nearby particles.
    Grab,
    /// Grow/fade particles near the pointer.
    Bubble,
    /// Push particles away from the pointer.
    Repulse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverEvent {
    pub enable: bool,
    pub mode: Vec<HoverMode>,
}

impl Default for HoverEvent {
    fn default() -> Self {
        Self { enable: false, mode: vec![HoverMode::Grab] }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModesConfig {
    pub grab: GrabConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabConfig {
    /// Unscaled threshold distance; see [`DrawConfig::grab_distance`].
    pub distance: f64,
    pub line_linked: GrabLineConfig,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self { distance: 100.0, line_linked: GrabLineConfig::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabLineConfig {
    /// Line opacity at distance zero.
    pub opacity: f64,
}

impl Default for GrabLineConfig {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}
