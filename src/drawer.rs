//! Per-particle rendering.
//!
//! A [`ParticleDrawer`] is created once per particle and draws it every
//! frame: resolve radius/opacity, build the fill color, ask
//! [`geometry`](crate::geometry) for the outline, and issue it to the surface
//! inside a [`SurfaceScope`].
//!
//! The drawer caches what must stay stable across frames. Today that is the
//! glyph for character shapes, picked once from the configured glyph set.

use rand::Rng;
use std::f64::consts::PI;

use crate::config::DrawConfig;
use crate::geometry::{outline, Outline, ShapeKind, ShapeParams};
use crate::particle::Particle;
use crate::state::{resolve, BubbleOverride};
use crate::surface::{CompositeMode, Surface, SurfaceScope};

/// Draws one particle; holds that particle's derived caches.
#[derive(Debug, Clone, Default)]
pub struct ParticleDrawer {
    glyph: Option<String>,
}

impl ParticleDrawer {
    /// Create the drawer for `particle`, resolving its glyph if it is a character.
    pub fn new<R: Rng + ?Sized>(particle: &Particle, config: &DrawConfig, rng: &mut R) -> Self {
        let glyph = match particle.shape {
            Some(ShapeKind::Character) => config.particles.shape.character.value.pick(rng),
            _ => None,
        };
        Self { glyph }
    }

    /// The glyph chosen for this particle, if it draws as a character.
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    /// Draw `particle` for this frame.
    ///
    /// Issues nothing when the particle has no color. Otherwise every state
    /// change is wrapped in a save/restore pair.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        particle: &Particle,
        bubble: &BubbleOverride,
        config: &DrawConfig,
    ) {
        let resolved = resolve(particle.opacity, particle.radius, bubble);
        let Some(color) = resolved.fill_color(particle.color) else {
            log::trace!("skipping particle at {} without color", particle.position);
            return;
        };

        let mut scope = SurfaceScope::new(surface);
        scope.set_fill_style(&color.to_string());
        scope.translate(particle.position);
        scope.begin_path();

        if particle.angle != 0.0 {
            scope.rotate(particle.angle * PI / 180.0);
        }

        if config.background_mask.enable {
            scope.set_composite(CompositeMode::DestinationOut);
        }

        let shape = &config.particles.shape;
        let params = ShapeParams {
            offset: particle.offset,
            sides: shape.polygon.sides,
            glyph: self.glyph(),
            character: &shape.character,
            image: particle.image.as_ref(),
        };
        let outline = match particle.shape {
            Some(kind) => outline(kind, resolved.radius, &params),
            None => Outline::Empty,
        };

        match outline {
            Outline::Empty => {}
            Outline::Line(segments) => {
                for segment in &segments {
                    segment.issue(&mut *scope);
                }
                scope.set_stroke_style(&shape.stroke.color);
                scope.set_line_width(shape.stroke.width);
                scope.stroke();
            }
            Outline::Fill(segments) => {
                for segment in &segments {
                    segment.issue(&mut *scope);
                }
                scope.close_path();

                if shape.stroke.width > 0.0 {
                    scope.set_stroke_style(&shape.stroke.color);
                    scope.set_line_width(shape.stroke.width);
                    scope.stroke();
                }

                scope.fill();
            }
            Outline::Glyph(run) => {
                scope.set_font(&run.font);
                if run.fill {
                    scope.fill_text(&run.text, run.at);
                } else {
                    scope.stroke_text(&run.text, run.at);
                }
            }
            Outline::Image { raster, origin, size } => {
                scope.draw_image(&raster, origin, size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::GlyphSource;
    use crate::particle::ImageBinding;
    use crate::recorder::{DrawCall, Recorder};
    use glam::DVec2;
    use image::RgbaImage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dot(shape: ShapeKind) -> Particle {
        Particle::new(DVec2::new(10.0, 20.0), 5.0)
            .with_shape(shape)
            .with_color(Rgb::new(255, 0, 0))
            .with_opacity(0.5)
    }

    fn draw(particle: &Particle, bubble: &BubbleOverride, config: &DrawConfig) -> Recorder {
        let mut rng = StdRng::seed_from_u64(1);
        let drawer = ParticleDrawer::new(particle, config, &mut rng);
        let mut rec = Recorder::new();
        drawer.draw(&mut rec, particle, bubble, config);
        rec
    }

    #[test]
    fn test_circle_call_sequence() {
        let rec = draw(&dot(ShapeKind::Circle), &BubbleOverride::NONE, &DrawConfig::default());
        assert_eq!(
            rec.calls(),
            &[
                DrawCall::Save,
                DrawCall::SetFillStyle("rgba(255, 0, 0, 0.5)".into()),
                DrawCall::Translate(DVec2::new(10.0, 20.0)),
                DrawCall::BeginPath,
                DrawCall::Arc {
                    center: DVec2::ZERO,
                    radius: 5.0,
                    start: 0.0,
                    end: PI * 2.0,
                    counter_clockwise: false
                },
                DrawCall::ClosePath,
                DrawCall::Fill,
                DrawCall::Restore,
            ]
        );
    }

    #[test]
    fn test_no_color_draws_nothing() {
        let mut particle = dot(ShapeKind::Circle);
        particle.color = None;
        let rec = draw(&particle, &BubbleOverride::NONE, &DrawConfig::default());
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn test_bubble_override_applies() {
        let bubble = BubbleOverride { radius: Some(9.0), opacity: Some(0.9) };
        let rec = draw(&dot(ShapeKind::Square), &bubble, &DrawConfig::default());

        assert!(rec.calls().contains(&DrawCall::SetFillStyle("rgba(255, 0, 0, 0.9)".into())));
        assert!(rec.calls().contains(&DrawCall::Rect {
            origin: DVec2::splat(-9.0),
            size: DVec2::splat(18.0)
        }));
    }

    #[test]
    fn test_rotation_in_radians() {
        let particle = dot(ShapeKind::Circle).with_angle(90.0);
        let rec = draw(&particle, &BubbleOverride::NONE, &DrawConfig::default());
        let angle = rec
            .calls()
            .iter()
            .find_map(|c| match c {
                DrawCall::Rotate(a) => Some(*a),
                _ => None,
            })
            .unwrap();
        assert!((angle - PI / 2.0).abs() < 1e-12);

        let rec = draw(&dot(ShapeKind::Circle), &BubbleOverride::NONE, &DrawConfig::default());
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Rotate(_))), 0);
    }

    #[test]
    fn test_background_mask_is_scoped() {
        let mut config = DrawConfig::default();
        config.background_mask.enable = true;
        let rec = draw(&dot(ShapeKind::Circle), &BubbleOverride::NONE, &config);

        let calls = rec.calls();
        let mask = calls
            .iter()
            .position(|c| *c == DrawCall::SetComposite(CompositeMode::DestinationOut))
            .unwrap();
        let restore = calls.iter().rposition(|c| *c == DrawCall::Restore).unwrap();
        assert!(mask < restore);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_stroke_when_width_positive() {
        let mut config = DrawConfig::default();
        config.particles.shape.stroke.width = 2.0;
        config.particles.shape.stroke.color = "#00ff00".into();
        let rec = draw(&dot(ShapeKind::Heart), &BubbleOverride::NONE, &config);

        let calls = rec.calls();
        let stroke = calls.iter().position(|c| *c == DrawCall::Stroke).unwrap();
        let fill = calls.iter().position(|c| *c == DrawCall::Fill).unwrap();
        assert!(stroke < fill);
        assert!(calls.contains(&DrawCall::SetStrokeStyle("#00ff00".into())));
        assert!(calls.contains(&DrawCall::SetLineWidth(2.0)));
    }

    #[test]
    fn test_line_is_stroked_not_filled() {
        let mut config = DrawConfig::default();
        config.particles.shape.stroke.width = 1.5;
        let rec = draw(&dot(ShapeKind::Line), &BubbleOverride::NONE, &config);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Stroke)), 1);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Fill)), 0);
        assert!(rec.calls().contains(&DrawCall::LineTo(DVec2::new(0.0, 5.0))));
    }

    #[test]
    fn test_unknown_shape_paints_nothing() {
        let mut particle = dot(ShapeKind::Circle);
        particle.shape = None;
        let rec = draw(&particle, &BubbleOverride::NONE, &DrawConfig::default());
        assert_eq!(rec.paint_count(), 0);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_polygon_filled_by_trace_and_particle() {
        let rec = draw(&dot(ShapeKind::Polygon), &BubbleOverride::NONE, &DrawConfig::default());
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Fill)), 2);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::LineTo(_))), 5);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_character_glyph_is_stable() {
        let mut config = DrawConfig::default();
        config.particles.shape.character.value =
            GlyphSource::Set(vec!["x".into(), "y".into(), "z".into()]);
        config.particles.shape.character.fill = false;

        let particle = dot(ShapeKind::Character);
        let drawer = ParticleDrawer::new(&particle, &config, &mut StdRng::seed_from_u64(5));
        let glyph = drawer.glyph().unwrap().to_owned();

        let mut rec = Recorder::new();
        for _ in 0..3 {
            drawer.draw(&mut rec, &particle, &BubbleOverride::NONE, &config);
        }
        assert_eq!(
            rec.count(|c| matches!(c, DrawCall::StrokeText { text, .. } if *text == glyph)),
            3
        );
        assert_eq!(rec.paint_count(), 0);
        assert!(rec.calls().contains(&DrawCall::SetFont("normal 400 10px Verdana".into())));
    }

    #[test]
    fn test_character_fill_uses_fill_text() {
        let mut config = DrawConfig::default();
        config.particles.shape.character.value = GlyphSource::Single("#".into());
        config.particles.shape.character.fill = true;

        let rec = draw(&dot(ShapeKind::Character), &BubbleOverride::NONE, &config);
        assert_eq!(
            rec.count(|c| matches!(c, DrawCall::FillText { text, .. } if text == "#")),
            1
        );
        assert_eq!(rec.count(|c| matches!(c, DrawCall::StrokeText { .. })), 0);
        assert_eq!(rec.paint_count(), 0);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_negative_overrides_pass_through() {
        let bubble = BubbleOverride { radius: Some(-4.0), opacity: Some(-0.5) };
        for shape in [ShapeKind::Circle, ShapeKind::Polygon, ShapeKind::Star, ShapeKind::Heart, ShapeKind::Character] {
            let rec = draw(&dot(shape), &bubble, &DrawConfig::default());
            assert!(rec.is_balanced(), "{shape:?} left the surface unbalanced");
            assert!(rec.calls().contains(&DrawCall::SetFillStyle("rgba(255, 0, 0, -0.5)".into())));
        }

        let rec = draw(&dot(ShapeKind::Circle), &bubble, &DrawConfig::default());
        assert!(rec.calls().iter().any(|c| matches!(c, DrawCall::Arc { radius, .. } if *radius == -4.0)));
    }

    #[test]
    fn test_non_character_has_no_glyph() {
        let particle = dot(ShapeKind::Star);
        let drawer = ParticleDrawer::new(&particle, &DrawConfig::default(), &mut StdRng::seed_from_u64(0));
        assert_eq!(drawer.glyph(), None);
    }

    #[test]
    fn test_image_draw() {
        let binding = ImageBinding::from_image(RgbaImage::new(8, 4)).unwrap();
        let particle = dot(ShapeKind::Image).with_image(binding);
        let rec = draw(&particle, &BubbleOverride::NONE, &DrawConfig::default());
        assert!(rec.calls().contains(&DrawCall::DrawImage {
            width: 8,
            height: 4,
            origin: DVec2::splat(-5.0),
            size: DVec2::new(10.0, 5.0),
        }));
    }
}
