//! Procedural shape geometry.
//!
//! Every particle shape is derived from a radius (and, for polygons and
//! stars, a side count). [`outline`] maps a [`ShapeKind`] to an [`Outline`]:
//! a list of [`PathSegment`]s to fill, a line to stroke, a glyph run, or an
//! image rectangle. Nothing here touches particle or shared state.
//!
//! # Polygons and Stars
//!
//! Triangles, polygons and stars share one construction driven by a
//! [`ShapeDescriptor`]. The path is walked turtle-style: draw `length` along
//! the local +x axis, move the origin to the end of the segment, rotate the
//! local frame by a fixed turn angle, repeat. A denominator of 2 makes the
//! walk cross itself, which is how stars are produced.
//!
//! The start offsets and length factors (`1.66`, `2.66`, `3.5`, ...) are
//! tuned visual proportions and are reproduced literally.

use glam::DVec2;
use std::f64::consts::PI;

use crate::config::CharacterConfig;
use crate::particle::ImageBinding;
use crate::surface::{Raster, Surface};

/// Largest polygon/star side count the configuration accepts.
pub const MAX_SIDES: u32 = 1024;

/// The closed set of drawable particle shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Vertical stroke of length `r` from the origin.
    Line,
    /// Full circle of radius `r`.
    Circle,
    /// Axis-aligned square of side `2r`. Also accepted as `"edge"`.
    Square,
    /// Equilateral triangle.
    Triangle,
    /// Regular polygon with the configured side count.
    Polygon,
    /// Star with the configured point count.
    Star,
    /// Heart built from quadratic curves.
    Heart,
    /// A text glyph. Also accepted as `"char"`.
    Character,
    /// The particle's bound image.
    Image,
}

impl ShapeKind {
    /// Parse a configured shape name, including the `edge` and `char` aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "line" => Some(ShapeKind::Line),
            "circle" => Some(ShapeKind::Circle),
            "square" | "edge" => Some(ShapeKind::Square),
            "triangle" => Some(ShapeKind::Triangle),
            "polygon" => Some(ShapeKind::Polygon),
            "star" => Some(ShapeKind::Star),
            "heart" => Some(ShapeKind::Heart),
            "character" | "char" => Some(ShapeKind::Character),
            "image" => Some(ShapeKind::Image),
            _ => None,
        }
    }

    /// Canonical configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Star => "star",
            ShapeKind::Heart => "heart",
            ShapeKind::Character => "character",
            ShapeKind::Image => "image",
        }
    }
}

/// A generalized N-gon.
///
/// `numerator × denominator` segments are drawn; `numerator / denominator`
/// is the "decimal side count" that sets the turn angle. Plain polygons use
/// a denominator of 1, stars and the triangle use 2.
///
/// Callers guarantee `3 <= numerator <= MAX_SIDES` and `denominator >= 1`;
/// the configuration layer enforces the side count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescriptor {
    pub numerator: u32,
    pub denominator: u32,
    /// Length of every segment.
    pub length: f64,
}

impl ShapeDescriptor {
    /// Total number of segments walked.
    pub fn segment_count(&self) -> u64 {
        u64::from(self.numerator) * u64::from(self.denominator)
    }

    pub fn decimal_sides(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Rotation applied after each segment, in radians.
    pub fn turn_angle(&self) -> f64 {
        let decimal_sides = self.decimal_sides();
        let interior_angle_degrees = (180.0 * (decimal_sides - 2.0)) / decimal_sides;
        PI - PI * interior_angle_degrees / 180.0
    }

    /// Walk the shape from `start` and return every visited point.
    ///
    /// The first element is `start`; one point follows per segment, so the
    /// result has `segment_count() + 1` entries.
    pub fn vertices(&self, start: DVec2) -> Vec<DVec2> {
        let turn = DVec2::from_angle(self.turn_angle());
        let mut heading = DVec2::X;
        let mut cursor = start;

        let mut points = Vec::with_capacity(self.segment_count() as usize + 1);
        points.push(cursor);
        for _ in 0..self.segment_count() {
            cursor += heading * self.length;
            points.push(cursor);
            heading = turn.rotate(heading);
        }
        points
    }

    /// Issue the walk to a surface using its transform stack.
    fn trace<S: Surface + ?Sized>(&self, surface: &mut S, start: DVec2) {
        let turn = self.turn_angle();
        let step = DVec2::new(self.length, 0.0);

        surface.save();
        surface.begin_path();
        surface.translate(start);
        surface.move_to(DVec2::ZERO);

        for _ in 0..self.segment_count() {
            surface.line_to(step);
            surface.translate(step);
            surface.rotate(turn);
        }

        // Filled here and again by the particle fill; translucent polygons depend on it.
        surface.fill();
        surface.restore();
    }
}

/// One path-construction instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(DVec2),
    LineTo(DVec2),
    QuadTo { control: DVec2, to: DVec2 },
    /// Arc from `start` to `end` radians, clockwise.
    Arc { center: DVec2, radius: f64, start: f64, end: f64 },
    Rect { origin: DVec2, size: DVec2 },
    /// A turtle-walked polygon starting at `start`.
    Polygon { start: DVec2, side: ShapeDescriptor },
}

impl PathSegment {
    /// Issue this instruction to a surface.
    pub fn issue<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            PathSegment::MoveTo(p) => surface.move_to(*p),
            PathSegment::LineTo(p) => surface.line_to(*p),
            PathSegment::QuadTo { control, to } => surface.quadratic_curve_to(*control, *to),
            PathSegment::Arc { center, radius, start, end } => {
                surface.arc(*center, *radius, *start, *end, false)
            }
            PathSegment::Rect { origin, size } => surface.rect(*origin, *size),
            PathSegment::Polygon { start, side } => side.trace(surface, *start),
        }
    }

    /// Points whose bounding box contains this segment.
    ///
    /// Arcs report the bounds of their full circle; every arc produced here
    /// is a full turn.
    fn extent(&self) -> Vec<DVec2> {
        match self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => vec![*p],
            PathSegment::QuadTo { control, to } => vec![*control, *to],
            PathSegment::Arc { center, radius, .. } => {
                vec![*center - DVec2::splat(*radius), *center + DVec2::splat(*radius)]
            }
            PathSegment::Rect { origin, size } => vec![*origin, *origin + *size],
            PathSegment::Polygon { start, side } => side.vertices(*start),
        }
    }
}

/// A character glyph ready to be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub text: String,
    /// CSS font shorthand: `"{style} {weight} {size}px {family}"`.
    pub font: String,
    pub at: DVec2,
    /// Fill the glyph when true, stroke it otherwise.
    pub fill: bool,
}

/// What a shape turns into for one frame.
#[derive(Debug, Clone)]
pub enum Outline {
    /// A path that the renderer fills (and optionally strokes).
    Fill(Vec<PathSegment>),
    /// A path stroked with the shape stroke style instead of filled.
    Line(Vec<PathSegment>),
    Glyph(GlyphRun),
    Image { raster: Raster, origin: DVec2, size: DVec2 },
    /// Nothing to draw.
    Empty,
}

impl Outline {
    /// The path segments, if this outline is a path.
    pub fn segments(&self) -> &[PathSegment] {
        match self {
            Outline::Fill(segments) | Outline::Line(segments) => segments,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outline::Empty)
    }

    /// Axis-aligned bounds `(min, max)` of a path or image outline.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let points: Vec<DVec2> = match self {
            Outline::Image { origin, size, .. } => vec![*origin, *origin + *size],
            _ => self.segments().iter().flat_map(PathSegment::extent).collect(),
        };
        let first = *points.first()?;
        Some(points.iter().fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }
}

/// Inputs besides kind and radius that some shapes need.
#[derive(Debug, Clone, Copy)]
pub struct ShapeParams<'a> {
    /// Circle centre.
    pub offset: DVec2,
    /// Side count for polygons and stars.
    pub sides: u32,
    /// Glyph resolved for this particle, if any.
    pub glyph: Option<&'a str>,
    pub character: &'a CharacterConfig,
    pub image: Option<&'a ImageBinding>,
}

/// Build the outline of a shape at `radius`.
pub fn outline(kind: ShapeKind, radius: f64, params: &ShapeParams<'_>) -> Outline {
    match kind {
        ShapeKind::Line => Outline::Line(vec![
            PathSegment::MoveTo(DVec2::ZERO),
            PathSegment::LineTo(DVec2::new(0.0, radius)),
        ]),
        ShapeKind::Circle => Outline::Fill(vec![PathSegment::Arc {
            center: params.offset,
            radius,
            start: 0.0,
            end: PI * 2.0,
        }]),
        ShapeKind::Square => Outline::Fill(vec![PathSegment::Rect {
            origin: DVec2::new(-radius, -radius),
            size: DVec2::new(radius * 2.0, radius * 2.0),
        }]),
        ShapeKind::Triangle => polygon_outline(triangle(radius)),
        ShapeKind::Polygon => polygon_outline(polygon(radius, params.sides)),
        ShapeKind::Star => polygon_outline(star(radius, params.sides)),
        ShapeKind::Heart => Outline::Fill(heart(radius)),
        ShapeKind::Character => match params.glyph {
            Some(text) => Outline::Glyph(glyph(text, radius, params.character)),
            None => Outline::Empty,
        },
        ShapeKind::Image => match params.image {
            Some(binding) => Outline::Image {
                raster: binding.raster.clone(),
                origin: DVec2::new(-radius, -radius),
                size: DVec2::new(radius * 2.0, radius * 2.0 / binding.ratio),
            },
            None => Outline::Empty,
        },
    }
}

fn polygon_outline((start, side): (DVec2, ShapeDescriptor)) -> Outline {
    Outline::Fill(vec![PathSegment::Polygon { start, side }])
}

/// Start offset and descriptor for a triangle.
pub fn triangle(radius: f64) -> (DVec2, ShapeDescriptor) {
    let start = DVec2::new(-radius, radius / 1.66);
    let side = ShapeDescriptor { numerator: 3, denominator: 2, length: radius * 2.0 };
    (start, side)
}

/// Start offset and descriptor for a regular polygon with `sides` sides.
pub fn polygon(radius: f64, sides: u32) -> (DVec2, ShapeDescriptor) {
    let n = f64::from(sides);
    let start = DVec2::new(-radius / (n / 3.5), -radius / (2.66 / 3.5));
    let side = ShapeDescriptor { numerator: sides, denominator: 1, length: radius * 2.66 / (n / 3.0) };
    (start, side)
}

/// Start offset and descriptor for a star with `points` points.
pub fn star(radius: f64, points: u32) -> (DVec2, ShapeDescriptor) {
    let n = f64::from(points);
    let start = DVec2::new(-radius * 2.0 / (n / 4.0), -radius / (2.0 * 2.66 / 3.5));
    let side = ShapeDescriptor {
        numerator: points,
        denominator: 2,
        length: radius * 2.0 * 2.66 / (n / 3.0),
    };
    (start, side)
}

/// The heart path: a move followed by six quadratic curves and two lines.
pub fn heart(radius: f64) -> Vec<PathSegment> {
    let x = -radius / 2.0;
    let y = -radius / 2.0;
    let p = DVec2::new;
    let quad = |cx, cy, tx, ty| PathSegment::QuadTo { control: p(cx, cy), to: p(tx, ty) };

    vec![
        PathSegment::MoveTo(p(x, y + radius / 4.0)),
        quad(x, y, x + radius / 4.0, y),
        quad(x + radius / 2.0, y, x + radius / 2.0, y + radius / 4.0),
        quad(x + radius / 2.0, y, x + radius * 3.0 / 4.0, y),
        quad(x + radius, y, x + radius, y + radius / 4.0),
        quad(x + radius, y + radius / 2.0, x + radius * 3.0 / 4.0, y + radius * 3.0 / 4.0),
        PathSegment::LineTo(p(x + radius / 2.0, y + radius)),
        PathSegment::LineTo(p(x + radius / 4.0, y + radius * 3.0 / 4.0)),
        quad(x, y + radius / 2.0, x, y + radius / 4.0),
    ]
}

/// Lay out a glyph: font size is `round(r) × 2`, anchored at `(-r/2, r/2)`.
pub fn glyph(text: &str, radius: f64, character: &CharacterConfig) -> GlyphRun {
    // Half-up rounding, as canvas hosts round font sizes.
    let size = (radius + 0.5).floor() * 2.0;
    GlyphRun {
        text: text.to_owned(),
        font: format!("{} {} {}px {}", character.style, character.weight, size, character.font),
        at: DVec2::new(-radius / 2.0, radius / 2.0),
        fill: character.fill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{DrawCall, Recorder};
    use image::RgbaImage;

    const EPS: f64 = 1e-6;

    fn params(character: &CharacterConfig) -> ShapeParams<'_> {
        ShapeParams { offset: DVec2::ZERO, sides: 5, glyph: None, character, image: None }
    }

    fn distinct(points: &[DVec2]) -> usize {
        let mut seen: Vec<DVec2> = Vec::new();
        for p in points {
            if !seen.iter().any(|q| q.distance(*p) < EPS) {
                seen.push(*p);
            }
        }
        seen.len()
    }

    #[test]
    fn test_shape_names_and_aliases() {
        assert_eq!(ShapeKind::from_name("edge"), Some(ShapeKind::Square));
        assert_eq!(ShapeKind::from_name("char"), Some(ShapeKind::Character));
        assert_eq!(ShapeKind::from_name("blob"), None);
        assert_eq!(ShapeKind::from_name(ShapeKind::Star.name()), Some(ShapeKind::Star));
    }

    #[test]
    fn test_circle_bounds() {
        let character = CharacterConfig::default();
        let out = outline(ShapeKind::Circle, 7.5, &params(&character));
        let (lo, hi) = out.bounds().unwrap();
        assert_eq!(lo, DVec2::splat(-7.5));
        assert_eq!(hi, DVec2::splat(7.5));
        assert_eq!(
            out.segments(),
            &[PathSegment::Arc { center: DVec2::ZERO, radius: 7.5, start: 0.0, end: PI * 2.0 }]
        );
    }

    #[test]
    fn test_circle_uses_offset() {
        let character = CharacterConfig::default();
        let p = ShapeParams { offset: DVec2::new(2.0, -1.0), ..params(&character) };
        let out = outline(ShapeKind::Circle, 1.0, &p);
        assert!(matches!(out.segments()[0], PathSegment::Arc { center, .. } if center == DVec2::new(2.0, -1.0)));
    }

    #[test]
    fn test_square() {
        let character = CharacterConfig::default();
        let out = outline(ShapeKind::Square, 3.0, &params(&character));
        assert_eq!(
            out.segments(),
            &[PathSegment::Rect { origin: DVec2::new(-3.0, -3.0), size: DVec2::new(6.0, 6.0) }]
        );
    }

    #[test]
    fn test_line_is_stroked_vertical() {
        let character = CharacterConfig::default();
        let out = outline(ShapeKind::Line, 4.0, &params(&character));
        assert!(matches!(out, Outline::Line(_)));
        assert_eq!(
            out.segments(),
            &[PathSegment::MoveTo(DVec2::ZERO), PathSegment::LineTo(DVec2::new(0.0, 4.0))]
        );
    }

    #[test]
    fn test_triangle_descriptor() {
        let (start, side) = triangle(10.0);
        assert_eq!(start.x, -10.0);
        assert!((start.y - 6.024_096_385_542_169).abs() < EPS);
        assert_eq!(side.length, 20.0);
        assert_eq!(side.numerator, 3);
        assert_eq!(side.segment_count(), 6);

        // Six segments retrace the same three corners.
        let points = side.vertices(start);
        assert_eq!(distinct(&points), 3);
        assert!(points.last().unwrap().distance(start) < EPS);
    }

    #[test]
    fn test_polygons_close() {
        for n in 3..=16 {
            let (start, side) = polygon(10.0, n);
            let points = side.vertices(start);
            assert_eq!(points.len() as u32, n + 1);
            assert!(
                points.last().unwrap().distance(start) < EPS,
                "{n}-gon did not close"
            );
            assert_eq!(distinct(&points), n as usize);
        }
    }

    #[test]
    fn test_star_walks_twice_the_points() {
        let (start, side) = star(10.0, 5);
        assert_eq!(side.segment_count(), 10);
        let points = side.vertices(start);
        assert_eq!(points.len(), 11);
        assert!(points.last().unwrap().distance(start) < EPS);
    }

    #[test]
    fn test_segment_count_does_not_overflow() {
        let (_, side) = star(1.0, 3_000_000_000);
        assert_eq!(side.segment_count(), 6_000_000_000);
    }

    #[test]
    fn test_polygon_constants() {
        let (start, side) = polygon(10.0, 6);
        assert_eq!(start, DVec2::new(-10.0 / (6.0 / 3.5), -10.0 / (2.66 / 3.5)));
        assert_eq!(side.length, 10.0 * 2.66 / 2.0);

        let (start, side) = star(10.0, 5);
        assert_eq!(start, DVec2::new(-20.0 / (5.0 / 4.0), -10.0 / (2.0 * 2.66 / 3.5)));
        assert_eq!(side.length, 10.0 * 2.0 * 2.66 / (5.0 / 3.0));
    }

    #[test]
    fn test_turn_angles() {
        let square = ShapeDescriptor { numerator: 4, denominator: 1, length: 1.0 };
        assert!((square.turn_angle() - PI / 2.0).abs() < EPS);

        let star = ShapeDescriptor { numerator: 5, denominator: 2, length: 1.0 };
        assert!((star.turn_angle() - 4.0 * PI / 5.0).abs() < EPS);
    }

    #[test]
    fn test_trace_issues_turtle_calls() {
        let side = ShapeDescriptor { numerator: 3, denominator: 1, length: 2.0 };
        let mut rec = Recorder::new();
        PathSegment::Polygon { start: DVec2::new(-1.0, 1.0), side }.issue(&mut rec);

        let calls = rec.calls();
        assert_eq!(calls[0], DrawCall::Save);
        assert_eq!(calls[2], DrawCall::Translate(DVec2::new(-1.0, 1.0)));
        assert_eq!(calls[3], DrawCall::MoveTo(DVec2::ZERO));
        assert_eq!(rec.count(|c| matches!(c, DrawCall::LineTo(p) if *p == DVec2::new(2.0, 0.0))), 3);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Rotate(_))), 3);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_heart_literal_path() {
        let path = heart(4.0);
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], PathSegment::MoveTo(DVec2::new(-2.0, -1.0)));
        assert_eq!(
            path[5],
            PathSegment::QuadTo { control: DVec2::new(2.0, 0.0), to: DVec2::new(1.0, 1.0) }
        );
        assert_eq!(path[6], PathSegment::LineTo(DVec2::new(0.0, 2.0)));
        assert_eq!(path[7], PathSegment::LineTo(DVec2::new(-1.0, 1.0)));
        assert_eq!(
            path[8],
            PathSegment::QuadTo { control: DVec2::new(-2.0, 0.0), to: DVec2::new(-2.0, -1.0) }
        );
    }

    #[test]
    fn test_glyph_font() {
        let character = CharacterConfig::default();
        let run = glyph("A", 5.5, &character);
        assert_eq!(run.font, format!("{} {} 12px {}", character.style, character.weight, character.font));
        assert_eq!(run.at, DVec2::new(-2.75, 2.75));

        let p = ShapeParams { glyph: None, ..params(&character) };
        assert!(outline(ShapeKind::Character, 5.0, &p).is_empty());
    }

    #[test]
    fn test_image_box_respects_ratio() {
        let character = CharacterConfig::default();
        let binding = ImageBinding::from_image(RgbaImage::new(20, 10)).unwrap();
        let p = ShapeParams { image: Some(&binding), ..params(&character) };

        let out = outline(ShapeKind::Image, 4.0, &p);
        let (lo, hi) = out.bounds().unwrap();
        assert_eq!(lo, DVec2::new(-4.0, -4.0));
        assert_eq!(hi, DVec2::new(4.0, 0.0));

        assert!(outline(ShapeKind::Image, 4.0, &params(&character)).is_empty());
    }

    #[test]
    fn test_zero_radius_is_degenerate_not_empty() {
        let character = CharacterConfig::default();
        let out = outline(ShapeKind::Polygon, 0.0, &params(&character));
        let (lo, hi) = out.bounds().unwrap();
        assert_eq!(lo, hi);
    }
}
