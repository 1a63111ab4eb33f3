//! A [`Surface`] that records draw calls instead of rasterizing them.
//!
//! Useful for headless capture (serialize the call list, replay it on a real
//! canvas later) and for tests that assert on exactly what a renderer issued.

use glam::DVec2;

use crate::surface::{CompositeMode, Raster, Surface};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    Translate(DVec2),
    Rotate(f64),
    BeginPath,
    MoveTo(DVec2),
    LineTo(DVec2),
    QuadraticCurveTo { control: DVec2, to: DVec2 },
    Arc { center: DVec2, radius: f64, start: f64, end: f64, counter_clockwise: bool },
    Rect { origin: DVec2, size: DVec2 },
    ClosePath,
    Fill,
    Stroke,
    SetFillStyle(String),
    SetStrokeStyle(String),
    SetLineWidth(f64),
    SetComposite(CompositeMode),
    SetFont(String),
    FillText { text: String, at: DVec2 },
    StrokeText { text: String, at: DVec2 },
    /// Images are recorded by their pixel dimensions.
    DrawImage { width: u32, height: u32, origin: DVec2, size: DVec2 },
}

/// Records every call made through the [`Surface`] trait.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Vec<DrawCall>,
    depth: usize,
    underflow: bool,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Forget all recorded calls and state-stack bookkeeping.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.depth = 0;
        self.underflow = false;
    }

    /// Count the calls matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Number of fill and stroke calls (paint operations on a path).
    pub fn paint_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCall::Fill | DrawCall::Stroke))
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True when every save was matched by a restore and no restore came first.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.underflow
    }

    fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.depth += 1;
        self.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        match self.depth.checked_sub(1) {
            Some(d) => self.depth = d,
            None => self.underflow = true,
        }
        self.push(DrawCall::Restore);
    }

    fn translate(&mut self, offset: DVec2) {
        self.push(DrawCall::Translate(offset));
    }

    fn rotate(&mut self, angle: f64) {
        self.push(DrawCall::Rotate(angle));
    }

    fn begin_path(&mut self) {
        self.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.push(DrawCall::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.push(DrawCall::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2) {
        self.push(DrawCall::QuadraticCurveTo { control, to });
    }

    fn arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, counter_clockwise: bool) {
        self.push(DrawCall::Arc { center, radius, start, end, counter_clockwise });
    }

    fn rect(&mut self, origin: DVec2, size: DVec2) {
        self.push(DrawCall::Rect { origin, size });
    }

    fn close_path(&mut self) {
        self.push(DrawCall::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCall::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCall::Stroke);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.push(DrawCall::SetFillStyle(style.to_owned()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.push(DrawCall::SetStrokeStyle(style.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCall::SetLineWidth(width));
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.push(DrawCall::SetComposite(mode));
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCall::SetFont(font.to_owned()));
    }

    fn fill_text(&mut self, text: &str, at: DVec2) {
        self.push(DrawCall::FillText { text: text.to_owned(), at });
    }

    fn stroke_text(&mut self, text: &str, at: DVec2) {
        self.push(DrawCall::StrokeText { text: text.to_owned(), at });
    }

    fn draw_image(&mut self, image: &Raster, origin: DVec2, size: DVec2) {
        let (width, height) = image.dimensions();
        self.push(DrawCall::DrawImage { width, height, origin, size });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_restore_is_unbalanced() {
        let mut rec = Recorder::new();
        rec.restore();
        assert_eq!(rec.depth(), 0);
        assert!(!rec.is_balanced());

        rec.clear();
        assert!(rec.is_balanced());
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn test_paint_count() {
        let mut rec = Recorder::new();
        rec.begin_path();
        rec.rect(DVec2::ZERO, DVec2::ONE);
        rec.stroke();
        rec.fill();
        assert_eq!(rec.paint_count(), 2);
        assert_eq!(rec.take().len(), 4);
        assert!(rec.calls().is_empty());
    }
}
