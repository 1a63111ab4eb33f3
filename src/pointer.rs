//! Pointer state handed in by the input collaborator.
//!
//! Tracks where the pointer is and whether it is actively moving over the
//! canvas. Grab lines only draw while the status is
//! [`InteractionStatus::MouseMove`].
//!
//! # Usage
//!
//! ```ignore
//! // from your window event handler:
//! pointer.moved(DVec2::new(x, y));
//! // when the cursor leaves the canvas:
//! pointer.left();
//! ```

use glam::DVec2;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionStatus {
    /// No pointer activity seen yet.
    #[default]
    Idle,
    /// The pointer is over the canvas and moving.
    MouseMove,
    /// The pointer left the canvas.
    MouseLeave,
}

/// Pointer position and status.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pointer {
    position: Option<DVec2>,
    status: InteractionStatus,
}

impl Pointer {
    /// An idle pointer with no known position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move to `position` (canvas pixels, already density-scaled).
    pub fn moved(&mut self, position: DVec2) {
        self.position = Some(position);
        self.status = InteractionStatus::MouseMove;
    }

    /// Record that the pointer left the canvas.
    pub fn left(&mut self) {
        self.position = None;
        self.status = InteractionStatus::MouseLeave;
    }

    pub fn status(&self) -> InteractionStatus {
        self.status
    }

    /// Last known position, if any.
    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    /// Position used for distance math; the origin when unknown.
    pub fn position_or_origin(&self) -> DVec2 {
        self.position.unwrap_or(DVec2::ZERO)
    }

    pub fn is_moving(&self) -> bool {
        self.status == InteractionStatus::MouseMove
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_lifecycle() {
        let mut pointer = Pointer::new();
        assert_eq!(pointer.status(), InteractionStatus::Idle);
        assert_eq!(pointer.position_or_origin(), DVec2::ZERO);

        pointer.moved(DVec2::new(12.0, 8.0));
        assert!(pointer.is_moving());
        assert_eq!(pointer.position(), Some(DVec2::new(12.0, 8.0)));

        pointer.left();
        assert!(!pointer.is_moving());
        assert_eq!(pointer.position(), None);
    }
}
