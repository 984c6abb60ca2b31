//! Input vocabulary shared by the page and its carousels.
//!
//! The rendering layer translates DOM events into these types; nothing here
//! touches the DOM.

use crate::config::DEFAULT_SWIPE_THRESHOLD;

/// Drag distance below which no drag preview is shown.
pub const DRAG_PREVIEW_DEAD_ZONE: f32 = 10.0;

/// Fraction of the drag distance the slider follows while dragging.
pub const DRAG_PREVIEW_FACTOR: f32 = 0.1;

/// Keys the carousels respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Show the previous slide.
    ArrowLeft,
    /// Show the next slide.
    ArrowRight,
    /// Any other key; never consumed.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Horizontal direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content dragged left; reveals the next slide.
    Left,
    /// Content dragged right; reveals the previous slide.
    Right,
}

/// Classify a horizontal displacement (`end_x - start_x`).
///
/// Returns `None` unless the travel strictly exceeds `threshold`.
///
/// ```
/// use vetsim::input::{swipe_direction, SwipeDirection};
///
/// assert_eq!(swipe_direction(-60.0, 50.0), Some(SwipeDirection::Left));
/// assert_eq!(swipe_direction(-30.0, 50.0), None);
/// ```
pub fn swipe_direction(delta_x: f32, threshold: f32) -> Option<SwipeDirection> {
    if !delta_x.is_finite() || delta_x.abs() <= threshold {
        return None;
    }
    if delta_x < 0.0 {
        Some(SwipeDirection::Left)
    } else {
        Some(SwipeDirection::Right)
    }
}

/// Follows one horizontal touch gesture from start to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchTracker {
    threshold: f32,
    start_x: Option<f32>,
}

impl TouchTracker {
    /// Create a tracker with the given swipe threshold.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    /// The swipe threshold in logical pixels.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// A finger touched down at `x`.
    pub fn start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// The finger moved to `x`.
    ///
    /// Returns the horizontal offset the slider should be previewed at:
    /// zero inside the dead zone, otherwise a tenth of the drag, following
    /// the finger.
    pub fn preview_offset(&self, x: f32) -> f32 {
        let Some(start) = self.start_x else {
            return 0.0;
        };
        let dragged = start - x;
        if dragged.abs() > DRAG_PREVIEW_DEAD_ZONE {
            -dragged * DRAG_PREVIEW_FACTOR
        } else {
            0.0
        }
    }

    /// The finger lifted at `x`.
    ///
    /// Returns the displacement `x - start`, or `None` if no gesture was
    /// being tracked.
    pub fn end(&mut self, x: f32) -> Option<f32> {
        self.start_x.take().map(|start| x - start)
    }

    /// Abandon the current gesture.
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("Enter"), Key::Other);
    }

    #[test]
    fn test_swipe_threshold_is_exclusive() {
        assert_eq!(swipe_direction(50.0, 50.0), None);
        assert_eq!(swipe_direction(50.5, 50.0), Some(SwipeDirection::Right));
        assert_eq!(swipe_direction(-51.0, 50.0), Some(SwipeDirection::Left));
        assert_eq!(swipe_direction(f32::NAN, 50.0), None);
    }

    #[test]
    fn test_tracker_preview_and_end() {
        let mut tracker = TouchTracker::default();
        assert_eq!(tracker.preview_offset(10.0), 0.0);

        tracker.start(200.0);
        assert!(tracker.is_tracking());
        assert_eq!(tracker.preview_offset(195.0), 0.0);
        assert!((tracker.preview_offset(100.0) - -10.0).abs() < f32::EPSILON);
        assert!((tracker.preview_offset(300.0) - 10.0).abs() < f32::EPSILON);

        assert_eq!(tracker.end(140.0), Some(-60.0));
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.end(140.0), None);
    }
}
