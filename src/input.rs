//! Mapping raw user input to navigation requests.

use crate::config::DEFAULT_SWIPE_THRESHOLD;

/// A navigation request, independent of what triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavInput {
    /// Previous button, left arrow, backward swipe
    Previous,
    /// Next button, right arrow, forward swipe
    Next,
    /// Indicator click for a 1-based page
    JumpTo(u32),
    /// Home key
    First,
    /// End key
    Last,
}

impl NavInput {
    /// Request for the indicator at `index` in document order (0-based).
    #[inline]
    pub fn indicator(index: usize) -> Self {
        NavInput::JumpTo(u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1)))
    }
}

/// Map a `KeyboardEvent.key` value to a navigation request.
pub fn map_key(key: &str) -> Option<NavInput> {
    match key {
        "ArrowLeft" => Some(NavInput::Previous),
        "ArrowRight" => Some(NavInput::Next),
        "Home" => Some(NavInput::First),
        "End" => Some(NavInput::Last),
        _ => None,
    }
}

/// A touch position in client pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Direction of a recognized swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left; turns to the next page
    Forward,
    /// Finger moved left to right; turns to the previous page
    Backward,
}

impl SwipeDirection {
    pub fn nav_input(self) -> NavInput {
        match self {
            SwipeDirection::Forward => NavInput::Next,
            SwipeDirection::Backward => NavInput::Previous,
        }
    }
}

/// Classify a drag from `start` to `end` as a horizontal swipe.
///
/// The drag counts only when its horizontal travel exceeds both its
/// vertical travel and `threshold`.
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::input::{classify_swipe, SwipeDirection, TouchPoint};
///
/// let start = TouchPoint::new(200.0, 100.0);
/// let end = TouchPoint::new(120.0, 90.0);
/// assert_eq!(classify_swipe(start, end, 50.0), Some(SwipeDirection::Forward));
///
/// // Mostly vertical
/// let end = TouchPoint::new(145.0, 40.0);
/// assert_eq!(classify_swipe(start, end, 50.0), None);
/// ```
pub fn classify_swipe(start: TouchPoint, end: TouchPoint, threshold: f64) -> Option<SwipeDirection> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;

    if dx.abs() > dy.abs() && dx.abs() > threshold {
        if dx > 0.0 {
            Some(SwipeDirection::Forward)
        } else {
            Some(SwipeDirection::Backward)
        }
    } else {
        None
    }
}

/// Tracks one touch from start to end.
#[derive(Clone, Debug)]
pub struct SwipeTracker {
    start: Option<TouchPoint>,
    threshold: f64,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record where a touch began.
    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
    }

    /// Finish the touch at `point` and return the navigation it implies.
    ///
    /// Returns `None` if the drag was not a swipe or no touch was started.
    pub fn end(&mut self, point: TouchPoint) -> Option<NavInput> {
        let start = self.start.take()?;
        classify_swipe(start, point, self.threshold).map(SwipeDirection::nav_input)
    }

    /// Forget an in-progress touch.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key("ArrowLeft"), Some(NavInput::Previous));
        assert_eq!(map_key("ArrowRight"), Some(NavInput::Next));
        assert_eq!(map_key("Home"), Some(NavInput::First));
        assert_eq!(map_key("End"), Some(NavInput::Last));
    }

    #[test]
    fn test_non_nav_keys() {
        assert_eq!(map_key("ArrowUp"), None);
        assert_eq!(map_key("Enter"), None);
        assert_eq!(map_key("arrowleft"), None);
        assert_eq!(map_key(""), None);
    }

    #[test]
    fn test_indicator_is_one_based() {
        assert_eq!(NavInput::indicator(0), NavInput::JumpTo(1));
        assert_eq!(NavInput::indicator(3), NavInput::JumpTo(4));
    }

    #[test]
    fn test_forward_swipe() {
        // Horizontal 80, vertical 10, finger moving left
        let start = TouchPoint::new(300.0, 200.0);
        let end = TouchPoint::new(220.0, 190.0);
        assert_eq!(classify_swipe(start, end, 50.0), Some(SwipeDirection::Forward));
    }

    #[test]
    fn test_backward_swipe() {
        let start = TouchPoint::new(100.0, 200.0);
        let end = TouchPoint::new(180.0, 210.0);
        assert_eq!(classify_swipe(start, end, 50.0), Some(SwipeDirection::Backward));
    }

    #[test]
    fn test_vertical_drag_ignored() {
        // Horizontal 55, vertical 60
        let start = TouchPoint::new(300.0, 300.0);
        let end = TouchPoint::new(245.0, 240.0);
        assert_eq!(classify_swipe(start, end, 50.0), None);
    }

    #[test]
    fn test_short_drag_ignored() {
        let start = TouchPoint::new(100.0, 100.0);
        assert_eq!(classify_swipe(start, TouchPoint::new(50.0, 100.0), 50.0), None);
        assert_eq!(
            classify_swipe(start, TouchPoint::new(49.0, 100.0), 50.0),
            Some(SwipeDirection::Forward)
        );
    }

    #[test]
    fn test_tracker_maps_to_nav_input() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(TouchPoint::new(300.0, 200.0));
        assert_eq!(tracker.end(TouchPoint::new(220.0, 190.0)), Some(NavInput::Next));

        tracker.begin(TouchPoint::new(100.0, 200.0));
        assert_eq!(tracker.end(TouchPoint::new(200.0, 200.0)), Some(NavInput::Previous));
    }

    #[test]
    fn test_tracker_requires_start() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(TouchPoint::new(0.0, 0.0)), None);

        tracker.begin(TouchPoint::new(300.0, 0.0));
        tracker.cancel();
        assert_eq!(tracker.end(TouchPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_tracker_start_consumed() {
        let mut tracker = SwipeTracker::new(10.0);
        tracker.begin(TouchPoint::new(100.0, 0.0));
        assert!(tracker.end(TouchPoint::new(0.0, 0.0)).is_some());
        assert_eq!(tracker.end(TouchPoint::new(0.0, 0.0)), None);
    }
}
