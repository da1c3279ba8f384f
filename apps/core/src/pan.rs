//! Drag-to-pan and wheel handling for the sign wall's scroll container.
//!
//! The browser owns the actual scroll offsets; this module only decides what
//! they should become. [`DragPan`] is the pointer gesture between down and
//! up, [`wheel_pan_delta`] routes wheel input to horizontal scrolling.

/// Scroll offsets of a container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPos {
    pub left: f64,
    pub top: f64,
}

/// Container geometry needed to decide whether a wheel event can pan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    pub scroll_width: f64,
    pub client_width: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollExtent {
    pub fn max_scroll_left(&self) -> f64 {
        self.scroll_width - self.client_width
    }

    pub fn max_scroll_top(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// Wheel / trackpad delta in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive is down.
    pub dy: f64,
}

pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPan {
    #[default]
    Idle,
    Dragging {
        start_x: f64,
        start_y: f64,
        origin: ScrollPos,
    },
}

impl DragPan {
    /// Starts a drag for the primary button. Returns whether capture began.
    pub fn pointer_down(&mut self, button: i16, x: f64, y: f64, origin: ScrollPos) -> bool {
        if button != PRIMARY_BUTTON {
            return false;
        }
        *self = Self::Dragging {
            start_x: x,
            start_y: y,
            origin,
        };
        true
    }

    /// New scroll position while dragging: the content follows the pointer.
    pub fn pointer_move(&self, x: f64, y: f64) -> Option<ScrollPos> {
        match *self {
            Self::Idle => None,
            Self::Dragging {
                start_x,
                start_y,
                origin,
            } => Some(ScrollPos {
                left: origin.left - (x - start_x),
                top: origin.top - (y - start_y),
            }),
        }
    }

    /// Ends the gesture on up, cancel or leave. Returns whether a drag was active.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        *self = Self::Idle;
        was_dragging
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Horizontal scroll to apply for a wheel event, or `None` to leave the event
/// to the browser.
///
/// A mostly-horizontal gesture pans horizontally. A vertical wheel only pans
/// horizontally when the container cannot scroll vertically itself.
pub fn wheel_pan_delta(delta: WheelDelta, extent: ScrollExtent) -> Option<f64> {
    if extent.max_scroll_left() <= 0.0 {
        return None;
    }

    if delta.dx.abs() > delta.dy.abs() {
        return Some(delta.dx);
    }

    if extent.max_scroll_top() > 0.0 {
        return None;
    }

    Some(delta.dy)
}

#[cfg(test)]
mod tests {
    use super::{wheel_pan_delta, DragPan, ScrollExtent, ScrollPos, WheelDelta};

    const WIDE: ScrollExtent = ScrollExtent {
        scroll_width: 2000.0,
        client_width: 800.0,
        scroll_height: 400.0,
        client_height: 400.0,
    };

    #[test]
    fn drag_moves_scroll_opposite_to_pointer() {
        let mut pan = DragPan::default();
        assert!(pan.pointer_down(0, 100.0, 50.0, ScrollPos { left: 300.0, top: 20.0 }));
        assert!(pan.is_dragging());

        let pos = pan.pointer_move(60.0, 70.0).unwrap();
        assert_eq!(pos, ScrollPos { left: 340.0, top: 0.0 });

        assert!(pan.end());
        assert!(pan.pointer_move(0.0, 0.0).is_none());
        assert!(!pan.end());
    }

    #[test]
    fn secondary_button_does_not_capture() {
        let mut pan = DragPan::default();
        assert!(!pan.pointer_down(2, 0.0, 0.0, ScrollPos::default()));
        assert!(!pan.is_dragging());
    }

    #[test]
    fn horizontal_gesture_pans_horizontally() {
        let delta = WheelDelta { dx: -30.0, dy: 5.0 };
        assert_eq!(wheel_pan_delta(delta, WIDE), Some(-30.0));
    }

    #[test]
    fn vertical_wheel_redirects_without_vertical_room() {
        let delta = WheelDelta { dx: 0.0, dy: 120.0 };
        assert_eq!(wheel_pan_delta(delta, WIDE), Some(120.0));
    }

    #[test]
    fn vertical_wheel_is_left_alone_when_container_scrolls_vertically() {
        let tall = ScrollExtent {
            scroll_height: 900.0,
            ..WIDE
        };
        let delta = WheelDelta { dx: 0.0, dy: 120.0 };
        assert_eq!(wheel_pan_delta(delta, tall), None);
    }

    #[test]
    fn narrow_content_never_pans() {
        let narrow = ScrollExtent {
            scroll_width: 800.0,
            ..WIDE
        };
        assert_eq!(wheel_pan_delta(WheelDelta { dx: 50.0, dy: 0.0 }, narrow), None);
    }
}
