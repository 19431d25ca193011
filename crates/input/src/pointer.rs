use crate::action::PointerAction;
use glam::Vec2;

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Turns button, cursor and wheel events into [`PointerAction`]s.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
    rotating: bool,
    panning: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(&mut self, button: PointerButton, pressed: bool) {
        match button {
            PointerButton::Primary => self.rotating = pressed,
            PointerButton::Secondary | PointerButton::Middle => self.panning = pressed,
        }
    }

    /// Cursor moved to `position`. Yields a drag while a button is held.
    pub fn moved(&mut self, position: Vec2) -> Option<PointerAction> {
        let last = self.position.replace(position)?;
        let delta = position - last;
        let action = if self.rotating {
            PointerAction::Rotate {
                dx: delta.x,
                dy: delta.y,
            }
        } else if self.panning {
            PointerAction::Pan {
                dx: delta.x,
                dy: delta.y,
            }
        } else {
            return None;
        };
        (!action.is_noop()).then_some(action)
    }

    /// The cursor left the window; the next move starts a fresh drag.
    pub fn left(&mut self) {
        self.position = None;
        self.rotating = false;
        self.panning = false;
    }

    /// Wheel turned by `lines`, positive scrolling up (away from the user).
    pub fn wheel_lines(&self, lines: f32) -> PointerAction {
        PointerAction::Zoom { steps: -lines }
    }

    /// Trackpad scroll in pixels, positive scrolling up.
    pub fn wheel_pixels(&self, pixels: f32) -> PointerAction {
        self.wheel_lines(pixels / PIXELS_PER_LINE)
    }

    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_without_buttons_does_nothing() {
        let mut pointer = PointerTracker::new();
        assert_eq!(pointer.moved(Vec2::new(10.0, 10.0)), None);
        assert_eq!(pointer.moved(Vec2::new(20.0, 15.0)), None);
    }

    #[test]
    fn primary_drag_rotates() {
        let mut pointer = PointerTracker::new();
        pointer.moved(Vec2::new(10.0, 10.0));
        pointer.button(PointerButton::Primary, true);
        assert_eq!(
            pointer.moved(Vec2::new(14.0, 7.0)),
            Some(PointerAction::Rotate { dx: 4.0, dy: -3.0 })
        );
        pointer.button(PointerButton::Primary, false);
        assert!(!pointer.is_dragging());
        assert_eq!(pointer.moved(Vec2::new(20.0, 7.0)), None);
    }

    #[test]
    fn secondary_drag_pans() {
        let mut pointer = PointerTracker::new();
        pointer.moved(Vec2::ZERO);
        pointer.button(PointerButton::Secondary, true);
        assert_eq!(
            pointer.moved(Vec2::new(0.0, 5.0)),
            Some(PointerAction::Pan { dx: 0.0, dy: 5.0 })
        );
    }

    #[test]
    fn leaving_the_window_resets_the_drag() {
        let mut pointer = PointerTracker::new();
        pointer.moved(Vec2::ZERO);
        pointer.button(PointerButton::Primary, true);
        pointer.left();
        assert_eq!(pointer.moved(Vec2::new(100.0, 100.0)), None);
        assert!(!pointer.is_dragging());
    }

    #[test]
    fn scrolling_up_zooms_in() {
        let pointer = PointerTracker::new();
        assert_eq!(pointer.wheel_lines(1.0), PointerAction::Zoom { steps: -1.0 });
        assert_eq!(pointer.wheel_pixels(-100.0), PointerAction::Zoom { steps: 2.0 });
    }
}
