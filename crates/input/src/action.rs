/// A pointer gesture, already decoded from raw window events.
///
/// The orbit controller consumes actions, never raw events, so the desktop
/// shell is the only place that knows about the windowing library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Drag with the primary button, in physical pixels.
    Rotate { dx: f32, dy: f32 },
    /// Drag with the secondary button, in physical pixels.
    Pan { dx: f32, dy: f32 },
    /// Wheel movement in lines; positive pulls the camera away.
    Zoom { steps: f32 },
}

impl PointerAction {
    /// Whether the action has any effect.
    pub fn is_noop(&self) -> bool {
        match *self {
            PointerAction::Rotate { dx, dy } | PointerAction::Pan { dx, dy } => {
                dx == 0.0 && dy == 0.0
            }
            PointerAction::Zoom { steps } => steps == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deltas_are_noops() {
        assert!(PointerAction::Rotate { dx: 0.0, dy: 0.0 }.is_noop());
        assert!(PointerAction::Pan { dx: 0.0, dy: 0.0 }.is_noop());
        assert!(PointerAction::Zoom { steps: 0.0 }.is_noop());
    }

    #[test]
    fn nonzero_deltas_do_something() {
        assert!(!PointerAction::Rotate { dx: 1.0, dy: 0.0 }.is_noop());
        assert!(!PointerAction::Zoom { steps: -1.0 }.is_noop());
    }
}
