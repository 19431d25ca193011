//! Camera input: pointer actions and the orbit controller that consumes them.
//!
//! # Invariants
//! - Input never touches the scene graph; it only moves the camera.
//! - The camera never orbits below the polar cap.

pub mod action;
mod orbit;
mod pointer;

pub use action::PointerAction;
pub use orbit::OrbitControls;
pub use pointer::{PointerButton, PointerTracker};
