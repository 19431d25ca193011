//! Viewport binding: keeps the camera projection and the render surface size in
//! step with the host window.
//!
//! # Invariants
//! - After any resize, `camera.aspect == viewport.aspect()` and both are finite
//!   and positive.
//! - The drawing-buffer pixel ratio never exceeds [`MAX_PIXEL_RATIO`].

mod camera;
mod viewport;

pub use camera::PerspectiveCamera;
pub use viewport::{MAX_PIXEL_RATIO, SurfaceSize, Viewport};
