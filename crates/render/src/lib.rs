//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Everything a backend draws comes from a [`DrawList`] extracted from the
//!   current scene state and camera.

mod draw_list;
mod text;

pub use draw_list::{DrawItem, DrawList, HemisphereLight, PointLight, ResolvedLights, SunLight};
pub use text::DebugTextRenderer;

use shoreline_scene::Scene;
use shoreline_view::PerspectiveCamera;

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}
