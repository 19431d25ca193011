//! wgpu render backend for the beach diorama.
//!
//! Draws a frame in three passes: the sun's shadow map, opaque meshes, then
//! blended meshes back to front. Geometry is tessellated once per shared
//! shape and cached for the life of the renderer.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - Colors are shaded in linear space; the surface format is sRGB.

mod context;
mod gpu;
mod mesh;
mod shaders;
mod uniforms;

pub use context::{GpuContext, GpuInitError};
pub use gpu::WgpuRenderer;
pub use uniforms::MAX_POINT_LIGHTS;
