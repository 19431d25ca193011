//! Scene graph for the shoreline diorama.
//!
//! # Invariants
//! - Topology is frozen by [`SceneGraphBuilder::finish`]; afterwards only local
//!   transforms and light intensities change.
//! - Nodes are stored parent-before-child.
//! - Fog color and background color are always equal.

mod atmosphere;
mod graph;
mod light;
mod node;
mod scene;
pub mod shadow;

pub use atmosphere::{Atmosphere, Fog};
pub use graph::{SceneGraph, SceneGraphBuilder};
pub use light::{Light, LightKind, ShadowConfig, ShadowProjection};
pub use node::{Blueprint, Mesh, Node, NodeId, NodeKind, Shape, Surface};
pub use scene::{FIREFLY_COUNT, Scene, SceneHandles};
