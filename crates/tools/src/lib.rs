//! Developer tooling: live debug parameters and the scene inspector.
//!
//! # Invariants
//! - The inspector is read-only.
//! - The debug surface only touches light intensities and the sun position.

mod inspector;
pub mod params;

pub use inspector::{NodeInfo, SceneInspector, SceneSummary};
pub use params::{DebugParam, DebugSurface, ParamError, ParamSpec, SUN_FOLDER};
