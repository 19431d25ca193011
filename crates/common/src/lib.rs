//! Shared types used by every shoreline crate.

mod types;

pub use types::{Color, Transform};
