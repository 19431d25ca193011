//! Scene composition: entity builders and the one-shot scene assembler.
//!
//! # Invariants
//! - Builders are pure; only the rock scatter consumes randomness, and it takes
//!   the generator as an argument.
//! - Assembly happens once and cannot fail.

mod assembler;
pub mod builders;
mod rocks;

pub use assembler::{
    FIREFLY_COLORS, FOG_COLOR, PALM_TREE_PLANTING, SUN_POSITION, SUN_SHADOW_EYE_DISTANCE,
    SUN_SHADOW_HALF_EXTENT, UMBRELLA_SPOTS, WATER_LEVEL, assemble, assemble_seeded,
    assemble_unseeded,
};
pub use rocks::RockScatter;
