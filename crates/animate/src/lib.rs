//! Animation clock and per-frame update loop.
//!
//! # Invariants
//! - Every animated value is a closed-form function of elapsed time; nothing
//!   accumulates across frames.
//! - Within a frame the order is fixed: clock, pose, controls, draw.
//! - The loop only yields between frames.

mod clock;
mod frame_loop;
pub mod motion;
mod update;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_loop::{FrameHost, FrameLoop, FrameOutcome, FrameStats, StopSignal};
pub use update::advance;
