//! Frame timing.
//!
//! The simulation advances by fixed per-frame increments, so the clock here
//! is not a dt integrator: it exists to stamp frames with a monotonic index
//! and a wall-clock delta for diagnostics and skip detection.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTick};
