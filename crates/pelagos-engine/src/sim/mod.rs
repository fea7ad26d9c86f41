//! Water simulation state.
//!
//! [`WaterSim`] owns everything the shaders read: the simulation clock, the
//! slow-drifting swell, the externally pushed depth values, and the pressure
//! derived from them. It is a plain mutable struct with no GPU coupling, so
//! every frame-to-frame property is unit-testable.
//!
//! Convention:
//! - the controller mutates (`set_depth`, `set_probe_depth`, ...)
//! - the frame driver calls `advance()` once per frame
//! - the renderer snapshots `uniforms()` and uploads it verbatim

mod uniforms;
mod water;

pub use uniforms::{OverlayUniforms, WaterUniforms};
pub use water::{DEFAULT_RANGE_METERS, PROBE_DEPTH_FLOOR, TIME_STEP, WaterSim};
