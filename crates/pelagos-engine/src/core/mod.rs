//! Engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! host application: one callback per window event, one per driven frame.
//! The host owns the simulation and renderer; the runtime owns the loop.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
