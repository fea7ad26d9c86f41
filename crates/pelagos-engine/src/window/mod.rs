//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! drives one frame per display refresh through the cancellable
//! [`FrameDriver`].

mod driver;
mod runtime;

pub use driver::FrameDriver;
pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
