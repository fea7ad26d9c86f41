//! Pelagos engine crate.
//!
//! This crate owns the platform + GPU runtime pieces of the ocean backdrop:
//! the wgpu device/surface layer, the winit frame driver, the water
//! simulation state, and the renderer that composites the surface and the
//! overlay sprite every frame.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod sim;
pub mod render;
