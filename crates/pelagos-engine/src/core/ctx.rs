use winit::window::Window;

use crate::device::Gpu;
use crate::time::FrameTick;
use crate::window::RuntimeCtx;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTick,
    pub runtime: &'a mut RuntimeCtx,
}
