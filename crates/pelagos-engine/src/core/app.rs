use winit::event::WindowEvent;

use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the host.
///
/// Both callbacks run on the event-loop thread. Depth mutations performed
/// in `on_event` are therefore visible to the very next `on_frame`; there
/// is no buffering between the two.
pub trait App {
    /// Called for every window event, before the runtime's own handling.
    ///
    /// `runtime` accepts frame-driver commands (stop/resume/exit) so a
    /// paused host can still resume from an input event.
    fn on_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (event, runtime);
        AppControl::Continue
    }

    /// Called once per driven frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
