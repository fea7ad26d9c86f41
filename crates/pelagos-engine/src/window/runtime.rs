use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

use super::driver::FrameDriver;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pelagos".to_string(),
            initial_size: LogicalSize::new(960.0, 640.0),
        }
    }
}

/// Runtime context passed to app callbacks.
///
/// Commands are buffered and applied after the current callback returns, so
/// a callback never observes the loop mid-mutation.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Stops the frame driver: no further frame fires until resumed.
    pub fn stop_frames(&mut self) {
        self.commands.push(Command::StopFrames);
    }

    /// Resumes frame production after a `stop_frames`.
    pub fn resume_frames(&mut self) {
        self.commands.push(Command::ResumeFrames);
    }

    /// Ends the event loop. The host's resources drop on the way out.
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    StopFrames,
    ResumeFrames,
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` against a single window until the loop exits.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host::new(config, gpu_init, app);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct ViewEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    view: Option<ViewEntry>,
    driver: FrameDriver,
    exit_requested: bool,
}

impl<A> Host<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            view: None,
            driver: FrameDriver::new(),
            exit_requested: false,
        }
    }

    fn create_view(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = ViewEntryBuilder {
            clock: FrameClock::new(),
            window,
            gpu_builder: |w| {
                // No graphics device is unrecoverable; fail loudly at startup.
                pollster::block_on(Gpu::new(w, gpu_init))
                    .expect("GPU initialization failed: no usable graphics device")
            },
        }
        .build();

        self.view = Some(entry);
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::StopFrames => {
                    self.driver.stop();
                    log::debug!("frame driver stopped");
                }
                Command::ResumeFrames => {
                    self.driver.resume();
                    log::debug!("frame driver resumed");
                }
                Command::Exit => self.exit_requested = true,
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for Host<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }

        if let Err(e) = self.create_view(event_loop) {
            log::error!("failed to create view: {e:#}");
            event_loop.exit();
            return;
        }

        if let Some(view) = &self.view {
            view.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw while the driver is attached. Excess requests
        // coalesce; vsync (FIFO present mode) paces the loop.
        if self.driver.is_active() {
            if let Some(view) = &self.view {
                view.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // The app sees every event first: the external controller lives in
        // `on_event` (depth keys, pause) and may issue driver commands.
        let mut runtime_ctx = RuntimeCtx::default();
        if self.app.on_event(&event, &mut runtime_ctx) == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
        if self.exit_requested {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(view) = self.view.as_mut() {
                    view.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    view.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(view) = self.view.as_mut() {
                    let new_size = view.with_window(|w| w.inner_size());
                    view.with_gpu_mut(|gpu| gpu.resize(new_size));
                    view.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                // A request queued before `stop_frames` must not tick: the
                // driver check here is what makes cancellation synchronous.
                if !self.driver.is_active() {
                    return;
                }

                let mut runtime_ctx = RuntimeCtx::default();
                let mut control = AppControl::Continue;

                // Split borrows so `self.app` is usable inside the
                // self-referencing entry's closure.
                let (app, view) = (&mut self.app, &mut self.view);

                if let Some(view) = view.as_mut() {
                    view.with_mut(|fields| {
                        let tick = fields.clock.tick();

                        let mut ctx = FrameCtx {
                            window: fields.window,
                            gpu: fields.gpu,
                            time: tick,
                            runtime: &mut runtime_ctx,
                        };

                        control = app.on_frame(&mut ctx);
                    });
                }

                if control == AppControl::Exit {
                    runtime_ctx.exit();
                }
                self.apply_commands(event_loop, runtime_ctx);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
