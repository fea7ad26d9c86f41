//! Interactive host for the ocean backdrop.
//!
//! Plays the role of the external controller: keyboard input pushes depth
//! values into the simulation, the engine's frame driver does the rest.

use std::path::Path;

use pelagos_engine::core::{App, AppControl, FrameCtx};
use pelagos_engine::device::GpuInit;
use pelagos_engine::logging::{LoggingConfig, init_logging};
use pelagos_engine::render::{FrameStatus, OceanRenderer};
use pelagos_engine::sim::{OverlayUniforms, WaterSim};
use pelagos_engine::window::{Runtime, RuntimeConfig, RuntimeCtx};

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

const SPRITE_PATH: &str = "assets/boat.png";

const DEPTH_STEP: f32 = 0.02;
const PROBE_STEP: f32 = 0.05;
const SWELL_HEIGHT_STEP: f32 = 0.01;
const SWELL_FREQUENCY_STEP: f32 = 0.05;

struct OceanApp {
    sim: WaterSim,
    renderer: Option<OceanRenderer>,
    overlay: OverlayUniforms,
    paused: bool,

    // Local copies of the tunables so the keys can step them.
    depth: f32,
    probe_depth: f32,
    swell_height: f32,
    swell_frequency: f32,
}

impl OceanApp {
    fn new() -> Self {
        Self {
            sim: WaterSim::new(),
            renderer: None,
            overlay: OverlayUniforms {
                position: [0.78, 0.34],
                size: [0.18, 0.09],
                rotation: 0.0,
                _pad: [0.0; 3],
            },
            paused: false,
            depth: 0.0,
            probe_depth: 0.05,
            swell_height: 0.08,
            swell_frequency: 0.4,
        }
    }

    fn nudge_depth(&mut self, delta: f32) {
        self.depth = (self.depth + delta).clamp(0.0, 1.0);
        self.sim.set_depth(self.depth);
        log::info!("depth {:.2}  pressure {:.1} atm", self.depth, self.sim.pressure());
    }

    fn nudge_probe(&mut self, delta: f32) {
        self.probe_depth = (self.probe_depth + delta).clamp(0.0, 1.0);
        self.sim.set_probe_depth(self.probe_depth);
        log::info!(
            "probe depth {:.2}  pressure {:.1} atm",
            self.sim.probe_depth(),
            self.sim.pressure()
        );
    }

    fn nudge_swell(&mut self, dh: f32, df: f32) {
        self.swell_height = (self.swell_height + dh).clamp(0.0, 0.3);
        self.swell_frequency = (self.swell_frequency + df).clamp(0.05, 2.0);
        self.sim.set_swell(self.swell_height, self.swell_frequency);
        log::info!(
            "swell height {:.2}  frequency {:.2}",
            self.swell_height,
            self.swell_frequency
        );
    }

    fn on_key(&mut self, code: KeyCode, runtime: &mut RuntimeCtx) -> AppControl {
        match code {
            KeyCode::Escape => return AppControl::Exit,

            KeyCode::Space => {
                if self.paused {
                    runtime.resume_frames();
                } else {
                    runtime.stop_frames();
                }
                self.paused = !self.paused;
            }

            KeyCode::ArrowDown => self.nudge_depth(DEPTH_STEP),
            KeyCode::ArrowUp => self.nudge_depth(-DEPTH_STEP),

            KeyCode::PageDown => self.nudge_probe(PROBE_STEP),
            KeyCode::PageUp => self.nudge_probe(-PROBE_STEP),

            KeyCode::Digit1 => self.set_range(200.0),
            KeyCode::Digit2 => self.set_range(1000.0),
            KeyCode::Digit3 => self.set_range(4000.0),

            KeyCode::KeyW => self.nudge_swell(SWELL_HEIGHT_STEP, 0.0),
            KeyCode::KeyS => self.nudge_swell(-SWELL_HEIGHT_STEP, 0.0),
            KeyCode::KeyD => self.nudge_swell(0.0, SWELL_FREQUENCY_STEP),
            KeyCode::KeyA => self.nudge_swell(0.0, -SWELL_FREQUENCY_STEP),

            _ => {}
        }
        AppControl::Continue
    }

    fn set_range(&mut self, meters: f32) {
        self.sim.set_depth_range(meters);
        log::info!("depth range: 0-{meters} m");
    }
}

impl App for OceanApp {
    fn on_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = event
        {
            return self.on_key(*code, runtime);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let renderer = self.renderer.get_or_insert_with(|| {
            OceanRenderer::new(
                ctx.gpu.device(),
                ctx.gpu.queue(),
                ctx.gpu.surface_format(),
                Some(Path::new(SPRITE_PATH)),
            )
        });

        self.sim.advance();

        if ctx.time.frame % 600 == 0 {
            log::debug!(
                "frame {}  dt {:.1} ms  sim t {:.2}",
                ctx.time.frame,
                ctx.time.dt * 1000.0,
                self.sim.time()
            );
        }

        match renderer.render_frame(ctx.gpu, &self.sim.uniforms(), &self.overlay) {
            FrameStatus::Fatal => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    log::info!("pelagos viewer");
    log::info!("  up/down     camera depth");
    log::info!("  pgup/pgdn   probe depth");
    log::info!("  1/2/3       depth range 200/1000/4000 m");
    log::info!("  w/s a/d     swell height / frequency");
    log::info!("  space       pause frames   esc: quit");

    let config = RuntimeConfig {
        title: "Pelagos".to_string(),
        ..RuntimeConfig::default()
    };

    if let Err(e) = Runtime::run(config, GpuInit::default(), OceanApp::new()) {
        log::error!("runtime error: {e:#}");
        std::process::exit(1);
    }
}
