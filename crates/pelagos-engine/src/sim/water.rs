use std::f32::consts::FRAC_PI_4;

use super::uniforms::WaterUniforms;

/// Fixed simulation-clock increment per frame.
pub const TIME_STEP: f32 = 0.01;

/// Fixed swell-phase increment per frame.
const PHASE_STEP: f32 = 0.003;

/// Direction wobble: angle = sin(phase * RATE) * AMPLITUDE.
const DIRECTION_RATE: f32 = 0.08;
const DIRECTION_AMPLITUDE: f32 = 0.4;

/// Height breathing, at a slower rate so direction and height drift stay
/// visually decorrelated.
const HEIGHT_RATE: f32 = 0.05;
const HEIGHT_AMPLITUDE: f32 = 0.02;

const BASE_SWELL_HEIGHT: f32 = 0.08;
const BASE_SWELL_FREQUENCY: f32 = 0.4;

/// Probe depth floor: keeps the probe below the lowest visual wave crest.
pub const PROBE_DEPTH_FLOOR: f32 = 0.05;

/// Default depth range: normalized 1.0 == 200 m.
pub const DEFAULT_RANGE_METERS: f32 = 200.0;

/// Simulation state behind the per-frame uniform block.
///
/// Deterministic: `advance()` is a pure function of the previous state plus
/// the externally set depth values. No randomness, no wall-clock input;
/// N calls from a fresh state reproduce bit-for-bit.
#[derive(Debug, Clone)]
pub struct WaterSim {
    time: f32,
    swell_phase: f32,

    depth: f32,
    probe_depth: f32,
    range_meters: f32,

    base_height: f32,
    frequency: f32,
    sun_angle: f32,

    // Recomputed by advance(); cached so uniforms() is a plain snapshot.
    direction: [f32; 2],
    height: f32,
    pressure: f32,
}

impl WaterSim {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            swell_phase: 0.0,
            depth: 0.0,
            probe_depth: PROBE_DEPTH_FLOOR,
            range_meters: DEFAULT_RANGE_METERS,
            base_height: BASE_SWELL_HEIGHT,
            frequency: BASE_SWELL_FREQUENCY,
            sun_angle: FRAC_PI_4,
            direction: [1.0, 1.0],
            height: BASE_SWELL_HEIGHT,
            pressure: 1.0,
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Order matters and is part of the contract: clock, phase, direction,
    /// height, pressure.
    pub fn advance(&mut self) {
        self.time += TIME_STEP;
        self.swell_phase += PHASE_STEP;

        let angle = (self.swell_phase * DIRECTION_RATE).sin() * DIRECTION_AMPLITUDE;
        self.direction = [angle.cos(), angle.sin()];

        self.height = self.base_height + (self.swell_phase * HEIGHT_RATE).sin() * HEIGHT_AMPLITUDE;

        self.pressure = self.pressure_at(self.depth);
    }

    /// Pressure in atmospheres at a normalized depth: 1 ATM at the surface
    /// plus 1 ATM per 10 m.
    pub fn pressure_at(&self, normalized_depth: f32) -> f32 {
        1.0 + normalized_depth * self.range_meters / 10.0
    }

    // ── controller interface ──────────────────────────────────────────────

    /// Stores the camera depth. Unclamped: chapter ranges differ and the
    /// caller owns domain validity.
    pub fn set_depth(&mut self, normalized: f32) {
        self.depth = normalized;
    }

    /// Stores the probe depth, clamped to [`PROBE_DEPTH_FLOOR`], and
    /// immediately rederives pressure from it for display.
    pub fn set_probe_depth(&mut self, normalized: f32) {
        self.probe_depth = normalized.max(PROBE_DEPTH_FLOOR);
        self.pressure = self.pressure_at(self.probe_depth);
    }

    /// Retunes the base swell amplitude and spatial frequency.
    pub fn set_swell(&mut self, height: f32, frequency: f32) {
        self.base_height = height;
        self.frequency = frequency;
    }

    /// Sets the meter range that normalized depth 1.0 maps to.
    pub fn set_depth_range(&mut self, meters: f32) {
        self.range_meters = meters;
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn probe_depth(&self) -> f32 {
        self.probe_depth
    }

    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    pub fn swell_direction(&self) -> [f32; 2] {
        self.direction
    }

    pub fn swell_height(&self) -> f32 {
        self.height
    }

    /// Snapshot for upload. Pressure was rederived by the latest `advance()`
    /// or `set_probe_depth()` call, so the block never carries a stale
    /// derived value.
    pub fn uniforms(&self) -> WaterUniforms {
        WaterUniforms {
            time: self.time,
            depth: self.depth,
            swell_direction: self.direction,
            swell_height: self.height,
            swell_frequency: self.frequency,
            sun_angle: self.sun_angle,
            probe_depth: self.probe_depth,
            pressure: self.pressure,
            _pad: [0.0; 3],
        }
    }
}

impl Default for WaterSim {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    // ── pressure law ──────────────────────────────────────────────────────

    #[test]
    fn surface_pressure_is_one_atmosphere() {
        let mut sim = WaterSim::new();
        sim.set_depth(0.0);
        sim.advance();
        assert!((sim.pressure() - 1.0).abs() < TOL);
    }

    #[test]
    fn full_depth_at_200m_is_21_atmospheres() {
        let mut sim = WaterSim::new();
        sim.set_depth(1.0);
        sim.advance();
        assert!((sim.pressure() - 21.0).abs() < TOL);
    }

    #[test]
    fn pressure_tracks_range_meters() {
        let mut sim = WaterSim::new();
        sim.set_depth_range(4000.0);
        sim.set_depth(0.5);
        sim.advance();
        assert!((sim.pressure() - 201.0).abs() < TOL);
    }

    #[test]
    fn pressure_law_is_exact_across_domain() {
        let mut sim = WaterSim::new();
        for i in 0..=20 {
            let d = i as f32 / 20.0;
            sim.set_depth(d);
            sim.advance();
            assert!((sim.pressure() - (1.0 + d * 200.0 / 10.0)).abs() < TOL);
        }
    }

    #[test]
    fn pressure_never_drifts_under_constant_depth() {
        let mut sim = WaterSim::new();
        sim.set_depth(0.3);
        sim.advance();
        let first = sim.pressure();
        for _ in 0..500 {
            sim.advance();
        }
        assert_eq!(sim.pressure(), first);
    }

    // ── probe depth clamp ─────────────────────────────────────────────────

    #[test]
    fn probe_depth_below_floor_clamps() {
        let mut sim = WaterSim::new();
        sim.set_probe_depth(0.0);
        assert_eq!(sim.probe_depth(), PROBE_DEPTH_FLOOR);
    }

    #[test]
    fn probe_depth_at_or_above_floor_is_identity() {
        let mut sim = WaterSim::new();
        sim.set_probe_depth(0.05);
        assert_eq!(sim.probe_depth(), 0.05);
        sim.set_probe_depth(0.73);
        assert_eq!(sim.probe_depth(), 0.73);
    }

    #[test]
    fn probe_depth_recomputes_pressure_immediately() {
        let mut sim = WaterSim::new();
        sim.set_probe_depth(0.5);
        assert!((sim.pressure() - 11.0).abs() < TOL);
    }

    // ── depth storage ─────────────────────────────────────────────────────

    #[test]
    fn depth_is_stored_unclamped() {
        let mut sim = WaterSim::new();
        sim.set_depth(-0.25);
        assert_eq!(sim.depth(), -0.25);
        sim.set_depth(1.8);
        assert_eq!(sim.depth(), 1.8);
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn hundred_advances_accumulate_exactly() {
        let mut sim = WaterSim::new();
        for _ in 0..100 {
            sim.advance();
        }
        let mut expected = 0.0f32;
        for _ in 0..100 {
            expected += TIME_STEP;
        }
        assert_eq!(sim.time(), expected);
    }

    #[test]
    fn swell_state_is_reproducible_bit_for_bit() {
        let run = || {
            let mut sim = WaterSim::new();
            for _ in 0..250 {
                sim.advance();
            }
            (sim.swell_direction(), sim.swell_height())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn direction_and_height_both_move() {
        let mut sim = WaterSim::new();
        sim.advance();
        let (d0, h0) = (sim.swell_direction(), sim.swell_height());
        for _ in 0..2000 {
            sim.advance();
        }
        assert_ne!(sim.swell_direction(), d0);
        assert_ne!(sim.swell_height(), h0);
    }

    // ── snapshot ──────────────────────────────────────────────────────────

    #[test]
    fn uniforms_mirror_sim_state() {
        let mut sim = WaterSim::new();
        sim.set_depth(0.4);
        sim.set_probe_depth(0.2);
        sim.advance();

        let u = sim.uniforms();
        assert_eq!(u.depth, 0.4);
        assert_eq!(u.probe_depth, 0.2);
        assert_eq!(u.time, sim.time());
        assert_eq!(u.pressure, sim.pressure());
        assert_eq!(u.swell_direction, sim.swell_direction());
    }
}
