use bytemuck::{Pod, Zeroable};

/// Per-frame uniform block shared by the water and overlay shaders.
///
/// Field order and widths are the wire contract with `water.wgsl` /
/// `overlay.wgsl`; the WGSL struct declares the same members at the same
/// offsets (`swell_direction` lands on the vec2 8-byte alignment boundary).
/// Uploaded verbatim with `Queue::write_buffer` every frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    /// Simulation clock; advances by a fixed step per frame.
    pub time: f32,

    /// Normalized depth last pushed by the controller. Unclamped.
    pub depth: f32,

    /// Wave propagation direction, recomputed each frame from the swell
    /// phase.
    pub swell_direction: [f32; 2],

    /// Base wave amplitude plus the slow breathing oscillation.
    pub swell_height: f32,

    /// Wave spatial frequency, externally tunable.
    pub swell_frequency: f32,

    /// Lighting angle in radians.
    pub sun_angle: f32,

    /// Probe/overlay depth, clamped to its floor before storage.
    pub probe_depth: f32,

    /// Derived from depth immediately before upload; never set directly.
    pub pressure: f32,

    /// Pads the 36-byte payload out to 48 bytes (16-byte uniform sizing).
    pub _pad: [f32; 3],
}

/// Transform block for the overlay sprite.
///
/// `rotation` is honored by the shader but currently pinned to 0 on the CPU
/// side: a seam for future motion, kept in the layout so the wire format
/// does not change when it animates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OverlayUniforms {
    /// Center position in normalized viewport coordinates (0..1, y down).
    pub position: [f32; 2],

    /// Half-extent of the sprite quad in NDC units.
    pub size: [f32; 2],

    /// Rotation in radians.
    pub rotation: f32,

    pub _pad: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    // ── water uniforms wire format ────────────────────────────────────────

    #[test]
    fn water_uniforms_field_offsets() {
        assert_eq!(offset_of!(WaterUniforms, time), 0);
        assert_eq!(offset_of!(WaterUniforms, depth), 4);
        assert_eq!(offset_of!(WaterUniforms, swell_direction), 8);
        assert_eq!(offset_of!(WaterUniforms, swell_height), 16);
        assert_eq!(offset_of!(WaterUniforms, swell_frequency), 20);
        assert_eq!(offset_of!(WaterUniforms, sun_angle), 24);
        assert_eq!(offset_of!(WaterUniforms, probe_depth), 28);
        assert_eq!(offset_of!(WaterUniforms, pressure), 32);
    }

    #[test]
    fn water_uniforms_size_is_uniform_aligned() {
        assert_eq!(size_of::<WaterUniforms>(), 48);
    }

    // ── overlay uniforms wire format ──────────────────────────────────────

    #[test]
    fn overlay_uniforms_field_offsets() {
        assert_eq!(offset_of!(OverlayUniforms, position), 0);
        assert_eq!(offset_of!(OverlayUniforms, size), 8);
        assert_eq!(offset_of!(OverlayUniforms, rotation), 16);
    }

    #[test]
    fn overlay_uniforms_size_is_uniform_aligned() {
        assert_eq!(size_of::<OverlayUniforms>(), 32);
    }
}
