use std::path::Path;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::sim::{OverlayUniforms, WaterUniforms};

use super::mesh::water_quad;
use super::pipeline::{DEPTH_FORMAT, PipelineSet};
use super::sprite::{SpriteTexture, load_sprite};

/// Fixed clear color: the deep blue behind everything the shader draws.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.5,
    a: 1.0,
};

/// Outcome of a [`OceanRenderer::render_frame`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// One composited frame was submitted for presentation.
    Presented,
    /// Transient condition (degenerate viewport, surface hiccup, released
    /// resources); the next tick retries implicitly.
    Skipped,
    /// The device is unusable (OOM); the host should exit.
    Fatal,
}

struct DepthTarget {
    view: wgpu::TextureView,
    size: PhysicalSize<u32>,
}

struct SpriteBinding {
    // Bind group references the texture view; keep the owner alive with it.
    _sprite: SpriteTexture,
    bind_group: wgpu::BindGroup,
}

/// Everything GPU-resident the renderer owns. Created exactly once, mutated
/// in place every frame (uniform uploads, depth-target rebuilds), dropped
/// exactly once by `release()`.
struct Resources {
    pipelines: PipelineSet,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    index_count: u32,
    water_ubo: wgpu::Buffer,
    overlay_ubo: wgpu::Buffer,
    water_bind_group: wgpu::BindGroup,
    sprite: Option<SpriteBinding>,
    depth: Option<DepthTarget>,
}

/// Owns the GPU-side ocean scene and draws it.
///
/// Per frame: upload both uniform blocks, one pass clearing color + depth,
/// an indexed draw for the water surface, a second indexed draw over the
/// same quad for the overlay sprite, submit, present.
pub struct OceanRenderer {
    resources: Option<Resources>,
}

impl OceanRenderer {
    /// Acquires all GPU resources up front.
    ///
    /// The sprite is best-effort: a missing or undecodable image logs a
    /// warning and the overlay draw is skipped for the process lifetime.
    /// Pipeline construction failure aborts via wgpu's validation handler.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        sprite_path: Option<&Path>,
    ) -> Self {
        let pipelines = PipelineSet::build(device, surface_format);

        let mesh = water_quad();
        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pelagos quad vbo"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pelagos quad ibo"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let water_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pelagos water ubo"),
            size: std::mem::size_of::<WaterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let overlay_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pelagos overlay ubo"),
            size: std::mem::size_of::<OverlayUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let water_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pelagos water bind group"),
            layout: &pipelines.water_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: water_ubo.as_entire_binding(),
            }],
        });

        let sprite = sprite_path.and_then(|path| match load_sprite(device, queue, path) {
            Ok(sprite) => {
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("pelagos overlay bind group"),
                    layout: &pipelines.overlay_bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: overlay_ubo.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: water_ubo.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::TextureView(&sprite.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: wgpu::BindingResource::Sampler(&sprite.sampler),
                        },
                    ],
                });
                Some(SpriteBinding {
                    _sprite: sprite,
                    bind_group,
                })
            }
            Err(e) => {
                log::warn!("overlay sprite unavailable, water renders without it: {e:#}");
                None
            }
        });

        Self {
            resources: Some(Resources {
                pipelines,
                quad_vbo,
                quad_ibo,
                index_count: mesh.indices.len() as u32,
                water_ubo,
                overlay_ubo,
                water_bind_group,
                sprite,
                depth: None,
            }),
        }
    }

    /// Renders and presents one frame.
    ///
    /// Skips (never fails) when the viewport is degenerate or the surface
    /// is transiently unavailable; the frame driver fires again next tick.
    pub fn render_frame(
        &mut self,
        gpu: &mut Gpu<'_>,
        water: &WaterUniforms,
        overlay: &OverlayUniforms,
    ) -> FrameStatus {
        let Some(res) = self.resources.as_mut() else {
            log::debug!("render_frame after release; ignoring");
            return FrameStatus::Skipped;
        };

        let size = gpu.size();
        let Some(extent) = depth_target_extent(size) else {
            log::debug!("zero-sized viewport; skipping frame");
            return FrameStatus::Skipped;
        };

        // Rebuild the depth target whenever the drawable bounds change. The
        // color format never does.
        if res.depth.as_ref().is_none_or(|d| d.size != size) {
            res.depth = Some(create_depth_target(gpu.device(), extent, size));
        }

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface out of memory; cannot continue");
                        FrameStatus::Fatal
                    }
                    _ => FrameStatus::Skipped,
                };
            }
        };

        // Pressure in `water` was rederived by the sim just before this
        // call; the upload is a verbatim memory copy of the block.
        gpu.queue()
            .write_buffer(&res.water_ubo, 0, bytemuck::bytes_of(water));
        gpu.queue()
            .write_buffer(&res.overlay_ubo, 0, bytemuck::bytes_of(overlay));

        {
            let depth_view = &res.depth.as_ref().expect("depth target built above").view;

            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pelagos ocean pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&res.pipelines.water);
            rpass.set_bind_group(0, &res.water_bind_group, &[]);
            rpass.set_vertex_buffer(0, res.quad_vbo.slice(..));
            rpass.set_index_buffer(res.quad_ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..res.index_count, 0, 0..1);

            if let Some(sprite) = &res.sprite {
                rpass.set_pipeline(&res.pipelines.overlay);
                rpass.set_bind_group(0, &sprite.bind_group, &[]);
                rpass.draw_indexed(0..res.index_count, 0, 0..1);
            }
        }

        gpu.submit(frame);
        FrameStatus::Presented
    }

    /// Releases every GPU handle. Idempotent: the second call is a no-op.
    pub fn release(&mut self) {
        if self.resources.take().is_some() {
            log::debug!("ocean renderer resources released");
        }
    }

    /// True until `release()` has run.
    pub fn is_live(&self) -> bool {
        self.resources.is_some()
    }
}

impl Drop for OceanRenderer {
    // Teardown is guaranteed when the host drops the renderer, whether or
    // not it called release() explicitly.
    fn drop(&mut self) {
        self.release();
    }
}

/// Maps a drawable size to a depth-texture extent.
///
/// A zero-sized viewport has no extent: the caller skips the frame instead
/// of erroring, since layout will deliver a real size momentarily.
fn depth_target_extent(size: PhysicalSize<u32>) -> Option<wgpu::Extent3d> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    Some(wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    })
}

fn create_depth_target(
    device: &wgpu::Device,
    extent: wgpu::Extent3d,
    size: PhysicalSize<u32>,
) -> DepthTarget {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("pelagos depth target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    DepthTarget {
        view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_viewport_has_no_depth_extent() {
        assert!(depth_target_extent(PhysicalSize::new(0, 480)).is_none());
    }

    #[test]
    fn zero_height_viewport_has_no_depth_extent() {
        assert!(depth_target_extent(PhysicalSize::new(640, 0)).is_none());
    }

    #[test]
    fn valid_viewport_maps_to_matching_extent() {
        let extent = depth_target_extent(PhysicalSize::new(640, 480)).unwrap();
        assert_eq!(extent.width, 640);
        assert_eq!(extent.height, 480);
        assert_eq!(extent.depth_or_array_layers, 1);
    }
}
