use std::num::NonZeroU64;

use crate::sim::{OverlayUniforms, WaterUniforms};

use super::mesh::WaterVertex;

/// Depth-test target format, shared by both pipelines and the depth texture.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Both render pipelines plus the bind group layouts the renderer needs to
/// wire buffers and the sprite texture to them.
///
/// Immutable after construction. Shader-module or pipeline validation
/// failure surfaces through wgpu's uncaptured-error handler and aborts:
/// a broken shader is a packaging defect, not a runtime condition.
pub struct PipelineSet {
    pub water: wgpu::RenderPipeline,
    pub overlay: wgpu::RenderPipeline,
    pub water_bgl: wgpu::BindGroupLayout,
    pub overlay_bgl: wgpu::BindGroupLayout,
}

impl PipelineSet {
    pub fn build(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pelagos water shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/water.wgsl").into()),
        });
        let overlay_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pelagos overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let water_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pelagos water bgl"),
            entries: &[uniform_entry::<WaterUniforms>(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });

        let overlay_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pelagos overlay bgl"),
            entries: &[
                uniform_entry::<OverlayUniforms>(0, wgpu::ShaderStages::VERTEX),
                uniform_entry::<WaterUniforms>(1, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let water = build_pipeline(
            device,
            "pelagos water pipeline",
            &water_shader,
            &water_bgl,
            surface_format,
        );
        let overlay = build_pipeline(
            device,
            "pelagos overlay pipeline",
            &overlay_shader,
            &overlay_bgl,
            surface_format,
        );

        Self {
            water,
            overlay,
            water_bgl,
            overlay_bgl,
        }
    }
}

fn uniform_entry<T>(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    bgl: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bgl],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[WaterVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(source_over_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(depth_test_state()),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

/// Straight-alpha source-over: `src * srcAlpha + dst * (1 - srcAlpha)` for
/// both color and alpha channels. The sprite decodes as straight alpha, so
/// the premultiplied variant would double-darken its edges.
pub(crate) fn source_over_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Less-or-equal compare with depth writes on. Both quads sit at z = 0, so
/// the overlay's second draw passes the test and composites over the water.
pub(crate) fn depth_test_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_is_source_over_on_both_channels() {
        let blend = source_over_blend();
        for comp in [blend.color, blend.alpha] {
            assert_eq!(comp.src_factor, wgpu::BlendFactor::SrcAlpha);
            assert_eq!(comp.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
            assert_eq!(comp.operation, wgpu::BlendOperation::Add);
        }
    }

    #[test]
    fn depth_test_is_less_equal_with_writes() {
        let ds = depth_test_state();
        assert_eq!(ds.format, DEPTH_FORMAT);
        assert_eq!(ds.depth_compare, wgpu::CompareFunction::LessEqual);
        assert!(ds.depth_write_enabled);
    }

    #[test]
    fn vertex_layout_is_one_tightly_packed_position() {
        let layout = WaterVertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[0].offset, 0);
    }
}
