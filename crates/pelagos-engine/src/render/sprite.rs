use std::path::Path;

use anyhow::{Context, Result};

/// Overlay sprite texture plus its sampler.
///
/// Loaded once at initialization. The texture itself must stay alive as
/// long as the view, hence the owning field.
pub struct SpriteTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Decodes an image file and uploads it as an RGBA8 texture.
///
/// Callers treat failure as best-effort: the overlay sprite is optional and
/// the water surface is the primary deliverable.
pub fn load_sprite(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> Result<SpriteTexture> {
    let img = image::open(path)
        .with_context(|| format!("failed to load sprite image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("pelagos overlay sprite"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &img,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("pelagos overlay sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    });

    Ok(SpriteTexture {
        _texture: texture,
        view,
        sampler,
    })
}
