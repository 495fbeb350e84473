use brume_core::AtlasLayout;
use wgpu::util::DeviceExt;

use crate::uniforms::AtlasUniforms;

/// The material binding group: atlas texture, nearest sampler, and the
/// row/column uniform. Immutable for the lifetime of a loaded atlas.
pub struct TerrainAtlas {
    layout: AtlasLayout,
    bind_group: wgpu::BindGroup,
}

impl TerrainAtlas {
    /// Upload an RGBA8 atlas image and derive the tile layout from the
    /// square tile edge length.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bind_group_layout: &wgpu::BindGroupLayout,
        pixels: &[u8],
        width: u32,
        height: u32,
        tile_size: u32,
    ) -> Self {
        let layout = AtlasLayout::from_texture_size(width, height, tile_size);
        log::info!(
            "Creating terrain atlas: {width}x{height}px, {} rows x {} columns",
            layout.rows,
            layout.columns
        );

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("terrain-atlas"),
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
            pixels,
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

        // Nearest filtering: atlas tiles are pixel art, bleeding between
        // tiles under linear filtering would show neighbor texels.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("terrain-atlas-sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain-atlas-uniforms"),
            contents: bytemuck::bytes_of(&AtlasUniforms::from(layout)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("terrain-atlas-bg"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Self { layout, bind_group }
    }

    pub fn layout(&self) -> AtlasLayout {
        self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
