//! Headless GPU execution: device acquisition, offscreen rendering of one
//! scene, and pixel readback. Stands in for the host application the
//! shading core normally serves.

use brume_core::BrumeError;
use brume_render::pipeline::ShadingVariant;
use brume_render::{depth, ChunkMesh, TerrainAtlas, TerrainRenderer};

use crate::scenes::{self, Scene};

/// Color target format. Linear (not sRGB) so readback bytes match the
/// CPU-side shading math without a transfer function.
const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// A frame read back from the GPU, tightly packed RGBA8 rows.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * self.width + x) * 4) as usize;
        self.pixels[offset..offset + 4].try_into().unwrap()
    }
}

/// Surfaceless wgpu device shared by every scene render.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_name: String,
}

impl GpuContext {
    pub fn new() -> Result<Self, BrumeError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| BrumeError::AdapterNotFound("no suitable GPU adapter".into()))?;

        let adapter_name = adapter.get_info().name;
        log::info!("Harness adapter: {adapter_name}");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("harness-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .map_err(|e| BrumeError::DeviceRequestFailed(e.to_string()))?;

        Ok(Self {
            device,
            queue,
            adapter_name,
        })
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    /// Render one scene offscreen with the chosen variant and read the
    /// frame back.
    pub fn render_scene(
        &self,
        scene: &Scene,
        variant: ShadingVariant,
        width: u32,
        height: u32,
    ) -> Result<Frame, BrumeError> {
        log::info!(
            "Rendering '{}' ({:?}, {width}x{height}, {} chunks)",
            scene.name,
            variant,
            scene.chunks.len()
        );

        let renderer = TerrainRenderer::new(&self.device, COLOR_FORMAT);

        let atlas_width = scenes::ATLAS_COLUMNS * scenes::ATLAS_TILE_SIZE;
        let atlas_height = scenes::ATLAS_ROWS * scenes::ATLAS_TILE_SIZE;
        let atlas = TerrainAtlas::new(
            &self.device,
            &self.queue,
            renderer.material_layout(),
            &scenes::test_atlas_pixels(),
            atlas_width,
            atlas_height,
            scenes::ATLAS_TILE_SIZE,
        );

        let meshes: Vec<ChunkMesh> = scene
            .chunks
            .iter()
            .map(|chunk| {
                ChunkMesh::new(
                    &self.device,
                    renderer.chunk_offset_layout(),
                    chunk.origin,
                    &chunk.vertices,
                    &chunk.indices,
                )
            })
            .collect();

        let aspect = width as f32 / height as f32;
        renderer.update_camera(&self.queue, scene.camera.uniforms(aspect));

        let color_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("harness-color"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (_depth_texture, depth_view) = depth::create_depth_texture(&self.device, width, height);

        // Readback rows must be 256-byte aligned
        let unpadded_bytes_per_row = 4 * width;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(256) * 256;
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("harness-readback"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("harness-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("harness-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Clear to the fog color so fully fogged fragments
                        // blend into the background seamlessly
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            renderer.draw(&mut pass, variant, &atlas, meshes.iter());
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &color_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|e| BrumeError::ReadbackFailed(e.to_string()))?
            .map_err(|e| BrumeError::ReadbackFailed(e.to_string()))?;

        let mapped = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        for row in 0..height {
            let start = (row * padded_bytes_per_row) as usize;
            pixels.extend_from_slice(&mapped[start..start + unpadded_bytes_per_row as usize]);
        }
        drop(mapped);
        staging.unmap();

        Ok(Frame {
            width,
            height,
            pixels,
        })
    }
}

#[cfg(all(test, feature = "gpu_tests"))]
mod gpu_tests {
    use super::*;
    use crate::checks;
    use crate::scenes::standard_scenes;

    #[test]
    fn test_standard_scenes_pass_on_device() {
        let context = GpuContext::new().expect("adapter required for gpu_tests");
        for scene in standard_scenes() {
            let frame = context
                .render_scene(&scene, ShadingVariant::Textured, 256, 256)
                .expect("render failed");
            for outcome in checks::evaluate(&scene, &frame, ShadingVariant::Textured) {
                assert!(outcome.passed, "{}: {}", outcome.name, outcome.detail);
            }
        }
    }

    #[test]
    fn test_debug_variant_skips_fog_on_device() {
        let context = GpuContext::new().expect("adapter required for gpu_tests");
        let scene = crate::scenes::scene_by_name("fog-march").unwrap();
        let frame = context
            .render_scene(&scene, ShadingVariant::FaceDebug, 256, 256)
            .expect("render failed");
        for outcome in checks::evaluate(&scene, &frame, ShadingVariant::FaceDebug) {
            assert!(outcome.passed, "{}: {}", outcome.name, outcome.detail);
        }
    }
}
