use crate::depth::DEPTH_FORMAT;
use crate::material::TerrainAtlas;
use crate::mesh::{self, ChunkMesh};
use crate::shader;
use crate::uniforms::CameraUniforms;

/// Which fragment-compositing strategy a draw uses. Both variants share
/// the vertex decode contract and are kept as separate pipelines; callers
/// pick per render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingVariant {
    /// Atlas texturing, AO attenuation, distance fog.
    Textured,
    /// Face-direction tint available, no fog. Debug aid.
    FaceDebug,
}

/// Owns both terrain pipelines, the camera uniform, and the bind group
/// layouts the caller needs to upload atlases and chunk meshes. Never
/// creates a device or surface; renders into any caller-provided
/// color/depth views. All GPU resources are created at init time.
pub struct TerrainRenderer {
    textured_pipeline: wgpu::RenderPipeline,
    face_debug_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    material_layout: wgpu::BindGroupLayout,
    chunk_offset_layout: wgpu::BindGroupLayout,
}

impl TerrainRenderer {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let terrain_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("terrain-shader"),
            source: wgpu::ShaderSource::Wgsl(shader::terrain_source().into()),
        });

        let face_debug_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("face-debug-shader"),
            source: wgpu::ShaderSource::Wgsl(shader::face_debug_source().into()),
        });

        // Group 0: camera. The fragment stage reads the camera position
        // for the fog term, so visibility spans both stages.
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        // Group 1: material (atlas texture + sampler + tile counts).
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material-bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        // Group 2: per-draw chunk origin.
        let chunk_offset_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("chunk-offset-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("terrain-pipeline-layout"),
            bind_group_layouts: &[&camera_layout, &material_layout, &chunk_offset_layout],
            push_constant_ranges: &[],
        });

        let textured_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &terrain_module,
            color_format,
            "terrain-pipeline",
        );
        let face_debug_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &face_debug_module,
            color_format,
            "face-debug-pipeline",
        );

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera-uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bg"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        log::info!("Terrain pipelines created ({color_format:?} target)");

        Self {
            textured_pipeline,
            face_debug_pipeline,
            camera_buffer,
            camera_bind_group,
            material_layout,
            chunk_offset_layout,
        }
    }

    /// Both variants share every piece of fixed state: clockwise front
    /// faces, back-face culling, depth-test Less, no blending.
    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        module: &wgpu::ShaderModule,
        color_format: wgpu::TextureFormat,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_main"),
                buffers: &[mesh::vertex_layout()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }

    /// Upload camera uniforms. Called once per frame by the host.
    pub fn update_camera(&self, queue: &wgpu::Queue, uniforms: CameraUniforms) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Layout for `TerrainAtlas::new`.
    pub fn material_layout(&self) -> &wgpu::BindGroupLayout {
        &self.material_layout
    }

    /// Layout for `ChunkMesh::new`.
    pub fn chunk_offset_layout(&self) -> &wgpu::BindGroupLayout {
        &self.chunk_offset_layout
    }

    /// Record draws for a set of chunk meshes with the chosen variant.
    /// The pass must carry a color attachment in the renderer's format and
    /// a DEPTH_FORMAT attachment.
    pub fn draw<'m>(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        variant: ShadingVariant,
        atlas: &TerrainAtlas,
        meshes: impl IntoIterator<Item = &'m ChunkMesh>,
    ) {
        let pipeline = match variant {
            ShadingVariant::Textured => &self.textured_pipeline,
            ShadingVariant::FaceDebug => &self.face_debug_pipeline,
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(1, atlas.bind_group(), &[]);

        for mesh in meshes {
            mesh.draw(pass);
        }
    }
}
