//! Phong mesh pass with depth testing.
//!
//! [`PhongPass`] owns the render pipeline for one material together with its
//! uniform buffers and a depth buffer sized to the surface.
//!
//! # Bind Groups
//!
//! - **Group 0** (frame): camera (binding 0), lights (binding 1)
//! - **Group 1** (object): model matrices (binding 0), material (binding 1)
//!
//! Camera and lights are static for a scene and written once at creation.
//! Model and material uniforms are rewritten every frame.
//!
//! # Shader Validation
//!
//! The program is assembled from the material's vertex and fragment sources
//! and compiled inside a validation error scope, so a broken custom program
//! comes back as [`RenderError::Shader`] instead of aborting the process.

use crate::error::RenderError;
use crate::gpu::GpuContext;
use crate::material::Material;
use crate::mesh::{GpuMesh, Vertex3d};
use crate::scene::Scene;
use crate::shaders;
use glam::Vec3;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const STOCK_VERTEX_BUFFERS: &[wgpu::VertexBufferLayout<'static>] = &[Vertex3d::LAYOUT];
const OFFSET_VERTEX_BUFFERS: &[wgpu::VertexBufferLayout<'static>] =
    &[Vertex3d::LAYOUT, Vertex3d::OFFSET_LAYOUT];

/// Camera uniforms (group 0, binding 0).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

/// Light uniforms (group 0, binding 1).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniforms {
    /// Ambient color premultiplied by intensity.
    pub ambient: [f32; 3],
    pub _pad: f32,
    pub point_position: [f32; 3],
    pub point_distance: f32,
    /// Point light color premultiplied by intensity.
    pub point_color: [f32; 3],
    pub point_decay: f32,
}

/// Per-object transform uniforms (group 1, binding 0).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal_matrix: [[f32; 4]; 4],
}

/// Phong material uniforms (group 1, binding 1).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    pub diffuse: [f32; 3],
    pub opacity: f32,
    pub emissive: [f32; 3],
    pub shininess: f32,
    pub specular: [f32; 3],
    /// Zero for materials without a `time` uniform.
    pub time: f32,
}

impl CameraUniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            position: scene.camera.position.to_array(),
            _pad: 0.0,
        }
    }
}

impl LightUniforms {
    /// Unlit materials see full white ambient and no point light.
    pub fn from_scene(scene: &Scene) -> Self {
        let (ambient, point_color) = if scene.mesh.material.uses_lights() {
            (scene.ambient.radiance(), scene.point.radiance())
        } else {
            (Vec3::ONE, Vec3::ZERO)
        };
        Self {
            ambient: ambient.to_array(),
            _pad: 0.0,
            point_position: scene.point.position.to_array(),
            point_distance: scene.point.distance,
            point_color: point_color.to_array(),
            point_decay: scene.point.decay,
        }
    }
}

impl ModelUniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        let model = scene.mesh.transform.matrix();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

impl MaterialUniforms {
    /// Packs the material's named uniforms; missing names read as zero.
    pub fn from_material(material: &Material) -> Self {
        let color = |name: &str| {
            material
                .uniform(name)
                .and_then(|v| v.as_color())
                .map(|c| c.to_rgb_array())
                .unwrap_or([0.0; 3])
        };
        let float = |name: &str| {
            material
                .uniform(name)
                .and_then(|v| v.as_float())
                .map(|v| v as f32)
                .unwrap_or(0.0)
        };
        Self {
            diffuse: color("diffuse"),
            opacity: float("opacity"),
            emissive: color("emissive"),
            shininess: float("shininess"),
            specular: color("specular"),
            time: float("time"),
        }
    }
}

/// Render pipeline and GPU state for one scene.
pub struct PhongPass {
    pipeline: wgpu::RenderPipeline,
    frame_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
}

impl PhongPass {
    pub fn new(gpu: &GpuContext, scene: &Scene) -> Result<Self, RenderError> {
        let device = &gpu.device;
        let material = &scene.mesh.material;

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        // Frame uniforms (group 0)
        let camera_buffer = uniform_buffer(gpu, "Camera Uniforms", &CameraUniforms::from_scene(scene));
        let light_buffer = uniform_buffer(gpu, "Light Uniforms", &LightUniforms::from_scene(scene));

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[uniform_entry(0), uniform_entry(1)],
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        // Object uniforms (group 1)
        let model_buffer = uniform_buffer(gpu, "Model Uniforms", &ModelUniforms::from_scene(scene));
        let material_buffer = uniform_buffer(
            gpu,
            "Material Uniforms",
            &MaterialUniforms::from_material(material),
        );

        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[uniform_entry(0), uniform_entry(1)],
            });

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: &object_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &object_bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = if material.is_custom() {
            OFFSET_VERTEX_BUFFERS
        } else {
            STOCK_VERTEX_BUFFERS
        };

        let source = shaders::assemble(material.vertex_source(), material.fragment_source());

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Phong Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(shaders::VERTEX_ENTRY),
                buffers: vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(shaders::FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
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
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::Shader(error.to_string()));
        }

        log::debug!("built {} Phong pipeline", material.label());

        Ok(Self {
            pipeline,
            frame_bind_group,
            model_buffer,
            material_buffer,
            object_bind_group,
            depth_view: create_depth_view(gpu),
        })
    }

    /// Uploads this frame's model and material uniforms.
    pub fn update(&self, gpu: &GpuContext, scene: &Scene) {
        gpu.queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::cast_slice(&[ModelUniforms::from_scene(scene)]),
        );
        gpu.queue.write_buffer(
            &self.material_buffer,
            0,
            bytemuck::cast_slice(&[MaterialUniforms::from_material(&scene.mesh.material)]),
        );
    }

    /// Clears `target` to black and draws `mesh`.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, mesh: &GpuMesh) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Phong Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        render_pass.set_bind_group(1, &self.object_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        if let Some(offsets) = &mesh.offset_buffer {
            render_pass.set_vertex_buffer(1, offsets.slice(..));
        }
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

fn uniform_buffer<T: bytemuck::Pod>(gpu: &GpuContext, label: &str, value: &T) -> wgpu::Buffer {
    use wgpu::util::DeviceExt;

    gpu.device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
}

fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: gpu.width(),
            height: gpu.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const GREEN: Color = Color::from_hex(0x00ff00);

    #[test]
    fn uniform_structs_match_wgsl_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 80);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 48);
        assert_eq!(std::mem::size_of::<ModelUniforms>(), 128);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 48);
    }

    #[test]
    fn material_uniforms_pack_phong_defaults() {
        let packed = MaterialUniforms::from_material(&Material::flat(GREEN));
        assert_eq!(packed.diffuse, [0.0, 1.0, 0.0]);
        assert_eq!(packed.opacity, 1.0);
        assert_eq!(packed.shininess, 30.0);
        assert_eq!(packed.emissive, [0.0; 3]);
        assert_eq!(packed.time, 0.0);
    }

    #[test]
    fn material_uniforms_carry_time() {
        let mut material = Material::custom(GREEN, shaders::OFFSET_VERTEX);
        material.set_time(1234.5);
        assert_eq!(MaterialUniforms::from_material(&material).time, 1234.5);
    }

    #[test]
    fn lights_are_premultiplied() {
        let scene = Scene::new(300, 150, Material::flat(GREEN), &mut StdRng::seed_from_u64(0));
        let lights = LightUniforms::from_scene(&scene);
        assert_eq!(lights.ambient, [0.2; 3]);
        assert_eq!(lights.point_color, [1.0; 3]);
        assert_eq!(lights.point_position, [3.0, 3.0, 3.0]);
        assert_eq!(lights.point_distance, 100.0);
    }

    #[test]
    fn unlit_custom_material_ignores_scene_lights() {
        let mut material = Material::custom(GREEN, shaders::OFFSET_VERTEX);
        if let Material::Custom(custom) = &mut material {
            custom.lights = false;
        }
        let scene = Scene::new(300, 150, material, &mut StdRng::seed_from_u64(0));
        let lights = LightUniforms::from_scene(&scene);
        assert_eq!(lights.ambient, [1.0; 3]);
        assert_eq!(lights.point_color, [0.0; 3]);
    }
}
