//! Vertex formats, transforms, and GPU-resident mesh buffers.
//!
//! - [`Vertex3d`] — position, normal and UV, shared by every program
//! - [`Transform`] — position, Euler rotation and scale of a scene mesh
//! - [`GpuMesh`] — vertex/index buffers plus an optional `offset` stream
//!
//! # Vertex Layout
//!
//! | Buffer slot | Attribute | Format    | Offset | Shader Location |
//! |-------------|-----------|-----------|--------|-----------------|
//! | 0           | position  | Float32x3 | 0      | 0               |
//! | 0           | normal    | Float32x3 | 12     | 1               |
//! | 0           | uv        | Float32x2 | 24     | 2               |
//! | 1           | offset    | Float32   | 0      | 3               |
//!
//! Slot 1 is only bound for the custom material.

use crate::geometry::Geometry;
use crate::gpu::GpuContext;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Name of the per-vertex scalar stream consumed by the custom vertex program.
pub const OFFSET_ATTRIBUTE: &str = "offset";

/// A vertex for 3D mesh rendering with position, normal, and texture coordinates.
///
/// Uses `#[repr(C)]` and derives [`bytemuck::Pod`] so vertex slices can be
/// uploaded without copying.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Model-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates in [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// Layout of vertex buffer slot 0.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    /// Layout of vertex buffer slot 1: one `f32` offset per vertex.
    pub const OFFSET_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<f32>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32,
        }],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Position, rotation, and scale of a mesh.
///
/// Rotation is stored as Euler angles in radians and applied in XYZ order,
/// so incrementing `rotation.x` and `rotation.y` every frame tumbles the mesh
/// the same way regardless of how long it has been spinning.
///
/// ```
/// use phong_offset::{Transform, Vec3};
///
/// let mut t = Transform::new();
/// t.rotate(Vec3::new(0.005, 0.005, 0.0));
/// assert_eq!(t.rotation, Vec3::new(0.005, 0.005, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (radians), XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates Euler angles onto the current rotation.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Scale → rotate → translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

/// GPU buffers for one [`Geometry`].
///
/// Meshes are immutable once uploaded. The `offset` stream, if the geometry
/// carries one, lives in its own buffer bound at vertex slot 1.
#[derive(Debug)]
pub struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) offset_buffer: Option<wgpu::Buffer>,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    pub fn new(gpu: &GpuContext, geometry: &Geometry) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let offset_buffer = geometry.attribute(OFFSET_ATTRIBUTE).map(|offsets| {
            debug_assert_eq!(
                offsets.count(),
                geometry.vertex_count(),
                "offset attribute must cover every vertex"
            );
            gpu.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Offset Buffer"),
                    contents: bytemuck::cast_slice(&offsets.data),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        log::debug!(
            "uploaded mesh: {} vertices, {} indices, offsets: {}",
            geometry.vertex_count(),
            geometry.indices.len(),
            offset_buffer.is_some()
        );

        Self {
            vertex_buffer,
            index_buffer,
            offset_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}
