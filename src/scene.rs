//! CPU-side scene state for one view.
//!
//! A [`Scene`] owns a perspective camera, an ambient light, a point light, and
//! exactly one mesh. It is built once and lives as long as its runner; only the
//! mesh rotation and the custom material's `time` uniform change afterwards.

use glam::Vec3;
use rand::Rng;

use crate::camera::PerspectiveCamera;
use crate::color::Color;
use crate::geometry::{BufferAttribute, Geometry};
use crate::light::{AmbientLight, PointLight};
use crate::material::Material;
use crate::mesh::{OFFSET_ATTRIBUTE, Transform};

/// Edge length of the cube in model units.
pub const CUBE_SIZE: f32 = 3.0;
/// Subdivisions along every cube axis.
pub const CUBE_SEGMENTS: u32 = 4;
/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;
/// Camera distance from the origin along +Z.
pub const CAMERA_Z: f32 = 5.0;

/// A geometry/material pair placed in the scene.
#[derive(Clone, Debug)]
pub struct SceneMesh {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

/// Camera, lights, and a single mesh.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub ambient: AmbientLight,
    pub point: PointLight,
    pub mesh: SceneMesh,
    width: u32,
    height: u32,
}

impl Scene {
    /// Builds the cube scene for a `width × height` surface.
    ///
    /// Custom materials get an `offset` attribute with one value per vertex
    /// drawn from `rng`. Zero-sized surfaces are not rejected; the camera
    /// aspect simply becomes non-finite.
    pub fn new<R: Rng + ?Sized>(width: u32, height: u32, material: Material, rng: &mut R) -> Self {
        let mut geometry = Geometry::cube(CUBE_SIZE, CUBE_SEGMENTS);

        if material.is_custom() {
            let offsets = vertex_offsets(geometry.vertex_count(), rng);
            geometry.set_attribute(OFFSET_ATTRIBUTE, BufferAttribute::new(offsets, 1));
        }

        let camera =
            PerspectiveCamera::for_surface(FOV_DEGREES, width, height, NEAR, FAR).at(0.0, 0.0, CAMERA_Z);

        log::debug!(
            "built {} scene {}x{}: {} vertices",
            material.label(),
            width,
            height,
            geometry.vertex_count()
        );

        Self {
            camera,
            ambient: AmbientLight::new(Color::WHITE, 0.2),
            point: PointLight::new(Color::WHITE, 1.0, 100.0).at(3.0, 3.0, 3.0),
            mesh: SceneMesh {
                geometry,
                material,
                transform: Transform::new(),
            },
            width,
            height,
        }
    }

    /// Pixel size the scene was built for.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Spins the mesh by `step` radians around X and Y.
    pub fn rotate_mesh(&mut self, step: f32) {
        self.mesh.transform.rotate(Vec3::new(step, step, 0.0));
    }
}

/// One independent uniform sample in [0, 1) per vertex.
pub fn vertex_offsets<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f32> {
    (0..count).map(|_| rng.random::<f32>()).collect()
}
