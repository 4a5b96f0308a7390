use glam::{Mat4, Vec3};

/// A perspective camera looking down −Z.
///
/// The aspect ratio is fixed when the camera is built; nothing updates it
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32, // degrees, vertical
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Camera for a surface of `width × height` pixels.
    pub fn for_surface(fov_degrees: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        Self::new(fov_degrees, width as f32 / height as f32, near, far)
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
