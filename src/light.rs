//! Scene lights.

use crate::color::Color;
use glam::Vec3;

/// Uniform light applied to every surface regardless of orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color premultiplied by intensity.
    pub fn radiance(&self) -> Vec3 {
        Vec3::from(self.color.to_rgb_array()) * self.intensity
    }
}

/// Omnidirectional light with a finite falloff radius.
///
/// `distance == 0` means no cutoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            decay: 1.0,
            position: Vec3::ZERO,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn radiance(&self) -> Vec3 {
        Vec3::from(self.color.to_rgb_array()) * self.intensity
    }

    /// Distance attenuation, mirrored by `attenuation` in the Phong prelude.
    pub fn attenuation(&self, light_distance: f32) -> f32 {
        if self.distance > 0.0 {
            (1.0 - light_distance / self.distance)
                .clamp(0.0, 1.0)
                .powf(self.decay)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_falls_off_to_zero_at_radius() {
        let light = PointLight::new(Color::WHITE, 1.0, 100.0);
        assert_eq!(light.attenuation(0.0), 1.0);
        assert!((light.attenuation(50.0) - 0.5).abs() < 1e-6);
        assert_eq!(light.attenuation(100.0), 0.0);
        assert_eq!(light.attenuation(250.0), 0.0);
    }

    #[test]
    fn zero_distance_disables_cutoff() {
        let light = PointLight::new(Color::WHITE, 1.0, 0.0);
        assert_eq!(light.attenuation(1e6), 1.0);
    }

    #[test]
    fn ambient_radiance_scales_color() {
        let ambient = AmbientLight::new(Color::WHITE, 0.2);
        assert!(ambient.radiance().abs_diff_eq(Vec3::splat(0.2), 1e-6));
    }
}
