//! Surface materials.
//!
//! [`Material`] is a tagged enum: a stock Phong material with a single color,
//! or a [`ShaderMaterial`] that pairs a caller-supplied vertex program with the
//! stock Phong fragment program and a free-form uniform map.
//!
//! # Uniform Merging
//!
//! Custom materials start from the Phong defaults and layer overrides on top,
//! later maps winning:
//!
//! ```
//! use phong_offset::{Color, UniformValue, material};
//!
//! let uniforms = material::merge_uniforms([
//!     material::phong_uniforms(),
//!     material::uniforms([("diffuse", UniformValue::Color(Color::from_hex(0x00ff00)))]),
//!     material::uniforms([("time", UniformValue::Float(0.0))]),
//! ]);
//! assert_eq!(uniforms.get("diffuse"), Some(&UniformValue::Color(Color::from_hex(0x00ff00))));
//! assert_eq!(uniforms.get("shininess"), Some(&UniformValue::Float(30.0)));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::color::Color;
use crate::shaders;

/// Uniform name → value, ordered by name.
pub type Uniforms = BTreeMap<String, UniformValue>;

/// A value that can be bound to a named material uniform.
///
/// Scalars are kept at `f64` so a scheduler timestamp stored as `time` reads
/// back unchanged; they are narrowed to `f32` only when packed for the GPU.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f64),
    Color(Color),
}

impl UniformValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            UniformValue::Float(v) => Some(*v),
            UniformValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            UniformValue::Color(c) => Some(*c),
            UniformValue::Float(_) => None,
        }
    }
}

/// Default uniforms of the Phong lighting model.
pub fn phong_uniforms() -> Uniforms {
    uniforms([
        ("diffuse", UniformValue::Color(Color::from_hex(0xeeeeee))),
        ("emissive", UniformValue::Color(Color::from_hex(0x000000))),
        ("specular", UniformValue::Color(Color::from_hex(0x111111))),
        ("shininess", UniformValue::Float(30.0)),
        ("opacity", UniformValue::Float(1.0)),
    ])
}

/// Builds a uniform map from name/value pairs.
pub fn uniforms<const N: usize>(entries: [(&str, UniformValue); N]) -> Uniforms {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Unions uniform maps; a name present in several maps takes the last value.
pub fn merge_uniforms(maps: impl IntoIterator<Item = Uniforms>) -> Uniforms {
    let mut merged = Uniforms::new();
    for map in maps {
        merged.extend(map);
    }
    merged
}

/// Stock Phong material with one diffuse color.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatMaterial {
    pub color: Color,
}

impl FlatMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// The full Phong uniform set with `diffuse` set to this material's color.
    pub fn uniforms(&self) -> Uniforms {
        merge_uniforms([
            phong_uniforms(),
            uniforms([("diffuse", UniformValue::Color(self.color))]),
        ])
    }
}

/// A Phong material with a custom vertex program.
///
/// The vertex source is WGSL appended after the shared Phong prelude; it must
/// define `@vertex fn vs`. Nothing is validated here. A broken program only
/// surfaces when the renderer builds its pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderMaterial {
    pub uniforms: Uniforms,
    pub vertex_shader: String,
    pub fragment_shader: Cow<'static, str>,
    /// Whether scene lights feed the program.
    pub lights: bool,
}

impl ShaderMaterial {
    /// Phong defaults with `diffuse = color` and `time = 0`, the given vertex
    /// program, and the stock Phong fragment program.
    pub fn phong(color: Color, vertex_shader: impl Into<String>) -> Self {
        let uniforms = merge_uniforms([
            phong_uniforms(),
            uniforms([("diffuse", UniformValue::Color(color))]),
            uniforms([("time", UniformValue::Float(0.0))]),
        ]);
        Self {
            uniforms,
            vertex_shader: vertex_shader.into(),
            fragment_shader: Cow::Borrowed(shaders::PHONG_FRAGMENT),
            lights: true,
        }
    }

    /// Overwrites an existing uniform or inserts a new one.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_string(), value);
    }
}

/// Either the stock Phong material or a custom shader material.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Flat(FlatMaterial),
    Custom(ShaderMaterial),
}

impl Material {
    pub fn flat(color: Color) -> Self {
        Material::Flat(FlatMaterial::new(color))
    }

    pub fn custom(color: Color, vertex_shader: impl Into<String>) -> Self {
        Material::Custom(ShaderMaterial::phong(color, vertex_shader))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Material::Custom(_))
    }

    /// Looks up a uniform exposed by this material.
    ///
    /// Flat materials expose only the Phong defaults; `time` exists solely on
    /// custom materials.
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        match self {
            Material::Flat(flat) => flat.uniforms().get(name).copied(),
            Material::Custom(custom) => custom.uniforms.get(name).copied(),
        }
    }

    /// Sets `time` on a custom material. Returns `false` for flat materials.
    pub fn set_time(&mut self, time: f64) -> bool {
        match self {
            Material::Custom(custom) => {
                custom.set_uniform("time", UniformValue::Float(time));
                true
            }
            Material::Flat(_) => false,
        }
    }

    /// WGSL source of the vertex stage.
    pub fn vertex_source(&self) -> &str {
        match self {
            Material::Flat(_) => shaders::PHONG_VERTEX,
            Material::Custom(custom) => &custom.vertex_shader,
        }
    }

    /// WGSL source of the fragment stage.
    pub fn fragment_source(&self) -> &str {
        match self {
            Material::Flat(_) => shaders::PHONG_FRAGMENT,
            Material::Custom(custom) => &custom.fragment_shader,
        }
    }

    pub fn uses_lights(&self) -> bool {
        match self {
            Material::Flat(_) => true,
            Material::Custom(custom) => custom.lights,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Material::Flat(_) => "flat",
            Material::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Color = Color::from_hex(0x00ff00);

    #[test]
    fn flat_material_has_no_time() {
        let material = Material::flat(GREEN);
        assert!(!material.is_custom());
        assert_eq!(material.uniform("time"), None);
        assert_eq!(material.uniform("diffuse"), Some(UniformValue::Color(GREEN)));
    }

    #[test]
    fn custom_material_merges_defaults_and_overrides() {
        let material = ShaderMaterial::phong(GREEN, "@vertex fn vs() {}");
        assert_eq!(material.uniforms.get("diffuse"), Some(&UniformValue::Color(GREEN)));
        assert_eq!(material.uniforms.get("time"), Some(&UniformValue::Float(0.0)));
        assert_eq!(material.uniforms.get("shininess"), Some(&UniformValue::Float(30.0)));
        assert_eq!(material.uniforms.get("opacity"), Some(&UniformValue::Float(1.0)));
        assert_eq!(material.uniforms.len(), phong_uniforms().len() + 1);
        assert!(material.lights);
        assert_eq!(material.fragment_shader, shaders::PHONG_FRAGMENT);
    }

    #[test]
    fn later_maps_win_on_merge() {
        let merged = merge_uniforms([
            uniforms([("a", UniformValue::Float(1.0)), ("b", UniformValue::Float(2.0))]),
            uniforms([("a", UniformValue::Float(3.0))]),
        ]);
        assert_eq!(merged.get("a"), Some(&UniformValue::Float(3.0)));
        assert_eq!(merged.get("b"), Some(&UniformValue::Float(2.0)));
    }

    #[test]
    fn set_time_only_touches_custom() {
        let mut flat = Material::flat(GREEN);
        assert!(!flat.set_time(16.0));
        assert_eq!(flat.uniform("time"), None);

        let mut custom = Material::custom(GREEN, "");
        assert!(custom.set_time(16.0));
        assert_eq!(custom.uniform("time"), Some(UniformValue::Float(16.0)));
    }

    #[test]
    fn time_keeps_full_timestamp_precision() {
        let mut custom = Material::custom(GREEN, "");
        custom.set_time(16.7);
        assert_eq!(custom.uniform("time").and_then(|v| v.as_float()), Some(16.7));
    }

    #[test]
    fn custom_detection_ignores_content() {
        // A custom material whose program happens to equal the stock one is still custom.
        let custom = Material::custom(GREEN, shaders::PHONG_VERTEX);
        assert!(custom.is_custom());
        assert_eq!(custom.vertex_source(), Material::flat(GREEN).vertex_source());
    }
}
