use crate::color::Color;
use crate::material::Material;
use crate::shaders;

/// Title of the window showing the stock Phong cube.
pub const STOCK_VIEW_TITLE: &str = "Stock Phong";
/// Title of the window showing the custom vertex program.
pub const CUSTOM_VIEW_TITLE: &str = "Custom Phong Vertex";
/// Default cube color.
pub const CUBE_COLOR: Color = Color::from_hex(0x00ff00);

/// Configuration for the two views.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Inner size of each window in logical pixels.
    pub width: u32,
    pub height: u32,
    pub color: Color,
    /// WGSL vertex stage for the custom material.
    pub vertex_shader: String,
    /// Seed for the per-vertex offsets; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 360,
            color: CUBE_COLOR,
            vertex_shader: shaders::OFFSET_VERTEX.to_string(),
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn vertex_shader(mut self, source: impl Into<String>) -> Self {
        self.vertex_shader = source.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The two views, stock first.
    pub fn views(&self) -> [ViewSpec; 2] {
        [
            ViewSpec {
                title: STOCK_VIEW_TITLE,
                material: Material::flat(self.color),
            },
            ViewSpec {
                title: CUSTOM_VIEW_TITLE,
                material: Material::custom(self.color, self.vertex_shader.clone()),
            },
        ]
    }
}

/// A window to open and the material its cube uses.
#[derive(Clone, Debug)]
pub struct ViewSpec {
    pub title: &'static str,
    pub material: Material,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_views_are_stock_then_custom() {
        let [stock, custom] = DemoConfig::default().views();
        assert_eq!(stock.title, STOCK_VIEW_TITLE);
        assert!(!stock.material.is_custom());
        assert_eq!(custom.title, CUSTOM_VIEW_TITLE);
        assert!(custom.material.is_custom());
        assert_eq!(custom.material.vertex_source(), shaders::OFFSET_VERTEX);
    }

    #[test]
    fn builder_overrides_apply_to_both_views() {
        let red = Color::from_hex(0xff0000);
        let config = DemoConfig::new().size(300, 150).color(red).seed(9);
        assert_eq!((config.width, config.height), (300, 150));
        assert_eq!(config.seed, Some(9));
        for view in config.views() {
            assert_eq!(
                view.material.uniform("diffuse").and_then(|v| v.as_color()),
                Some(red)
            );
        }
    }
}
