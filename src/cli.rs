// cli.rs - command-line flags for the demo binary
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::color::Color;
use crate::config::DemoConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "phong-offset")]
#[command(about = "Stock Phong cube next to a Phong cube with a custom offset vertex stage", long_about = None)]
pub struct Cli {
    /// Window width in pixels
    #[arg(long, default_value_t = 480)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 360)]
    pub height: u32,

    /// Cube color as RRGGBB hex
    #[arg(long, default_value = "00ff00", value_parser = Color::parse_hex)]
    pub color: Color,

    /// WGSL file replacing the built-in custom vertex stage
    #[arg(long = "vertex-shader")]
    pub vertex_shader: Option<PathBuf>,

    /// Seed for the per-vertex random offsets
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Resolves flags into a [`DemoConfig`], reading the vertex stage file if given.
    pub fn into_config(self) -> Result<DemoConfig> {
        let mut config = DemoConfig::new()
            .size(self.width, self.height)
            .color(self.color);

        if let Some(path) = &self.vertex_shader {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading vertex shader {}", path.display()))?;
            config = config.vertex_shader(source);
        }
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders;

    #[test]
    fn defaults_match_demo_config() {
        let config = Cli::parse_from(["phong-offset"]).into_config().unwrap();
        let defaults = DemoConfig::default();
        assert_eq!((config.width, config.height), (defaults.width, defaults.height));
        assert_eq!(config.color, defaults.color);
        assert_eq!(config.vertex_shader, shaders::OFFSET_VERTEX);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Cli::parse_from([
            "phong-offset",
            "--width",
            "300",
            "--height",
            "150",
            "--color",
            "#ff0000",
            "--seed",
            "42",
        ])
        .into_config()
        .unwrap();
        assert_eq!((config.width, config.height), (300, 150));
        assert_eq!(config.color, Color::from_hex(0xff0000));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(Cli::try_parse_from(["phong-offset", "--color", "green"]).is_err());
    }

    #[test]
    fn missing_vertex_shader_file_is_an_error() {
        let err = Cli::parse_from([
            "phong-offset",
            "--vertex-shader",
            "/definitely/not/here.wgsl",
        ])
        .into_config()
        .unwrap_err();
        assert!(err.to_string().contains("reading vertex shader"));
    }
}
