//! # Phong Offset
//!
//! Two rotating cubes, side by side, in two windows. The left cube uses the
//! stock Phong material. The right one uses a Phong material whose vertex
//! stage has been swapped for a custom program that pushes every vertex along
//! its normal by a per-vertex random `offset`, animated by a `time` uniform.
//!
//! ## Quick Start
//!
//! ```no_run
//! use phong_offset::{Color, DemoConfig, run};
//!
//! fn main() {
//!     env_logger::init();
//!     run(DemoConfig::new().color(Color::from_hex(0x00ff00))).unwrap();
//! }
//! ```
//!
//! ## Custom Vertex Stages
//!
//! A custom stage is WGSL appended to the shared Phong prelude. It must define
//! `@vertex fn vs` and usually finishes with `phong_vertex_output`:
//!
//! ```wgsl
//! struct OffsetVertexInput {
//!     @location(0) position: vec3<f32>,
//!     @location(1) normal: vec3<f32>,
//!     @location(2) uv: vec2<f32>,
//!     @location(3) offset: f32,
//! };
//!
//! @vertex
//! fn vs(in: OffsetVertexInput) -> VertexOutput {
//!     let lift = in.offset * (0.5 + 0.5 * sin(material.time * 0.002));
//!     return phong_vertex_output(in.position + in.normal * lift, in.normal, in.uv);
//! }
//! ```
//!
//! ## Driving Frames Yourself
//!
//! [`SceneRunner`] implements [`FrameLoop`]; wrap it in a [`RenderLoop`] and
//! call [`RenderLoop::tick`] from whatever fires once per display refresh.

mod app;
mod camera;
mod cli;
mod color;
mod config;
mod error;
mod geometry;
mod gpu;
mod light;
pub mod material;
mod mesh;
mod phong_pass;
mod render_loop;
mod renderer;
mod runner;
mod scene;
pub mod shaders;

pub use app::{FrameDriver, run};
pub use camera::PerspectiveCamera;
pub use cli::Cli;
pub use color::Color;
pub use config::{CUBE_COLOR, CUSTOM_VIEW_TITLE, DemoConfig, STOCK_VIEW_TITLE, ViewSpec};
pub use error::{ConfigError, GpuError, RenderError, RunError};
pub use geometry::{BufferAttribute, Geometry};
pub use gpu::GpuContext;
pub use light::{AmbientLight, PointLight};
pub use material::{FlatMaterial, Material, ShaderMaterial, UniformValue, Uniforms};
pub use mesh::{GpuMesh, OFFSET_ATTRIBUTE, Transform, Vertex3d};
pub use phong_pass::{CameraUniforms, LightUniforms, MaterialUniforms, ModelUniforms, PhongPass};
pub use render_loop::{FrameLoop, LoopControl, LoopState, RenderLoop};
pub use renderer::{SceneRenderer, Surface, WindowRenderer, WindowSurface};
pub use runner::{ROTATION_STEP, SceneRunner};
pub use scene::{Scene, SceneMesh, vertex_offsets};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec3};
