//! Error types for GPU setup, rendering, and the application driver.

use thiserror::Error;

/// Failures while bringing up wgpu for a window.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported {0}")]
    Unsupported(&'static str),
}

/// Failures while building pipelines or drawing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    /// WGSL validation failed for the assembled shader program.
    #[error("shader program rejected: {0}")]
    Shader(String),
}

/// Failures of the windowing event loop.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid hex color '{0}'")]
    InvalidColor(String),
}
