//! Drawing surfaces and the renderers bound to them.
//!
//! A [`Surface`] knows its pixel size and can produce a [`SceneRenderer`]
//! for a scene. The window-backed pair is [`WindowSurface`] /
//! [`WindowRenderer`]; anything else implementing the two traits (an
//! offscreen target, a test double) can drive a
//! [`SceneRunner`](crate::SceneRunner) the same way.

use std::sync::Arc;
use winit::window::Window;

use crate::error::RenderError;
use crate::gpu::GpuContext;
use crate::mesh::GpuMesh;
use crate::phong_pass::PhongPass;
use crate::scene::Scene;

/// Draws a [`Scene`] onto whatever it was bound to.
pub trait SceneRenderer {
    /// Resolution of the output, fixed when the renderer was created.
    fn output_size(&self) -> (u32, u32);

    /// Renders one frame.
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError>;
}

/// Something a scene can be rendered onto.
pub trait Surface {
    type Renderer: SceneRenderer;

    /// Current size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Binds a renderer to this surface at its current size.
    fn create_renderer(self, scene: &Scene) -> Result<Self::Renderer, RenderError>;
}

/// A winit window used as a drawing surface.
pub struct WindowSurface {
    window: Arc<Window>,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl Surface for WindowSurface {
    type Renderer = WindowRenderer;

    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn create_renderer(self, scene: &Scene) -> Result<WindowRenderer, RenderError> {
        let gpu = GpuContext::new(self.window)?;
        let pass = PhongPass::new(&gpu, scene)?;
        let mesh = GpuMesh::new(&gpu, &scene.mesh.geometry);
        Ok(WindowRenderer { gpu, pass, mesh })
    }
}

/// Renders a scene into a window's swapchain.
pub struct WindowRenderer {
    gpu: GpuContext,
    pass: PhongPass,
    mesh: GpuMesh,
}

impl SceneRenderer for WindowRenderer {
    fn output_size(&self) -> (u32, u32) {
        (self.gpu.width(), self.gpu.height())
    }

    fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                // Keep the initial resolution; the compositor scales it.
                log::warn!("surface outdated, reconfiguring and skipping frame");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.pass.update(&self.gpu, scene);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Phong Encoder"),
            });

        self.pass.draw(&mut encoder, &view, &self.mesh);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
