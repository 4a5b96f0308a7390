//! The scene runner: one cube, one surface, one endless frame loop.

use glam::Vec3;
use rand::Rng;

use crate::error::RenderError;
use crate::material::Material;
use crate::render_loop::{FrameLoop, LoopControl};
use crate::renderer::{SceneRenderer, Surface};
use crate::scene::Scene;

/// Radians added to the cube's X and Y rotation every frame.
pub const ROTATION_STEP: f32 = 0.005;

/// Owns a [`Scene`] and the renderer bound to its surface.
///
/// Rotation advances by a fixed step per frame, so spin speed follows the
/// display's refresh rate rather than wall-clock time. Custom materials also
/// receive the frame timestamp as their `time` uniform.
///
/// # Example
///
/// ```ignore
/// let mut rng = rand::rng();
/// let runner = SceneRunner::new(WindowSurface::new(window), Material::flat(color), &mut rng)?;
/// let mut render_loop = RenderLoop::new("stock", runner);
/// render_loop.start(|| window.request_redraw());
/// ```
pub struct SceneRunner<R> {
    scene: Scene,
    renderer: R,
    frames: u64,
}

impl<R: SceneRenderer> SceneRunner<R> {
    /// Builds the scene for `surface` and binds a renderer to it.
    pub fn new<S, G>(surface: S, material: Material, rng: &mut G) -> Result<Self, RenderError>
    where
        S: Surface<Renderer = R>,
        G: Rng + ?Sized,
    {
        let (width, height) = surface.size();
        let scene = Scene::new(width, height, material, rng);
        let renderer = surface.create_renderer(&scene)?;

        log::info!(
            "{} runner ready at {}x{}",
            scene.mesh.material.label(),
            width,
            height
        );

        Ok(Self {
            scene,
            renderer,
            frames: 0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<R: SceneRenderer> FrameLoop for SceneRunner<R> {
    fn frame(&mut self, timestamp: f64) -> Result<LoopControl, RenderError> {
        self.scene.rotate_mesh(ROTATION_STEP);
        self.scene.mesh.material.set_time(timestamp);
        self.renderer.render(&self.scene)?;
        self.frames += 1;
        Ok(LoopControl::Continue)
    }
}

impl<R> std::fmt::Debug for SceneRunner<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rotation: Vec3 = self.scene.mesh.transform.rotation;
        f.debug_struct("SceneRunner")
            .field("material", &self.scene.mesh.material.label())
            .field("rotation", &rotation)
            .field("frames", &self.frames)
            .finish()
    }
}
