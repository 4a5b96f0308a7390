use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::{DemoConfig, ViewSpec};
use crate::error::RunError;
use crate::render_loop::RenderLoop;
use crate::renderer::{WindowRenderer, WindowSurface};
use crate::runner::SceneRunner;

/// Horizontal gap between the two windows, in logical pixels.
const WINDOW_GAP: u32 = 24;
const WINDOW_ORIGIN: (u32, u32) = (64, 96);

/// Open both views and render until a window is closed.
///
/// # Example
/// ```no_run
/// use phong_offset::{DemoConfig, run};
///
/// run(DemoConfig::new().size(640, 480)).unwrap();
/// ```
pub fn run(config: DemoConfig) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut driver = FrameDriver::new(config);
    event_loop.run_app(&mut driver)?;
    Ok(())
}

/// One window and the render loop drawing into it.
struct View {
    window: Arc<Window>,
    render_loop: RenderLoop<SceneRunner<WindowRenderer>>,
}

/// Owns the scheduling decision for every view.
///
/// Each window's `RedrawRequested` event is one frame for that window's runner.
/// Timestamps are milliseconds since the driver was created, shared by all
/// views so both see the same clock.
pub struct FrameDriver {
    config: DemoConfig,
    views: Vec<View>,
    started: bool,
    clock: Instant,
}

impl FrameDriver {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            views: Vec::new(),
            started: false,
            clock: Instant::now(),
        }
    }

    fn timestamp(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    fn rng_for(&self, index: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_os_rng(),
        }
    }

    fn open_view(&self, event_loop: &ActiveEventLoop, index: usize, spec: ViewSpec) -> Option<View> {
        let x = WINDOW_ORIGIN.0 + index as u32 * (self.config.width + WINDOW_GAP);
        let attrs = WindowAttributes::default()
            .with_title(spec.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height))
            .with_position(winit::dpi::LogicalPosition::new(x, WINDOW_ORIGIN.1))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("{}: failed to open window: {}", spec.title, e);
                return None;
            }
        };

        let mut rng = self.rng_for(index);
        let surface = WindowSurface::new(Arc::clone(&window));
        let runner = match SceneRunner::new(surface, spec.material, &mut rng) {
            Ok(runner) => runner,
            Err(e) => {
                log::error!("{}: failed to start: {}", spec.title, e);
                return None;
            }
        };

        let mut render_loop = RenderLoop::new(spec.title, runner);
        render_loop.start(|| window.request_redraw());
        Some(View {
            window,
            render_loop,
        })
    }
}

impl ApplicationHandler for FrameDriver {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        for (index, spec) in self.config.views().into_iter().enumerate() {
            if let Some(view) = self.open_view(event_loop, index, spec) {
                self.views.push(view);
            }
        }

        if self.views.is_empty() {
            log::error!("no view could be started, exiting");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let timestamp = self.timestamp();
                let Some(view) = self.views.iter_mut().find(|v| v.window.id() == id) else {
                    return;
                };
                let window = &view.window;
                view.render_loop
                    .tick(timestamp, || window.request_redraw());
            }
            _ => {}
        }
    }
}
