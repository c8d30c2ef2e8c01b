//! Backdrop builder and window host.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::{GpuError, RunError};
use crate::field::ParticleField;
use crate::gpu::{FrameBatch, GpuState};
use crate::input::Pointer;
use crate::random::SmallRngSource;
use crate::surface::Surface;
use crate::time::FrameClock;

/// A particle field backdrop window.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// Backdrop::new()
///     .with_config(FieldConfig::load("backdrop.json")?)
///     .with_title("Portfolio")
///     .run()?;
/// ```
pub struct Backdrop {
    config: FieldConfig,
    seed: Option<u64>,
    title: String,
    size: (u32, u32),
}

impl Backdrop {
    /// Create a backdrop with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            seed: None,
            title: "driftfield".into(),
            size: (1280, 720),
        }
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the particle generator for a reproducible field.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface in logical pixels for a physical window size.
fn logical_surface(size: PhysicalSize<u32>, scale_factor: f64) -> Surface {
    let logical = size.to_logical::<f64>(scale_factor);
    Surface::new(logical.width.round() as u32, logical.height.round() as u32)
}

struct App {
    settings: Backdrop,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: Option<ParticleField>,
    pointer: Pointer,
    clock: FrameClock,
    batch: FrameBatch,
    error: Option<RunError>,
}

impl App {
    fn new(settings: Backdrop) -> Self {
        let clock = FrameClock::new(settings.config.frame_rate);
        Self {
            settings,
            window: None,
            gpu: None,
            field: None,
            pointer: Pointer::new(),
            clock,
            batch: FrameBatch::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        tracing::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let (width, height) = self.settings.size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let surface = logical_surface(window.inner_size(), window.scale_factor());

        let gpu = pollster::block_on(GpuState::new(window.clone(), surface.size()))?;

        let rng = match self.settings.seed {
            Some(seed) => SmallRngSource::seeded(seed),
            None => SmallRngSource::from_entropy(),
        };
        let field = ParticleField::new(surface, self.settings.config.clone(), rng);
        tracing::info!(
            width = surface.width,
            height = surface.height,
            particles = field.len(),
            "backdrop started"
        );

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.field = Some(field);
        self.clock.restart(Instant::now());
        Ok(())
    }

    fn resize(&mut self, physical: PhysicalSize<u32>) {
        let Some(window) = &self.window else {
            return;
        };
        let surface = logical_surface(physical, window.scale_factor());
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(physical, surface.size());
        }
        if let Some(field) = &mut self.field {
            if field.surface() == surface {
                return;
            }
            field.resize(surface);
        }
        // Drop the in-flight frame so only one loop runs against the new set.
        self.clock.restart(Instant::now());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.clock.poll(Instant::now()).is_none() {
            return;
        }
        let (Some(field), Some(gpu)) = (&mut self.field, &mut self.gpu) else {
            return;
        };

        field.frame(self.pointer.position(), &mut self.batch);

        match gpu.present(&self.batch) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, GpuError::OutOfMemory.into());
            }
            Err(e) => tracing::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::CursorMoved { .. } | WindowEvent::CursorLeft { .. } => {
                if let Some(window) = &self.window {
                    self.pointer.handle_event(&event, window.scale_factor());
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(deadline)) = (&self.window, self.clock.next_deadline()) else {
            return;
        };
        if Instant::now() >= deadline {
            window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_surface() {
        assert_eq!(logical_surface(PhysicalSize::new(2560, 1440), 2.0), Surface::new(1280, 720));
        assert_eq!(logical_surface(PhysicalSize::new(1000, 501), 1.0), Surface::new(1000, 501));
        assert_eq!(logical_surface(PhysicalSize::new(0, 0), 1.5), Surface::new(0, 0));
    }

    #[test]
    fn test_builder() {
        let backdrop = Backdrop::new()
            .with_seed(7)
            .with_title("Portfolio")
            .with_size(800, 600);
        assert_eq!(backdrop.seed, Some(7));
        assert_eq!(backdrop.title, "Portfolio");
        assert_eq!(backdrop.size, (800, 600));
        assert_eq!(backdrop.config, FieldConfig::default());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let mut config = FieldConfig::default();
        config.link_radius = -1.0;
        let err = Backdrop::new().with_config(config).run().unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
    }
}
