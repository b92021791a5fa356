use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::gfx::{GpuResources, WgpuBackend};
use crate::time::FrameClock;

use super::placement;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Center the window on the primary monitor when it opens.
    pub centered: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            centered: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until the window closes or the app asks to
    /// exit. Blocks the calling thread.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    /// Objects the app did not release are freed when the entry drops.
    resources: GpuResources,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<(WindowId, WindowEntry)>,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        if self.config.centered {
            if let Some(monitor) = event_loop.primary_monitor() {
                attrs = attrs.with_position(placement::centered_on(
                    &monitor,
                    self.config.initial_size,
                ));
            }
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            clock: FrameClock::new(),
            resources: GpuResources::new(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    /// Runs `on_unload` and destroys the window. Only the first call does anything.
    fn unload(&mut self) {
        let Some((id, mut entry)) = self.window.take() else {
            return;
        };

        let app = &mut self.app;
        entry.with_mut(|fields| {
            let mut gfx = WgpuBackend::new(&mut *fields.gpu, &mut *fields.resources);
            app.on_unload(&mut gfx);

            let leaked = fields.resources.live_objects();
            if leaked > 0 {
                log::debug!("releasing {leaked} GPU object(s) still alive at teardown");
            }
        });

        drop(entry);
        log::info!("window {id:?} closed");
    }

    /// Reconfigures the surface and forwards non-zero sizes to the app.
    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some((_, entry)) = self.window.as_mut() else {
            return;
        };

        let app = &mut self.app;
        entry.with_mut(|fields| {
            let previous = fields.gpu.size();
            if !fields.gpu.resize(size) {
                log::trace!("surface resize deferred ({}x{})", size.width, size.height);
                return;
            }
            if previous.width == 0 || previous.height == 0 {
                // Restored from minimized: don't report the hidden time as one frame.
                fields.clock.reset();
            }
            let mut gfx = WgpuBackend::new(&mut *fields.gpu, &mut *fields.resources);
            app.on_resize(&mut gfx, size);
            fields.window.request_redraw();
        });
    }

    fn redraw(&mut self) -> AppControl {
        let Some((_, entry)) = self.window.as_mut() else {
            return AppControl::Continue;
        };

        let app = &mut self.app;
        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            if app.on_update_frame(time) == AppControl::Exit {
                return AppControl::Exit;
            }

            let size = fields.gpu.size();
            if size.width == 0 || size.height == 0 {
                log::trace!("frame {} skipped: zero-sized surface", time.frame_index);
                return AppControl::Continue;
            }

            let mut gfx = WgpuBackend::new(&mut *fields.gpu, &mut *fields.resources);
            let mut ctx = FrameCtx::new(&mut gfx, time);
            app.on_render_frame(&mut ctx)
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        let mut entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.failure = Some(e);
                self.request_exit(event_loop);
                return;
            }
        };

        let app = &mut self.app;
        let id = entry.with_mut(|fields| {
            let size = fields.gpu.size();
            let mut gfx = WgpuBackend::new(&mut *fields.gpu, &mut *fields.resources);
            app.on_load(&mut gfx);
            app.on_resize(&mut gfx, size);

            fields.window.request_redraw();
            fields.window.id()
        });

        log::info!("window {id:?} loaded");
        self.window = Some((id, entry));
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some((_, entry)) = &self.window {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if !matches!(&self.window, Some((id, _)) if *id == window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.unload();
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self
                    .window
                    .as_ref()
                    .map(|(_, entry)| entry.borrow_window().inner_size());
                if let Some(size) = new_size {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    log::info!("app requested exit");
                    self.unload();
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unload();
    }
}
