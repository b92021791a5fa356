use winit::dpi::PhysicalSize;

use crate::gfx::GraphicsBackend;
use crate::time::FrameTime;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Lifecycle callbacks driven by [`Runtime`](crate::window::Runtime).
///
/// Order for one window: `on_load` once, then any mix of `on_resize` and
/// `on_update_frame` + `on_render_frame` pairs, then `on_unload` once. All calls
/// happen on the event-loop thread.
pub trait App {
    /// GPU context is ready; create resources.
    fn on_load(&mut self, gfx: &mut dyn GraphicsBackend);

    /// Drawable size changed. Never called with a zero dimension.
    fn on_resize(&mut self, gfx: &mut dyn GraphicsBackend, size: PhysicalSize<u32>) {
        let _ = (gfx, size);
    }

    /// Per-tick logic, run right before each render.
    fn on_update_frame(&mut self, time: FrameTime) -> AppControl {
        let _ = time;
        AppControl::Continue
    }

    /// Draw and present one frame.
    fn on_render_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Window is going away; release resources. Last call on `gfx`.
    fn on_unload(&mut self, gfx: &mut dyn GraphicsBackend) {
        let _ = gfx;
    }
}
