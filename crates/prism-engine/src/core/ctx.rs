use crate::gfx::GraphicsBackend;
use crate::time::FrameTime;

/// Per-frame context passed to [`App::on_render_frame`](super::App::on_render_frame).
pub struct FrameCtx<'a> {
    pub gfx: &'a mut dyn GraphicsBackend,
    pub time: FrameTime,
}

impl<'a> FrameCtx<'a> {
    #[inline]
    pub fn new(gfx: &'a mut dyn GraphicsBackend, time: FrameTime) -> Self {
        Self { gfx, time }
    }
}
