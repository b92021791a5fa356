use winit::dpi::PhysicalSize;

use crate::coords::ViewportRect;
use crate::core::{App, AppControl, FrameCtx};
use crate::gfx::{
    BufferUsage, GfxError, GraphicsBackend, PrimitiveTopology, VertexAttribute, VertexLayout,
};
use crate::paint::Color;
use crate::shader::ShaderPaths;
use crate::time::FrameTime;

use super::resources::{Program, VertexArray};

/// Three `xyz` positions in clip space, counter-clockwise.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    0.0, 0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0,
];

pub const CLEAR_COLOR: Color = Color::rgba(0.6, 0.3, 1.0, 1.0);

enum State {
    Uninitialized,
    Loaded {
        vao: VertexArray,
        /// `None` when the shader pair failed to compile or link.
        program: Option<Program>,
    },
    Unloaded,
}

/// Draws a single flat-colored triangle.
///
/// `Uninitialized -> Loaded -> Unloaded`, and back to `Loaded` on re-initialize.
/// Frames are only drawn while loaded; outside that window `render_frame` does
/// nothing.
pub struct TriangleRenderer {
    shaders: ShaderPaths,
    state: State,
    size: PhysicalSize<u32>,
}

impl TriangleRenderer {
    pub fn new(shaders: ShaderPaths) -> Self {
        Self {
            shaders,
            state: State::Uninitialized,
            size: PhysicalSize::new(0, 0),
        }
    }

    /// Uploads the triangle and builds the shader program.
    ///
    /// A shader that fails to load, compile or link leaves the renderer loaded
    /// without a program: frames are cleared and presented but nothing is drawn.
    pub fn initialize<G>(&mut self, gfx: &mut G) -> Result<(), GfxError>
    where
        G: GraphicsBackend + ?Sized,
    {
        if self.is_loaded() {
            log::warn!("triangle renderer already initialized; ignoring");
            return Ok(());
        }

        let layout = VertexLayout::packed([VertexAttribute::float(0, 3)]);
        let vao = VertexArray::upload(
            gfx,
            "triangle vertices",
            &TRIANGLE_VERTICES,
            layout,
            BufferUsage::StaticDraw,
        )?;

        let loader = self.shaders.loader();
        let vertex_src = loader.load(&self.shaders.vertex);
        let fragment_src = loader.load(&self.shaders.fragment);

        let program = match Program::build(gfx, &vertex_src, &fragment_src) {
            Ok(p) => Some(p),
            Err(_) => {
                log::error!("triangle renderer has no shader program; frames will be blank");
                None
            }
        };

        log::info!(
            "triangle renderer loaded ({} vertices, program: {})",
            vao.vertex_count(),
            program.is_some()
        );
        self.state = State::Loaded { vao, program };
        Ok(())
    }

    /// Sets the viewport to cover `width` x `height` from the origin.
    pub fn resize<G>(&mut self, gfx: &mut G, width: u32, height: u32)
    where
        G: GraphicsBackend + ?Sized,
    {
        gfx.set_viewport(ViewportRect::full(width, height));
        self.size = PhysicalSize::new(width, height);
    }

    /// Clears, draws the triangle and presents.
    pub fn render_frame<G>(&mut self, gfx: &mut G) -> Result<(), GfxError>
    where
        G: GraphicsBackend + ?Sized,
    {
        let State::Loaded { vao, program } = &self.state else {
            log::debug!("render_frame outside the loaded state; skipped");
            return Ok(());
        };

        gfx.clear(CLEAR_COLOR);
        if let Some(program) = program {
            gfx.draw(
                program.id(),
                vao.id(),
                PrimitiveTopology::Triangles,
                0..vao.vertex_count(),
            )?;
        }
        gfx.swap_buffers()
    }

    /// Per-frame logic. The triangle is static.
    pub fn update_frame(&mut self, _time: FrameTime) {}

    /// Releases the vertex array and program. Calling it again is a no-op.
    pub fn shutdown<G>(&mut self, gfx: &mut G)
    where
        G: GraphicsBackend + ?Sized,
    {
        match std::mem::replace(&mut self.state, State::Unloaded) {
            State::Loaded { vao, program } => {
                vao.release(gfx);
                if let Some(program) = program {
                    program.release(gfx);
                }
                log::info!("triangle renderer unloaded");
            }
            previous => {
                log::debug!("shutdown with nothing loaded");
                self.state = previous;
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded { .. })
    }

    /// Whether a linked program is available for drawing.
    pub fn has_program(&self) -> bool {
        matches!(self.state, State::Loaded { program: Some(_), .. })
    }

    /// Last size passed to [`resize`](Self::resize).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
}

impl App for TriangleRenderer {
    fn on_load(&mut self, gfx: &mut dyn GraphicsBackend) {
        if let Err(e) = self.initialize(gfx) {
            log::error!("triangle renderer failed to initialize: {e}");
        }
    }

    fn on_resize(&mut self, gfx: &mut dyn GraphicsBackend, size: PhysicalSize<u32>) {
        self.resize(gfx, size.width, size.height);
    }

    fn on_update_frame(&mut self, time: FrameTime) -> AppControl {
        self.update_frame(time);
        AppControl::Continue
    }

    fn on_render_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        match self.render_frame(&mut *ctx.gfx) {
            Ok(()) => AppControl::Continue,
            Err(e @ GfxError::Surface(_)) => {
                log::error!("cannot present: {e}");
                AppControl::Exit
            }
            Err(e) => {
                log::error!("frame {} failed: {e}", ctx.time.frame_index);
                AppControl::Continue
            }
        }
    }

    fn on_unload(&mut self, gfx: &mut dyn GraphicsBackend) {
        self.shutdown(gfx);
    }
}
