//! Graphics backend seam.
//!
//! Renderers talk to the GPU through [`GraphicsBackend`], a small set of
//! GL-shaped operations: buffers, vertex arrays, shader stages, linked
//! programs, viewport, clear, draw and buffer swap. Resources are named by
//! typed handles; the backend owns the actual GPU objects.
//!
//! Implementations:
//! - [`WgpuBackend`]: drives a window surface through wgpu.
//! - `recording::RecordingBackend` (tests only): records every call.

mod error;
mod handle;
mod types;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod recording;

use std::ops::Range;

use crate::coords::ViewportRect;
use crate::paint::Color;

pub use error::{GfxError, HandleKind, ShaderError};
pub use handle::{BufferId, ProgramId, ShaderId, VertexArrayId};
pub use types::{BufferUsage, PrimitiveTopology, ShaderStage, VertexAttribute, VertexLayout};
pub use wgpu_backend::{GpuResources, WgpuBackend};

pub(crate) use handle::HandleAllocator;

/// GPU operations used by renderers.
///
/// All calls happen on the event-loop thread. Handles returned by one backend
/// instance are meaningless to another.
pub trait GraphicsBackend {
    /// Allocates a vertex buffer initialized with `contents`.
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8], usage: BufferUsage)
        -> BufferId;

    /// Creates a vertex array that takes ownership of `buffer` and describes its layout.
    ///
    /// Deleting the vertex array releases the buffer as well.
    fn create_vertex_array(
        &mut self,
        buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<VertexArrayId, GfxError>;

    fn delete_vertex_array(&mut self, vao: VertexArrayId);

    /// Releases a buffer that was never handed to a vertex array.
    fn delete_buffer(&mut self, buffer: BufferId);

    /// Compiles one shader stage. A failed compile returns the diagnostic log.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str)
        -> Result<ShaderId, ShaderError>;

    fn delete_shader(&mut self, shader: ShaderId);

    /// Links a vertex and a fragment stage into a program.
    ///
    /// The stage objects stay alive until deleted; the program keeps what it needs.
    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId)
        -> Result<ProgramId, ShaderError>;

    fn delete_program(&mut self, program: ProgramId);

    /// Sets the rasterizer viewport in physical pixels.
    fn set_viewport(&mut self, rect: ViewportRect);

    /// Clears the color buffer of the current frame.
    fn clear(&mut self, color: Color);

    /// Draws `vertices` from `vao` with `program`.
    fn draw(
        &mut self,
        program: ProgramId,
        vao: VertexArrayId,
        topology: PrimitiveTopology,
        vertices: Range<u32>,
    ) -> Result<(), GfxError>;

    /// Presents the current frame.
    fn swap_buffers(&mut self) -> Result<(), GfxError>;
}
