//! Owned wrappers around backend handles.
//!
//! Wrappers are move-only and released explicitly through the backend that
//! created them. Anything not released is freed with the backend's store when the
//! window goes away.

use crate::gfx::{
    BufferUsage, GfxError, GraphicsBackend, ProgramId, ShaderError, ShaderStage, VertexArrayId,
    VertexLayout,
};

/// Vertex array together with the buffer it reads from.
#[derive(Debug)]
#[must_use = "a vertex array must be released through its backend"]
pub struct VertexArray {
    id: VertexArrayId,
    vertex_count: u32,
}

impl VertexArray {
    /// Uploads `vertices` into a new buffer and describes it with `layout`.
    pub fn upload<G>(
        gfx: &mut G,
        label: &str,
        vertices: &[f32],
        layout: VertexLayout,
        usage: BufferUsage,
    ) -> Result<Self, GfxError>
    where
        G: GraphicsBackend + ?Sized,
    {
        layout.validate().map_err(GfxError::InvalidLayout)?;

        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let stride = layout.effective_stride();
        let vertex_count = (bytes.len() as u64 / stride) as u32;

        let buffer = gfx.create_vertex_buffer(label, bytes, usage);
        match gfx.create_vertex_array(buffer, &layout) {
            Ok(id) => Ok(Self { id, vertex_count }),
            Err(e) => {
                gfx.delete_buffer(buffer);
                Err(e)
            }
        }
    }

    #[inline]
    pub fn id(&self) -> VertexArrayId {
        self.id
    }

    /// Whole vertices contained in the buffer.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn release<G>(self, gfx: &mut G)
    where
        G: GraphicsBackend + ?Sized,
    {
        gfx.delete_vertex_array(self.id);
    }
}

/// Linked shader program.
#[derive(Debug)]
#[must_use = "a program must be released through its backend"]
pub struct Program {
    id: ProgramId,
}

impl Program {
    /// Compiles both stages, links them and deletes the stage objects.
    ///
    /// Stage objects are deleted on every path, including when the other stage or
    /// the link failed. Each failure is logged; the first one is returned.
    pub fn build<G>(gfx: &mut G, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError>
    where
        G: GraphicsBackend + ?Sized,
    {
        let vs = gfx.compile_shader(ShaderStage::Vertex, vertex_src);
        let fs = gfx.compile_shader(ShaderStage::Fragment, fragment_src);

        for e in [vs.as_ref().err(), fs.as_ref().err()].into_iter().flatten() {
            log::error!("{e}");
        }

        let linked = match (&vs, &fs) {
            (Ok(v), Ok(f)) => gfx.link_program(*v, *f).inspect_err(|e| log::error!("{e}")),
            (Err(e), _) | (_, Err(e)) => Err(e.clone()),
        };

        for shader in [vs.ok(), fs.ok()].into_iter().flatten() {
            gfx.delete_shader(shader);
        }

        linked.map(|id| Self { id })
    }

    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn release<G>(self, gfx: &mut G)
    where
        G: GraphicsBackend + ?Sized,
    {
        gfx.delete_program(self.id);
    }
}
