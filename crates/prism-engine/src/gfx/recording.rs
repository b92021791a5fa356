//! Backend that records calls instead of talking to a GPU.
//!
//! Compile fails for blank source and link fails for mismatched stages, which is
//! enough to drive renderer state machines in tests.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::coords::ViewportRect;
use crate::paint::Color;

use super::{
    BufferId, BufferUsage, GfxError, GraphicsBackend, HandleAllocator, HandleKind,
    PrimitiveTopology, ProgramId, ShaderError, ShaderId, ShaderStage, VertexArrayId,
    VertexLayout,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateVertexBuffer {
        id: BufferId,
        contents: Vec<u8>,
        usage: BufferUsage,
    },
    CreateVertexArray {
        id: VertexArrayId,
        buffer: BufferId,
        layout: VertexLayout,
    },
    DeleteVertexArray(VertexArrayId),
    DeleteBuffer(BufferId),
    CompileShader {
        stage: ShaderStage,
        source: String,
    },
    DeleteShader(ShaderId),
    LinkProgram {
        vertex: ShaderId,
        fragment: ShaderId,
    },
    DeleteProgram(ProgramId),
    SetViewport(ViewportRect),
    Clear(Color),
    Draw {
        program: ProgramId,
        vao: VertexArrayId,
        topology: PrimitiveTopology,
        vertices: Range<u32>,
    },
    SwapBuffers,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    handles: HandleAllocator,
    pub(crate) calls: Vec<Call>,
    buffers: HashMap<BufferId, Vec<u8>>,
    vertex_arrays: HashMap<VertexArrayId, Vec<u8>>,
    shaders: HashMap<ShaderId, ShaderStage>,
    programs: HashSet<ProgramId>,
    /// Returned by the next `create_vertex_array` before it touches the buffer.
    pub(crate) fail_vertex_array: Option<GfxError>,
    /// Returned by the next `swap_buffers` instead of presenting.
    pub(crate) fail_swap: Option<GfxError>,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn draws(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Draw { .. }))
            .collect()
    }

    pub(crate) fn live_vertex_arrays(&self) -> usize {
        self.vertex_arrays.len()
    }

    pub(crate) fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub(crate) fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    pub(crate) fn is_live_program(&self, program: ProgramId) -> bool {
        self.programs.contains(&program)
    }

    pub(crate) fn is_live_vertex_array(&self, vao: VertexArrayId) -> bool {
        self.vertex_arrays.contains_key(&vao)
    }

    /// Buffer contents behind `vao`, decoded as native-endian `f32`s.
    pub(crate) fn vertex_floats(&self, vao: VertexArrayId) -> Option<Vec<f32>> {
        self.vertex_arrays.get(&vao).map(|bytes| {
            bytes
                .chunks_exact(4)
                .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        })
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_vertex_buffer(
        &mut self,
        _label: &str,
        contents: &[u8],
        usage: BufferUsage,
    ) -> BufferId {
        let id = BufferId::from_raw(self.handles.allocate());
        self.buffers.insert(id, contents.to_vec());
        self.calls.push(Call::CreateVertexBuffer {
            id,
            contents: contents.to_vec(),
            usage,
        });
        id
    }

    fn create_vertex_array(
        &mut self,
        buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<VertexArrayId, GfxError> {
        if let Some(err) = self.fail_vertex_array.take() {
            return Err(err);
        }
        layout.validate().map_err(GfxError::InvalidLayout)?;
        let contents = self
            .buffers
            .remove(&buffer)
            .ok_or_else(|| GfxError::unknown(HandleKind::Buffer, buffer.raw()))?;
        let id = VertexArrayId::from_raw(self.handles.allocate());
        self.vertex_arrays.insert(id, contents);
        self.calls.push(Call::CreateVertexArray {
            id,
            buffer,
            layout: layout.clone(),
        });
        Ok(id)
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayId) {
        self.vertex_arrays.remove(&vao);
        self.calls.push(Call::DeleteVertexArray(vao));
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
        self.calls.push(Call::DeleteBuffer(buffer));
    }

    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderId, ShaderError> {
        self.calls.push(Call::CompileShader {
            stage,
            source: source.to_string(),
        });
        if source.trim().is_empty() {
            return Err(ShaderError::Compile {
                stage,
                log: "empty shader source".to_string(),
            });
        }
        let id = ShaderId::from_raw(self.handles.allocate());
        self.shaders.insert(id, stage);
        Ok(id)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.shaders.remove(&shader);
        self.calls.push(Call::DeleteShader(shader));
    }

    fn link_program(
        &mut self,
        vertex: ShaderId,
        fragment: ShaderId,
    ) -> Result<ProgramId, ShaderError> {
        self.calls.push(Call::LinkProgram { vertex, fragment });
        match (self.shaders.get(&vertex), self.shaders.get(&fragment)) {
            (Some(ShaderStage::Vertex), Some(ShaderStage::Fragment)) => {
                let id = ProgramId::from_raw(self.handles.allocate());
                self.programs.insert(id);
                Ok(id)
            }
            _ => Err(ShaderError::Link {
                log: "stages missing or mismatched".to_string(),
            }),
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program);
        self.calls.push(Call::DeleteProgram(program));
    }

    fn set_viewport(&mut self, rect: ViewportRect) {
        self.calls.push(Call::SetViewport(rect));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn draw(
        &mut self,
        program: ProgramId,
        vao: VertexArrayId,
        topology: PrimitiveTopology,
        vertices: Range<u32>,
    ) -> Result<(), GfxError> {
        if !self.programs.contains(&program) {
            return Err(GfxError::unknown(HandleKind::Program, program.raw()));
        }
        if !self.vertex_arrays.contains_key(&vao) {
            return Err(GfxError::unknown(HandleKind::VertexArray, vao.raw()));
        }
        self.calls.push(Call::Draw {
            program,
            vao,
            topology,
            vertices,
        });
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), GfxError> {
        if let Some(err) = self.fail_swap.take() {
            return Err(err);
        }
        self.calls.push(Call::SwapBuffers);
        Ok(())
    }
}
