use std::collections::HashMap;
use std::ops::Range;

use crate::coords::ViewportRect;
use crate::gfx::{
    BufferId, GfxError, HandleAllocator, HandleKind, PrimitiveTopology, ProgramId, ShaderId,
    VertexArrayId, VertexLayout,
};
use crate::paint::Color;

use super::validate::CheckedStage;

/// GPU objects created through a [`WgpuBackend`](super::WgpuBackend), by handle.
///
/// One store lives per window, next to its [`Gpu`](crate::device::Gpu). Dropping
/// the store releases every object still in it, so teardown never leaks even if a
/// renderer skipped its own cleanup.
#[derive(Default)]
pub struct GpuResources {
    pub(super) handles: HandleAllocator,
    pub(super) buffers: HashMap<BufferId, wgpu::Buffer>,
    pub(super) vertex_arrays: HashMap<VertexArrayId, VertexArrayEntry>,
    pub(super) shaders: HashMap<ShaderId, ShaderEntry>,
    pub(super) programs: HashMap<ProgramId, ProgramEntry>,
    pub(super) viewport: Option<ViewportRect>,
    pub(super) frame: FrameCommands,
}

impl GpuResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live buffers, vertex arrays, shaders and programs.
    pub fn live_objects(&self) -> usize {
        self.buffers.len() + self.vertex_arrays.len() + self.shaders.len() + self.programs.len()
    }

    pub(super) fn program(&self, id: ProgramId) -> Result<&ProgramEntry, GfxError> {
        self.programs
            .get(&id)
            .ok_or_else(|| GfxError::unknown(HandleKind::Program, id.raw()))
    }

    pub(super) fn vertex_array(&self, id: VertexArrayId) -> Result<&VertexArrayEntry, GfxError> {
        self.vertex_arrays
            .get(&id)
            .ok_or_else(|| GfxError::unknown(HandleKind::VertexArray, id.raw()))
    }

    /// Builds the render pipeline for `cmd` unless one is cached.
    pub(super) fn ensure_pipeline(
        &mut self,
        device: &wgpu::Device,
        cmd: &DrawCommand,
        format: wgpu::TextureFormat,
    ) -> Result<(), GfxError> {
        let layout = self.vertex_array(cmd.vao)?.layout.clone();
        let program = self
            .programs
            .get_mut(&cmd.program)
            .ok_or_else(|| GfxError::unknown(HandleKind::Program, cmd.program.raw()))?;

        let key = PipelineKey {
            layout,
            topology: cmd.topology,
            format,
        };
        if program.pipelines.contains_key(&key) {
            return Ok(());
        }

        log::debug!(
            "building pipeline for {} ({:?}, {:?})",
            cmd.program,
            cmd.topology,
            format
        );
        let pipeline = program.build_pipeline(device, &key);
        program.pipelines.insert(key, pipeline);
        Ok(())
    }

    /// Pipeline and vertex buffer for `cmd`, if both are still alive.
    pub(super) fn draw_target(
        &self,
        cmd: &DrawCommand,
        format: wgpu::TextureFormat,
    ) -> Option<(&wgpu::RenderPipeline, &wgpu::Buffer)> {
        let vao = self.vertex_arrays.get(&cmd.vao)?;
        let program = self.programs.get(&cmd.program)?;
        let key = PipelineKey {
            layout: vao.layout.clone(),
            topology: cmd.topology,
            format,
        };
        program.pipelines.get(&key).map(|p| (p, &vao.buffer))
    }
}

pub(super) struct VertexArrayEntry {
    pub buffer: wgpu::Buffer,
    pub layout: VertexLayout,
}

pub(super) struct ShaderEntry {
    pub checked: CheckedStage,
    pub module: wgpu::ShaderModule,
}

pub(super) struct ProgramStage {
    pub module: wgpu::ShaderModule,
    pub entry_point: String,
}

/// A linked program.
///
/// wgpu bakes vertex layout, topology and target format into the pipeline, so the
/// program keeps its stages and builds one pipeline per combination it is drawn with.
pub(super) struct ProgramEntry {
    pub vertex: ProgramStage,
    pub fragment: ProgramStage,
    /// Locations the vertex stage reads; a vertex array must supply all of them.
    pub vertex_inputs: Vec<u32>,
    pub layout: wgpu::PipelineLayout,
    pub pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl ProgramEntry {
    fn build_pipeline(&self, device: &wgpu::Device, key: &PipelineKey) -> wgpu::RenderPipeline {
        let attributes = key.layout.wgpu_attributes();
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: key.layout.effective_stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism program pipeline"),
            layout: Some(&self.layout),

            vertex: wgpu::VertexState {
                module: &self.vertex.module,
                entry_point: Some(self.vertex.entry_point.as_str()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.fragment.module,
                entry_point: Some(self.fragment.entry_point.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: key.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: key.topology.to_wgpu(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct PipelineKey {
    pub layout: VertexLayout,
    pub topology: PrimitiveTopology,
    pub format: wgpu::TextureFormat,
}

/// Commands recorded between two buffer swaps.
#[derive(Debug, Default)]
pub(super) struct FrameCommands {
    pub clear: Option<Color>,
    pub draws: Vec<DrawCommand>,
}

#[derive(Debug, Clone)]
pub(super) struct DrawCommand {
    pub program: ProgramId,
    pub vao: VertexArrayId,
    pub topology: PrimitiveTopology,
    pub vertices: Range<u32>,
}
