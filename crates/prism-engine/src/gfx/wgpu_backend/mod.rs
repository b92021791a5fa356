//! [`GraphicsBackend`] over a window surface.
//!
//! Calls between two `swap_buffers` are recorded, then replayed into a single
//! render pass on the acquired swapchain image:
//! - `clear` becomes the pass load op (last clear wins)
//! - `set_viewport` applies to every draw of the pass
//! - `draw` binds the program's pipeline and the vertex array's buffer

mod store;
mod validate;

use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::coords::ViewportRect;
use crate::device::Gpu;
use crate::gfx::{
    BufferId, BufferUsage, GfxError, GraphicsBackend, HandleKind, PrimitiveTopology, ProgramId,
    ShaderError, ShaderId, ShaderStage, VertexArrayId, VertexLayout,
};
use crate::paint::Color;

pub use store::GpuResources;

use store::{DrawCommand, ProgramEntry, ProgramStage, ShaderEntry, VertexArrayEntry};

/// Short-lived view pairing a window's [`Gpu`] with its resource store.
///
/// Built by the runtime for each lifecycle callback.
pub struct WgpuBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    store: &'a mut GpuResources,
}

impl<'a, 'w> WgpuBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, store: &'a mut GpuResources) -> Self {
        Self { gpu, store }
    }
}

impl GraphicsBackend for WgpuBackend<'_, '_> {
    fn create_vertex_buffer(
        &mut self,
        label: &str,
        contents: &[u8],
        usage: BufferUsage,
    ) -> BufferId {
        let buffer = self
            .gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: usage.to_wgpu(),
            });
        let id = BufferId::from_raw(self.store.handles.allocate());
        log::debug!("created {id} `{label}` ({} bytes, {usage:?})", contents.len());
        self.store.buffers.insert(id, buffer);
        id
    }

    fn create_vertex_array(
        &mut self,
        buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<VertexArrayId, GfxError> {
        layout.validate().map_err(GfxError::InvalidLayout)?;
        let buffer_obj = self
            .store
            .buffers
            .remove(&buffer)
            .ok_or_else(|| GfxError::unknown(HandleKind::Buffer, buffer.raw()))?;

        let id = VertexArrayId::from_raw(self.store.handles.allocate());
        log::debug!("created {id} over {buffer}");
        self.store.vertex_arrays.insert(
            id,
            VertexArrayEntry {
                buffer: buffer_obj,
                layout: layout.clone(),
            },
        );
        Ok(id)
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayId) {
        if self.store.vertex_arrays.remove(&vao).is_none() {
            log::warn!("delete of unknown {vao}");
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        if self.store.buffers.remove(&buffer).is_none() {
            log::warn!("delete of unknown {buffer}");
        }
    }

    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderId, ShaderError> {
        let checked = validate::compile(stage, source)?;

        let label = format!("prism {stage} shader");
        let module = self
            .gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        let id = ShaderId::from_raw(self.store.handles.allocate());
        log::debug!("compiled {id} ({stage}, entry `{}`)", checked.entry_point);
        self.store.shaders.insert(id, ShaderEntry { checked, module });
        Ok(id)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        if self.store.shaders.remove(&shader).is_none() {
            log::warn!("delete of unknown {shader}");
        }
    }

    fn link_program(
        &mut self,
        vertex: ShaderId,
        fragment: ShaderId,
    ) -> Result<ProgramId, ShaderError> {
        let unknown = |id: ShaderId| ShaderError::Link {
            log: format!("{id} is not a live shader"),
        };
        let vs = self.store.shaders.get(&vertex).ok_or_else(|| unknown(vertex))?;
        let fs = self.store.shaders.get(&fragment).ok_or_else(|| unknown(fragment))?;

        validate::link(&vs.checked, &fs.checked)?;

        let layout = self
            .gpu
            .device()
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("prism program layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let entry = ProgramEntry {
            vertex: ProgramStage {
                module: vs.module.clone(),
                entry_point: vs.checked.entry_point.clone(),
            },
            fragment: ProgramStage {
                module: fs.module.clone(),
                entry_point: fs.checked.entry_point.clone(),
            },
            vertex_inputs: validate::vertex_input_locations(&vs.checked),
            layout,
            pipelines: Default::default(),
        };

        let id = ProgramId::from_raw(self.store.handles.allocate());
        log::debug!("linked {id} from {vertex} + {fragment}");
        self.store.programs.insert(id, entry);
        Ok(id)
    }

    fn delete_program(&mut self, program: ProgramId) {
        if self.store.programs.remove(&program).is_none() {
            log::warn!("delete of unknown {program}");
        }
    }

    fn set_viewport(&mut self, rect: ViewportRect) {
        self.store.viewport = Some(rect);
    }

    fn clear(&mut self, color: Color) {
        self.store.frame.clear = Some(color);
    }

    fn draw(
        &mut self,
        program: ProgramId,
        vao: VertexArrayId,
        topology: PrimitiveTopology,
        vertices: Range<u32>,
    ) -> Result<(), GfxError> {
        let inputs = &self.store.program(program)?.vertex_inputs;
        let layout = &self.store.vertex_array(vao)?.layout;
        if let Some(missing) = inputs
            .iter()
            .find(|loc| !layout.attributes.iter().any(|a| a.location == **loc))
        {
            return Err(GfxError::InvalidLayout(format!(
                "{vao} has no attribute for @location({missing}) read by {program}"
            )));
        }

        self.store.frame.draws.push(DrawCommand {
            program,
            vao,
            topology,
            vertices,
        });
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), GfxError> {
        let commands = std::mem::take(&mut self.store.frame);

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let msg = err.to_string();
                let action = self.gpu.handle_surface_error(err);
                if action.is_fatal() {
                    return Err(GfxError::Surface(msg));
                }
                log::debug!("frame dropped ({msg}): {action:?}");
                return Ok(());
            }
        };

        let format = self.gpu.surface_format();
        for cmd in &commands.draws {
            if let Err(e) = self.store.ensure_pipeline(self.gpu.device(), cmd, format) {
                log::warn!("draw skipped: {e}");
            }
        }

        let size = self.gpu.size();
        let viewport = self
            .store
            .viewport
            .and_then(|vp| vp.clamped_to(size.width, size.height));

        {
            let load = match commands.clear {
                Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
                None => wgpu::LoadOp::Load,
            };

            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(vp) = viewport {
                rpass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    0.0,
                    1.0,
                );
            }

            for cmd in &commands.draws {
                let Some((pipeline, buffer)) = self.store.draw_target(cmd, format) else {
                    continue;
                };
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(cmd.vertices.clone(), 0..1);
            }
        }

        self.gpu.submit(frame);
        log::trace!("presented frame with {} draw(s)", commands.draws.len());
        Ok(())
    }
}
