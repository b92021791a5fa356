//! WGSL compile/link checks run before wgpu objects are created.
//!
//! wgpu treats invalid shaders as device errors; checking with naga up front turns
//! them into [`ShaderError`]s with readable diagnostics.

use wgpu::naga;

use crate::gfx::{ShaderError, ShaderStage};

/// A stage that parsed, validated and has an entry point for its stage.
#[derive(Debug)]
pub(super) struct CheckedStage {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub module: naga::Module,
}

pub(super) fn compile(stage: ShaderStage, source: &str) -> Result<CheckedStage, ShaderError> {
    let fail = |log: String| ShaderError::Compile { stage, log };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| fail(e.to_string()))?;

    let wanted = naga_stage(stage);
    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == wanted)
        .map(|ep| ep.name.clone())
        .ok_or_else(|| fail(format!("no {stage} entry point")))?;

    Ok(CheckedStage {
        stage,
        entry_point,
        module,
    })
}

/// Checks that the stages fit together and can be built into a pipeline:
/// - a vertex stage and a fragment stage, in that order
/// - every vertex input is `f32`-based, since vertex arrays only carry float attributes
/// - every fragment input is written by the vertex stage with the same type and
///   interpolation
/// - the fragment stage writes an `f32`-based color to `@location(0)`
pub(super) fn link(vertex: &CheckedStage, fragment: &CheckedStage) -> Result<(), ShaderError> {
    let fail = |log: String| Err(ShaderError::Link { log });

    if vertex.stage != ShaderStage::Vertex {
        return fail(format!("expected a vertex stage, got {}", vertex.stage));
    }
    if fragment.stage != ShaderStage::Fragment {
        return fail(format!("expected a fragment stage, got {}", fragment.stage));
    }

    for input in entry_inputs(vertex) {
        if !is_f32_based(&input.ty) {
            return fail(format!(
                "vertex input @location({}) is {:?}; vertex arrays only supply f32 attributes",
                input.location, input.ty
            ));
        }
    }

    let outputs = entry_outputs(vertex);
    for input in entry_inputs(fragment) {
        let Some(output) = outputs.iter().find(|o| o.location == input.location) else {
            return fail(format!(
                "fragment input @location({}) is not written by `{}`",
                input.location, vertex.entry_point
            ));
        };
        if *output != input {
            return fail(format!(
                "fragment input @location({}) does not match the vertex output \
                 (read {:?}, written {:?})",
                input.location, input.ty, output.ty
            ));
        }
    }

    match entry_outputs(fragment).into_iter().find(|o| o.location == 0) {
        None => fail(format!(
            "`{}` writes no color to @location(0)",
            fragment.entry_point
        )),
        Some(color) if !is_f32_based(&color.ty) => fail(format!(
            "color output @location(0) is {:?}; the surface target is a float format",
            color.ty
        )),
        Some(_) => Ok(()),
    }
}

/// `@location` inputs the vertex stage reads from vertex buffers.
pub(super) fn vertex_input_locations(vertex: &CheckedStage) -> Vec<u32> {
    entry_inputs(vertex).into_iter().map(|v| v.location).collect()
}

/// One `@location` argument or result of an entry point.
#[derive(Debug, Clone, PartialEq)]
struct Varying {
    location: u32,
    ty: naga::TypeInner,
    interpolation: Option<naga::Interpolation>,
    sampling: Option<naga::Sampling>,
}

fn naga_stage(stage: ShaderStage) -> naga::ShaderStage {
    match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    }
}

fn is_f32_based(ty: &naga::TypeInner) -> bool {
    match *ty {
        naga::TypeInner::Scalar(scalar) | naga::TypeInner::Vector { scalar, .. } => {
            scalar == naga::Scalar::F32
        }
        _ => false,
    }
}

fn entry<'m>(stage: &'m CheckedStage) -> Option<&'m naga::EntryPoint> {
    stage
        .module
        .entry_points
        .iter()
        .find(|ep| ep.name == stage.entry_point)
}

fn entry_outputs(stage: &CheckedStage) -> Vec<Varying> {
    let mut out = Vec::new();
    if let Some(result) = entry(stage).and_then(|ep| ep.function.result.as_ref()) {
        collect_varyings(&stage.module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn entry_inputs(stage: &CheckedStage) -> Vec<Varying> {
    let mut out = Vec::new();
    if let Some(ep) = entry(stage) {
        for arg in &ep.function.arguments {
            collect_varyings(&stage.module, arg.ty, arg.binding.as_ref(), &mut out);
        }
    }
    out
}

fn collect_varyings(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<Varying>,
) {
    match binding {
        Some(b @ naga::Binding::Location { .. }) => {
            let inner = &module.types[ty].inner;
            // Compare resolved qualifiers, not whether the source spelled them out.
            let mut b = b.clone();
            b.apply_default_interpolation(inner);
            if let naga::Binding::Location {
                location,
                interpolation,
                sampling,
                ..
            } = b
            {
                out.push(Varying {
                    location,
                    ty: inner.clone(),
                    interpolation,
                    sampling,
                });
            }
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    if m.binding.is_some() {
                        collect_varyings(module, m.ty, m.binding.as_ref(), out);
                    }
                }
            }
        }
    }
}
