use std::path::PathBuf;

use anyhow::Result;
use winit::dpi::LogicalSize;

use prism_engine::device::GpuInit;
use prism_engine::logging::{LoggingConfig, init_logging};
use prism_engine::render::TriangleRenderer;
use prism_engine::shader::ShaderPaths;
use prism_engine::window::{Runtime, RuntimeConfig};

/// Shader directory shipped with the workspace.
const DEFAULT_SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../shaders");

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Optional first argument overrides the shader directory.
    let shader_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHADER_DIR));
    log::info!("shader directory: {}", shader_dir.display());

    let config = RuntimeConfig {
        title: "prism: triangle".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        centered: true,
    };

    // Linear surface so the clear color reaches the screen unconverted.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init, TriangleRenderer::new(ShaderPaths::new(shader_dir)))
}
