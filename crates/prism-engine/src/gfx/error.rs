use std::fmt;

use super::ShaderStage;

/// Kind of object a handle refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HandleKind {
    Buffer,
    VertexArray,
    Shader,
    Program,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandleKind::Buffer => "buffer",
            HandleKind::VertexArray => "vertex array",
            HandleKind::Shader => "shader",
            HandleKind::Program => "program",
        };
        f.write_str(s)
    }
}

/// Shader compile or link failure, carrying the diagnostic log.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {log}")
            }
            ShaderError::Link { log } => write!(f, "program failed to link: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Errors reported by a [`GraphicsBackend`](super::GraphicsBackend).
#[derive(Debug, Clone, PartialEq)]
pub enum GfxError {
    /// The handle was never created by this backend or was already deleted.
    UnknownHandle { kind: HandleKind, raw: u32 },
    /// Vertex layout cannot be expressed (e.g. attribute outside the stride).
    InvalidLayout(String),
    Shader(ShaderError),
    /// The presentation surface is unusable; rendering cannot continue.
    Surface(String),
}

impl GfxError {
    pub(crate) fn unknown(kind: HandleKind, raw: u32) -> Self {
        GfxError::UnknownHandle { kind, raw }
    }
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GfxError::UnknownHandle { kind, raw } => write!(f, "unknown {kind} handle {raw}"),
            GfxError::InvalidLayout(msg) => write!(f, "invalid vertex layout: {msg}"),
            GfxError::Shader(e) => write!(f, "{e}"),
            GfxError::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for GfxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GfxError::Shader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for GfxError {
    fn from(e: ShaderError) -> Self {
        GfxError::Shader(e)
    }
}
