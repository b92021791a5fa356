//! Shader source loading.
//!
//! Sources are plain text files under a shader directory. Loading never fails the
//! caller: an unreadable file is logged and yields an empty string, which the
//! backend's compile step then rejects.

mod loader;

pub use loader::{ShaderLoader, ShaderPaths};
