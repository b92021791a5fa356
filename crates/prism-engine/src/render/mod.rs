//! Renderers built on [`GraphicsBackend`](crate::gfx::GraphicsBackend).
//!
//! Renderers own their backend resources through the move-only wrappers in
//! `resources` and release them on shutdown.

mod resources;
mod triangle;

pub use resources::{Program, VertexArray};
pub use triangle::{CLEAR_COLOR, TRIANGLE_VERTICES, TriangleRenderer};
