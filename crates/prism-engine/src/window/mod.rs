//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the window, wires them to the GPU layer and
//! drives an [`App`](crate::core::App) through its lifecycle.

mod placement;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
