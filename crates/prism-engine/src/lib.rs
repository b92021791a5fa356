//! Prism engine crate.
//!
//! Owns the window loop, the GPU device and a GL-shaped graphics backend, plus
//! the renderers built on top of it.

pub mod core;
pub mod device;
pub mod gfx;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
