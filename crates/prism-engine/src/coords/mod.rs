//! Pixel-space geometry shared by the runtime and renderers.
//!
//! Physical pixels, origin top-left, +X right, +Y down.

mod viewport;

pub use viewport::ViewportRect;
