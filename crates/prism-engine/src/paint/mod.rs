//! Color representation used for clears.

pub mod color;

pub use color::Color;
