//! Frame timing.
//!
//! The runtime keeps one [`FrameClock`] per window and ticks it once per redraw;
//! the resulting [`FrameTime`] is handed to the update and render callbacks.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
