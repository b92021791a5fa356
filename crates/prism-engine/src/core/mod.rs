//! Core engine-facing contracts.
//!
//! Defines the lifecycle interface between the runtime (platform loop) and the
//! application, plus the per-frame context handed to render callbacks.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
