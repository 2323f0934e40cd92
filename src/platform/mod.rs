//! Platform abstraction layer
//!
//! The host-side seams the simulation consumes:
//! - Input: physical keys held right now, mapped to logical actions
//! - Driver: per-frame stepping plus the 1 Hz countdown, serialized

pub mod driver;
pub mod input;

pub use driver::FrameDriver;
pub use input::{Key, KeyBindings, KeySet};
