//! Platform abstraction layer
//!
//! Handles everything the simulation must not see:
//! - Keyboard polling into `TickInput` snapshots (`input`)
//! - Window drawing, fonts and sound playback (`native`)

pub mod input;
pub mod native;

pub use input::{FrameInput, Key, KeyState, poll_input};
pub use native::{MacroquadAudio, MacroquadKeys, MacroquadSurface, load_font};
