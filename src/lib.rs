//! Neon Dodge - A neon arcade dodger with a color-swap runner mode
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `tuning`: Data-driven per-variant game balance
//! - `ui`: HUD and overlay text
//! - `render`: Frame drawing against an abstract surface
//! - `audio`: Event-driven sound effects
//! - `platform`: Keyboard, window and sound backends
//! - `settings`: Player preferences
//! - `assets`: Font and sound lookup

pub mod assets;
pub mod audio;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, Variant};

/// Window configuration constants
pub mod consts {
    pub const WINDOW_TITLE: &str = "Neon Dodge";
    /// Initial window size (the largest arena, so it fits unscaled)
    pub const WINDOW_WIDTH: i32 = 1280;
    pub const WINDOW_HEIGHT: i32 = 720;
}

/// Seed for a run: the configured one, or one derived from the clock
pub fn run_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_seed_wins() {
        assert_eq!(run_seed(Some(42)), 42);
    }

    #[test]
    fn test_window_fits_both_arenas() {
        for tuning in [Tuning::dodge(), Tuning::runner()] {
            assert!(tuning.arena_width <= consts::WINDOW_WIDTH as f32);
            assert!(tuning.arena_height <= consts::WINDOW_HEIGHT as f32);
        }
    }
}
