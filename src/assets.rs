//! Asset lookup
//!
//! Fonts and sounds are searched for in a short list of candidate paths.
//! Callers treat a failure as "use the fallback", so errors carry enough
//! context to be logged once and then forgotten.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::tuning::Variant;

/// Font search order for the dodge variant
pub const DODGE_FONTS: &[&str] = &["assets/fonts/ARIALN.TTF", "ARIALN.TTF"];
/// Font search order for the runner variant
pub const RUNNER_FONTS: &[&str] = &["assets/fonts/ARIALN.TTF", "ARIALN.TTF", "arial.ttf"];

/// Font search order for `variant`
pub fn fonts_for(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::Dodge => DODGE_FONTS,
        Variant::Runner => RUNNER_FONTS,
    }
}

pub const DASH_SOUNDS: &[&str] = &["assets/sounds/dash.wav", "assets/sounds/dash.ogg"];
pub const WALL_PASS_SOUNDS: &[&str] = &["assets/sounds/wall_pass.wav", "assets/sounds/wall_pass.ogg"];
pub const PICKUP_SOUNDS: &[&str] = &["assets/sounds/pickup.wav", "assets/sounds/pickup.ogg"];
pub const GAME_OVER_SOUNDS: &[&str] = &["assets/sounds/game_over.wav", "assets/sounds/game_over.ogg"];
pub const MUSIC: &[&str] = &["assets/sounds/background_music.ogg", "assets/sounds/background_music.wav"];

/// Asset loading failure
#[derive(Debug)]
pub enum AssetError {
    /// None of the candidate paths exist
    NotFound { tried: Vec<PathBuf> },
    /// A candidate exists but could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// The bytes were read but the decoder rejected them
    Decode { path: PathBuf, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound { tried } => {
                write!(f, "asset not found (tried ")?;
                for (i, path) in tried.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", path.display())?;
                }
                write!(f, ")")
            }
            AssetError::Io { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
            AssetError::Decode { path, reason } => write!(f, "failed to decode {}: {}", path.display(), reason),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read the first candidate that exists, relative to `root`
pub fn read_first_in(root: &Path, candidates: &[&str]) -> Result<(PathBuf, Vec<u8>), AssetError> {
    let mut tried = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let path = root.join(candidate);
        if !path.is_file() {
            tried.push(path);
            continue;
        }
        return match std::fs::read(&path) {
            Ok(bytes) => {
                log::debug!("Loaded asset {} ({} bytes)", path.display(), bytes.len());
                Ok((path, bytes))
            }
            Err(source) => Err(AssetError::Io { path, source }),
        };
    }
    Err(AssetError::NotFound { tried })
}

/// Read the first candidate that exists, relative to the working directory
pub fn read_first(candidates: &[&str]) -> Result<(PathBuf, Vec<u8>), AssetError> {
    read_first_in(Path::new("."), candidates)
}
