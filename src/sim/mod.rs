//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - Input arrives as a `TickInput` snapshot, output leaves as `GameEvent`s

pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, judge_contact};
pub use particles::{Particle, ParticleSystem, Rgba};
pub use spawn::{SpawnRequests, Spawner};
pub use state::{
    ActiveEffects, DashState, GamePhase, GameState, Locomotion, MoveIntent, NeonColor, Obstacle,
    ObstacleKind, Player, PowerUp, PowerUpKind, ScreenShake,
};
pub use tick::{Command, GameEvent, TickInput, tick};
