//! Data-driven game balance
//!
//! One `Tuning` preset per game variant. Everything the simulation needs to
//! know about speeds, timers and rules lives here so a session can be rebuilt
//! from it at any time.

use serde::{Deserialize, Serialize};

use crate::sim::NeonColor;

/// Which prototype rules a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Free movement with dash, dodge everything
    #[default]
    Dodge,
    /// Platformer with jump and color swapping
    Runner,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Dodge => "Neon Dodge",
            Variant::Runner => "Color Swap Runner",
        }
    }

    /// The other variant (menu toggle)
    pub fn toggled(self) -> Self {
        match self {
            Variant::Dodge => Variant::Runner,
            Variant::Runner => Variant::Dodge,
        }
    }
}

/// How an overlap between player and obstacle is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionRule {
    /// Harmful only when player and obstacle colors differ
    ColorMatch,
    /// Any overlap ends the run
    Dodge,
}

/// How spawned obstacles pick their color (and height, when grounded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PalettePolicy {
    /// Fixed cyclic index
    RoundRobin,
    /// Uniform draw from the seeded session RNG
    Random,
}

/// Player locomotion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MovementTuning {
    /// Eight-way movement plus dash
    Free {
        speed: f32,
        dash_speed: f32,
        dash_duration: f32,
        dash_cooldown: f32,
    },
    /// Horizontal movement, gravity and jump
    Platformer {
        speed: f32,
        gravity: f32,
        jump_speed: f32,
        ground_y: f32,
    },
}

/// Where spawned obstacles appear vertically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstaclePlacement {
    /// Uniform vertical position anywhere inside the arena
    Lane { height: f32 },
    /// Standing on the ground with a height from the table
    Grounded { ground_y: f32, heights: Vec<f32> },
}

/// Score-driven speed-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    /// Points between two speed-ups
    pub score_step: u64,
    /// Multiplier applied to the spawn interval (< 1 shrinks it)
    pub interval_factor: f32,
    /// Multiplier applied to obstacle speed (> 1 grows it)
    pub speed_factor: f32,
    /// Floor for the spawn interval
    pub min_interval: f32,
    /// Ceiling for obstacle speed
    pub max_speed: f32,
}

/// Complete balance sheet for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub variant: Variant,
    pub arena_width: f32,
    pub arena_height: f32,

    pub collision_rule: CollisionRule,
    pub palette_policy: PalettePolicy,
    pub palette: Vec<NeonColor>,

    // Player
    pub player_size: f32,
    pub player_start: [f32; 2],
    pub movement: MovementTuning,
    /// Minimum time between two color swaps
    pub swap_cooldown: f32,
    /// Seconds between trail puffs (None = no trail)
    pub trail_interval: Option<f32>,

    // Obstacles
    pub obstacle_width: f32,
    pub placement: ObstaclePlacement,
    pub obstacle_speed: f32,
    /// Degrees per second
    pub obstacle_rotation_speed: f32,
    pub spawn_interval: f32,
    /// Spawn center is this far right of the arena edge
    pub spawn_offset: f32,
    /// Entities deactivate once their right edge is left of `-despawn_margin`
    pub despawn_margin: f32,
    /// Seed the session with one obstacle right away
    pub initial_obstacle: bool,
    pub color_wall_interval: Option<f32>,

    // Power-ups
    pub powerup_interval: Option<f32>,
    pub powerup_bonus: u64,
    pub powerup_radius: f32,

    // Scoring
    pub pass_score: u64,
    pub combo_window: f32,
    pub combo_threshold: u32,
    pub ramp: Option<DifficultyRamp>,

    /// Upper bound on live particles
    pub max_particles: usize,
}

impl Tuning {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Dodge => Self::dodge(),
            Variant::Runner => Self::runner(),
        }
    }

    /// Neon Dodge balance (1280x720, dash, anything hurts)
    pub fn dodge() -> Self {
        Self {
            variant: Variant::Dodge,
            arena_width: 1280.0,
            arena_height: 720.0,
            collision_rule: CollisionRule::Dodge,
            palette_policy: PalettePolicy::Random,
            palette: vec![
                NeonColor::Red,
                NeonColor::Blue,
                NeonColor::Yellow,
                NeonColor::Green,
                NeonColor::Purple,
                NeonColor::Orange,
            ],
            player_size: 40.0,
            player_start: [1280.0 / 4.0, 720.0 / 2.0],
            movement: MovementTuning::Free {
                speed: 350.0,
                dash_speed: 800.0,
                dash_duration: 0.2,
                dash_cooldown: 1.0,
            },
            swap_cooldown: 0.2,
            trail_interval: Some(0.05),
            obstacle_width: 40.0,
            placement: ObstaclePlacement::Lane { height: 40.0 },
            obstacle_speed: 300.0,
            obstacle_rotation_speed: 180.0,
            spawn_interval: 1.5,
            spawn_offset: 40.0,
            despawn_margin: 20.0,
            initial_obstacle: false,
            color_wall_interval: Some(12.0),
            powerup_interval: Some(5.0),
            powerup_bonus: 50,
            powerup_radius: 15.0,
            pass_score: 10,
            combo_window: 3.0,
            combo_threshold: 5,
            ramp: Some(DifficultyRamp {
                score_step: 100,
                interval_factor: 0.95,
                speed_factor: 1.05,
                min_interval: 0.5,
                max_speed: 600.0,
            }),
            max_particles: 2000,
        }
    }

    /// Color Swap Runner balance (800x600, ground at 500, colors matter)
    pub fn runner() -> Self {
        Self {
            variant: Variant::Runner,
            arena_width: 800.0,
            arena_height: 600.0,
            collision_rule: CollisionRule::ColorMatch,
            palette_policy: PalettePolicy::RoundRobin,
            palette: vec![
                NeonColor::Red,
                NeonColor::Green,
                NeonColor::Blue,
                NeonColor::Yellow,
            ],
            player_size: 40.0,
            player_start: [120.0, 420.0],
            movement: MovementTuning::Platformer {
                speed: 300.0,
                gravity: 800.0,
                jump_speed: 410.0,
                ground_y: 500.0,
            },
            swap_cooldown: 0.2,
            trail_interval: None,
            obstacle_width: 40.0,
            placement: ObstaclePlacement::Grounded {
                ground_y: 500.0,
                heights: vec![50.0, 100.0, 200.0],
            },
            obstacle_speed: 200.0,
            obstacle_rotation_speed: 0.0,
            spawn_interval: 2.5,
            spawn_offset: 20.0,
            despawn_margin: 0.0,
            initial_obstacle: true,
            color_wall_interval: None,
            powerup_interval: None,
            powerup_bonus: 50,
            powerup_radius: 15.0,
            pass_score: 1,
            combo_window: 3.0,
            combo_threshold: 5,
            ramp: Some(DifficultyRamp {
                score_step: 10,
                interval_factor: 0.95,
                speed_factor: 1.05,
                min_interval: 1.2,
                max_speed: 320.0,
            }),
            max_particles: 2000,
        }
    }

    /// Color at `index`, wrapping around the palette
    pub fn palette_color(&self, index: usize) -> NeonColor {
        if self.palette.is_empty() {
            return NeonColor::Red;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn is_platformer(&self) -> bool {
        matches!(self.movement, MovementTuning::Platformer { .. })
    }
}
