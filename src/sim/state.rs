//! Game state and core simulation types
//!
//! Everything a session needs lives on `GameState`; there is no hidden
//! static state, so a reset is just reassigning fields.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::particles::{ParticleSystem, Rgba};
use super::spawn::Spawner;
use crate::tuning::{MovementTuning, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or menu
    GameOver,
}

/// Fixed neon palette shared by player, obstacles and power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeonColor {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
}

impl NeonColor {
    pub fn rgba(self) -> Rgba {
        match self {
            NeonColor::Red => [1.0, 0.0, 100.0 / 255.0, 1.0],
            NeonColor::Blue => [0.0, 200.0 / 255.0, 1.0, 1.0],
            NeonColor::Yellow => [1.0, 1.0, 0.0, 1.0],
            NeonColor::Green => [0.0, 1.0, 150.0 / 255.0, 1.0],
            NeonColor::Purple => [200.0 / 255.0, 0.0, 1.0, 1.0],
            NeonColor::Orange => [1.0, 150.0 / 255.0, 0.0, 1.0],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NeonColor::Red => "Red",
            NeonColor::Blue => "Blue",
            NeonColor::Yellow => "Yellow",
            NeonColor::Green => "Green",
            NeonColor::Purple => "Purple",
            NeonColor::Orange => "Orange",
        }
    }
}

/// Held-key movement intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Jump (platformer only)
    pub jump: bool,
}

/// Dash bookkeeping for free-moving players
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    pub is_dashing: bool,
    /// Remaining dash time
    pub timer: f32,
    /// Remaining cooldown before the next dash
    pub cooldown: f32,
    pub direction: Vec2,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            is_dashing: false,
            timer: 0.0,
            cooldown: 0.0,
            direction: Vec2::X,
        }
    }
}

/// How the player moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Locomotion {
    Free { dash: DashState },
    Platformer { grounded: bool },
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Index into the variant palette
    pub color_index: usize,
    pub locomotion: Locomotion,
    /// Time until the next color swap is allowed
    pub swap_cooldown: f32,
    /// Time since the last trail puff
    pub trail_timer: f32,
    /// Render and hitbox scale (pulses while dashing)
    pub scale: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let locomotion = match tuning.movement {
            MovementTuning::Free { .. } => Locomotion::Free {
                dash: DashState::default(),
            },
            MovementTuning::Platformer { .. } => Locomotion::Platformer { grounded: false },
        };
        Self {
            pos: Vec2::from(tuning.player_start),
            vel: Vec2::ZERO,
            size: tuning.player_size,
            color_index: 0,
            locomotion,
            swap_cooldown: 0.0,
            trail_timer: 0.0,
            scale: 1.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size * self.scale))
    }

    pub fn color(&self, tuning: &Tuning) -> NeonColor {
        tuning.palette_color(self.color_index)
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.locomotion, Locomotion::Free { dash } if dash.is_dashing)
    }

    /// Remaining dash cooldown, `None` if this player cannot dash
    pub fn dash_cooldown(&self) -> Option<f32> {
        match self.locomotion {
            Locomotion::Free { dash } => Some(dash.cooldown.max(0.0)),
            Locomotion::Platformer { .. } => None,
        }
    }

    pub fn can_dash(&self) -> bool {
        match self.locomotion {
            Locomotion::Free { dash } => !dash.is_dashing && dash.cooldown <= 0.0,
            Locomotion::Platformer { .. } => false,
        }
    }

    /// Start a dash along the current velocity (or to the right when idle).
    /// Returns false if the dash is not available.
    pub fn dash(&mut self, tuning: &Tuning) -> bool {
        if !self.can_dash() {
            return false;
        }
        let MovementTuning::Free {
            dash_duration,
            dash_cooldown,
            ..
        } = tuning.movement
        else {
            return false;
        };
        let direction = if self.vel != Vec2::ZERO {
            self.vel.normalize()
        } else {
            Vec2::X
        };
        if let Locomotion::Free { dash } = &mut self.locomotion {
            *dash = DashState {
                is_dashing: true,
                timer: dash_duration,
                cooldown: dash_cooldown,
                direction,
            };
        }
        true
    }

    /// Cycle to the next palette color. Returns false while on cooldown.
    pub fn swap_color(&mut self, tuning: &Tuning) -> bool {
        if self.swap_cooldown > 0.0 || tuning.palette.is_empty() {
            return false;
        }
        self.color_index = (self.color_index + 1) % tuning.palette.len();
        self.swap_cooldown = tuning.swap_cooldown;
        true
    }

    /// Advance movement by `dt` seconds
    pub fn update(&mut self, intent: &MoveIntent, dt: f32, tuning: &Tuning) {
        if self.swap_cooldown > 0.0 {
            self.swap_cooldown = (self.swap_cooldown - dt).max(0.0);
        }

        match tuning.movement {
            MovementTuning::Free {
                speed, dash_speed, ..
            } => self.update_free(intent, dt, speed, dash_speed),
            MovementTuning::Platformer {
                speed,
                gravity,
                jump_speed,
                ground_y,
            } => self.update_platformer(intent, dt, speed, gravity, jump_speed, ground_y),
        }

        self.clamp_to_arena(tuning);
    }

    fn update_free(&mut self, intent: &MoveIntent, dt: f32, speed: f32, dash_speed: f32) {
        let Locomotion::Free { dash } = &mut self.locomotion else {
            return;
        };

        self.vel = Vec2::ZERO;
        if !dash.is_dashing {
            let mut dir = Vec2::ZERO;
            if intent.up {
                dir.y -= 1.0;
            }
            if intent.down {
                dir.y += 1.0;
            }
            if intent.left {
                dir.x -= 1.0;
            }
            if intent.right {
                dir.x += 1.0;
            }
            self.vel = dir.normalize_or_zero() * speed;
        }

        if dash.is_dashing {
            dash.timer -= dt;
            if dash.timer <= 0.0 {
                dash.is_dashing = false;
            }
            self.pos += dash.direction * dash_speed * dt;
        } else {
            self.pos += self.vel * dt;
        }

        if dash.cooldown > 0.0 {
            dash.cooldown = (dash.cooldown - dt).max(0.0);
        }

        self.scale = if dash.is_dashing {
            1.0 + (dash.timer * 30.0).sin() * 0.2
        } else {
            1.0
        };
    }

    fn update_platformer(
        &mut self,
        intent: &MoveIntent,
        dt: f32,
        speed: f32,
        gravity: f32,
        jump_speed: f32,
        ground_y: f32,
    ) {
        let Locomotion::Platformer { grounded } = &mut self.locomotion else {
            return;
        };

        self.vel.x = if intent.left {
            -speed
        } else if intent.right {
            speed
        } else {
            0.0
        };

        if intent.jump && *grounded {
            self.vel.y = -jump_speed;
            *grounded = false;
        }

        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;

        let half = self.size / 2.0;
        if self.pos.y + half >= ground_y {
            self.pos.y = ground_y - half;
            self.vel.y = 0.0;
            *grounded = true;
        } else {
            *grounded = false;
        }
    }

    fn clamp_to_arena(&mut self, tuning: &Tuning) {
        let half = self.size / 2.0;
        self.pos.x = self.pos.x.clamp(half, tuning.arena_width - half);
        if !tuning.is_platformer() {
            self.pos.y = self.pos.y.clamp(half, tuning.arena_height - half);
        }
    }
}

/// Obstacle subtypes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    /// Ordinary spinning block (degrees)
    Block { rotation: f32, rotation_speed: f32 },
    /// Tall wall that only lets a matching color through
    ColorWall,
}

/// An obstacle entity
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub color: NeonColor,
    pub active: bool,
    /// Already credited toward score
    pub counted: bool,
    /// Player overlapped it harmlessly (went through a matching wall)
    pub touched: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn block(id: u32, pos: Vec2, size: Vec2, color: NeonColor, speed: f32, rotation_speed: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(-speed, 0.0),
            size,
            color,
            active: true,
            counted: false,
            touched: false,
            kind: ObstacleKind::Block {
                rotation: 0.0,
                rotation_speed,
            },
        }
    }

    pub fn color_wall(id: u32, pos: Vec2, size: Vec2, color: NeonColor, speed: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(-speed, 0.0),
            size,
            color,
            active: true,
            counted: false,
            touched: false,
            kind: ObstacleKind::ColorWall,
        }
    }

    pub fn is_color_wall(&self) -> bool {
        matches!(self.kind, ObstacleKind::ColorWall)
    }

    /// Rotation in degrees (0 for walls)
    pub fn rotation(&self) -> f32 {
        match self.kind {
            ObstacleKind::Block { rotation, .. } => rotation,
            ObstacleKind::ColorWall => 0.0,
        }
    }

    /// Unrotated right edge
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Collision box (grows with rotation, like a transformed rectangle's global bounds)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rotated(self.pos, self.size, self.rotation())
    }

    pub fn update(&mut self, dt: f32, despawn_margin: f32) {
        if !self.active {
            return;
        }

        self.pos += self.vel * dt;
        if let ObstacleKind::Block {
            rotation,
            rotation_speed,
        } = &mut self.kind
        {
            *rotation = (*rotation + *rotation_speed * dt) % 360.0;
        }

        if self.right_edge() < -despawn_margin {
            self.active = false;
        }
    }

    /// Credit this obstacle once its right edge has passed `player_left`.
    /// Returns true exactly once per obstacle.
    pub fn try_count(&mut self, player_left: f32) -> bool {
        if !self.active || self.counted {
            return false;
        }
        if self.right_edge() < player_left {
            self.counted = true;
            return true;
        }
        false
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs the next terminal collision
    Shield,
    /// Halves world speed for a few seconds
    SlowTime,
    /// Bonus paid twice
    ScoreBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::SlowTime, PowerUpKind::ScoreBoost];

    pub fn color(self) -> NeonColor {
        match self {
            PowerUpKind::Shield => NeonColor::Green,
            PowerUpKind::SlowTime => NeonColor::Purple,
            PowerUpKind::ScoreBoost => NeonColor::Yellow,
        }
    }
}

/// A power-up pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    pub radius: f32,
    pub active: bool,
    pub pulse_timer: f32,
    pub scale: f32,
}

impl PowerUp {
    pub fn new(id: u32, pos: Vec2, kind: PowerUpKind, speed: f32, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(-speed, 0.0),
            kind,
            radius,
            active: true,
            pulse_timer: 0.0,
            scale: 1.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius * self.scale)
    }

    pub fn update(&mut self, dt: f32, despawn_margin: f32) {
        if !self.active {
            return;
        }

        self.pos += self.vel * dt;
        self.pulse_timer += dt;
        self.scale = 1.0 + (self.pulse_timer * 5.0).sin() * 0.2;

        if self.pos.x + self.radius < -despawn_margin {
            self.active = false;
        }
    }
}

/// Seconds of slow motion granted by a SlowTime pickup
pub const SLOW_TIME_DURATION: f32 = 3.0;

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEffects {
    pub shield: bool,
    /// Remaining slow-motion time
    pub slow_time: f32,
}

impl ActiveEffects {
    /// Multiplier applied to world (non-player) time
    pub fn time_scale(&self) -> f32 {
        if self.slow_time > 0.0 { 0.5 } else { 1.0 }
    }

    pub fn update(&mut self, dt: f32) {
        if self.slow_time > 0.0 {
            self.slow_time = (self.slow_time - dt).max(0.0);
        }
    }
}

/// Camera shake after a crash
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenShake {
    pub intensity: f32,
    pub timer: f32,
    /// Offset applied to the world layer this frame
    pub offset: Vec2,
}

impl ScreenShake {
    pub fn start(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.timer = duration;
    }

    /// Advance the shake; `jitter` yields values in [-1, 1)
    pub fn update(&mut self, dt: f32, mut jitter: impl FnMut() -> f32) {
        if self.timer > 0.0 {
            self.timer -= dt;
            self.offset = Vec2::new(jitter(), jitter()) * self.intensity;
        } else {
            self.timer = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

/// Particle stream seed derived from the session seed
fn particle_seed(seed: u64) -> u64 {
    seed ^ 0x9E37_79B9_7F4A_7C15
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub combo: u32,
    /// Time since the last scoring event
    pub combo_timer: f32,
    /// Seconds spent in Playing this session
    pub elapsed: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    pub spawner: Spawner,
    pub effects: ActiveEffects,
    pub shake: ScreenShake,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a state sitting in the menu
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            spawner: Spawner::new(&tuning),
            particles: ParticleSystem::new(particle_seed(seed), tuning.max_particles),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            seed,
            phase: GamePhase::Menu,
            score: 0,
            combo: 0,
            combo_timer: 0.0,
            elapsed: 0.0,
            obstacles: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            shake: ScreenShake::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Full reset: score, combo and timers to zero, every collection empty,
    /// RNG streams rewound to the session seed. The phase is left untouched.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.score = 0;
        self.combo = 0;
        self.combo_timer = 0.0;
        self.elapsed = 0.0;
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.powerups.clear();
        self.particles = ParticleSystem::new(particle_seed(self.seed), self.tuning.max_particles);
        self.spawner.reset(&self.tuning);
        self.effects = ActiveEffects::default();
        self.shake = ScreenShake::default();
    }

    /// Reset and enter Playing
    pub fn start_session(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        if self.tuning.initial_obstacle {
            let id = self.next_entity_id();
            let obstacle = self.spawner.make_obstacle(id, &self.tuning, &mut self.rng);
            self.obstacles.push(obstacle);
        }
        log::info!("{} session started (seed {})", self.tuning.variant.as_str(), self.seed);
    }

    pub fn player_color(&self) -> NeonColor {
        self.player.color(&self.tuning)
    }

    /// Remove deactivated entities
    pub fn sweep_inactive(&mut self) {
        self.obstacles.retain(|o| o.active);
        self.powerups.retain(|p| p.active);
    }
}
