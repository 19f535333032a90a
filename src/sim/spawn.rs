//! Spawn timers, palette selection and difficulty ramp

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{NeonColor, Obstacle, PowerUp, PowerUpKind};
use crate::tuning::{ObstaclePlacement, PalettePolicy, Tuning};

/// Slack for float timer accumulation (25 x 0.1 must reach 2.5)
pub const TIMER_EPSILON: f32 = 1e-4;

/// True once `timer` has reached `limit`
#[inline]
pub fn timer_elapsed(timer: f32, limit: f32) -> bool {
    timer + TIMER_EPSILON >= limit
}

/// Fraction of obstacle speed power-ups travel at
const POWERUP_SPEED_FACTOR: f32 = 0.8;
/// Power-ups spawn this far right of the arena edge
const POWERUP_SPAWN_OFFSET: f32 = 30.0;
/// Power-ups keep this distance from the top and bottom
const POWERUP_MARGIN: f32 = 50.0;

/// Which entities are due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRequests {
    pub obstacle: bool,
    pub powerup: bool,
    pub color_wall: bool,
}

/// Spawn bookkeeping for one session
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub obstacle_timer: f32,
    pub powerup_timer: f32,
    pub wall_timer: f32,
    /// Current obstacle spawn interval (shrinks with difficulty)
    pub interval: f32,
    /// Current obstacle speed (grows with difficulty)
    pub speed: f32,
    color_cursor: usize,
    height_cursor: usize,
    /// Score at the last difficulty step
    pub last_ramp_score: u64,
    /// Obstacles spawned by the timer this session
    pub spawned: u32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_timer: 0.0,
            powerup_timer: 0.0,
            wall_timer: 0.0,
            interval: tuning.spawn_interval,
            speed: tuning.obstacle_speed,
            color_cursor: 0,
            height_cursor: 0,
            last_ramp_score: 0,
            spawned: 0,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Accumulate `dt` into every timer. A timer that fires resets to zero.
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> SpawnRequests {
        let mut requests = SpawnRequests::default();

        self.obstacle_timer += dt;
        if timer_elapsed(self.obstacle_timer, self.interval) {
            self.obstacle_timer = 0.0;
            self.spawned += 1;
            requests.obstacle = true;
        }

        if let Some(interval) = tuning.powerup_interval {
            self.powerup_timer += dt;
            if timer_elapsed(self.powerup_timer, interval) {
                self.powerup_timer = 0.0;
                requests.powerup = true;
            }
        }

        if let Some(interval) = tuning.color_wall_interval {
            self.wall_timer += dt;
            if timer_elapsed(self.wall_timer, interval) {
                self.wall_timer = 0.0;
                requests.color_wall = true;
            }
        }

        requests
    }

    /// Next obstacle color under the configured policy
    pub fn pick_color(&mut self, tuning: &Tuning, rng: &mut Pcg32) -> NeonColor {
        match tuning.palette_policy {
            PalettePolicy::RoundRobin => {
                let color = tuning.palette_color(self.color_cursor);
                self.color_cursor = (self.color_cursor + 1) % tuning.palette.len().max(1);
                color
            }
            PalettePolicy::Random => {
                let index = rng.random_range(0..tuning.palette.len().max(1));
                tuning.palette_color(index)
            }
        }
    }

    fn pick_height(&mut self, heights: &[f32], policy: PalettePolicy, rng: &mut Pcg32) -> f32 {
        if heights.is_empty() {
            return 40.0;
        }
        let index = match policy {
            PalettePolicy::RoundRobin => {
                let index = self.height_cursor % heights.len();
                self.height_cursor = (self.height_cursor + 1) % heights.len();
                index
            }
            PalettePolicy::Random => rng.random_range(0..heights.len()),
        };
        heights[index]
    }

    /// Build a regular obstacle at the spawn edge
    pub fn make_obstacle(&mut self, id: u32, tuning: &Tuning, rng: &mut Pcg32) -> Obstacle {
        let x = tuning.arena_width + tuning.spawn_offset;
        let (center_y, height) = match &tuning.placement {
            ObstaclePlacement::Lane { height } => {
                let y = rng.random_range(*height..(tuning.arena_height - *height).max(*height + 1.0));
                (y, *height)
            }
            ObstaclePlacement::Grounded { ground_y, heights } => {
                let height = self.pick_height(heights, tuning.palette_policy, rng);
                (ground_y - height / 2.0, height)
            }
        };
        let color = self.pick_color(tuning, rng);
        Obstacle::block(
            id,
            Vec2::new(x, center_y),
            Vec2::new(tuning.obstacle_width, height),
            color,
            self.speed,
            tuning.obstacle_rotation_speed,
        )
    }

    /// Build a tall color wall at the spawn edge
    pub fn make_color_wall(&mut self, id: u32, tuning: &Tuning, rng: &mut Pcg32) -> Obstacle {
        let size = Vec2::new(tuning.obstacle_width * 3.0, tuning.arena_height * 0.8);
        let pos = Vec2::new(
            tuning.arena_width + size.x / 2.0 + tuning.spawn_offset,
            tuning.arena_height / 2.0,
        );
        let color = self.pick_color(tuning, rng);
        Obstacle::color_wall(id, pos, size, color, self.speed)
    }

    /// Build a power-up of a random kind at the spawn edge
    pub fn make_powerup(&mut self, id: u32, tuning: &Tuning, rng: &mut Pcg32) -> PowerUp {
        let top = POWERUP_MARGIN;
        let bottom = (tuning.arena_height - POWERUP_MARGIN).max(top + 1.0);
        let pos = Vec2::new(tuning.arena_width + POWERUP_SPAWN_OFFSET, rng.random_range(top..bottom));
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        PowerUp::new(id, pos, kind, self.speed * POWERUP_SPEED_FACTOR, tuning.powerup_radius)
    }

    /// Apply one difficulty step if `score` crossed the next milestone.
    /// Returns true when the pace changed.
    pub fn apply_ramp(&mut self, score: u64, tuning: &Tuning) -> bool {
        let Some(ramp) = &tuning.ramp else {
            return false;
        };
        if score == 0 || score < self.last_ramp_score + ramp.score_step {
            return false;
        }
        self.interval = (self.interval * ramp.interval_factor).max(ramp.min_interval);
        self.speed = (self.speed * ramp.speed_factor).min(ramp.max_speed);
        self.last_ramp_score = score;
        log::debug!(
            "Difficulty up at {}: interval {:.2}s, speed {:.0}",
            score,
            self.interval,
            self.speed
        );
        true
    }
}
