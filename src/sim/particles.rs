//! Short-lived visual particles
//!
//! Particles never affect gameplay. They draw from their own RNG stream so
//! turning effects off cannot change how a seeded run plays out.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Linear RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    /// Remaining lifetime in seconds
    pub life: f32,
    /// Lifetime at emission, for fading
    pub max_life: f32,
    pub size: f32,
}

/// Ordered collection of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    cap: usize,
}

/// Particles in one explosion burst
pub const EXPLOSION_COUNT: usize = 30;

impl ParticleSystem {
    pub fn new(seed: u64, cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            cap,
        }
    }

    /// Burst of `count` particles flying out in random directions
    pub fn emit(&mut self, position: Vec2, color: Rgba, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= self.cap {
                break;
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(50.0..200.0);
            let life = self.rng.random_range(0.5..1.5);
            let size = self.rng.random_range(2.0..6.0);
            self.particles.push(Particle {
                pos: position,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life,
                max_life: life,
                size,
            });
        }
    }

    /// Small slow puffs left behind a moving player
    pub fn emit_trail(&mut self, position: Vec2, color: Rgba) {
        for _ in 0..3 {
            if self.particles.len() >= self.cap {
                break;
            }
            let jitter = Vec2::new(self.rng.random_range(-5.0..5.0), self.rng.random_range(-5.0..5.0));
            let vel = Vec2::new(self.rng.random_range(-30.0..30.0), self.rng.random_range(-30.0..30.0));
            let life = self.rng.random_range(0.2..0.5);
            let size = self.rng.random_range(3.0..7.0);
            self.particles.push(Particle {
                pos: position + jitter,
                vel,
                color,
                life,
                max_life: life,
                size,
            });
        }
    }

    pub fn emit_explosion(&mut self, position: Vec2, color: Rgba) {
        self.emit(position, color, EXPLOSION_COUNT);
    }

    /// Age, move and fade every particle; expired ones are dropped
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.life -= dt;
            if p.life <= 0.0 {
                return false;
            }
            p.pos += p.vel * dt;
            p.color[3] = (p.life / p.max_life).clamp(0.0, 1.0);
            true
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
