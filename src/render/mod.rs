//! Frame rendering
//!
//! Turns a `GameState` into draw calls against a `Surface`. The surface is
//! the only thing that knows about the windowing backend, which keeps this
//! module testable with a recording surface.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, NeonColor, Obstacle, ObstacleKind, Rgba};
use crate::tuning::{ObstaclePlacement, Tuning};
use crate::ui::{self, Align};

/// Dark navy backdrop
pub const BACKGROUND: Rgba = [10.0 / 255.0, 10.0 / 255.0, 30.0 / 255.0, 1.0];
const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
const STAR: Rgba = [150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0];
const GROUND: Rgba = [0.35, 0.35, 0.45, 1.0];

const STAR_COUNT: usize = 100;

/// Stroke drawn around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub thickness: f32,
    pub color: Rgba,
}

impl Outline {
    pub const fn new(thickness: f32, color: Rgba) -> Self {
        Self { thickness, color }
    }
}

/// Immediate-mode drawing target
pub trait Surface {
    fn clear(&mut self, color: Rgba);
    /// Rectangle centered at `center`, rotated by `rotation` degrees
    fn rect(&mut self, center: Vec2, size: Vec2, rotation: f32, fill: Rgba, outline: Option<Outline>);
    fn circle(&mut self, center: Vec2, radius: f32, fill: Rgba, outline: Option<Outline>);
    /// Text with its left end on the baseline at (x, y)
    fn text(&mut self, text: &str, x: f32, y: f32, font_size: u16, color: Rgba);
    fn text_width(&self, text: &str, font_size: u16) -> f32;
}

/// Background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
}

/// Per-arena render resources
#[derive(Debug, Clone)]
pub struct Renderer {
    stars: Vec<Star>,
}

impl Renderer {
    /// Scatter the starfield over the tuning's arena
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..tuning.arena_width),
                    rng.random_range(0.0..tuning.arena_height),
                ),
                radius: rng.random_range(1.0..3.0),
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Draw one complete frame
    pub fn draw_frame(&self, state: &GameState, settings: &Settings, surface: &mut impl Surface) {
        surface.clear(BACKGROUND);

        if settings.quality.starfield_enabled() {
            for star in &self.stars {
                surface.circle(star.pos, star.radius, STAR, None);
            }
        }

        if state.phase != GamePhase::Menu {
            let offset = if settings.effective_screen_shake() {
                state.shake.offset
            } else {
                Vec2::ZERO
            };
            draw_world(state, offset, surface);
        }

        draw_text_layer(state, surface);
    }
}

/// Entities, particles and the floor, shifted by `offset`
fn draw_world(state: &GameState, offset: Vec2, surface: &mut impl Surface) {
    let tuning = &state.tuning;

    if let ObstaclePlacement::Grounded { ground_y, .. } = tuning.placement {
        let height = tuning.arena_height - ground_y;
        surface.rect(
            Vec2::new(tuning.arena_width / 2.0, ground_y + height / 2.0) + offset,
            Vec2::new(tuning.arena_width + 40.0, height),
            0.0,
            GROUND,
            None,
        );
    }

    for obstacle in state.obstacles.iter().filter(|o| o.active) {
        draw_obstacle(obstacle, offset, surface);
    }

    for powerup in state.powerups.iter().filter(|p| p.active) {
        let color = powerup.kind.color().rgba();
        let radius = powerup.radius * powerup.scale;
        let mut glow = color;
        glow[3] = 0.35;
        surface.circle(powerup.pos + offset, radius * 1.6, glow, None);
        surface.circle(powerup.pos + offset, radius, color, Some(Outline::new(3.0, WHITE)));
    }

    let player = &state.player;
    let size = Vec2::splat(player.size * player.scale);
    if state.effects.shield {
        surface.circle(
            player.pos + offset,
            size.x * 0.9,
            [0.0, 1.0, 150.0 / 255.0, 0.25],
            Some(Outline::new(2.0, NeonColor::Green.rgba())),
        );
    }
    surface.rect(
        player.pos + offset,
        size,
        0.0,
        state.player_color().rgba(),
        Some(Outline::new(3.0, WHITE)),
    );

    for particle in state.particles.iter() {
        surface.circle(particle.pos + offset, particle.size / 2.0, particle.color, None);
    }
}

fn draw_obstacle(obstacle: &Obstacle, offset: Vec2, surface: &mut impl Surface) {
    let color = obstacle.color.rgba();
    match obstacle.kind {
        ObstacleKind::Block { rotation, .. } => {
            surface.rect(obstacle.pos + offset, obstacle.size, rotation, color, Some(Outline::new(2.0, WHITE)));
        }
        ObstacleKind::ColorWall => {
            let mut glow = color;
            glow[3] = 100.0 / 255.0;
            let mut halo = color;
            halo[3] = 50.0 / 255.0;
            surface.rect(obstacle.pos + offset, obstacle.size, 0.0, glow, Some(Outline::new(10.0, halo)));
            surface.rect(obstacle.pos + offset, obstacle.size, 0.0, color, Some(Outline::new(5.0, WHITE)));
        }
    }
}

fn draw_text_layer(state: &GameState, surface: &mut impl Surface) {
    if state.phase == GamePhase::GameOver {
        // Dim the frozen scene under the overlay
        let tuning = &state.tuning;
        surface.rect(
            Vec2::new(tuning.arena_width, tuning.arena_height) / 2.0,
            Vec2::new(tuning.arena_width, tuning.arena_height),
            0.0,
            [0.0, 0.0, 0.0, 0.55],
            None,
        );
    }

    for line in ui::build(state) {
        let x = match line.align {
            Align::Left => line.x,
            Align::Center => line.x - surface.text_width(&line.text, line.font_size) / 2.0,
        };
        surface.text(&line.text, x, line.y, line.font_size, line.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::tuning::Tuning;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect { center: Vec2, size: Vec2, rotation: f32, fill: Rgba },
        Circle { center: Vec2, radius: f32 },
        Text { text: String, x: f32 },
    }

    /// Records draw calls; every glyph is 10px wide
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _color: Rgba) {
            self.ops.push(Op::Clear);
        }

        fn rect(&mut self, center: Vec2, size: Vec2, rotation: f32, fill: Rgba, _outline: Option<Outline>) {
            self.ops.push(Op::Rect {
                center,
                size,
                rotation,
                fill,
            });
        }

        fn circle(&mut self, center: Vec2, radius: f32, _fill: Rgba, _outline: Option<Outline>) {
            self.ops.push(Op::Circle { center, radius });
        }

        fn text(&mut self, text: &str, x: f32, _y: f32, _font_size: u16, _color: Rgba) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                x,
            });
        }

        fn text_width(&self, text: &str, _font_size: u16) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    impl Recorder {
        fn rects(&self) -> Vec<&Op> {
            self.ops.iter().filter(|op| matches!(op, Op::Rect { .. })).collect()
        }

        fn text_x(&self, needle: &str) -> Option<f32> {
            self.ops.iter().find_map(|op| match op {
                Op::Text { text, x } if text == needle => Some(*x),
                _ => None,
            })
        }
    }

    fn playing(tuning: Tuning) -> GameState {
        let mut state = GameState::new(tuning, 3);
        state.start_session();
        state.obstacles.clear();
        state
    }

    #[test]
    fn test_starfield_is_inside_arena() {
        let tuning = Tuning::dodge();
        let renderer = Renderer::new(&tuning, 1);
        assert_eq!(renderer.stars().len(), STAR_COUNT);
        for star in renderer.stars() {
            assert!(star.pos.x >= 0.0 && star.pos.x < tuning.arena_width);
            assert!(star.pos.y >= 0.0 && star.pos.y < tuning.arena_height);
            assert!((1.0..3.0).contains(&star.radius));
        }
    }

    #[test]
    fn test_menu_draws_no_entities() {
        let state = GameState::new(Tuning::dodge(), 1);
        let renderer = Renderer::new(&state.tuning, 1);
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut surface);

        assert_eq!(surface.ops[0], Op::Clear);
        assert!(surface.rects().is_empty());
        assert!(surface.text_x("NEON DODGE").is_some());
    }

    #[test]
    fn test_low_quality_skips_stars() {
        let state = GameState::new(Tuning::dodge(), 1);
        let renderer = Renderer::new(&state.tuning, 1);
        let settings = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &settings, &mut surface);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Circle { .. })));
    }

    #[test]
    fn test_centered_text_uses_width() {
        let state = GameState::new(Tuning::dodge(), 1);
        let renderer = Renderer::new(&state.tuning, 1);
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut surface);
        // "NEON DODGE" is 100px wide in the recorder
        assert_eq!(surface.text_x("NEON DODGE"), Some(640.0 - 50.0));
    }

    #[test]
    fn test_inactive_obstacles_are_not_drawn() {
        let mut state = playing(Tuning::dodge());
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::block(id, Vec2::new(600.0, 300.0), Vec2::splat(40.0), NeonColor::Red, 300.0, 0.0);
        obstacle.active = false;
        state.obstacles.push(obstacle);

        let renderer = Renderer::new(&state.tuning, 1);
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut surface);

        // Only the player rectangle
        assert_eq!(surface.rects().len(), 1);
    }

    #[test]
    fn test_color_wall_draws_glow_then_body() {
        let mut state = playing(Tuning::dodge());
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::color_wall(
            id,
            Vec2::new(900.0, 360.0),
            Vec2::new(120.0, 576.0),
            NeonColor::Blue,
            300.0,
        ));

        let renderer = Renderer::new(&state.tuning, 1);
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut surface);

        let rects = surface.rects();
        assert_eq!(rects.len(), 3);
        match (rects[0], rects[1]) {
            (Op::Rect { fill: glow, .. }, Op::Rect { fill: body, .. }) => {
                assert!(glow[3] < 1.0);
                assert_eq!(*body, NeonColor::Blue.rgba());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_shake_offset_respects_settings() {
        let mut state = playing(Tuning::dodge());
        state.shake.offset = Vec2::new(5.0, -3.0);
        let player_pos = state.player.pos;
        let renderer = Renderer::new(&state.tuning, 1);

        let mut shaken = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut shaken);
        assert!(
            matches!(shaken.rects()[0], Op::Rect { center, .. } if *center == player_pos + Vec2::new(5.0, -3.0))
        );

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut steady = Recorder::default();
        renderer.draw_frame(&state, &calm, &mut steady);
        assert!(matches!(steady.rects()[0], Op::Rect { center, .. } if *center == player_pos));
    }

    #[test]
    fn test_runner_draws_ground_and_rotation_free_blocks() {
        let mut state = playing(Tuning::runner());
        let id = state.next_entity_id();
        let obstacle = state.spawner.make_obstacle(id, &state.tuning, &mut Pcg32::seed_from_u64(1));
        state.obstacles.push(obstacle);

        let renderer = Renderer::new(&state.tuning, 1);
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut surface);

        // Ground, obstacle, player
        let rects = surface.rects();
        assert_eq!(rects.len(), 3);
        assert!(matches!(rects[0], Op::Rect { fill, .. } if *fill == GROUND));
        assert!(matches!(rects[1], Op::Rect { rotation, .. } if *rotation == 0.0));
    }

    #[test]
    fn test_game_over_dims_scene_and_shows_overlay() {
        let mut state = playing(Tuning::dodge());
        state.phase = GamePhase::GameOver;
        let renderer = Renderer::new(&state.tuning, 1);
        let mut surface = Recorder::default();
        renderer.draw_frame(&state, &Settings::default(), &mut surface);

        assert_eq!(surface.rects().len(), 2);
        assert!(surface.text_x("GAME OVER").is_some());
        assert!(surface.text_x("Score: 0").is_some());
    }
}
