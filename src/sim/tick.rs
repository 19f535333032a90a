//! Per-frame simulation step
//!
//! `tick` consumes one input snapshot, runs the pipeline for the current
//! phase and reports what happened as a list of events for audio and logging.

use rand::Rng;

use super::collision::{Contact, judge_contact};
use super::spawn::timer_elapsed;
use super::state::{GamePhase, GameState, MoveIntent, NeonColor, PowerUpKind, SLOW_TIME_DURATION};
use crate::tuning::CollisionRule;

/// Particles emitted when the player dashes
const DASH_PARTICLES: usize = 20;
/// Particles emitted when an obstacle is passed
const PASS_PARTICLES: usize = 15;
/// Particles emitted on a power-up pickup
const PICKUP_PARTICLES: usize = 25;
/// Crash shake
const SHAKE_INTENSITY: f32 = 20.0;
const SHAKE_DURATION: f32 = 0.3;

/// Discrete key-press commands, each consumed once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enter: start or restart
    Confirm,
    /// Escape: back to menu, or quit from the menu
    Cancel,
    /// Space: dash (free movement only)
    Dash,
    /// C: cycle player color
    SwapColor,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys currently held
    pub intent: MoveIntent,
    /// Key presses since the last tick, in order
    pub commands: Vec<Command>,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    ReturnedToMenu,
    QuitRequested,
    Dashed,
    ColorSwapped(NeonColor),
    ObstaclePassed { score: u64 },
    WallPassed { score: u64 },
    PowerUpCollected(PowerUpKind),
    ShieldBroken,
    DifficultyIncreased { interval: f32, speed: f32 },
    ComboLost { combo: u32 },
    GameOver { score: u64 },
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &command in &input.commands {
        handle_command(state, command, &mut events);
    }

    match state.phase {
        GamePhase::Menu => {}
        GamePhase::Playing => step_playing(state, &input.intent, dt, &mut events),
        GamePhase::GameOver => {
            // Let the crash finish animating
            state.particles.update(dt);
            state.shake.update(dt, || state.rng.random_range(-1.0..1.0));
        }
    }

    events
}

/// Apply one key press; presses that make no sense in the phase are ignored
fn handle_command(state: &mut GameState, command: Command, events: &mut Vec<GameEvent>) {
    match (state.phase, command) {
        (GamePhase::Menu, Command::Confirm) | (GamePhase::GameOver, Command::Confirm) => {
            state.start_session();
            events.push(GameEvent::SessionStarted);
        }
        (GamePhase::Menu, Command::Cancel) => {
            events.push(GameEvent::QuitRequested);
        }
        (GamePhase::Playing, Command::Cancel) | (GamePhase::GameOver, Command::Cancel) => {
            state.reset();
            state.phase = GamePhase::Menu;
            log::info!("Back to menu");
            events.push(GameEvent::ReturnedToMenu);
        }
        (GamePhase::Playing, Command::Dash) => {
            if state.player.dash(&state.tuning) {
                state
                    .particles
                    .emit(state.player.pos, NeonColor::Blue.rgba(), DASH_PARTICLES);
                events.push(GameEvent::Dashed);
            }
        }
        (GamePhase::Playing, Command::SwapColor) => {
            if state.player.swap_color(&state.tuning) {
                events.push(GameEvent::ColorSwapped(state.player_color()));
            }
        }
        _ => {}
    }
}

fn step_playing(state: &mut GameState, intent: &MoveIntent, dt: f32, events: &mut Vec<GameEvent>) {
    state.elapsed += dt;

    // Slow motion affects the world, never the player
    let world_dt = dt * state.effects.time_scale();
    state.effects.update(dt);

    state.player.update(intent, dt, &state.tuning);

    if let Some(interval) = state.tuning.trail_interval {
        state.player.trail_timer += dt;
        if timer_elapsed(state.player.trail_timer, interval) {
            let color = state.player_color().rgba();
            state.particles.emit_trail(state.player.pos, color);
            state.player.trail_timer = 0.0;
        }
    }

    spawn_due(state, world_dt);

    let margin = state.tuning.despawn_margin;
    for obstacle in &mut state.obstacles {
        obstacle.update(world_dt, margin);
    }
    for powerup in &mut state.powerups {
        powerup.update(world_dt, margin);
    }

    state.particles.update(dt);

    resolve_collisions(state, events);

    if state.phase == GamePhase::Playing {
        if state.spawner.apply_ramp(state.score, &state.tuning) {
            events.push(GameEvent::DifficultyIncreased {
                interval: state.spawner.interval,
                speed: state.spawner.speed,
            });
        }

        state.combo_timer += dt;
        if timer_elapsed(state.combo_timer, state.tuning.combo_window) {
            if state.combo > 0 {
                events.push(GameEvent::ComboLost { combo: state.combo });
            }
            state.combo = 0;
            state.combo_timer = 0.0;
        }
    }

    state.shake.update(dt, || state.rng.random_range(-1.0..1.0));

    state.sweep_inactive();
}

fn spawn_due(state: &mut GameState, dt: f32) {
    let requests = state.spawner.advance(dt, &state.tuning);

    if requests.obstacle {
        let id = state.next_entity_id();
        let obstacle = state.spawner.make_obstacle(id, &state.tuning, &mut state.rng);
        state.obstacles.push(obstacle);
    }
    if requests.color_wall {
        let id = state.next_entity_id();
        let wall = state.spawner.make_color_wall(id, &state.tuning, &mut state.rng);
        log::debug!("Color wall ({}) incoming", wall.color.as_str());
        state.obstacles.push(wall);
    }
    if requests.powerup {
        let id = state.next_entity_id();
        let powerup = state.spawner.make_powerup(id, &state.tuning, &mut state.rng);
        state.powerups.push(powerup);
    }
}

/// Player vs obstacles, scoring, and power-up pickups
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_box = state.player.bounds();
    let player_color = state.player_color();
    let mut crashed_into = None;

    for obstacle in state.obstacles.iter_mut().filter(|o| o.active) {
        if obstacle.bounds().intersects(&player_box) {
            let rule = if obstacle.is_color_wall() {
                CollisionRule::ColorMatch
            } else {
                state.tuning.collision_rule
            };
            if judge_contact(rule, player_color, obstacle.color) == Contact::Harmless {
                obstacle.touched = true;
            } else {
                if state.effects.shield {
                    state.effects.shield = false;
                    obstacle.active = false;
                    state
                        .particles
                        .emit(obstacle.pos, NeonColor::Green.rgba(), PASS_PARTICLES);
                    events.push(GameEvent::ShieldBroken);
                    continue;
                }
                crashed_into = Some(obstacle.id);
                break;
            }
        }

        if obstacle.try_count(player_box.min.x) {
            state.score += state.tuning.pass_score;
            state.combo += 1;
            state.combo_timer = 0.0;
            state
                .particles
                .emit(obstacle.pos, obstacle.color.rgba(), PASS_PARTICLES);
            // Only a wall the player actually went through counts as a wall pass
            events.push(if obstacle.is_color_wall() && obstacle.touched {
                GameEvent::WallPassed { score: state.score }
            } else {
                GameEvent::ObstaclePassed { score: state.score }
            });
        }
    }

    if let Some(id) = crashed_into {
        game_over(state, id, events);
        return;
    }

    for powerup in state.powerups.iter_mut().filter(|p| p.active) {
        if !powerup.bounds().intersects(&player_box) {
            continue;
        }
        powerup.active = false;
        log::debug!("Power-up #{} collected: {:?}", powerup.id, powerup.kind);
        state.score += state.tuning.powerup_bonus;
        match powerup.kind {
            PowerUpKind::Shield => state.effects.shield = true,
            PowerUpKind::SlowTime => state.effects.slow_time = SLOW_TIME_DURATION,
            PowerUpKind::ScoreBoost => state.score += state.tuning.powerup_bonus,
        }
        state
            .particles
            .emit(powerup.pos, NeonColor::Yellow.rgba(), PICKUP_PARTICLES);
        events.push(GameEvent::PowerUpCollected(powerup.kind));
    }
}

fn game_over(state: &mut GameState, obstacle_id: u32, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state
        .particles
        .emit_explosion(state.player.pos, NeonColor::Red.rgba());
    state.shake.start(SHAKE_INTENSITY, SHAKE_DURATION);
    log::info!(
        "Game over (hit obstacle #{}) with score {} after {:.1}s",
        obstacle_id,
        state.score,
        state.elapsed
    );
    events.push(GameEvent::GameOver { score: state.score });
}
