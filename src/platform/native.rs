//! Native window backend (macroquad)
//!
//! The arena is letterboxed into the window: every draw call converts arena
//! coordinates into screen pixels with one uniform scale.

use std::collections::HashMap;

use glam::Vec2;
use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound, stop_sound};
use macroquad::input::{KeyCode, is_key_down, is_key_pressed};
use macroquad::math::vec2;
use macroquad::prelude::{
    Color, DrawRectangleParams, Font, TextParams, clear_background, draw_circle, draw_circle_lines,
    draw_rectangle, draw_rectangle_ex, draw_text_ex, load_ttf_font_from_bytes, measure_text,
    screen_height, screen_width,
};

use super::input::{Key, KeyState};
use crate::assets::{self, AssetError};
use crate::audio::{AudioBackend, SoundEffect};
use crate::render::{Outline, Surface};
use crate::sim::Rgba;

fn color(rgba: Rgba) -> Color {
    Color::new(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn key_code(key: Key) -> KeyCode {
    match key {
        Key::W => KeyCode::W,
        Key::A => KeyCode::A,
        Key::S => KeyCode::S,
        Key::D => KeyCode::D,
        Key::C => KeyCode::C,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::Space => KeyCode::Space,
        Key::Enter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
    }
}

/// Live keyboard state
#[derive(Debug, Default, Clone, Copy)]
pub struct MacroquadKeys;

impl KeyState for MacroquadKeys {
    fn is_down(&self, key: Key) -> bool {
        is_key_down(key_code(key))
    }

    fn is_pressed(&self, key: Key) -> bool {
        if key == Key::Enter && is_key_pressed(KeyCode::KpEnter) {
            return true;
        }
        is_key_pressed(key_code(key))
    }
}

/// Frame drawing surface for the current window size
pub struct MacroquadSurface<'a> {
    font: Option<&'a Font>,
    scale: f32,
    origin: Vec2,
}

impl<'a> MacroquadSurface<'a> {
    /// Fit an `arena_width` x `arena_height` arena into the window
    pub fn fit(arena_width: f32, arena_height: f32, font: Option<&'a Font>) -> Self {
        let (sw, sh) = (screen_width(), screen_height());
        let scale = (sw / arena_width).min(sh / arena_height).max(f32::EPSILON);
        let origin = Vec2::new((sw - arena_width * scale) / 2.0, (sh - arena_height * scale) / 2.0);
        Self { font, scale, origin }
    }

    fn to_screen(&self, p: Vec2) -> Vec2 {
        self.origin + p * self.scale
    }

    fn font_px(&self, font_size: u16) -> u16 {
        ((font_size as f32 * self.scale).round() as u16).max(1)
    }
}

impl Surface for MacroquadSurface<'_> {
    fn clear(&mut self, rgba: Rgba) {
        clear_background(Color::new(0.0, 0.0, 0.0, 1.0));
        // Letterbox bars stay black, the arena gets the backdrop
        let size = Vec2::new(screen_width(), screen_height()) - self.origin * 2.0;
        draw_rectangle(self.origin.x, self.origin.y, size.x, size.y, color(rgba));
    }

    fn rect(&mut self, center: Vec2, size: Vec2, rotation: f32, fill: Rgba, outline: Option<Outline>) {
        let c = self.to_screen(center);
        let rotation = rotation.to_radians();
        let draw = |size: Vec2, rgba: Rgba| {
            let s = size * self.scale;
            draw_rectangle_ex(
                c.x,
                c.y,
                s.x,
                s.y,
                DrawRectangleParams {
                    offset: vec2(0.5, 0.5),
                    rotation,
                    color: color(rgba),
                },
            );
        };
        if let Some(outline) = outline {
            draw(size + Vec2::splat(outline.thickness * 2.0), outline.color);
        }
        draw(size, fill);
    }

    fn circle(&mut self, center: Vec2, radius: f32, fill: Rgba, outline: Option<Outline>) {
        let c = self.to_screen(center);
        let r = radius * self.scale;
        draw_circle(c.x, c.y, r, color(fill));
        if let Some(outline) = outline {
            let t = outline.thickness * self.scale;
            draw_circle_lines(c.x, c.y, r + t / 2.0, t, color(outline.color));
        }
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font_size: u16, rgba: Rgba) {
        let p = self.to_screen(Vec2::new(x, y));
        draw_text_ex(
            text,
            p.x,
            p.y,
            TextParams {
                font: self.font,
                font_size: self.font_px(font_size),
                color: color(rgba),
                ..Default::default()
            },
        );
    }

    fn text_width(&self, text: &str, font_size: u16) -> f32 {
        measure_text(text, self.font, self.font_px(font_size), 1.0).width / self.scale
    }
}

/// Load the first usable font, `None` means the built-in one
pub fn load_font(candidates: &[&str]) -> Option<Font> {
    let loaded = assets::read_first(candidates).and_then(|(path, bytes)| {
        load_ttf_font_from_bytes(&bytes).map_err(|e| AssetError::Decode {
            path,
            reason: format!("{e:?}"),
        })
    });
    match loaded {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Font unavailable, using built-in: {}", e);
            None
        }
    }
}

async fn load_sound(candidates: &[&str]) -> Result<Sound, AssetError> {
    let (path, bytes) = assets::read_first(candidates)?;
    load_sound_from_bytes(&bytes).await.map_err(|e| AssetError::Decode {
        path,
        reason: format!("{e:?}"),
    })
}

fn candidates(effect: SoundEffect) -> &'static [&'static str] {
    match effect {
        SoundEffect::Dash => assets::DASH_SOUNDS,
        SoundEffect::WallPass => assets::WALL_PASS_SOUNDS,
        SoundEffect::Pickup => assets::PICKUP_SOUNDS,
        SoundEffect::GameOver => assets::GAME_OVER_SOUNDS,
        SoundEffect::Music => assets::MUSIC,
    }
}

/// Sound playback through macroquad. Missing sounds are silent.
pub struct MacroquadAudio {
    sounds: HashMap<SoundEffect, Sound>,
    looping: Vec<SoundEffect>,
}

impl MacroquadAudio {
    pub async fn load() -> Self {
        let mut sounds = HashMap::new();
        for effect in SoundEffect::ALL {
            match load_sound(candidates(effect)).await {
                Ok(sound) => {
                    sounds.insert(effect, sound);
                }
                Err(e) => log::warn!("No {} sound: {}", effect.as_str(), e),
            }
        }
        log::info!("Loaded {}/{} sounds", sounds.len(), SoundEffect::ALL.len());
        Self {
            sounds,
            looping: Vec::new(),
        }
    }
}

impl AudioBackend for MacroquadAudio {
    fn play_once(&mut self, effect: SoundEffect, volume: f32) {
        if let Some(sound) = self.sounds.get(&effect) {
            play_sound(sound, PlaySoundParams { looped: false, volume });
        }
    }

    fn play_loop(&mut self, effect: SoundEffect, volume: f32) {
        if let Some(sound) = self.sounds.get(&effect) {
            play_sound(sound, PlaySoundParams { looped: true, volume });
            if !self.looping.contains(&effect) {
                self.looping.push(effect);
            }
        }
    }

    fn stop(&mut self, effect: SoundEffect) {
        if let Some(sound) = self.sounds.get(&effect) {
            stop_sound(sound);
        }
        self.looping.retain(|&e| e != effect);
    }
}

impl Drop for MacroquadAudio {
    fn drop(&mut self) {
        for effect in std::mem::take(&mut self.looping) {
            if let Some(sound) = self.sounds.get(&effect) {
                stop_sound(sound);
            }
        }
    }
}
