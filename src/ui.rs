//! HUD and overlay text
//!
//! Builds the text layer for the current phase as plain data; the renderer
//! decides how to draw it. Positions are in arena coordinates.

use crate::sim::{GamePhase, GameState, NeonColor, Rgba};
use crate::tuning::Variant;

const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
const DIM: Rgba = [0.7, 0.7, 0.8, 1.0];

/// Horizontal anchoring of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Anchor point (left edge or center, baseline)
    pub x: f32,
    pub y: f32,
    pub font_size: u16,
    pub color: Rgba,
    pub align: Align,
}

impl TextLine {
    fn left(text: impl Into<String>, x: f32, y: f32, font_size: u16, color: Rgba) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            color,
            align: Align::Left,
        }
    }

    fn centered(text: impl Into<String>, x: f32, y: f32, font_size: u16, color: Rgba) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            color,
            align: Align::Center,
        }
    }
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

/// Combo banner, shown only from `threshold` upward
pub fn combo_text(combo: u32, threshold: u32) -> Option<String> {
    (combo >= threshold && combo > 0).then(|| format!("COMBO x{combo}"))
}

/// Dash status and its color
pub fn dash_text(cooldown: f32) -> (String, NeonColor) {
    if cooldown > 0.0 {
        // Truncate, never round up to a value that has not been reached
        let tenths = (cooldown * 10.0).floor() / 10.0;
        (format!("Dash: {tenths:.1}s"), NeonColor::Orange)
    } else {
        ("Dash: READY [SPACE]".to_string(), NeonColor::Green)
    }
}

pub fn title(variant: Variant) -> &'static str {
    match variant {
        Variant::Dodge => "NEON DODGE",
        Variant::Runner => "Color Swap Runner",
    }
}

pub fn instructions(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::Dodge => &[
            "WASD or Arrow Keys to Move",
            "SPACE to Dash",
            "Dodge the obstacles!",
            "",
            "Press ENTER to Start",
        ],
        Variant::Runner => &[
            "A/D or Arrow Keys - Move / Space - Jump / C - Change Color",
            "Touch only obstacles of your own color!",
            "",
            "Press ENTER to Start",
        ],
    }
}

/// Text for the current phase
pub fn build(state: &GameState) -> Vec<TextLine> {
    match state.phase {
        GamePhase::Menu => menu(state),
        GamePhase::Playing => playing(state),
        GamePhase::GameOver => {
            let mut lines = playing(state);
            lines.extend(game_over(state));
            lines
        }
    }
}

fn menu(state: &GameState) -> Vec<TextLine> {
    let variant = state.tuning.variant;
    let cx = state.tuning.arena_width / 2.0;
    let h = state.tuning.arena_height;

    let mut lines = vec![TextLine::centered(
        title(variant),
        cx,
        h * 0.25,
        72,
        NeonColor::Blue.rgba(),
    )];
    let mut y = h * 0.5;
    for text in instructions(variant) {
        if !text.is_empty() {
            lines.push(TextLine::centered(*text, cx, y, 28, WHITE));
        }
        y += 36.0;
    }
    lines.push(TextLine::centered(
        format!("TAB to switch mode ({})", variant.toggled().as_str()),
        cx,
        h - 40.0,
        20,
        DIM,
    ));
    lines.push(TextLine::centered("ESC to quit", cx, h - 16.0, 18, DIM));
    lines
}

fn playing(state: &GameState) -> Vec<TextLine> {
    let tuning = &state.tuning;
    let mut lines = vec![TextLine::left(score_text(state.score), 20.0, 44.0, 36, WHITE)];

    if let Some(text) = combo_text(state.combo, tuning.combo_threshold) {
        lines.push(TextLine::centered(
            text,
            tuning.arena_width / 2.0,
            120.0,
            48,
            NeonColor::Yellow.rgba(),
        ));
    }

    match state.player.dash_cooldown() {
        Some(cooldown) => {
            let (text, color) = dash_text(cooldown);
            lines.push(TextLine::left(text, 20.0, tuning.arena_height - 24.0, 24, color.rgba()));
        }
        None => {
            lines.push(TextLine::left(
                "Press C to change color!",
                20.0,
                74.0,
                18,
                state.player_color().rgba(),
            ));
        }
    }

    let mut effects = Vec::new();
    if state.effects.shield {
        effects.push(("SHIELD".to_string(), NeonColor::Green));
    }
    if state.effects.slow_time > 0.0 {
        effects.push((format!("SLOW {:.1}s", state.effects.slow_time), NeonColor::Purple));
    }
    for (i, (text, color)) in effects.into_iter().enumerate() {
        lines.push(TextLine::left(
            text,
            tuning.arena_width - 180.0,
            44.0 + i as f32 * 28.0,
            24,
            color.rgba(),
        ));
    }

    lines
}

fn game_over(state: &GameState) -> Vec<TextLine> {
    let cx = state.tuning.arena_width / 2.0;
    let cy = state.tuning.arena_height / 2.0;
    vec![
        TextLine::centered("GAME OVER", cx, cy - 100.0, 72, NeonColor::Red.rgba()),
        TextLine::centered(format!("Final Score: {}", state.score), cx, cy, 48, WHITE),
        TextLine::centered("Press ENTER to restart", cx, cy + 100.0, 32, NeonColor::Green.rgba()),
        TextLine::centered("ESC for menu", cx, cy + 140.0, 20, DIM),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn texts(lines: &[TextLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_combo_hidden_below_threshold() {
        assert_eq!(combo_text(4, 5), None);
        assert_eq!(combo_text(5, 5).as_deref(), Some("COMBO x5"));
        assert_eq!(combo_text(0, 0), None);
    }

    #[test]
    fn test_dash_text_truncates() {
        assert_eq!(dash_text(0.0), ("Dash: READY [SPACE]".to_string(), NeonColor::Green));
        assert_eq!(dash_text(0.46).0, "Dash: 0.4s");
        assert_eq!(dash_text(0.99).0, "Dash: 0.9s");
        assert_eq!(dash_text(0.3).1, NeonColor::Orange);
    }

    #[test]
    fn test_menu_per_variant() {
        let dodge = GameState::new(Tuning::dodge(), 1);
        let lines = build(&dodge);
        assert_eq!(lines[0].text, "NEON DODGE");
        assert!(texts(&lines).contains(&"SPACE to Dash"));

        let runner = GameState::new(Tuning::runner(), 1);
        let lines = build(&runner);
        assert_eq!(lines[0].text, "Color Swap Runner");
        assert!(texts(&lines).iter().any(|t| t.contains("C - Change Color")));
    }

    #[test]
    fn test_playing_hud() {
        let mut state = GameState::new(Tuning::dodge(), 1);
        state.start_session();
        state.score = 120;
        state.combo = 6;
        let lines = build(&state);
        let t = texts(&lines);
        assert!(t.contains(&"Score: 120"));
        assert!(t.contains(&"COMBO x6"));
        assert!(t.contains(&"Dash: READY [SPACE]"));
        assert!(!t.contains(&"GAME OVER"));
    }

    #[test]
    fn test_runner_hud_has_color_hint_not_dash() {
        let mut state = GameState::new(Tuning::runner(), 1);
        state.start_session();
        let t: Vec<String> = build(&state).into_iter().map(|l| l.text).collect();
        assert!(t.iter().any(|s| s == "Press C to change color!"));
        assert!(!t.iter().any(|s| s.starts_with("Dash")));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::new(Tuning::dodge(), 1);
        state.start_session();
        state.score = 90;
        state.phase = GamePhase::GameOver;
        let lines = build(&state);
        let t = texts(&lines);
        assert!(t.contains(&"GAME OVER"));
        assert!(t.contains(&"Final Score: 90"));
        assert!(t.contains(&"Press ENTER to restart"));
    }

    #[test]
    fn test_effect_indicators() {
        let mut state = GameState::new(Tuning::dodge(), 1);
        state.start_session();
        state.effects.shield = true;
        state.effects.slow_time = 1.5;
        let t: Vec<String> = build(&state).into_iter().map(|l| l.text).collect();
        assert!(t.contains(&"SHIELD".to_string()));
        assert!(t.contains(&"SLOW 1.5s".to_string()));
    }
}
