//! Neon Dodge entry point
//!
//! Opens the window and runs the frame loop: poll input, tick, play audio,
//! draw.

use macroquad::prelude::{Conf, get_fps, get_frame_time, is_quit_requested, next_frame, prevent_quit};

use neon_dodge::assets;
use neon_dodge::audio::AudioManager;
use neon_dodge::consts::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use neon_dodge::platform::{MacroquadAudio, MacroquadKeys, MacroquadSurface, load_font, poll_input};
use neon_dodge::render::{Renderer, Surface};
use neon_dodge::sim::{GameEvent, GamePhase, GameState, tick};
use neon_dodge::{Settings, Variant, run_seed};

fn window_conf() -> Conf {
    Conf {
        window_title: WINDOW_TITLE.to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    }
}

/// Everything tied to the selected variant
struct Session {
    state: GameState,
    renderer: Renderer,
    font: Option<macroquad::text::Font>,
}

impl Session {
    fn new(settings: &Settings, variant: Variant, seed: u64) -> Self {
        let tuning = settings.tuning(variant);
        log::info!(
            "Variant {} ({}x{})",
            variant.as_str(),
            tuning.arena_width,
            tuning.arena_height
        );
        Self {
            renderer: Renderer::new(&tuning, seed),
            state: GameState::new(tuning, seed),
            font: load_font(assets::fonts_for(variant)),
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Neon Dodge starting...");

    let mut settings = Settings::load();
    let seed = run_seed(settings.seed);
    let mut session = Session::new(&settings, settings.variant, seed);
    let mut audio = AudioManager::with_settings(MacroquadAudio::load().await, &settings);
    // Window close goes through the loop so audio is released on the way out
    prevent_quit();

    loop {
        if is_quit_requested() {
            log::info!("Window closed");
            break;
        }

        let frame = poll_input(&MacroquadKeys);

        if frame.toggle_variant && session.state.phase == GamePhase::Menu {
            settings.variant = settings.variant.toggled();
            settings.save();
            session = Session::new(&settings, settings.variant, seed);
        }

        let dt = settings.frame_dt(get_frame_time());
        let events = tick(&mut session.state, &frame.tick, dt);
        audio.handle_events(&events);
        if events.contains(&GameEvent::QuitRequested) {
            log::info!("Quit requested from menu");
            break;
        }

        let tuning = &session.state.tuning;
        let mut surface = MacroquadSurface::fit(tuning.arena_width, tuning.arena_height, session.font.as_ref());
        session.renderer.draw_frame(&session.state, &settings, &mut surface);
        if settings.show_fps {
            let fps = format!("{} FPS", get_fps());
            surface.text(&fps, tuning.arena_width - 90.0, tuning.arena_height - 12.0, 18, [0.6, 0.6, 0.6, 1.0]);
        }

        next_frame().await;
    }

    log::info!("Shutting down");
}
