//! Audio system
//!
//! Maps simulation events to sound effects. Playback goes through an
//! `AudioBackend`, so the manager works the same with real audio or none.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player dashed
    Dash,
    /// Player slipped through a color wall
    WallPass,
    /// Power-up collected
    Pickup,
    /// Run ended
    GameOver,
    /// Looping background track
    Music,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Dash,
        SoundEffect::WallPass,
        SoundEffect::Pickup,
        SoundEffect::GameOver,
        SoundEffect::Music,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundEffect::Dash => "dash",
            SoundEffect::WallPass => "wall pass",
            SoundEffect::Pickup => "pickup",
            SoundEffect::GameOver => "game over",
            SoundEffect::Music => "music",
        }
    }
}

/// Something that can play sounds
pub trait AudioBackend {
    fn play_once(&mut self, effect: SoundEffect, volume: f32);
    fn play_loop(&mut self, effect: SoundEffect, volume: f32);
    fn stop(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    /// Build with volumes taken from settings
    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::Music => self.music_volume,
            _ => self.sfx_volume,
        };
        self.master_volume * channel
    }

    /// Play a one-shot effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_once(effect, vol);
    }

    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        let vol = self.effective_volume(SoundEffect::Music);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_loop(SoundEffect::Music, vol);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.backend.stop(SoundEffect::Music);
            self.music_playing = false;
        }
    }

    /// React to one tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::SessionStarted => self.start_music(),
                GameEvent::ReturnedToMenu | GameEvent::QuitRequested => self.stop_music(),
                GameEvent::Dashed => self.play(SoundEffect::Dash),
                GameEvent::WallPassed { .. } => self.play(SoundEffect::WallPass),
                GameEvent::PowerUpCollected(_) => self.play(SoundEffect::Pickup),
                GameEvent::GameOver { .. } => {
                    self.stop_music();
                    self.play(SoundEffect::GameOver);
                }
                _ => {}
            }
        }
    }
}

impl<B: AudioBackend> Drop for AudioManager<B> {
    fn drop(&mut self) {
        self.stop_music();
    }
}
