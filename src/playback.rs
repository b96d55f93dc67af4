//! Audio playback capability for a single track.
//!
//! The actual audio engine is supplied by the platform through
//! [`PlaybackEngine`]. [`TrackPlayer`] scopes that engine to one track and
//! exposes the controls a detail screen needs. Without an engine every
//! control is inert and the player reports itself as unavailable.

pub const DEFAULT_SKIP_MS: u64 = 15_000;
pub const FALLBACK_ARTWORK_URL: &str = "https://placehold.co/64x64?text=♪";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Loading,
    Playing,
    Paused,
    Stopped,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackTrack {
    pub id: String,
    pub url: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub artwork: String,
}

pub trait PlaybackEngine {
    fn play(&mut self, track: &PlaybackTrack, autoplay: bool);
    fn pause(&mut self);
    fn resume(&mut self);
    fn seek_to(&mut self, position_ms: u64);
    fn seek_back(&mut self, ms: u64);
    fn seek_forward(&mut self, ms: u64);
    fn state(&self) -> EngineState;
    fn position_ms(&self) -> u64;
    fn duration_ms(&self) -> u64;
    fn playing_track_id(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPlayerConfig {
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub audio_url: String,
    pub artwork_url: Option<String>,
    pub duration_ms: Option<u64>,
}

pub struct TrackPlayer<'a> {
    engine: Option<&'a mut dyn PlaybackEngine>,
    config: TrackPlayerConfig,
}

impl<'a> TrackPlayer<'a> {
    pub fn new(engine: &'a mut dyn PlaybackEngine, config: TrackPlayerConfig) -> Self {
        Self {
            engine: Some(engine),
            config,
        }
    }

    pub fn unavailable(config: TrackPlayerConfig) -> Self {
        Self {
            engine: None,
            config,
        }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    fn is_current_track(&self) -> bool {
        self.engine
            .as_ref()
            .and_then(|e| e.playing_track_id())
            .is_some_and(|id| id == self.config.track_id)
    }

    fn engine_state(&self) -> Option<EngineState> {
        self.engine.as_ref().map(|e| e.state())
    }

    pub fn is_playing(&self) -> bool {
        self.is_current_track() && self.engine_state() == Some(EngineState::Playing)
    }

    pub fn is_busy(&self) -> bool {
        self.is_current_track() && self.engine_state() == Some(EngineState::Loading)
    }

    pub fn position_ms(&self) -> u64 {
        match &self.engine {
            Some(engine) if self.is_current_track() => engine.position_ms(),
            _ => 0,
        }
    }

    /// Engine duration while this track is loaded, otherwise the duration
    /// known from the catalog.
    pub fn duration_ms(&self) -> u64 {
        if let Some(engine) = &self.engine {
            if self.is_current_track() && engine.duration_ms() > 0 {
                return engine.duration_ms();
            }
        }
        self.config.duration_ms.unwrap_or(0)
    }

    pub fn progress_ratio(&self) -> f64 {
        let duration = self.duration_ms();
        if duration == 0 {
            return 0.0;
        }
        (self.position_ms() as f64 / duration as f64).clamp(0.0, 1.0)
    }

    pub fn artwork(&self) -> &str {
        self.config
            .artwork_url
            .as_deref()
            .unwrap_or(FALLBACK_ARTWORK_URL)
    }

    fn track(&self) -> PlaybackTrack {
        PlaybackTrack {
            id: self.config.track_id.clone(),
            url: self.config.audio_url.clone(),
            title: self.config.title.clone(),
            artist: self.config.artist.clone(),
            album: self.config.album.clone(),
            artwork: self.artwork().to_string(),
        }
    }

    pub fn toggle_play(&mut self) {
        if self.config.audio_url.is_empty() {
            return;
        }

        let current = self.is_current_track();
        let track = self.track();
        let Some(engine) = self.engine.as_deref_mut() else {
            return;
        };

        match engine.state() {
            _ if !current => engine.play(&track, true),
            EngineState::Idle => engine.play(&track, true),
            EngineState::Playing => engine.pause(),
            EngineState::Paused | EngineState::Stopped => engine.resume(),
            EngineState::Loading | EngineState::Error => engine.play(&track, true),
        }
    }

    /// Seeks backwards; starts this track instead when another one is loaded.
    pub fn seek_back(&mut self, ms: Option<u64>) {
        let current = self.is_current_track();
        let track = self.track();
        let Some(engine) = self.engine.as_deref_mut() else {
            return;
        };

        if current {
            engine.seek_back(ms.unwrap_or(DEFAULT_SKIP_MS));
        } else {
            engine.play(&track, true);
        }
    }

    pub fn seek_forward(&mut self, ms: Option<u64>) {
        let current = self.is_current_track();
        let track = self.track();
        let Some(engine) = self.engine.as_deref_mut() else {
            return;
        };

        if current {
            engine.seek_forward(ms.unwrap_or(DEFAULT_SKIP_MS));
        } else {
            engine.play(&track, true);
        }
    }

    /// Seeks to `ratio` of the effective duration. The ratio is clamped to
    /// `[0, 1]`; nothing happens while the duration is unknown.
    pub fn seek_to_ratio(&mut self, ratio: f64) {
        let duration = self.duration_ms();
        if duration == 0 {
            return;
        }

        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let current = self.is_current_track();
        let track = self.track();
        let Some(engine) = self.engine.as_deref_mut() else {
            return;
        };

        if !current {
            engine.play(&track, false);
        }
        engine.seek_to((duration as f64 * ratio).round() as u64);
    }
}
