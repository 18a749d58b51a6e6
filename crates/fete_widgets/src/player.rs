//! # Music Player
//!
//! Playback *state* for the playlist widget. The host owns the actual audio
//! element: it forwards position updates and end-of-track notifications here,
//! and applies whatever [`PlayerEvent`]s come back.
//!
//! ```text
//! select / next / previous ──► current track changes ──► TrackChanged
//! toggle_play ──────────────► Started / Stopped
//! track_ended ──► repeat ? replay : next
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Volume a fresh player starts at.
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Pressing previous after this many seconds restarts the current track.
pub const RESTART_THRESHOLD_SECS: f32 = 3.0;

/// One playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier.
    pub id: String,
    /// Song title.
    pub title: String,
    /// Performer.
    pub artist: String,
    /// Nominal length in seconds, shown before the audio reports its own.
    pub duration_secs: u32,
    /// Audio URL or path.
    pub src: String,
    /// Cover art URL or path.
    #[serde(default)]
    pub cover: Option<String>,
}

/// What the host must do after a player operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Load this track (and play it if the player is playing).
    TrackChanged(usize),
    /// Playback started; other page audio should pause.
    Started,
    /// Playback stopped; other page audio may resume.
    Stopped,
    /// Jump the audio element to this many seconds.
    Seeked(f32),
}

/// Playlist player state.
#[derive(Debug, Clone)]
pub struct MusicPlayer {
    tracks: Vec<Track>,
    current: Option<usize>,
    playing: bool,
    position_secs: f32,
    duration_secs: f32,
    volume: f32,
    muted: bool,
    repeat: bool,
    shuffle: bool,
    playlist_visible: bool,
}

impl MusicPlayer {
    /// Creates a stopped player with the first track selected.
    #[must_use]
    pub fn new(tracks: Vec<Track>) -> Self {
        let current = if tracks.is_empty() { None } else { Some(0) };
        let duration_secs = tracks.first().map_or(0.0, nominal_duration);
        Self {
            tracks,
            current,
            playing: false,
            position_secs: 0.0,
            duration_secs,
            volume: DEFAULT_VOLUME,
            muted: false,
            repeat: false,
            shuffle: false,
            playlist_visible: true,
        }
    }

    /// The playlist.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the selected track.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The selected track.
    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// True while playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Plays or pauses. Does nothing without a selected track.
    pub fn toggle_play(&mut self) -> Option<PlayerEvent> {
        self.current?;
        self.set_playing(!self.playing)
    }

    /// The host could not start playback (autoplay blocked, bad source).
    pub fn playback_failed(&mut self) -> Option<PlayerEvent> {
        self.set_playing(false)
    }

    /// Skips forward: a random other track in shuffle mode, otherwise the
    /// next one, wrapping.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PlayerEvent> {
        let current = self.current?;
        let len = self.tracks.len();
        let index = if self.shuffle {
            random_other(rng, len, current)
        } else {
            (current + 1) % len
        };
        Some(self.change_track(index))
    }

    /// Skips back. Past the first few seconds this restarts the current track
    /// instead.
    pub fn previous<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PlayerEvent> {
        let current = self.current?;
        if self.position_secs > RESTART_THRESHOLD_SECS {
            self.position_secs = 0.0;
            return Some(PlayerEvent::Seeked(0.0));
        }
        let len = self.tracks.len();
        let index = if self.shuffle {
            random_other(rng, len, current)
        } else {
            (current + len - 1) % len
        };
        Some(self.change_track(index))
    }

    /// Picks a track from the list and starts playing it.
    pub fn select(&mut self, index: usize) -> Vec<PlayerEvent> {
        if index >= self.tracks.len() {
            return Vec::new();
        }
        let mut events = vec![self.change_track(index)];
        events.extend(self.set_playing(true));
        events
    }

    /// The audio reached the end of the track.
    pub fn track_ended<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PlayerEvent> {
        if self.repeat {
            self.position_secs = 0.0;
            return Some(PlayerEvent::Seeked(0.0));
        }
        self.next(rng)
    }

    /// Jumps to `secs`, clamped to the track.
    pub fn seek(&mut self, secs: f32) -> Option<PlayerEvent> {
        self.current?;
        let secs = if secs.is_finite() { secs } else { 0.0 };
        self.position_secs = secs.clamp(0.0, self.duration_secs.max(0.0));
        Some(PlayerEvent::Seeked(self.position_secs))
    }

    /// Host report of the playback position.
    pub fn update_position(&mut self, secs: f32) {
        if secs.is_finite() && secs >= 0.0 {
            self.position_secs = secs;
        }
    }

    /// Host report of the real track length once metadata has loaded.
    pub fn update_duration(&mut self, secs: f32) {
        if secs.is_finite() && secs >= 0.0 {
            self.duration_secs = secs;
        }
    }

    /// Playback position in seconds.
    #[must_use]
    pub fn position_secs(&self) -> f32 {
        self.position_secs
    }

    /// Track length in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }

    /// Progress through the track in percent.
    #[must_use]
    pub fn progress_percent(&self) -> f32 {
        if self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Sets the volume, clamped to 0-1.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    /// Configured volume, ignoring mute.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Volume the audio element should use.
    #[must_use]
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Mutes or unmutes.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Replays the current track when it ends.
    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    /// Picks tracks at random when skipping.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Shows or hides the track list.
    pub fn toggle_playlist(&mut self) {
        self.playlist_visible = !self.playlist_visible;
    }

    /// True while muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// True in repeat mode.
    #[must_use]
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// True in shuffle mode.
    #[must_use]
    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    /// True while the track list is shown.
    #[must_use]
    pub fn is_playlist_visible(&self) -> bool {
        self.playlist_visible
    }

    fn change_track(&mut self, index: usize) -> PlayerEvent {
        self.current = Some(index);
        self.position_secs = 0.0;
        self.duration_secs = self.tracks.get(index).map_or(0.0, nominal_duration);
        debug!("Track changed to {}", index);
        PlayerEvent::TrackChanged(index)
    }

    fn set_playing(&mut self, playing: bool) -> Option<PlayerEvent> {
        if self.playing == playing {
            return None;
        }
        self.playing = playing;
        Some(if playing {
            PlayerEvent::Started
        } else {
            PlayerEvent::Stopped
        })
    }
}

/// `m:ss`, flooring both parts.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(secs: f32) -> String {
    let total = if secs.is_finite() { secs.max(0.0) as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}

#[allow(clippy::cast_precision_loss)]
fn nominal_duration(track: &Track) -> f32 {
    track.duration_secs as f32
}

/// Uniform index in `0..len` other than `exclude`; `exclude` itself when it
/// is the only track.
fn random_other<R: Rng + ?Sized>(rng: &mut R, len: usize, exclude: usize) -> usize {
    if len < 2 {
        return exclude;
    }
    let pick = rng.gen_range(0..len - 1);
    if pick >= exclude {
        pick + 1
    } else {
        pick
    }
}
