//! Core types for playback synchronization

use crate::media::VideoId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Catalogue-wide track identifier
///
/// Stable across pages, filters and sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl TrackId {
    /// Get the inner integer id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One catalogue row
///
/// Immutable for a given catalogue snapshot. A new fetch produces fresh
/// values; rows are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalogue identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Display producer/artist
    pub producer: String,

    /// Playable-media reference (external video URL)
    pub link: String,

    /// Thumbnail reference
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Track {
    /// Resolve the media link to an embeddable video id
    ///
    /// Returns `None` when the link is not an embeddable video, in which case
    /// playback degrades to opening the link externally.
    pub fn video_id(&self) -> Option<VideoId> {
        VideoId::from_url(&self.link)
    }
}

/// Lightweight master-list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRef {
    /// Catalogue identifier
    pub id: TrackId,

    /// Catalogue page on which the track appears under the active filter/sort
    pub page: u32,
}

/// Session-level playback status
///
/// Mirrors the state of whichever surface is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Nothing loaded
    Idle,

    /// Load issued, surface has not reported playing yet
    Loading,

    /// Audio is being produced
    Playing,

    /// Paused mid-track
    Paused,
}

/// Configuration for the synchronizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial mute state (default: false)
    pub muted: bool,

    /// Volume restored when unmuting from zero (default: 50)
    pub unmute_volume: u8,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat flag (default: false)
    pub repeat: bool,

    /// Elapsed time after which "previous" restarts the current track (default: 5s)
    pub restart_threshold_secs: f64,

    /// Progress polling interval in milliseconds (default: 250)
    pub progress_interval_ms: u64,

    /// Delay before the loading indicator is shown for a pending fetch (default: 250)
    pub loading_grace_ms: u64,
}

impl PlaybackConfig {
    /// Restart threshold as a duration
    pub fn restart_threshold(&self) -> Duration {
        Duration::from_secs_f64(self.restart_threshold_secs.max(0.0))
    }

    /// Progress polling interval as a duration
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms.max(1))
    }

    /// Loading indicator grace period as a duration
    pub fn loading_grace(&self) -> Duration {
        Duration::from_millis(self.loading_grace_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            muted: false,
            unmute_volume: 50,
            shuffle: false,
            repeat: false,
            restart_threshold_secs: 5.0,
            progress_interval_ms: 250,
            loading_grace_ms: 250,
        }
    }
}
