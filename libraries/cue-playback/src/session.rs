//! Read-only views of the playback session

use crate::types::{PlaybackStatus, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Snapshot of the session after a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current track (`None` means nothing loaded)
    pub current_track: Option<TrackId>,

    /// Session status
    pub status: PlaybackStatus,

    /// Whether an inline embed is authoritative
    pub embedded: bool,

    /// Shuffle flag
    pub shuffle: bool,

    /// Repeat flag
    pub repeat: bool,

    /// Volume level (0-100)
    pub volume: u8,

    /// Mute flag
    pub muted: bool,

    /// Transport bar visibility
    pub transport_visible: bool,

    /// Rows with an open inline embed
    pub open_embeds: Vec<TrackId>,
}

impl SessionSnapshot {
    /// Whether audio is being produced
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}

/// Resolved display metadata for the current track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub track_id: TrackId,
    pub title: String,
    pub producer: String,
    pub image_url: Option<String>,
}

impl From<&Track> for DisplayRecord {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id,
            title: track.title.clone(),
            producer: track.producer.clone(),
            image_url: track.image_url.clone(),
        }
    }
}
