//! Playback Events
//!
//! One-way notifications for the presentation layer. The synchronizer
//! queues them while it mutates state; the driver drains them after every
//! transition and re-renders.

use crate::types::{PlaybackStatus, TrackId};
use serde::{Deserialize, Serialize};

/// Category of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Requested track could not be resolved
    Resolution,

    /// Surface reported unplayable media
    Playback,

    /// Catalogue fetch failed
    Network,
}

/// Events emitted by the synchronizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Session status changed (idle, loading, playing, paused)
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// Current track changed
    TrackChanged {
        /// New current track (`None` after stop)
        track_id: Option<TrackId>,
        /// Previous current track
        previous_track_id: Option<TrackId>,
    },

    /// Playback moved between the hidden surface and an inline embed
    ModeChanged {
        /// Whether an inline embed is now authoritative
        embedded: bool,
    },

    /// Progress display should return to zero
    ProgressReset,

    /// Position sample from the active surface
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total duration, when known
        duration_ms: Option<u64>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// New flag value
        enabled: bool,
    },

    /// Repeat flag changed
    RepeatChanged {
        /// New flag value
        enabled: bool,
    },

    /// Transport bar shown or hidden
    TransportVisibility {
        /// Whether the bar is visible
        visible: bool,
    },

    /// Inline embed container opened for a row
    EmbedOpened {
        /// Row whose embed opened
        track_id: TrackId,
    },

    /// Inline embed container closed for a row
    EmbedClosed {
        /// Row whose embed closed
        track_id: TrackId,
    },

    /// A catalogue fetch was applied
    CatalogueApplied {
        /// Rendered page
        page: u32,
        /// Rows on the page
        rows: usize,
        /// Tracks in the master list
        total: usize,
    },

    /// A catalogue fetch failed; rendered in place of the table body
    CatalogueFailed {
        /// Error description
        message: String,
    },

    /// Pending fetch exceeded its grace period (or finished)
    LoadingIndicator {
        /// Whether skeleton rows should be shown
        visible: bool,
    },

    /// One-line user-visible message
    Notice {
        /// Category
        kind: NoticeKind,
        /// Message text
        message: String,
    },

    /// Open a link in a new tab instead of playing it inline
    OpenExternal {
        /// Original track link
        url: String,
    },
}

impl PlaybackEvent {
    /// Shorthand for a notice
    pub fn notice(kind: NoticeKind, message: impl Into<String>) -> Self {
        PlaybackEvent::Notice {
            kind,
            message: message.into(),
        }
    }
}
