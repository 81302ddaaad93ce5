//! Error types for playback synchronization

use crate::types::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track is not part of the rendered page
    #[error("Track {0} is not on the current page")]
    TrackNotOnPage(TrackId),

    /// Track is not part of the master list
    #[error("Track {0} is not in the current catalogue")]
    TrackNotInCatalogue(TrackId),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Track link cannot be played by an embeddable surface
    #[error("Track {0} has no embeddable media")]
    UnplayableMedia(TrackId),

    /// The embeddable player could not be created at all
    #[error("Video surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A surface call failed
    #[error("Video surface error: {0}")]
    Surface(String),

    /// Catalogue fetch failed
    #[error("Catalogue fetch failed: {0}")]
    Gateway(#[from] GatewayError),

    /// Preferences could not be read or written
    #[error("Preference storage failed: {0}")]
    Storage(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl PlaybackError {
    /// Whether this is a resolution error (track id not found)
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            PlaybackError::TrackNotOnPage(_) | PlaybackError::TrackNotInCatalogue(_)
        )
    }
}

/// Errors reported by a catalogue gateway
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Server could not be reached
    #[error("Catalogue unreachable: {0}")]
    Unreachable(String),

    /// Server answered with an error status
    #[error("Catalogue server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid catalogue response: {0}")]
    Parse(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
