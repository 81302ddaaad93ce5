//! Video surface abstraction
//!
//! Wraps one instance of the embeddable player. Any number may exist at
//! once: one hidden audio-only surface plus one per row expanded into an
//! inline embed. Platform code (browser SDK, headless simulator) implements
//! these traits.

use crate::error::Result;
use crate::media::VideoId;
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Where a surface lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "track", rename_all = "lowercase")]
pub enum SurfaceSlot {
    /// The single hidden audio surface
    Hidden,

    /// Inline embed rendered inside a track row
    Embed(TrackId),
}

impl fmt::Display for SurfaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceSlot::Hidden => f.write_str("hidden"),
            SurfaceSlot::Embed(id) => write!(f, "embed:{id}"),
        }
    }
}

/// What to load into a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Media to load
    pub video: VideoId,

    /// Start playing as soon as the media is ready
    pub autoplay: bool,

    /// Initial offset
    pub start_at: Duration,
}

impl LoadRequest {
    /// Load from the beginning
    pub fn new(video: VideoId, autoplay: bool) -> Self {
        Self {
            video,
            autoplay,
            start_at: Duration::ZERO,
        }
    }

    /// Load at an offset
    pub fn at(video: VideoId, autoplay: bool, start_at: Duration) -> Self {
        Self {
            video,
            autoplay,
            start_at,
        }
    }
}

/// Per-surface lifecycle
///
/// `Idle → Loading → Playing ⇄ Paused → Ended`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceState {
    /// Created, nothing loaded
    Idle,

    /// Media requested, not yet playing
    Loading,

    /// Producing audio
    Playing,

    /// Paused mid-media
    Paused,

    /// Reached the end of the media
    Ended,
}

/// Player state reported by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedState {
    Playing,
    Paused,
    Ended,
}

impl From<ReportedState> for SurfaceState {
    fn from(state: ReportedState) -> Self {
        match state {
            ReportedState::Playing => SurfaceState::Playing,
            ReportedState::Paused => SurfaceState::Paused,
            ReportedState::Ended => SurfaceState::Ended,
        }
    }
}

/// Asynchronous notification from a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// Player finished initialising and accepts commands
    Ready,

    /// Player state changed
    StateChanged(ReportedState),

    /// Media cannot be played (embedding disabled, removed, private, ...)
    Error(u32),
}

/// One embeddable player instance
///
/// Commands are fire-and-forget; the outcome arrives later as a
/// [`SurfaceEvent`] routed through the synchronizer.
pub trait VideoSurface {
    /// Load media, optionally starting playback
    fn load(&mut self, request: &LoadRequest) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to position in media
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Get current playback position
    fn current_time(&self) -> Duration;

    /// Get total media duration (unknown until metadata is loaded)
    fn duration(&self) -> Option<Duration>;

    /// Set volume (0-100)
    fn set_volume(&mut self, level: u8) -> Result<()>;

    /// Mute audio
    fn mute(&mut self) -> Result<()>;

    /// Unmute audio
    fn unmute(&mut self) -> Result<()>;

    /// Release the player and its container
    fn destroy(&mut self);
}

/// Creates surfaces
///
/// Returning an error means the embeddable player SDK is unavailable; the
/// synchronizer then degrades to opening links externally.
pub trait SurfaceFactory {
    /// Create a surface for `slot`, loading `request` immediately
    fn create(&mut self, slot: SurfaceSlot, request: &LoadRequest)
        -> Result<Box<dyn VideoSurface>>;
}
