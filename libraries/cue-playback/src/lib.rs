//! Cue - Playback State Synchronizer
//!
//! Keeps playback of a paginated track catalogue consistent across two kinds
//! of embeddable video surfaces: one hidden audio surface and any number of
//! inline embeds rendered inside table rows.
//!
//! This crate provides:
//! - Current-track identity with play/pause mirrored from the active surface
//! - Page-local vs. master list reconciliation across pagination
//! - Shuffle projection over the master list, wraparound traversal, repeat
//! - Glitch-free handoff between hidden and embedded playback
//! - Request-token supersession for concurrent catalogue fetches
//! - Volume/mute with persisted preferences
//!
//! # Architecture
//!
//! The [`Synchronizer`] is sans-IO. Surfaces are created through a
//! [`SurfaceFactory`] supplied by the platform (browser SDK, headless
//! simulator, test fake), and catalogue fetches are returned to the caller
//! as [`PageRequest`]s. The async [`Controller`] (feature `runtime`) drives
//! both against a [`CatalogueGateway`]; the `wasm` feature exposes the
//! synchronizer to a page script instead.
//!
//! # Example: Cross-page traversal
//!
//! ```rust,no_run
//! use cue_playback::{Outcome, PlaybackConfig, Synchronizer, SurfaceFactory};
//!
//! # fn factory() -> Box<dyn SurfaceFactory> { unimplemented!() }
//! let mut sync = Synchronizer::new(PlaybackConfig::default(), factory());
//!
//! match sync.play_next()? {
//!     Outcome::PageRequested(request) => {
//!         // Fetch request.page under request.query, then:
//!         // sync.complete_fetch(request.token, result)?;
//!     }
//!     outcome => println!("{outcome:?}"),
//! }
//! # Ok::<(), cue_playback::PlaybackError>(())
//! ```

pub mod catalogue;
pub mod error;
pub mod events;
pub mod gateway;
pub mod intent;
pub mod media;
pub mod preferences;
pub mod presentation;
pub mod progress;
pub mod session;
pub mod shuffle;
pub mod surface;
pub mod synchronizer;
pub mod types;
pub mod volume;

#[cfg(feature = "runtime")]
pub mod controller;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports
pub use catalogue::{
    CatalogueQuery, CatalogueUpdate, MasterList, PageData, PageLimit, PageLocalList, PageRequest,
    Pagination, RequestToken,
};
pub use error::{GatewayError, PlaybackError, Result};
pub use events::{NoticeKind, PlaybackEvent};
pub use gateway::CatalogueGateway;
pub use intent::Intent;
pub use media::VideoId;
pub use preferences::{MemoryPreferenceStore, PreferenceStore, Preferences};
pub use presentation::{PlayerView, Presenter};
pub use progress::Progress;
pub use session::{DisplayRecord, SessionSnapshot};
pub use surface::{
    LoadRequest, ReportedState, SurfaceEvent, SurfaceFactory, SurfaceSlot, SurfaceState,
    VideoSurface,
};
pub use synchronizer::{Outcome, Synchronizer};
pub use types::{PlaybackConfig, PlaybackStatus, Track, TrackId, TrackRef};
pub use volume::Volume;

#[cfg(feature = "runtime")]
pub use controller::Controller;

#[cfg(feature = "runtime")]
pub use gateway::fetch_update;
