//! Playback synchronizer - core orchestration
//!
//! Owns the session (current track, status, volume, shuffle, repeat), the
//! hidden audio surface, every open inline embed, and the page-local and
//! master lists. All mutation happens through the operations below; a
//! single driver calls them one at a time and drains the queued events
//! afterwards.
//!
//! The synchronizer performs no I/O. Operations that need catalogue data
//! return [`Outcome::PageRequested`]; the driver fetches and hands the
//! result back through [`Synchronizer::complete_fetch`].

mod catalogue;
mod embed;
mod navigation;

use crate::{
    catalogue::{CatalogueQuery, MasterList, PageLocalList, RequestToken, TokenIssuer},
    error::{PlaybackError, Result},
    events::{NoticeKind, PlaybackEvent},
    media::VideoId,
    preferences::Preferences,
    progress::{Progress, ProgressTracker},
    session::{DisplayRecord, SessionSnapshot},
    shuffle::ShuffleProjection,
    surface::{
        LoadRequest, ReportedState, SurfaceEvent, SurfaceFactory, SurfaceSlot, SurfaceState,
        VideoSurface,
    },
    types::{PlaybackConfig, PlaybackStatus, Track, TrackId, TrackRef},
    volume::Volume,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a synchronizer operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Outcome {
    /// Nothing changed
    Unchanged,

    /// A track started loading on the hidden surface
    Started(TrackId),

    /// Play/pause toggled; carries the new status
    Toggled(PlaybackStatus),

    /// The current track was rewound to zero
    Restarted(TrackId),

    /// Playback stopped
    Stopped,

    /// The driver must fetch catalogue data and call `complete_fetch`
    PageRequested(crate::catalogue::PageRequest),

    /// A fetch was applied to the lists
    CatalogueApplied,

    /// A response was dropped because a newer request superseded it
    Discarded,

    /// An inline embed was requested for a row
    EmbedOpened(TrackId),

    /// An inline embed was closed
    EmbedClosed(TrackId),

    /// The track link was handed to the platform as an external link
    OpenedExternally(TrackId),
}

/// A surface together with what the synchronizer believes about it
pub(crate) struct SurfaceHandle {
    surface: Box<dyn VideoSurface>,
    video: VideoId,
    state: SurfaceState,
}

impl SurfaceHandle {
    fn new(surface: Box<dyn VideoSurface>, video: VideoId, autoplay: bool) -> Self {
        Self {
            surface,
            video,
            state: if autoplay {
                SurfaceState::Loading
            } else {
                SurfaceState::Paused
            },
        }
    }

    fn load(&mut self, request: &LoadRequest) -> Result<()> {
        self.surface.load(request)?;
        self.video = request.video.clone();
        self.state = if request.autoplay {
            SurfaceState::Loading
        } else {
            SurfaceState::Paused
        };
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.surface.play()?;
        self.state = SurfaceState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.is_audible() {
            self.surface.pause()?;
            self.state = SurfaceState::Paused;
        }
        Ok(())
    }

    fn apply_volume(&mut self, volume: &Volume) -> Result<()> {
        self.surface.set_volume(volume.level())?;
        if volume.is_muted() {
            self.surface.mute()
        } else {
            self.surface.unmute()
        }
    }

    /// Playing, or about to start playing on its own
    fn is_audible(&self) -> bool {
        matches!(self.state, SurfaceState::Playing | SurfaceState::Loading)
    }

    fn holds(&self, video: &VideoId) -> bool {
        &self.video == video
    }
}

/// Pending catalogue fetch
#[derive(Debug, Clone)]
struct PendingFetch {
    token: RequestToken,

    /// Query committed when the fetch succeeds
    query: Option<CatalogueQuery>,

    /// Track to play once the new page is applied
    deferred_play: Option<TrackId>,

    /// Current track when the deferred play was requested
    deferred_from: Option<TrackId>,
}

/// Playback state synchronizer
pub struct Synchronizer {
    config: PlaybackConfig,

    // Session
    current: Option<Track>,
    status: PlaybackStatus,
    embedded: bool,
    volume: Volume,
    shuffle: bool,
    projection: Option<ShuffleProjection>,
    repeat: bool,
    transport_visible: bool,

    // Surfaces
    factory: Box<dyn SurfaceFactory>,
    degraded: bool,
    hidden: Option<SurfaceHandle>,
    embeds: HashMap<TrackId, SurfaceHandle>,
    pending_embeds: HashMap<TrackId, SurfaceHandle>,

    // Catalogue
    query: CatalogueQuery,
    page_list: PageLocalList,
    master: MasterList,
    tokens: TokenIssuer,
    pending: Option<PendingFetch>,
    loading_visible: bool,

    progress: ProgressTracker,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl Synchronizer {
    /// Create a synchronizer with empty lists
    pub fn new(config: PlaybackConfig, factory: Box<dyn SurfaceFactory>) -> Self {
        let volume = Volume::new(config.volume, config.muted, config.unmute_volume);

        Self {
            current: None,
            status: PlaybackStatus::Idle,
            embedded: false,
            volume,
            shuffle: config.shuffle,
            projection: None,
            repeat: config.repeat,
            transport_visible: false,
            factory,
            degraded: false,
            hidden: None,
            embeds: HashMap::new(),
            pending_embeds: HashMap::new(),
            query: CatalogueQuery::default(),
            page_list: PageLocalList::default(),
            master: MasterList::default(),
            tokens: TokenIssuer::default(),
            pending: None,
            loading_visible: false,
            progress: ProgressTracker::new(),
            pending_events: Vec::new(),
            config,
        }
    }

    /// Create a synchronizer seeded with stored volume preferences
    pub fn with_preferences(
        mut config: PlaybackConfig,
        preferences: Option<Preferences>,
        factory: Box<dyn SurfaceFactory>,
    ) -> Self {
        if let Some(preferences) = preferences {
            preferences.apply_to(&mut config);
        }
        Self::new(config, factory)
    }

    // ===== Playback Control =====

    /// Play a track from the rendered page
    ///
    /// Re-triggering the track that is already playing toggles pause.
    /// Re-triggering a track that is still loading is a no-op, and a
    /// paused current track resumes where it was.
    pub fn play_track(&mut self, id: TrackId) -> Result<Outcome> {
        if self.current_id() == Some(id) && self.active_holds_current() {
            return match self.status {
                PlaybackStatus::Playing => self.toggle_play_pause(),
                PlaybackStatus::Loading => Ok(Outcome::Unchanged),
                PlaybackStatus::Paused | PlaybackStatus::Idle => self.resume(),
            };
        }

        let Some(track) = self.page_list.get(id).cloned() else {
            warn!(track_id = %id, "Play requested for a track not on the rendered page");
            self.emit(PlaybackEvent::notice(
                NoticeKind::Resolution,
                format!("Track {id} is not on this page"),
            ));
            return Err(PlaybackError::TrackNotOnPage(id));
        };

        self.start_track(track)
    }

    /// Toggle between playing and paused on the active surface
    pub fn toggle_play_pause(&mut self) -> Result<Outcome> {
        if self.current.is_none() {
            return Ok(Outcome::Unchanged);
        }

        match self.status {
            PlaybackStatus::Playing | PlaybackStatus::Loading => self.pause(),
            PlaybackStatus::Paused | PlaybackStatus::Idle => self.resume(),
        }
    }

    /// Pause the active surface
    pub fn pause(&mut self) -> Result<Outcome> {
        let handle = self.active_handle_mut().ok_or(PlaybackError::NoTrackLoaded)?;
        handle.surface.pause()?;
        handle.state = SurfaceState::Paused;

        self.set_status(PlaybackStatus::Paused);
        Ok(Outcome::Toggled(PlaybackStatus::Paused))
    }

    /// Resume the active surface
    pub fn resume(&mut self) -> Result<Outcome> {
        let handle = self.active_handle_mut().ok_or(PlaybackError::NoTrackLoaded)?;
        handle.play()?;

        self.set_status(PlaybackStatus::Playing);
        Ok(Outcome::Toggled(PlaybackStatus::Playing))
    }

    /// Stop playback
    ///
    /// Destroys every inline embed, pauses the hidden surface (kept for
    /// reuse), clears the current track and hides the transport bar.
    pub fn stop(&mut self) -> Result<Outcome> {
        // A page fetch still in flight may land, but it starts nothing
        if let Some(pending) = self.pending.as_mut() {
            pending.deferred_play = None;
        }

        let embeds: Vec<TrackId> = self
            .embeds
            .keys()
            .chain(self.pending_embeds.keys())
            .copied()
            .collect();
        for id in embeds {
            self.destroy_embed(id);
        }

        if let Some(hidden) = self.hidden.as_mut() {
            if let Err(e) = hidden.pause() {
                warn!(error = %e, "Failed to pause hidden surface on stop");
            }
        }

        let previous = self.current.take().map(|track| track.id);
        self.set_embedded(false);
        self.set_status(PlaybackStatus::Idle);
        self.progress.reset();
        self.emit(PlaybackEvent::ProgressReset);
        if previous.is_some() {
            self.emit_track_changed(None, previous);
        }
        self.set_transport_visible(false);

        info!(previous = ?previous, "Playback stopped");
        Ok(Outcome::Stopped)
    }

    /// Seek the active surface
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        let handle = self.active_handle_mut().ok_or(PlaybackError::NoTrackLoaded)?;
        handle.surface.seek(position)?;

        self.progress.end_drag(position);
        Ok(())
    }

    /// Seek to a fraction of the duration (0.0-100.0)
    pub fn seek_to_percent(&mut self, percent: f64) -> Result<()> {
        let duration = self
            .active_handle()
            .ok_or(PlaybackError::NoTrackLoaded)?
            .surface
            .duration()
            .ok_or_else(|| PlaybackError::InvalidOperation("Duration unknown".to_string()))?;

        let fraction = percent.clamp(0.0, 100.0) / 100.0;
        self.seek(duration.mul_f64(fraction))
    }

    // ===== Settings =====

    /// Enable or disable shuffle
    ///
    /// Enabling always generates a fresh projection of the master list.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        self.projection = enabled.then(|| ShuffleProjection::generate(&self.master));
        self.emit(PlaybackEvent::ShuffleChanged { enabled });
    }

    /// Enable or disable repeat of the current track
    pub fn set_repeat(&mut self, enabled: bool) {
        self.repeat = enabled;
        self.emit(PlaybackEvent::RepeatChanged { enabled });
    }

    /// Set volume (clamped to 0-100) on the active surface
    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        self.volume.set_level(level);
        self.apply_volume_to_active()?;
        self.emit_volume_changed();
        Ok(())
    }

    /// Toggle mute
    ///
    /// Unmuting at level zero restores the default unmute level.
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.volume.toggle_mute();
        self.apply_volume_to_active()?;
        self.emit_volume_changed();
        Ok(())
    }

    // ===== Progress =====

    /// Sample the active surface
    ///
    /// Returns `None` while nothing is loaded or the user is dragging the
    /// seek control.
    pub fn poll_progress(&mut self) -> Option<Progress> {
        if !self.progress.accepts_samples() || self.current.is_none() {
            return None;
        }

        let handle = self.active_handle()?;
        let sample = Progress {
            position: handle.surface.current_time(),
            duration: handle.surface.duration(),
        };
        self.progress.record(sample);
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: sample.position.as_millis() as u64,
            duration_ms: sample.duration.map(|d| d.as_millis() as u64),
        });
        Some(sample)
    }

    /// User started dragging the seek control
    pub fn begin_seek_drag(&mut self) {
        self.progress.begin_drag();
    }

    /// User released the seek control at `position`
    pub fn end_seek_drag(&mut self, position: Duration) -> Result<()> {
        let result = self.seek(position);
        // Polling resumes even when nothing was loaded to seek
        self.progress.end_drag(position);
        result
    }

    /// Last recorded progress sample
    pub fn progress(&self) -> Progress {
        self.progress.last()
    }

    // ===== Surface Events =====

    /// Route an asynchronous surface notification
    ///
    /// May start a page transition (track ended, playback error), in which
    /// case the returned outcome carries the fetch to perform.
    pub fn handle_surface_event(&mut self, slot: SurfaceSlot, event: SurfaceEvent) -> Result<Outcome> {
        debug!(%slot, ?event, "Surface event");

        match slot {
            SurfaceSlot::Hidden => self.handle_hidden_event(event),
            SurfaceSlot::Embed(id) => self.handle_embed_event(id, event),
        }
    }

    fn handle_hidden_event(&mut self, event: SurfaceEvent) -> Result<Outcome> {
        let Some(hidden) = self.hidden.as_mut() else {
            return Ok(Outcome::Unchanged);
        };
        let authoritative = !self.embedded && self.current.is_some();

        match event {
            SurfaceEvent::Ready => {
                hidden.apply_volume(&self.volume)?;
                Ok(Outcome::Unchanged)
            }
            SurfaceEvent::StateChanged(ReportedState::Playing) => {
                hidden.state = SurfaceState::Playing;
                if authoritative {
                    self.set_status(PlaybackStatus::Playing);
                } else {
                    // A late autoplay must not play over an embed
                    debug!("Hidden surface started while not authoritative, pausing");
                    hidden.pause()?;
                }
                Ok(Outcome::Unchanged)
            }
            SurfaceEvent::StateChanged(ReportedState::Paused) => {
                hidden.state = SurfaceState::Paused;
                if authoritative {
                    self.set_status(PlaybackStatus::Paused);
                }
                Ok(Outcome::Unchanged)
            }
            SurfaceEvent::StateChanged(ReportedState::Ended) => {
                hidden.state = SurfaceState::Ended;
                if authoritative {
                    self.track_ended()
                } else {
                    Ok(Outcome::Unchanged)
                }
            }
            SurfaceEvent::Error(code) => {
                if authoritative {
                    self.playback_failed(code)
                } else {
                    warn!(code, "Hidden surface error while not authoritative");
                    Ok(Outcome::Unchanged)
                }
            }
        }
    }

    /// Active surface reached the end of its media
    fn track_ended(&mut self) -> Result<Outcome> {
        if self.repeat {
            self.restart_current()
        } else {
            self.play_next()
        }
    }

    /// Active surface reported unplayable media: tell the user, skip ahead
    fn playback_failed(&mut self, code: u32) -> Result<Outcome> {
        let title = self
            .current
            .as_ref()
            .map(|track| track.title.clone())
            .unwrap_or_default();
        warn!(code, %title, "Surface reported a playback error");

        // Nothing else to skip to: retrying the same media would fail again
        let failed = self.current_id();
        let skip_to = self.peek_neighbour(true).map(|entry| entry.id);
        if skip_to.is_none() || skip_to == failed {
            self.emit(PlaybackEvent::notice(
                NoticeKind::Playback,
                format!("Cannot play \"{title}\" (error {code})"),
            ));
            return self.stop();
        }

        self.emit(PlaybackEvent::notice(
            NoticeKind::Playback,
            format!("Cannot play \"{title}\" (error {code}), skipping"),
        ));
        self.play_next()
    }

    // ===== State Queries =====

    /// Snapshot of the session
    pub fn session(&self) -> SessionSnapshot {
        let mut open_embeds: Vec<TrackId> = self
            .embeds
            .keys()
            .chain(self.pending_embeds.keys())
            .copied()
            .collect();
        open_embeds.sort();

        SessionSnapshot {
            current_track: self.current_id(),
            status: self.status,
            embedded: self.embedded,
            shuffle: self.shuffle,
            repeat: self.repeat,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            transport_visible: self.transport_visible,
            open_embeds,
        }
    }

    /// Display metadata for the current track
    pub fn display_record(&self) -> Option<DisplayRecord> {
        self.current.as_ref().map(DisplayRecord::from)
    }

    /// Current track id
    pub fn current_id(&self) -> Option<TrackId> {
        self.current.as_ref().map(|track| track.id)
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Session status
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Whether an inline embed is authoritative
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Whether surfaces could not be created and links open externally
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Volume state
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Preferences to persist
    pub fn preferences(&self) -> Preferences {
        Preferences {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        }
    }

    /// Configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Rendered page
    pub fn page_list(&self) -> &PageLocalList {
        &self.page_list
    }

    /// Full filtered, sorted catalogue
    pub fn master_list(&self) -> &MasterList {
        &self.master
    }

    /// Query the lists were fetched under
    pub fn query(&self) -> &CatalogueQuery {
        &self.query
    }

    /// Order next/previous walk: the projection when shuffling, else the master list
    pub fn traversal(&self) -> &[TrackRef] {
        match (&self.projection, self.shuffle) {
            (Some(projection), true) => projection.entries(),
            _ => self.master.entries(),
        }
    }

    /// Whether a row has an open (or opening) inline embed
    pub fn has_embed(&self, id: TrackId) -> bool {
        self.embeds.contains_key(&id) || self.pending_embeds.contains_key(&id)
    }

    /// Surfaces believed to be producing audio
    pub fn audible_surfaces(&self) -> Vec<SurfaceSlot> {
        let mut slots: Vec<SurfaceSlot> = self
            .embeds
            .iter()
            .chain(self.pending_embeds.iter())
            .filter(|(_, handle)| handle.is_audible())
            .map(|(id, _)| SurfaceSlot::Embed(*id))
            .collect();
        slots.sort_by_key(|slot| match slot {
            SurfaceSlot::Hidden => 0,
            SurfaceSlot::Embed(id) => id.get() + 1,
        });
        if self.hidden.as_ref().is_some_and(SurfaceHandle::is_audible) {
            slots.insert(0, SurfaceSlot::Hidden);
        }
        slots
    }

    /// Whether a fetch is outstanding
    pub fn is_fetch_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the loading indicator is showing
    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    // ===== Event Handling =====

    /// Drain pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Load `track` on the hidden surface from the beginning
    fn start_track(&mut self, track: Track) -> Result<Outcome> {
        if self.degraded {
            return Ok(self.open_external(&track));
        }
        let Some(video) = track.video_id() else {
            warn!(track_id = %track.id, link = %track.link, "Track link has no embeddable media");
            return Ok(self.open_external(&track));
        };

        // Silence every embed before the hidden surface starts
        self.pause_embeds(None);

        let request = LoadRequest::new(video.clone(), true);
        match self.hidden.as_mut() {
            Some(hidden) => hidden.load(&request)?,
            None => match self.factory.create(SurfaceSlot::Hidden, &request) {
                Ok(surface) => self.hidden = Some(SurfaceHandle::new(surface, video, true)),
                Err(e) => {
                    self.degrade(&e);
                    return Ok(self.open_external(&track));
                }
            },
        }
        if let Some(hidden) = self.hidden.as_mut() {
            hidden.apply_volume(&self.volume)?;
        }

        let id = track.id;
        let previous = self.current.replace(track).map(|previous| previous.id);
        self.set_embedded(false);
        self.progress.reset();
        self.emit(PlaybackEvent::ProgressReset);
        self.set_status(PlaybackStatus::Loading);
        if previous != Some(id) {
            self.emit_track_changed(Some(id), previous);
        }
        self.set_transport_visible(true);

        info!(track_id = %id, "Track loading on hidden surface");
        Ok(Outcome::Started(id))
    }

    /// Rewind the current track and keep playing it
    fn restart_current(&mut self) -> Result<Outcome> {
        let id = self.current_id().ok_or(PlaybackError::NoTrackLoaded)?;

        let handle = self.active_handle_mut().ok_or(PlaybackError::NoTrackLoaded)?;
        handle.surface.seek(Duration::ZERO)?;
        handle.play()?;

        self.progress.reset();
        self.emit(PlaybackEvent::ProgressReset);
        self.set_status(PlaybackStatus::Playing);
        debug!(track_id = %id, "Restarted current track");
        Ok(Outcome::Restarted(id))
    }

    /// Surfaces cannot be created: every later play opens the link instead
    fn degrade(&mut self, error: &PlaybackError) {
        if !self.degraded {
            warn!(error = %error, "Embeddable player unavailable, opening links externally");
            self.degraded = true;
        }
    }

    fn open_external(&mut self, track: &Track) -> Outcome {
        self.emit(PlaybackEvent::OpenExternal {
            url: track.link.clone(),
        });
        Outcome::OpenedExternally(track.id)
    }

    /// Pause every embed except `keep`
    fn pause_embeds(&mut self, keep: Option<TrackId>) {
        for (id, handle) in self.embeds.iter_mut().chain(self.pending_embeds.iter_mut()) {
            if Some(*id) == keep {
                continue;
            }
            if let Err(e) = handle.pause() {
                warn!(track_id = %id, error = %e, "Failed to pause embed");
            }
        }
    }

    fn pause_hidden(&mut self) {
        if let Some(hidden) = self.hidden.as_mut() {
            if let Err(e) = hidden.pause() {
                warn!(error = %e, "Failed to pause hidden surface");
            }
        }
    }

    /// Surface currently authoritative for the current track
    fn active_handle(&self) -> Option<&SurfaceHandle> {
        if self.embedded {
            self.embeds.get(&self.current_id()?)
        } else {
            self.hidden.as_ref()
        }
    }

    fn active_handle_mut(&mut self) -> Option<&mut SurfaceHandle> {
        if self.embedded {
            let id = self.current_id()?;
            self.embeds.get_mut(&id)
        } else {
            self.hidden.as_mut()
        }
    }

    /// Whether the active surface still holds the current track's media
    fn active_holds_current(&self) -> bool {
        let Some(video) = self.current.as_ref().and_then(Track::video_id) else {
            return false;
        };
        self.active_handle().is_some_and(|handle| handle.holds(&video))
    }

    /// Whether the hidden surface holds `video`
    fn hidden_holds(&self, video: &VideoId) -> bool {
        self.hidden.as_ref().is_some_and(|hidden| hidden.holds(video))
    }

    fn apply_volume_to_active(&mut self) -> Result<()> {
        let volume = self.volume.clone();
        match self.active_handle_mut() {
            Some(handle) => handle.apply_volume(&volume),
            None => Ok(()),
        }
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            self.status = status;
            self.emit(PlaybackEvent::StateChanged { status });
        }
    }

    fn set_embedded(&mut self, embedded: bool) {
        if self.embedded != embedded {
            self.embedded = embedded;
            self.emit(PlaybackEvent::ModeChanged { embedded });
        }
    }

    fn set_transport_visible(&mut self, visible: bool) {
        if self.transport_visible != visible {
            self.transport_visible = visible;
            self.emit(PlaybackEvent::TransportVisibility { visible });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_track_changed(&mut self, track_id: Option<TrackId>, previous_track_id: Option<TrackId>) {
        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}
