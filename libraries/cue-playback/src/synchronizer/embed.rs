//! Inline embed mode switching
//!
//! Opening an embed for the current track hands playback over from the
//! hidden surface once the embed reports ready: the hidden surface pauses,
//! the embed seeks to the same offset, and continues only if the session
//! was playing. Closing that embed hands playback back the same way.
//!
//! An embed that starts playing on its own for a different track takes over
//! the session: it becomes the current track and everything else pauses.

use super::{Outcome, SurfaceHandle, Synchronizer};
use crate::{
    error::{PlaybackError, Result},
    events::{NoticeKind, PlaybackEvent},
    media::VideoId,
    surface::{LoadRequest, ReportedState, SurfaceEvent, SurfaceSlot, SurfaceState},
    types::{PlaybackStatus, TrackId},
};
use std::time::Duration;
use tracing::{debug, info, warn};

impl Synchronizer {
    /// Expand a row into an inline embed
    ///
    /// Other embeds (except the current track's) close first. The handoff
    /// itself completes when the embed reports ready.
    pub fn enter_embed_mode(&mut self, id: TrackId) -> Result<Outcome> {
        if self.has_embed(id) {
            return Ok(Outcome::Unchanged);
        }

        let Some(track) = self.page_list.get(id).cloned() else {
            self.emit(PlaybackEvent::notice(
                NoticeKind::Resolution,
                format!("Track {id} is not on this page"),
            ));
            return Err(PlaybackError::TrackNotOnPage(id));
        };
        if self.degraded {
            return Ok(self.open_external(&track));
        }
        let Some(video) = track.video_id() else {
            return Ok(self.open_external(&track));
        };

        let current = self.current_id();
        let others: Vec<TrackId> = self
            .embeds
            .keys()
            .chain(self.pending_embeds.keys())
            .copied()
            .filter(|other| Some(*other) != current)
            .collect();
        for other in others {
            self.close_embed_quietly(other);
        }

        // Same-track handoff: the embed waits at its offset until ready
        let handoff = current == Some(id) && !self.embedded && self.hidden_holds(&video);
        let request = LoadRequest::new(video.clone(), !handoff);
        let surface = match self.factory.create(SurfaceSlot::Embed(id), &request) {
            Ok(surface) => surface,
            Err(e) => {
                self.degrade(&e);
                return Ok(self.open_external(&track));
            }
        };

        self.pending_embeds
            .insert(id, SurfaceHandle::new(surface, video, !handoff));
        self.emit(PlaybackEvent::EmbedOpened { track_id: id });
        debug!(track_id = %id, handoff, "Embed opening");
        Ok(Outcome::EmbedOpened(id))
    }

    /// Collapse a row's inline embed
    ///
    /// When the embed was authoritative, the hidden surface resumes the
    /// same track at the embed's offset, playing only if the embed was.
    pub fn exit_embed_mode(&mut self, id: TrackId) -> Result<Outcome> {
        if let Some(mut pending) = self.pending_embeds.remove(&id) {
            pending.surface.destroy();
            self.emit(PlaybackEvent::EmbedClosed { track_id: id });
            return Ok(Outcome::EmbedClosed(id));
        }
        let Some(mut handle) = self.embeds.remove(&id) else {
            return Ok(Outcome::Unchanged);
        };

        let authoritative = self.embedded && self.current_id() == Some(id);
        let elapsed = handle.surface.current_time();
        let was_playing =
            handle.state == SurfaceState::Playing || (authoritative && self.status == PlaybackStatus::Playing);
        handle.surface.destroy();
        self.emit(PlaybackEvent::EmbedClosed { track_id: id });

        if authoritative {
            self.set_embedded(false);
            self.resume_hidden(handle.video, elapsed, was_playing)?;
            info!(track_id = %id, ?elapsed, was_playing, "Playback handed back to hidden surface");
        }
        Ok(Outcome::EmbedClosed(id))
    }

    /// Continue the current track on the hidden surface at `at`
    fn resume_hidden(&mut self, video: VideoId, at: Duration, play: bool) -> Result<()> {
        let request = LoadRequest::at(video.clone(), play, at);

        let loaded = match self.hidden.as_mut() {
            Some(hidden) if hidden.holds(&video) => {
                hidden.surface.seek(at)?;
                if play {
                    hidden.play()?;
                } else {
                    hidden.pause()?;
                }
                false
            }
            Some(hidden) => {
                hidden.load(&request)?;
                true
            }
            None => match self.factory.create(SurfaceSlot::Hidden, &request) {
                Ok(surface) => {
                    self.hidden = Some(SurfaceHandle::new(surface, video, play));
                    true
                }
                Err(e) => {
                    self.degrade(&e);
                    self.set_status(PlaybackStatus::Paused);
                    return Err(e);
                }
            },
        };
        if let Some(hidden) = self.hidden.as_mut() {
            hidden.apply_volume(&self.volume)?;
        }

        let status = match (play, loaded) {
            (false, _) => PlaybackStatus::Paused,
            (true, true) => PlaybackStatus::Loading,
            (true, false) => PlaybackStatus::Playing,
        };
        self.set_status(status);
        Ok(())
    }

    pub(super) fn handle_embed_event(&mut self, id: TrackId, event: SurfaceEvent) -> Result<Outcome> {
        if self.pending_embeds.contains_key(&id) {
            match event {
                SurfaceEvent::Ready => {
                    self.complete_embed(id)?;
                    return Ok(Outcome::Unchanged);
                }
                SurfaceEvent::StateChanged(ReportedState::Playing) => {
                    // Started before reporting ready
                    self.complete_embed(id)?;
                }
                SurfaceEvent::Error(code) => {
                    self.embed_failed(id, code);
                    return Ok(Outcome::Unchanged);
                }
                SurfaceEvent::StateChanged(_) => return Ok(Outcome::Unchanged),
            }
        }

        let authoritative = self.embedded && self.current_id() == Some(id);
        let Some(handle) = self.embeds.get_mut(&id) else {
            debug!(track_id = %id, "Event for a closed embed");
            return Ok(Outcome::Unchanged);
        };

        match event {
            SurfaceEvent::Ready => Ok(Outcome::Unchanged),
            SurfaceEvent::StateChanged(ReportedState::Playing) => {
                handle.state = SurfaceState::Playing;
                if authoritative {
                    self.set_status(PlaybackStatus::Playing);
                } else {
                    self.promote_embed(id)?;
                }
                Ok(Outcome::Unchanged)
            }
            SurfaceEvent::StateChanged(ReportedState::Paused) => {
                handle.state = SurfaceState::Paused;
                if authoritative {
                    self.set_status(PlaybackStatus::Paused);
                }
                Ok(Outcome::Unchanged)
            }
            SurfaceEvent::StateChanged(ReportedState::Ended) => {
                handle.state = SurfaceState::Ended;
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
                    self.embed_failed(id, code);
                    Ok(Outcome::Unchanged)
                }
            }
        }
    }

    /// Embed reported ready: move it into the open set, handing off if needed
    fn complete_embed(&mut self, id: TrackId) -> Result<()> {
        let Some(mut handle) = self.pending_embeds.remove(&id) else {
            return Ok(());
        };
        handle.apply_volume(&self.volume)?;

        let handoff =
            self.current_id() == Some(id) && !self.embedded && self.hidden_holds(&handle.video);
        if !handoff {
            self.embeds.insert(id, handle);
            return Ok(());
        }

        // A hidden surface still loading was asked to autoplay
        let playing = matches!(self.status, PlaybackStatus::Playing | PlaybackStatus::Loading);
        let mut elapsed = Duration::ZERO;
        if let Some(hidden) = self.hidden.as_mut() {
            elapsed = hidden.surface.current_time();
            hidden.pause()?;
        }
        handle.surface.seek(elapsed)?;
        if playing {
            handle.play()?;
        }

        self.embeds.insert(id, handle);
        self.set_embedded(true);
        if playing {
            self.set_status(PlaybackStatus::Playing);
        }
        info!(track_id = %id, ?elapsed, playing, "Playback handed over to embed");
        Ok(())
    }

    /// A non-current embed started: it becomes the current track
    fn promote_embed(&mut self, id: TrackId) -> Result<()> {
        let Some(track) = self.page_list.get(id).cloned() else {
            warn!(track_id = %id, "Embed playing for a row that is no longer rendered");
            return Ok(());
        };

        self.pause_hidden();
        self.pause_embeds(Some(id));

        let previous = self.current.replace(track).map(|previous| previous.id);
        self.set_embedded(true);
        self.set_status(PlaybackStatus::Playing);
        if previous != Some(id) {
            self.progress.reset();
            self.emit(PlaybackEvent::ProgressReset);
            self.emit_track_changed(Some(id), previous);
        }
        self.set_transport_visible(true);
        self.apply_volume_to_active()?;

        info!(track_id = %id, previous = ?previous, "Embed took over playback");
        Ok(())
    }

    fn embed_failed(&mut self, id: TrackId, code: u32) {
        warn!(track_id = %id, code, "Embed reported a playback error");
        self.emit(PlaybackEvent::notice(
            NoticeKind::Playback,
            format!("Track {id} cannot be played inline (error {code})"),
        ));
        self.close_embed_quietly(id);
    }

    /// Destroy an embed without any handoff
    pub(super) fn destroy_embed(&mut self, id: TrackId) {
        let handle = self
            .embeds
            .remove(&id)
            .or_else(|| self.pending_embeds.remove(&id));
        if let Some(mut handle) = handle {
            handle.surface.destroy();
            self.emit(PlaybackEvent::EmbedClosed { track_id: id });
        }
    }

    /// Close an embed, handing off if it was authoritative; failures are logged
    pub(super) fn close_embed_quietly(&mut self, id: TrackId) {
        if let Err(e) = self.exit_embed_mode(id) {
            warn!(track_id = %id, error = %e, "Failed to close embed cleanly");
        }
    }

    /// Unmount every embed ahead of a page transition
    ///
    /// The authoritative embed hands off to the hidden surface so playback
    /// continues while the next page loads.
    pub(super) fn teardown_embeds(&mut self) {
        let ids: Vec<TrackId> = self
            .embeds
            .keys()
            .chain(self.pending_embeds.keys())
            .copied()
            .collect();
        for id in ids {
            self.close_embed_quietly(id);
        }
    }
}
