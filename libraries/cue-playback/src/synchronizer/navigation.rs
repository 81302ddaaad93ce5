//! Next/previous traversal
//!
//! Traversal walks the shuffle projection when shuffle is on and the master
//! list otherwise, wrapping at both ends. A target on another page defers
//! its load until that page has been fetched and applied.

use super::{Outcome, PendingFetch, Synchronizer};
use crate::{
    catalogue::PageRequest,
    error::{PlaybackError, Result},
    events::{NoticeKind, PlaybackEvent},
    shuffle::{next_index, previous_index},
    types::{TrackId, TrackRef},
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

impl Synchronizer {
    /// Skip to the next track in traversal order
    pub fn play_next(&mut self) -> Result<Outcome> {
        self.step(Direction::Next)
    }

    /// Go to the previous track
    ///
    /// More than the restart threshold into the current track rewinds it
    /// and plays it from the top instead.
    pub fn play_previous(&mut self) -> Result<Outcome> {
        if self.current.is_none() {
            return Ok(Outcome::Unchanged);
        }
        let elapsed = self
            .active_handle()
            .map(|handle| handle.surface.current_time());
        if elapsed.is_some_and(|elapsed| elapsed > self.config.restart_threshold()) {
            return self.restart_current();
        }

        self.step(Direction::Previous)
    }

    /// Neighbour of the current track in traversal order
    pub fn peek_neighbour(&self, forward: bool) -> Option<TrackRef> {
        let current = self.current_id()?;
        let order = self.traversal();
        let index = order.iter().position(|entry| entry.id == current)?;
        let target = if forward {
            next_index(index, order.len())
        } else {
            previous_index(index, order.len())
        }?;
        order.get(target).copied()
    }

    fn step(&mut self, direction: Direction) -> Result<Outcome> {
        let Some(current) = self.current_id() else {
            return Ok(Outcome::Unchanged);
        };
        let Some(target) = self.peek_neighbour(direction == Direction::Next) else {
            // Empty list, or the current track fell out of it
            debug!(track_id = %current, ?direction, "No traversal neighbour");
            return Ok(Outcome::Unchanged);
        };

        if target.id == current {
            return self.restart_current();
        }

        if target.page == self.page_list.page() {
            return self.play_resolved(target.id);
        }

        info!(
            track_id = %target.id,
            page = target.page,
            "Traversal target is on another page"
        );
        Ok(Outcome::PageRequested(
            self.begin_page_transition(target.page, Some(target.id)),
        ))
    }

    /// Play a track that must be on the rendered page
    pub(super) fn play_resolved(&mut self, id: TrackId) -> Result<Outcome> {
        match self.page_list.get(id).cloned() {
            Some(track) => self.start_track(track),
            None => {
                warn!(track_id = %id, page = self.page_list.page(), "Traversal target missing from page");
                self.emit(PlaybackEvent::notice(
                    NoticeKind::Resolution,
                    format!("Track {id} could not be found on page {}", self.page_list.page()),
                ));
                Err(PlaybackError::TrackNotOnPage(id))
            }
        }
    }

    /// Unmount the page's embeds and issue a token for `page`
    ///
    /// Issuing a token supersedes any fetch still in flight.
    pub(super) fn begin_page_transition(
        &mut self,
        page: u32,
        deferred_play: Option<TrackId>,
    ) -> PageRequest {
        self.teardown_embeds();

        let token = self.tokens.issue();
        self.pending = Some(PendingFetch {
            token,
            query: None,
            deferred_play,
            deferred_from: self.current_id(),
        });
        debug!(%token, page, deferred = ?deferred_play, "Page transition requested");

        PageRequest {
            token,
            query: self.query.clone(),
            page,
            include_master: false,
        }
    }
}
