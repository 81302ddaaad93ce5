//! Catalogue reconciliation
//!
//! Every fetch carries a request token. A response is applied only if its
//! token is still the latest issued; anything older is dropped without a
//! trace in the session.

use super::{Outcome, PendingFetch, Synchronizer};
use crate::{
    catalogue::{CatalogueQuery, CatalogueUpdate, MasterList, PageData, PageLocalList, RequestToken},
    error::{GatewayError, PlaybackError, Result},
    events::{NoticeKind, PlaybackEvent},
    shuffle::ShuffleProjection,
    types::TrackId,
};
use tracing::{debug, info, warn};

impl Synchronizer {
    /// Navigate to another page of the current query
    pub fn request_page(&mut self, page: u32) -> Outcome {
        Outcome::PageRequested(self.begin_page_transition(page.max(1), None))
    }

    /// Change filter, sort or scope
    ///
    /// The query is committed once the fetch succeeds; both the first page
    /// and the master list are refetched.
    pub fn request_catalogue(&mut self, query: CatalogueQuery) -> Outcome {
        self.teardown_embeds();

        let token = self.tokens.issue();
        self.pending = Some(PendingFetch {
            token,
            query: Some(query.clone()),
            deferred_play: None,
            deferred_from: None,
        });
        debug!(%token, ?query, "Catalogue refetch requested");

        Outcome::PageRequested(crate::catalogue::PageRequest {
            token,
            query,
            page: 1,
            include_master: true,
        })
    }

    /// Show the loading indicator for the outstanding fetch
    ///
    /// Called by the driver once the grace period has elapsed. Returns
    /// whether the indicator became visible.
    pub fn show_loading(&mut self) -> bool {
        if self.pending.is_none() || self.loading_visible {
            return false;
        }
        self.loading_visible = true;
        self.emit(PlaybackEvent::LoadingIndicator { visible: true });
        true
    }

    /// Hand back the result of a fetch
    ///
    /// Stale tokens are discarded. On failure the deferred play is
    /// abandoned and whatever is playing keeps playing. A deferred play
    /// only starts if the current track is still the one it was queued
    /// from.
    pub fn complete_fetch(
        &mut self,
        token: RequestToken,
        result: std::result::Result<CatalogueUpdate, GatewayError>,
    ) -> Result<Outcome> {
        let is_latest = self.tokens.is_current(token)
            && self.pending.as_ref().is_some_and(|pending| pending.token == token);
        if !is_latest {
            debug!(%token, latest = ?self.tokens.latest(), "Discarding stale catalogue response");
            return Ok(Outcome::Discarded);
        }
        let Some(pending) = self.pending.take() else {
            return Ok(Outcome::Discarded);
        };
        self.hide_loading();

        let update = match result {
            Ok(update) => update,
            Err(e) => {
                warn!(%token, error = %e, "Catalogue fetch failed");
                self.emit(PlaybackEvent::CatalogueFailed {
                    message: e.to_string(),
                });
                self.emit(PlaybackEvent::notice(
                    NoticeKind::Network,
                    "Could not load tracks, please try again",
                ));
                return Err(PlaybackError::Gateway(e));
            }
        };

        if let Some(query) = pending.query {
            self.query = query;
        }
        self.apply_catalogue(update.page, update.master);

        match pending.deferred_play {
            Some(id) if self.current_id() == pending.deferred_from => self.play_resolved(id),
            Some(id) => {
                debug!(
                    track_id = %id,
                    current = ?self.current_id(),
                    "Session moved on while the page loaded, dropping deferred play"
                );
                Ok(Outcome::CatalogueApplied)
            }
            None => Ok(Outcome::CatalogueApplied),
        }
    }

    /// Replace both lists with freshly fetched data
    ///
    /// Stops playback when the current track is no longer in the master
    /// list, and closes embeds whose rows are gone.
    pub fn on_catalogue_refresh(&mut self, page: PageData, master: MasterList) {
        self.apply_catalogue(page, Some(master));
    }

    fn apply_catalogue(&mut self, page: PageData, master: Option<MasterList>) {
        let page_list = PageLocalList::new(page.tracks, page.pagination);
        let gone: Vec<TrackId> = self
            .embeds
            .keys()
            .chain(self.pending_embeds.keys())
            .copied()
            .filter(|id| !page_list.contains(*id))
            .collect();

        self.page_list = page_list;
        if let Some(master) = master {
            self.master = master;
            if self.shuffle {
                self.projection = Some(ShuffleProjection::generate(&self.master));
            }
        }

        let current_gone = self
            .current_id()
            .is_some_and(|id| !self.master.contains(id));
        if current_gone {
            info!(track_id = ?self.current_id(), "Current track filtered out, stopping");
            // Stopping releases every embed and clears the session
            if let Err(e) = self.stop() {
                warn!(error = %e, "Failed to stop filtered-out track");
            }
        } else {
            for id in gone {
                self.close_embed_quietly(id);
            }
        }

        self.emit(PlaybackEvent::CatalogueApplied {
            page: self.page_list.page(),
            rows: self.page_list.len(),
            total: self.master.len(),
        });
    }

    fn hide_loading(&mut self) {
        if self.loading_visible {
            self.loading_visible = false;
            self.emit(PlaybackEvent::LoadingIndicator { visible: false });
        }
    }
}
