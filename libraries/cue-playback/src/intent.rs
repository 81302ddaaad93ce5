//! User intents
//!
//! Every control surface (transport bar, row buttons, seek bar, pagination,
//! filter form) reduces to one of these and goes through
//! [`Synchronizer::dispatch`].

use crate::catalogue::CatalogueQuery;
use crate::error::Result;
use crate::synchronizer::{Outcome, Synchronizer};
use crate::types::TrackId;
use std::time::Duration;

/// A user-initiated command
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Row play button
    PlayTrack(TrackId),
    TogglePlayPause,
    Next,
    Previous,
    Stop,
    SetShuffle(bool),
    SetRepeat(bool),
    SetVolume(u8),
    ToggleMute,
    /// Seek bar click (percent 0.0-100.0)
    SeekPercent(f64),
    /// User grabbed the seek handle
    SeekDragStart,
    /// User released the seek handle
    SeekDragEnd(Duration),
    /// Row "watch" toggle opened
    EnterEmbed(TrackId),
    /// Row "watch" toggle closed
    ExitEmbed(TrackId),
    /// Pagination link
    GoToPage(u32),
    /// Filter, sort or scope change
    ChangeQuery(CatalogueQuery),
}

impl Synchronizer {
    /// Apply a user intent
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            Intent::PlayTrack(id) => self.play_track(id),
            Intent::TogglePlayPause => self.toggle_play_pause(),
            Intent::Next => self.play_next(),
            Intent::Previous => self.play_previous(),
            Intent::Stop => self.stop(),
            Intent::SetShuffle(enabled) => {
                self.set_shuffle(enabled);
                Ok(Outcome::Unchanged)
            }
            Intent::SetRepeat(enabled) => {
                self.set_repeat(enabled);
                Ok(Outcome::Unchanged)
            }
            Intent::SetVolume(level) => {
                self.set_volume(level)?;
                Ok(Outcome::Unchanged)
            }
            Intent::ToggleMute => {
                self.toggle_mute()?;
                Ok(Outcome::Unchanged)
            }
            Intent::SeekPercent(percent) => {
                self.seek_to_percent(percent)?;
                Ok(Outcome::Unchanged)
            }
            Intent::SeekDragStart => {
                self.begin_seek_drag();
                Ok(Outcome::Unchanged)
            }
            Intent::SeekDragEnd(position) => {
                self.end_seek_drag(position)?;
                Ok(Outcome::Unchanged)
            }
            Intent::EnterEmbed(id) => self.enter_embed_mode(id),
            Intent::ExitEmbed(id) => self.exit_embed_mode(id),
            Intent::GoToPage(page) => Ok(self.request_page(page)),
            Intent::ChangeQuery(query) => Ok(self.request_catalogue(query)),
        }
    }
}
