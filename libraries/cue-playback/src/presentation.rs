//! Presentation view model
//!
//! Everything a renderer needs after a transition, computed from the
//! synchronizer's read-only state. Renderers never touch the session
//! directly.

use crate::events::PlaybackEvent;
use crate::progress::{format_time, Progress};
use crate::session::DisplayRecord;
use crate::synchronizer::Synchronizer;
use crate::types::{PlaybackStatus, TrackId};
use serde::{Deserialize, Serialize};

/// Pagination shows every page up to this count
const MAX_FULL_PAGINATION: u32 = 10;

/// Pages shown on each side of the current page
const PAGINATION_NEIGHBOURS: u32 = 2;

/// Transport play button face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportIcon {
    Play,
    Pause,
}

/// Volume button face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    Muted,
    Off,
    Low,
    High,
}

impl VolumeIcon {
    /// Face for a level and mute flag
    pub fn for_level(level: u8, muted: bool) -> Self {
        match (muted, level) {
            (true, _) => VolumeIcon::Muted,
            (false, 0) => VolumeIcon::Off,
            (false, 1..=49) => VolumeIcon::Low,
            (false, _) => VolumeIcon::High,
        }
    }
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub track_id: TrackId,
    pub title: String,
    pub producer: String,

    /// Row is the current track
    pub highlighted: bool,

    /// Row play button face
    pub icon: TransportIcon,

    /// Row has its inline embed open
    pub embed_open: bool,
}

/// One pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Progress bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub percent: f64,
    pub elapsed: String,
    pub duration: String,
}

impl From<Progress> for ProgressView {
    fn from(progress: Progress) -> Self {
        Self {
            percent: progress.percent(),
            elapsed: format_time(progress.position),
            duration: progress
                .duration
                .map(format_time)
                .unwrap_or_else(|| format_time(std::time::Duration::ZERO)),
        }
    }
}

/// Complete player view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub now_playing: Option<DisplayRecord>,
    pub status: PlaybackStatus,
    pub transport_visible: bool,
    pub play_icon: TransportIcon,
    pub progress: ProgressView,
    pub volume: u8,
    pub volume_icon: VolumeIcon,
    pub shuffle: bool,
    pub repeat: bool,
    pub loading: bool,
    pub rows: Vec<RowView>,
    pub pagination: Vec<PageLink>,
}

impl PlayerView {
    /// Build the view for the synchronizer's current state
    pub fn build(sync: &Synchronizer) -> Self {
        let session = sync.session();
        let playing = matches!(
            session.status,
            PlaybackStatus::Playing | PlaybackStatus::Loading
        );

        let rows = sync
            .page_list()
            .tracks()
            .iter()
            .map(|track| {
                let highlighted = session.current_track == Some(track.id);
                RowView {
                    track_id: track.id,
                    title: track.title.clone(),
                    producer: track.producer.clone(),
                    highlighted,
                    icon: if highlighted && playing {
                        TransportIcon::Pause
                    } else {
                        TransportIcon::Play
                    },
                    embed_open: sync.has_embed(track.id),
                }
            })
            .collect();

        let pagination = sync.page_list().pagination();

        Self {
            now_playing: sync.display_record(),
            status: session.status,
            transport_visible: session.transport_visible,
            play_icon: if playing {
                TransportIcon::Pause
            } else {
                TransportIcon::Play
            },
            progress: ProgressView::from(sync.progress()),
            volume: session.volume,
            volume_icon: VolumeIcon::for_level(session.volume, session.muted),
            shuffle: session.shuffle,
            repeat: session.repeat,
            loading: sync.is_loading_visible(),
            rows,
            pagination: pagination_links(pagination.page, pagination.total_pages),
        }
    }
}

/// Pagination controls for `current` of `total` pages
///
/// Short ranges list every page. Longer ranges keep the first and last page
/// plus a window around the current one, with ellipses for the gaps. A
/// single page needs no controls.
pub fn pagination_links(current: u32, total: u32) -> Vec<PageLink> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let page = |number| PageLink::Page {
        number,
        current: number == current,
    };

    if total <= MAX_FULL_PAGINATION {
        return (1..=total).map(page).collect();
    }

    let start = current.saturating_sub(PAGINATION_NEIGHBOURS).max(2);
    let end = (current + PAGINATION_NEIGHBOURS).min(total - 1);

    let mut links = vec![page(1)];
    if start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((start..=end).map(page));
    if end < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(page(total));
    links
}

/// Renders views
///
/// `events` are the events drained for this transition, for renderers that
/// show transient messages (notices, external links).
pub trait Presenter {
    fn render(&mut self, view: &PlayerView, events: &[PlaybackEvent]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<Option<u32>> {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn short_ranges_list_every_page() {
        let links = pagination_links(3, 5);
        assert_eq!(
            numbers(&links),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        assert_eq!(
            links[2],
            PageLink::Page {
                number: 3,
                current: true
            }
        );
        assert!(pagination_links(1, 1).is_empty());
    }

    #[test]
    fn long_ranges_window_around_current() {
        assert_eq!(
            numbers(&pagination_links(10, 20)),
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20)
            ]
        );
        assert_eq!(
            numbers(&pagination_links(1, 20)),
            vec![Some(1), Some(2), Some(3), None, Some(20)]
        );
        assert_eq!(
            numbers(&pagination_links(20, 20)),
            vec![Some(1), None, Some(18), Some(19), Some(20)]
        );
    }

    #[test]
    fn volume_icon_levels() {
        assert_eq!(VolumeIcon::for_level(80, true), VolumeIcon::Muted);
        assert_eq!(VolumeIcon::for_level(0, false), VolumeIcon::Off);
        assert_eq!(VolumeIcon::for_level(30, false), VolumeIcon::Low);
        assert_eq!(VolumeIcon::for_level(50, false), VolumeIcon::High);
    }
}
