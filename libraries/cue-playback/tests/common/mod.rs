//! Shared fakes for synchronizer tests
//!
//! Surfaces record every call into one ordered log and keep a tiny model
//! of their own state (loaded media, playing flag, position) so tests can
//! assert on what the user would actually hear.

#![allow(dead_code)]

use cue_playback::{
    CatalogueUpdate, LoadRequest, MasterList, PageData, PageLimit, Pagination, PlaybackConfig,
    PlaybackError, SurfaceFactory, SurfaceSlot, Synchronizer, Track, TrackId, TrackRef,
    VideoSurface,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// One observable call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        slot: SurfaceSlot,
        video: String,
        autoplay: bool,
        start_at: Duration,
    },
    Load {
        slot: SurfaceSlot,
        video: String,
        autoplay: bool,
        start_at: Duration,
    },
    Play(SurfaceSlot),
    Pause(SurfaceSlot),
    Seek(SurfaceSlot, Duration),
    SetVolume(SurfaceSlot, u8),
    Mute(SurfaceSlot),
    Unmute(SurfaceSlot),
    Destroy(SurfaceSlot),
    /// Recorded by the test when it answers a page request
    Fetch { page: u32, include_master: bool },
}

/// Modelled state of one fake surface
#[derive(Debug, Clone, PartialEq)]
pub struct FakeState {
    pub video: String,
    pub playing: bool,
    pub time: Duration,
    pub duration: Duration,
    pub volume: u8,
    pub muted: bool,
    pub destroyed: bool,
}

type Log = Rc<RefCell<Vec<Call>>>;
type Registry = Rc<RefCell<HashMap<SurfaceSlot, FakeState>>>;

/// Test harness owning the shared log and surface registry
#[derive(Clone, Default)]
pub struct Harness {
    log: Log,
    surfaces: Registry,
    fail_create: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory recording into this harness
    pub fn factory(&self) -> Box<dyn SurfaceFactory> {
        Box::new(FakeFactory {
            harness: self.clone(),
        })
    }

    /// Make every later surface creation fail
    pub fn fail_creation(&self) {
        self.fail_create.set(true);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn record_fetch(&self, page: u32, include_master: bool) {
        self.log.borrow_mut().push(Call::Fetch {
            page,
            include_master,
        });
    }

    pub fn state(&self, slot: SurfaceSlot) -> Option<FakeState> {
        self.surfaces.borrow().get(&slot).cloned()
    }

    /// Move a surface's playhead (as if time passed)
    pub fn set_time(&self, slot: SurfaceSlot, time: Duration) {
        if let Some(state) = self.surfaces.borrow_mut().get_mut(&slot) {
            state.time = time;
        }
    }

    /// Run a surface to the end of its media
    pub fn finish(&self, slot: SurfaceSlot) {
        self.with_state(slot, |state| {
            state.playing = false;
            state.time = state.duration;
        });
    }

    /// Slots of live surfaces that are playing
    pub fn playing_slots(&self) -> Vec<SurfaceSlot> {
        let mut slots: Vec<SurfaceSlot> = self
            .surfaces
            .borrow()
            .iter()
            .filter(|(_, state)| state.playing && !state.destroyed)
            .map(|(slot, _)| *slot)
            .collect();
        slots.sort_by_key(|slot| slot.to_string());
        slots
    }

    /// Index of the first call matching `predicate`
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.log.borrow().iter().position(predicate)
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }

    fn with_state(&self, slot: SurfaceSlot, f: impl FnOnce(&mut FakeState)) {
        if let Some(state) = self.surfaces.borrow_mut().get_mut(&slot) {
            f(state);
        }
    }
}

struct FakeFactory {
    harness: Harness,
}

impl SurfaceFactory for FakeFactory {
    fn create(
        &mut self,
        slot: SurfaceSlot,
        request: &LoadRequest,
    ) -> cue_playback::Result<Box<dyn VideoSurface>> {
        if self.harness.fail_create.get() {
            return Err(PlaybackError::SurfaceUnavailable("SDK failed to load".into()));
        }

        self.harness.push(Call::Create {
            slot,
            video: request.video.to_string(),
            autoplay: request.autoplay,
            start_at: request.start_at,
        });
        self.harness.surfaces.borrow_mut().insert(
            slot,
            FakeState {
                video: request.video.to_string(),
                playing: request.autoplay,
                time: request.start_at,
                duration: Duration::from_secs(180),
                volume: 100,
                muted: false,
                destroyed: false,
            },
        );

        Ok(Box::new(FakeSurface {
            slot,
            harness: self.harness.clone(),
        }))
    }
}

struct FakeSurface {
    slot: SurfaceSlot,
    harness: Harness,
}

impl VideoSurface for FakeSurface {
    fn load(&mut self, request: &LoadRequest) -> cue_playback::Result<()> {
        self.harness.push(Call::Load {
            slot: self.slot,
            video: request.video.to_string(),
            autoplay: request.autoplay,
            start_at: request.start_at,
        });
        self.harness.with_state(self.slot, |state| {
            state.video = request.video.to_string();
            state.playing = request.autoplay;
            state.time = request.start_at;
        });
        Ok(())
    }

    fn play(&mut self) -> cue_playback::Result<()> {
        self.harness.push(Call::Play(self.slot));
        self.harness.with_state(self.slot, |state| state.playing = true);
        Ok(())
    }

    fn pause(&mut self) -> cue_playback::Result<()> {
        self.harness.push(Call::Pause(self.slot));
        self.harness.with_state(self.slot, |state| state.playing = false);
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> cue_playback::Result<()> {
        self.harness.push(Call::Seek(self.slot, position));
        self.harness.with_state(self.slot, |state| state.time = position);
        Ok(())
    }

    fn current_time(&self) -> Duration {
        self.harness
            .state(self.slot)
            .map_or(Duration::ZERO, |state| state.time)
    }

    fn duration(&self) -> Option<Duration> {
        self.harness.state(self.slot).map(|state| state.duration)
    }

    fn set_volume(&mut self, level: u8) -> cue_playback::Result<()> {
        self.harness.push(Call::SetVolume(self.slot, level));
        self.harness.with_state(self.slot, |state| state.volume = level);
        Ok(())
    }

    fn mute(&mut self) -> cue_playback::Result<()> {
        self.harness.push(Call::Mute(self.slot));
        self.harness.with_state(self.slot, |state| state.muted = true);
        Ok(())
    }

    fn unmute(&mut self) -> cue_playback::Result<()> {
        self.harness.push(Call::Unmute(self.slot));
        self.harness.with_state(self.slot, |state| state.muted = false);
        Ok(())
    }

    fn destroy(&mut self) {
        self.harness.push(Call::Destroy(self.slot));
        let mut surfaces = self.harness.surfaces.borrow_mut();
        if let Some(state) = surfaces.get_mut(&self.slot) {
            state.destroyed = true;
            state.playing = false;
        }
    }
}

// ===== Catalogue Builders =====

/// Media id the fake catalogue assigns to a track
pub fn video_of(id: u64) -> String {
    format!("vid{id:08}")
}

pub fn track(id: u64) -> Track {
    Track {
        id: TrackId(id),
        title: format!("Track {id}"),
        producer: format!("Producer {id}"),
        link: format!("https://www.youtube.com/watch?v={}", video_of(id)),
        image_url: None,
    }
}

/// A track whose link is not embeddable
pub fn external_track(id: u64) -> Track {
    Track {
        link: format!("https://soundcloud.com/someone/track-{id}"),
        ..track(id)
    }
}

pub fn page(ids: &[u64], page: u32, total_pages: u32) -> PageData {
    PageData {
        tracks: ids.iter().copied().map(track).collect(),
        pagination: Pagination {
            page,
            limit: PageLimit::Count(ids.len().max(1) as u32),
            total_pages,
            total_tracks: None,
        },
    }
}

pub fn master(entries: &[(u64, u32)]) -> MasterList {
    MasterList::new(
        entries
            .iter()
            .map(|&(id, page)| TrackRef {
                id: TrackId(id),
                page,
            })
            .collect(),
    )
}

pub fn update(page_data: PageData, master: Option<MasterList>) -> CatalogueUpdate {
    CatalogueUpdate {
        page: page_data,
        master,
    }
}

/// Synchronizer with page 1 rendered and the given master list applied
pub fn synchronizer(harness: &Harness, page_ids: &[u64], entries: &[(u64, u32)]) -> Synchronizer {
    let total_pages = entries.iter().map(|&(_, page)| page).max().unwrap_or(1);
    let mut sync = Synchronizer::new(PlaybackConfig::default(), harness.factory());
    sync.on_catalogue_refresh(page(page_ids, 1, total_pages), master(entries));
    sync.drain_events();
    sync
}

/// Assert the audibility invariant on the fake surfaces
pub fn assert_at_most_one_playing(harness: &Harness) {
    let playing = harness.playing_slots();
    assert!(
        playing.len() <= 1,
        "more than one surface playing: {playing:?}"
    );
}
