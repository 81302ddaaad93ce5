//! Headless video surfaces
//!
//! Stands in for the embeddable player: keeps a playhead per surface on the
//! runtime clock and reports ready/playing/paused/ended asynchronously over
//! a channel, the way a real player would.

use cue_playback::{
    LoadRequest, ReportedState, SurfaceEvent, SurfaceFactory, SurfaceSlot, VideoId, VideoSurface,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tracing::debug;

/// Surface notification waiting to be routed to the synchronizer
pub type Notification = (SurfaceSlot, SurfaceEvent);

#[derive(Debug)]
struct Playhead {
    video: VideoId,
    offset: Duration,
    started: Option<Instant>,
    duration: Duration,
}

impl Playhead {
    fn new(request: &LoadRequest, duration: Duration) -> Self {
        Self {
            video: request.video.clone(),
            offset: request.start_at.min(duration),
            started: None,
            duration,
        }
    }

    fn position(&self) -> Duration {
        let running = self.started.map_or(Duration::ZERO, |started| started.elapsed());
        (self.offset + running).min(self.duration)
    }

    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        self.offset = self.position();
        self.started = None;
    }
}

type Registry = Rc<RefCell<HashMap<SurfaceSlot, Playhead>>>;

/// Owner of every simulated surface
#[derive(Clone)]
pub struct Simulator {
    surfaces: Registry,
    events: UnboundedSender<Notification>,
    duration: Duration,
}

impl Simulator {
    /// Create a simulator whose tracks all last `duration`
    pub fn new(duration: Duration) -> (Self, UnboundedReceiver<Notification>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let simulator = Self {
            surfaces: Rc::default(),
            events,
            duration,
        };
        (simulator, receiver)
    }

    /// Factory to hand to the synchronizer
    pub fn factory(&self) -> Box<dyn SurfaceFactory> {
        Box::new(SimulatedFactory {
            simulator: self.clone(),
        })
    }

    /// Report every surface that has reached the end of its media
    pub fn poll_ended(&self) -> usize {
        let mut finished = Vec::new();
        for (slot, playhead) in self.surfaces.borrow_mut().iter_mut() {
            if playhead.started.is_some() && playhead.position() >= playhead.duration {
                playhead.stop();
                finished.push(*slot);
            }
        }

        for slot in &finished {
            self.notify(*slot, SurfaceEvent::StateChanged(ReportedState::Ended));
        }
        finished.len()
    }

    /// Video and position of a live surface
    pub fn playhead(&self, slot: SurfaceSlot) -> Option<(VideoId, Duration)> {
        self.surfaces
            .borrow()
            .get(&slot)
            .map(|playhead| (playhead.video.clone(), playhead.position()))
    }

    /// Slots whose playhead is moving
    pub fn running(&self) -> Vec<SurfaceSlot> {
        let mut slots: Vec<SurfaceSlot> = self
            .surfaces
            .borrow()
            .iter()
            .filter(|(_, playhead)| playhead.started.is_some())
            .map(|(slot, _)| *slot)
            .collect();
        slots.sort_by_key(|slot| slot.to_string());
        slots
    }

    fn notify(&self, slot: SurfaceSlot, event: SurfaceEvent) {
        // The receiver only goes away on shutdown
        let _ = self.events.send((slot, event));
    }

    fn with_playhead<T>(&self, slot: SurfaceSlot, f: impl FnOnce(&mut Playhead) -> T) -> Option<T> {
        self.surfaces.borrow_mut().get_mut(&slot).map(f)
    }
}

struct SimulatedFactory {
    simulator: Simulator,
}

impl SurfaceFactory for SimulatedFactory {
    fn create(
        &mut self,
        slot: SurfaceSlot,
        request: &LoadRequest,
    ) -> cue_playback::Result<Box<dyn VideoSurface>> {
        debug!(%slot, video = %request.video, autoplay = request.autoplay, "Creating simulated surface");

        let mut playhead = Playhead::new(request, self.simulator.duration);
        if request.autoplay {
            playhead.start();
        }
        self.simulator.surfaces.borrow_mut().insert(slot, playhead);

        self.simulator.notify(slot, SurfaceEvent::Ready);
        if request.autoplay {
            self.simulator
                .notify(slot, SurfaceEvent::StateChanged(ReportedState::Playing));
        }

        Ok(Box::new(SimulatedSurface {
            slot,
            simulator: self.simulator.clone(),
        }))
    }
}

struct SimulatedSurface {
    slot: SurfaceSlot,
    simulator: Simulator,
}

impl SimulatedSurface {
    fn report(&self, state: ReportedState) {
        self.simulator
            .notify(self.slot, SurfaceEvent::StateChanged(state));
    }
}

impl VideoSurface for SimulatedSurface {
    fn load(&mut self, request: &LoadRequest) -> cue_playback::Result<()> {
        let duration = self.simulator.duration;
        self.simulator.with_playhead(self.slot, |playhead| {
            *playhead = Playhead::new(request, duration);
            if request.autoplay {
                playhead.start();
            }
        });
        if request.autoplay {
            self.report(ReportedState::Playing);
        }
        Ok(())
    }

    fn play(&mut self) -> cue_playback::Result<()> {
        self.simulator.with_playhead(self.slot, Playhead::start);
        self.report(ReportedState::Playing);
        Ok(())
    }

    fn pause(&mut self) -> cue_playback::Result<()> {
        self.simulator.with_playhead(self.slot, Playhead::stop);
        self.report(ReportedState::Paused);
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> cue_playback::Result<()> {
        self.simulator.with_playhead(self.slot, |playhead| {
            playhead.offset = position.min(playhead.duration);
            if playhead.started.is_some() {
                playhead.started = Some(Instant::now());
            }
        });
        Ok(())
    }

    fn current_time(&self) -> Duration {
        self.simulator
            .with_playhead(self.slot, |playhead| playhead.position())
            .unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.simulator.with_playhead(self.slot, |playhead| playhead.duration)
    }

    fn set_volume(&mut self, level: u8) -> cue_playback::Result<()> {
        debug!(slot = %self.slot, level, "Simulated volume");
        Ok(())
    }

    fn mute(&mut self) -> cue_playback::Result<()> {
        debug!(slot = %self.slot, "Simulated mute");
        Ok(())
    }

    fn unmute(&mut self) -> cue_playback::Result<()> {
        debug!(slot = %self.slot, "Simulated unmute");
        Ok(())
    }

    fn destroy(&mut self) {
        self.simulator.surfaces.borrow_mut().remove(&self.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(autoplay: bool) -> LoadRequest {
        LoadRequest::new(VideoId::parse("o1jAMSQyVPc").unwrap(), autoplay)
    }

    fn drain(receiver: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_reports_ready_then_playing() {
        let (simulator, mut receiver) = Simulator::new(Duration::from_secs(60));
        let mut factory = simulator.factory();

        factory.create(SurfaceSlot::Hidden, &request(true)).unwrap();

        assert_eq!(
            drain(&mut receiver),
            vec![
                (SurfaceSlot::Hidden, SurfaceEvent::Ready),
                (
                    SurfaceSlot::Hidden,
                    SurfaceEvent::StateChanged(ReportedState::Playing)
                ),
            ]
        );
        assert_eq!(simulator.running(), vec![SurfaceSlot::Hidden]);
    }

    #[tokio::test(start_paused = true)]
    async fn playhead_advances_and_pauses() {
        let (simulator, _receiver) = Simulator::new(Duration::from_secs(60));
        let mut surface = simulator
            .factory()
            .create(SurfaceSlot::Hidden, &request(true))
            .unwrap();

        tokio::time::advance(Duration::from_secs(12)).await;
        assert_eq!(surface.current_time(), Duration::from_secs(12));

        surface.pause().unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(surface.current_time(), Duration::from_secs(12));

        surface.seek(Duration::from_secs(30)).unwrap();
        assert_eq!(surface.current_time(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_media_is_reported_once() {
        let (simulator, mut receiver) = Simulator::new(Duration::from_secs(60));
        let mut factory = simulator.factory();
        let _surface = factory.create(SurfaceSlot::Hidden, &request(true)).unwrap();
        drain(&mut receiver);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(simulator.poll_ended(), 1);
        assert_eq!(simulator.poll_ended(), 0);

        assert_eq!(
            drain(&mut receiver),
            vec![(
                SurfaceSlot::Hidden,
                SurfaceEvent::StateChanged(ReportedState::Ended)
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cued_embed_waits_at_offset() {
        let (simulator, mut receiver) = Simulator::new(Duration::from_secs(60));
        let slot = SurfaceSlot::Embed(cue_playback::TrackId(7));
        let request = LoadRequest::at(
            VideoId::parse("o1jAMSQyVPc").unwrap(),
            false,
            Duration::from_secs(42),
        );

        let surface = simulator.factory().create(slot, &request).unwrap();
        tokio::time::advance(Duration::from_secs(3)).await;

        assert_eq!(surface.current_time(), Duration::from_secs(42));
        assert_eq!(drain(&mut receiver), vec![(slot, SurfaceEvent::Ready)]);
        assert!(simulator.running().is_empty());
    }
}
