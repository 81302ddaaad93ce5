//! Async driver for the synchronizer
//!
//! Runs every fetch the synchronizer asks for, shows the loading indicator
//! when a fetch outlives its grace period, persists volume preferences and
//! renders after each transition. Intended for a single-threaded runtime;
//! one operation is in progress at a time.

use crate::{
    catalogue::{CatalogueQuery, PageRequest},
    error::Result,
    events::PlaybackEvent,
    gateway::{fetch_update, CatalogueGateway},
    intent::Intent,
    preferences::{MemoryPreferenceStore, PreferenceStore},
    presentation::{PlayerView, Presenter},
    progress::Progress,
    surface::{SurfaceEvent, SurfaceSlot},
    synchronizer::{Outcome, Synchronizer},
};
use tracing::{debug, warn};

/// Drives a [`Synchronizer`] against a gateway and a presenter
pub struct Controller<G, P> {
    sync: Synchronizer,
    gateway: G,
    presenter: P,
    preferences: Box<dyn PreferenceStore>,
}

impl<G, P> Controller<G, P>
where
    G: CatalogueGateway,
    P: Presenter,
{
    /// Create a controller with in-memory preferences
    pub fn new(sync: Synchronizer, gateway: G, presenter: P) -> Self {
        Self {
            sync,
            gateway,
            presenter,
            preferences: Box::new(MemoryPreferenceStore::default()),
        }
    }

    /// Persist preferences to `store`
    #[must_use]
    pub fn with_preferences(mut self, store: Box<dyn PreferenceStore>) -> Self {
        self.preferences = store;
        self
    }

    /// Synchronizer state
    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    /// Presenter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Preference store
    pub fn preference_store(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    /// Load the first page and master list for `query`
    pub async fn open(&mut self, query: CatalogueQuery) -> Result<Outcome> {
        let outcome = self.sync.request_catalogue(query);
        let result = self.follow(Ok(outcome)).await;
        self.render();
        result
    }

    /// Apply a user intent
    pub async fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        debug!(?intent, "Dispatching intent");
        let outcome = self.sync.dispatch(intent);
        let result = self.follow(outcome).await;
        self.render();
        result
    }

    /// Route a surface notification
    pub async fn surface_event(&mut self, slot: SurfaceSlot, event: SurfaceEvent) -> Result<Outcome> {
        let outcome = self.sync.handle_surface_event(slot, event);
        let result = self.follow(outcome).await;
        self.render();
        result
    }

    /// Progress poll tick
    pub fn tick(&mut self) -> Option<Progress> {
        let sample = self.sync.poll_progress();
        if sample.is_some() {
            self.render();
        }
        sample
    }

    async fn follow(&mut self, outcome: Result<Outcome>) -> Result<Outcome> {
        match outcome? {
            Outcome::PageRequested(request) => self.run_fetch(request).await,
            other => Ok(other),
        }
    }

    /// Fetch, showing the loading indicator once the grace period elapses
    async fn run_fetch(&mut self, request: PageRequest) -> Result<Outcome> {
        let grace = self.sync.config().loading_grace();
        let fetch = fetch_update(&self.gateway, &request);
        tokio::pin!(fetch);

        let result = tokio::select! {
            result = &mut fetch => result,
            () = tokio::time::sleep(grace) => {
                if self.sync.show_loading() {
                    render(&mut self.sync, &mut self.presenter, self.preferences.as_mut());
                }
                fetch.await
            }
        };

        self.sync.complete_fetch(request.token, result)
    }

    fn render(&mut self) {
        render(&mut self.sync, &mut self.presenter, self.preferences.as_mut());
    }
}

fn render<P: Presenter>(
    sync: &mut Synchronizer,
    presenter: &mut P,
    preferences: &mut dyn PreferenceStore,
) {
    let events = sync.drain_events();
    if events
        .iter()
        .any(|event| matches!(event, PlaybackEvent::VolumeChanged { .. }))
    {
        if let Err(e) = preferences.save(&sync.preferences()) {
            warn!(error = %e, "Failed to persist volume preferences");
        }
    }

    let view = PlayerView::build(sync);
    presenter.render(&view, &events);
}
