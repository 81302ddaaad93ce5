//! WASM-compatible Synchronizer wrapper

use super::storage::LocalStoragePreferences;
use super::surface::JsSurfaceFactory;
use crate::{
    catalogue::{CatalogueQuery, CatalogueUpdate, MasterList, PageData, RequestToken},
    error::{GatewayError, PlaybackError},
    events::PlaybackEvent,
    preferences::PreferenceStore,
    presentation::PlayerView,
    surface::{SurfaceEvent, SurfaceSlot},
    synchronizer::{Outcome, Synchronizer},
    types::{PlaybackConfig, TrackId},
};
use js_sys::Function;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// WASM-compatible synchronizer
///
/// Every method returns the operation's outcome as a plain object. An
/// outcome of type `pageRequested` asks the page script to fetch and call
/// `completeFetch` (or `failFetch`) with the carried token.
#[wasm_bindgen]
pub struct WasmSynchronizer {
    inner: Synchronizer,
    preferences: LocalStoragePreferences,

    // Event callbacks
    on_event: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmSynchronizer {
    /// Create a synchronizer
    ///
    /// `create_surface(slot, request)` must return a player object, or
    /// `null` when the player SDK is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new(create_surface: Function, config: JsValue) -> Result<WasmSynchronizer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };

        let preferences = LocalStoragePreferences;
        let inner = Synchronizer::with_preferences(
            config,
            preferences.load(),
            Box::new(JsSurfaceFactory::new(create_surface)),
        );

        Ok(Self {
            inner,
            preferences,
            on_event: None,
            on_error: None,
        })
    }

    // ===== Playback Control =====

    /// Play a row from the rendered page
    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let result = self.inner.play_track(TrackId::from(u64::from(id)));
        self.finish(result)
    }

    /// Toggle play/pause on the active surface
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) -> Result<JsValue, JsValue> {
        let result = self.inner.toggle_play_pause();
        self.finish(result)
    }

    /// Skip to next track
    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        let result = self.inner.play_next();
        self.finish(result)
    }

    /// Go to previous track (or restart the current one)
    pub fn previous(&mut self) -> Result<JsValue, JsValue> {
        let result = self.inner.play_previous();
        self.finish(result)
    }

    /// Stop playback
    pub fn stop(&mut self) -> Result<JsValue, JsValue> {
        let result = self.inner.stop();
        self.finish(result)
    }

    // ===== Settings =====

    #[wasm_bindgen(js_name = setShuffle)]
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.inner.set_shuffle(enabled);
        self.flush_events();
    }

    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, enabled: bool) {
        self.inner.set_repeat(enabled);
        self.flush_events();
    }

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: u8) -> Result<JsValue, JsValue> {
        let result = self.inner.set_volume(level).map(|()| Outcome::Unchanged);
        self.finish(result)
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) -> Result<JsValue, JsValue> {
        let result = self.inner.toggle_mute().map(|()| Outcome::Unchanged);
        self.finish(result)
    }

    // ===== Seeking =====

    /// Seek bar click (0.0-100.0)
    #[wasm_bindgen(js_name = seekToPercent)]
    pub fn seek_to_percent(&mut self, percent: f64) -> Result<JsValue, JsValue> {
        let result = self.inner.seek_to_percent(percent).map(|()| Outcome::Unchanged);
        self.finish(result)
    }

    #[wasm_bindgen(js_name = beginSeekDrag)]
    pub fn begin_seek_drag(&mut self) {
        self.inner.begin_seek_drag();
    }

    #[wasm_bindgen(js_name = endSeekDrag)]
    pub fn end_seek_drag(&mut self, position_secs: f64) -> Result<JsValue, JsValue> {
        let position = Duration::from_secs_f64(position_secs.max(0.0));
        let result = self.inner.end_seek_drag(position).map(|()| Outcome::Unchanged);
        self.finish(result)
    }

    /// Progress poll tick; returns `{position, duration}` in seconds or `null`
    pub fn tick(&mut self) -> JsValue {
        let sample = self.inner.poll_progress();
        self.flush_events();

        match sample {
            Some(sample) => {
                let value = js_sys::Object::new();
                js_sys::Reflect::set(
                    &value,
                    &"position".into(),
                    &sample.position.as_secs_f64().into(),
                )
                .ok();
                js_sys::Reflect::set(
                    &value,
                    &"duration".into(),
                    &sample
                        .duration
                        .map_or(JsValue::NULL, |d| d.as_secs_f64().into()),
                )
                .ok();
                value.into()
            }
            None => JsValue::NULL,
        }
    }

    // ===== Embeds =====

    #[wasm_bindgen(js_name = enterEmbedMode)]
    pub fn enter_embed_mode(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let result = self.inner.enter_embed_mode(TrackId::from(u64::from(id)));
        self.finish(result)
    }

    #[wasm_bindgen(js_name = exitEmbedMode)]
    pub fn exit_embed_mode(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let result = self.inner.exit_embed_mode(TrackId::from(u64::from(id)));
        self.finish(result)
    }

    /// Forward a player event
    ///
    /// `slot` is `{kind: "hidden"}` or `{kind: "embed", track: id}`; `event`
    /// is `{type: "ready"}`, `{type: "stateChanged", value: "playing"}` or
    /// `{type: "error", value: code}`.
    #[wasm_bindgen(js_name = surfaceEvent)]
    pub fn surface_event(&mut self, slot: JsValue, event: JsValue) -> Result<JsValue, JsValue> {
        let slot: SurfaceSlot = serde_wasm_bindgen::from_value(slot)
            .map_err(|e| JsValue::from_str(&format!("Invalid surface slot: {e}")))?;
        let event: SurfaceEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Invalid surface event: {e}")))?;

        let result = self.inner.handle_surface_event(slot, event);
        self.finish(result)
    }

    // ===== Catalogue =====

    /// Pagination link
    #[wasm_bindgen(js_name = requestPage)]
    pub fn request_page(&mut self, page: u32) -> Result<JsValue, JsValue> {
        let outcome = self.inner.request_page(page);
        self.finish(Ok(outcome))
    }

    /// Filter, sort or scope change
    #[wasm_bindgen(js_name = requestCatalogue)]
    pub fn request_catalogue(&mut self, query: JsValue) -> Result<JsValue, JsValue> {
        let query: CatalogueQuery = serde_wasm_bindgen::from_value(query)
            .map_err(|e| JsValue::from_str(&format!("Invalid query: {e}")))?;
        let outcome = self.inner.request_catalogue(query);
        self.finish(Ok(outcome))
    }

    /// Grace period elapsed while a fetch is pending
    #[wasm_bindgen(js_name = showLoading)]
    pub fn show_loading(&mut self) -> bool {
        let shown = self.inner.show_loading();
        self.flush_events();
        shown
    }

    /// Hand back a successful fetch
    ///
    /// `page` is `{tracks, pagination}`; `master` is a list of
    /// `{id, page}` or `null` when it was not refetched.
    #[wasm_bindgen(js_name = completeFetch)]
    pub fn complete_fetch(
        &mut self,
        token: u32,
        page: JsValue,
        master: JsValue,
    ) -> Result<JsValue, JsValue> {
        let page: PageData = serde_wasm_bindgen::from_value(page)
            .map_err(|e| JsValue::from_str(&format!("Invalid page data: {e}")))?;
        let master: Option<MasterList> = if master.is_null() || master.is_undefined() {
            None
        } else {
            Some(
                serde_wasm_bindgen::from_value(master)
                    .map_err(|e| JsValue::from_str(&format!("Invalid master list: {e}")))?,
            )
        };

        let result = self.inner.complete_fetch(
            RequestToken(u64::from(token)),
            Ok(CatalogueUpdate { page, master }),
        );
        self.finish(result)
    }

    /// Hand back a failed fetch
    #[wasm_bindgen(js_name = failFetch)]
    pub fn fail_fetch(&mut self, token: u32, status: u16, message: String) -> Result<JsValue, JsValue> {
        let error = if status == 0 {
            GatewayError::Unreachable(message)
        } else {
            GatewayError::Server { status, message }
        };
        let result = self
            .inner
            .complete_fetch(RequestToken(u64::from(token)), Err(error));
        self.finish(result)
    }

    // ===== State Queries =====

    /// Session snapshot
    #[wasm_bindgen(js_name = getSession)]
    pub fn get_session(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.session()).unwrap_or(JsValue::NULL)
    }

    /// Full view model for rendering
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&PlayerView::build(&self.inner)).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isDegraded)]
    pub fn is_degraded(&self) -> bool {
        self.inner.is_degraded()
    }

    // ===== Event Listeners =====

    /// Register event callback, called once per playback event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn finish(&mut self, result: crate::error::Result<Outcome>) -> Result<JsValue, JsValue> {
        self.flush_events();
        match result {
            Ok(outcome) => serde_wasm_bindgen::to_value(&outcome)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}"))),
            Err(e) => Err(self.handle_error(&e)),
        }
    }

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();

        if events
            .iter()
            .any(|event| matches!(event, PlaybackEvent::VolumeChanged { .. }))
        {
            if let Err(e) = self.preferences.save(&self.inner.preferences()) {
                tracing::warn!(error = %e, "Failed to persist volume preferences");
            }
        }

        if let Some(ref cb) = self.on_event {
            for event in &events {
                if let Ok(value) = serde_wasm_bindgen::to_value(event) {
                    cb.call1(&JsValue::NULL, &value).ok();
                }
            }
        }
    }

    fn handle_error(&self, error: &PlaybackError) -> JsValue {
        let err_msg = error.to_string();

        // Emit error event
        if let Some(ref cb) = self.on_error {
            cb.call1(&JsValue::NULL, &JsValue::from_str(&err_msg)).ok();
        }

        JsValue::from_str(&err_msg)
    }
}
