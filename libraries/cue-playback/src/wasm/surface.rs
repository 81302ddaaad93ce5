//! Surfaces backed by JavaScript player objects
//!
//! The page script owns the embeddable player SDK. A factory callback
//! receives the slot and load request and returns a player object with the
//! SDK's method names (`loadVideoById`, `playVideo`, `seekTo`, ...).

use crate::error::{PlaybackError, Result};
use crate::surface::{LoadRequest, SurfaceFactory, SurfaceSlot, VideoSurface};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};

fn js_error(context: &str, value: &JsValue) -> PlaybackError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "unknown error".to_string());
    PlaybackError::Surface(format!("{context}: {detail}"))
}

/// Load request as handed to JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsLoadRequest<'a> {
    video_id: &'a str,
    autoplay: bool,
    start_seconds: f64,
}

impl<'a> From<&'a LoadRequest> for JsLoadRequest<'a> {
    fn from(request: &'a LoadRequest) -> Self {
        Self {
            video_id: request.video.as_str(),
            autoplay: request.autoplay,
            start_seconds: request.start_at.as_secs_f64(),
        }
    }
}

/// One JavaScript player object
pub struct JsSurface {
    player: JsValue,
}

impl JsSurface {
    fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue> {
        let function = Reflect::get(&self.player, &JsValue::from_str(method))
            .map_err(|e| js_error(method, &e))?
            .dyn_into::<Function>()
            .map_err(|_| PlaybackError::Surface(format!("Player has no method {method}")))?;

        let arguments: Array = args.iter().collect();
        function
            .apply(&self.player, &arguments)
            .map_err(|e| js_error(method, &e))
    }

    fn call_number(&self, method: &str) -> Option<f64> {
        self.call(method, &[]).ok()?.as_f64()
    }
}

impl VideoSurface for JsSurface {
    fn load(&mut self, request: &LoadRequest) -> Result<()> {
        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("videoId"),
            &JsValue::from_str(request.video.as_str()),
        )
        .map_err(|e| js_error("load", &e))?;
        Reflect::set(
            &options,
            &JsValue::from_str("startSeconds"),
            &JsValue::from_f64(request.start_at.as_secs_f64()),
        )
        .map_err(|e| js_error("load", &e))?;

        // "cue" loads without starting
        let method = if request.autoplay {
            "loadVideoById"
        } else {
            "cueVideoById"
        };
        self.call(method, &[options.into()]).map(drop)
    }

    fn play(&mut self) -> Result<()> {
        self.call("playVideo", &[]).map(drop)
    }

    fn pause(&mut self) -> Result<()> {
        self.call("pauseVideo", &[]).map(drop)
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.call(
            "seekTo",
            &[JsValue::from_f64(position.as_secs_f64()), JsValue::TRUE],
        )
        .map(drop)
    }

    fn current_time(&self) -> Duration {
        self.call_number("getCurrentTime")
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map_or(Duration::ZERO, Duration::from_secs_f64)
    }

    fn duration(&self) -> Option<Duration> {
        self.call_number("getDuration")
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
    }

    fn set_volume(&mut self, level: u8) -> Result<()> {
        self.call("setVolume", &[JsValue::from(level)]).map(drop)
    }

    fn mute(&mut self) -> Result<()> {
        self.call("mute", &[]).map(drop)
    }

    fn unmute(&mut self) -> Result<()> {
        self.call("unMute", &[]).map(drop)
    }

    fn destroy(&mut self) {
        if let Err(e) = self.call("destroy", &[]) {
            tracing::debug!(error = %e, "Player destroy failed");
        }
    }
}

/// Factory calling `create(slot, request)` on the JavaScript side
pub struct JsSurfaceFactory {
    create: Function,
}

impl JsSurfaceFactory {
    pub fn new(create: Function) -> Self {
        Self { create }
    }
}

impl SurfaceFactory for JsSurfaceFactory {
    fn create(&mut self, slot: SurfaceSlot, request: &LoadRequest) -> Result<Box<dyn VideoSurface>> {
        let slot_value = serde_wasm_bindgen::to_value(&slot)
            .map_err(|e| PlaybackError::SurfaceUnavailable(e.to_string()))?;
        let request_value = serde_wasm_bindgen::to_value(&JsLoadRequest::from(request))
            .map_err(|e| PlaybackError::SurfaceUnavailable(e.to_string()))?;

        let player = self
            .create
            .call2(&JsValue::NULL, &slot_value, &request_value)
            .map_err(|e| PlaybackError::SurfaceUnavailable(js_error("create", &e).to_string()))?;
        if player.is_null() || player.is_undefined() {
            return Err(PlaybackError::SurfaceUnavailable(format!(
                "Factory returned no player for {slot}"
            )));
        }

        Ok(Box::new(JsSurface { player }))
    }
}
