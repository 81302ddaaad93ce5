//! WASM bindings for cue-playback
//!
//! Exposes the synchronizer to the page script. The embeddable player SDK
//! stays on the JavaScript side: surfaces are plain JS objects created by a
//! factory callback, and their events are forwarded back in.

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
pub mod surface;

#[cfg(feature = "wasm")]
pub mod synchronizer;

#[cfg(feature = "wasm")]
pub use storage::LocalStoragePreferences;

#[cfg(feature = "wasm")]
pub use synchronizer::WasmSynchronizer;
