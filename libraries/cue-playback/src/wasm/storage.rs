//! Preferences stored in `window.localStorage`

use crate::error::{PlaybackError, Result};
use crate::preferences::{PreferenceStore, Preferences};
use web_sys::Storage;

/// Storage key for volume preferences
const PREFERENCES_KEY: &str = "cue.preferences";

/// Preference store backed by local storage
///
/// Missing or blocked storage (private mode, sandboxed frames) behaves as
/// an empty store; saves then fail and are logged by the caller.
#[derive(Debug, Clone, Default)]
pub struct LocalStoragePreferences;

impl LocalStoragePreferences {
    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn load(&self) -> Option<Preferences> {
        let json = Self::storage()?.get_item(PREFERENCES_KEY).ok()??;
        Preferences::from_json(&json).ok()
    }

    fn save(&mut self, preferences: &Preferences) -> Result<()> {
        let storage = Self::storage()
            .ok_or_else(|| PlaybackError::Storage("local storage unavailable".into()))?;
        storage
            .set_item(PREFERENCES_KEY, &preferences.to_json())
            .map_err(|_| PlaybackError::Storage("local storage rejected write".into()))
    }
}
