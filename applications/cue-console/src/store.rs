//! Preferences kept in a JSON file

use cue_playback::{PlaybackError, PreferenceStore, Preferences};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preference store backed by one JSON file
///
/// A missing file is an empty store. An unreadable one is logged and
/// treated the same way, so a corrupt file never blocks startup.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn load(&self) -> Option<Preferences> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read preferences");
                return None;
            }
        };

        match Preferences::from_json(&json) {
            Ok(preferences) => Some(preferences),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring stored preferences");
                None
            }
        }
    }

    fn save(&mut self, preferences: &Preferences) -> cue_playback::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PlaybackError::Storage(e.to_string()))?;
        }
        fs::write(&self.path, preferences.to_json())
            .map_err(|e| PlaybackError::Storage(e.to_string()))?;

        debug!(path = %self.path.display(), volume = preferences.volume, muted = preferences.muted, "Preferences saved");
        Ok(())
    }
}
