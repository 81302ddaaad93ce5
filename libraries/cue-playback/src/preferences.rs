//! Persisted volume preferences
//!
//! A session is seeded from the stored preferences and writes them back
//! whenever volume or mute changes. Where they are stored is up to the
//! platform.

use crate::error::{PlaybackError, Result};
use crate::types::PlaybackConfig;
use serde::{Deserialize, Serialize};

/// Volume preferences carried across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Volume level (0-100)
    pub volume: u8,

    /// Mute flag
    pub muted: bool,
}

impl Preferences {
    /// Seed a configuration with these preferences
    pub fn apply_to(&self, config: &mut PlaybackConfig) {
        config.volume = self.volume.min(100);
        config.muted = self.muted;
    }

    /// Decode from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            PlaybackError::Storage(format!("invalid stored preferences: {e}"))
        })
    }

    /// Encode to JSON
    pub fn to_json(&self) -> String {
        // A struct of two plain fields always serializes
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Default for Preferences {
    fn default() -> Self {
        let config = PlaybackConfig::default();
        Self {
            volume: config.volume,
            muted: config.muted,
        }
    }
}

/// Storage backend for preferences
pub trait PreferenceStore {
    /// Load stored preferences, if any
    fn load(&self) -> Option<Preferences>;

    /// Persist preferences
    fn save(&mut self, preferences: &Preferences) -> Result<()>;
}

/// In-memory store (tests, ephemeral sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    stored: Option<Preferences>,
}

impl MemoryPreferenceStore {
    /// Create a store holding `preferences`
    pub fn with(preferences: Preferences) -> Self {
        Self {
            stored: Some(preferences),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<Preferences> {
        self.stored
    }

    fn save(&mut self, preferences: &Preferences) -> Result<()> {
        self.stored = Some(*preferences);
        Ok(())
    }
}
