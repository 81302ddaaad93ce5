//! Console configuration

use anyhow::Context;
use cue_catalogue::CatalogueConfig;
use cue_playback::{CatalogueQuery, PageLimit, PlaybackConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when no path is given
const DEFAULT_CONFIG_FILE: &str = "cue.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub catalogue: CatalogueConfig,
    pub playback: PlaybackConfig,
    pub console: ConsoleSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Where volume preferences are kept between sessions
    pub preferences_path: PathBuf,

    /// Length of every simulated track
    pub simulated_duration_secs: u64,

    /// Rows per page (0 = all)
    pub page_size: u32,

    /// Restrict the catalogue to one playlist
    pub playlist: Option<u64>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            preferences_path: PathBuf::from("cue-preferences.json"),
            simulated_duration_secs: 180,
            page_size: 25,
            playlist: None,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `cue.toml` is optional.
    /// Environment variables prefixed with `CUE_` override file values,
    /// with `__` between sections (`CUE_CATALOGUE__BASE_URL`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings
                .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("CUE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;
        let config: Self = config
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.console.simulated_duration_secs == 0 {
            anyhow::bail!("console.simulated_duration_secs must be greater than zero");
        }
        if self.playback.volume > 100 || self.playback.unmute_volume > 100 {
            anyhow::bail!("playback volume levels must be within 0-100");
        }
        Ok(())
    }

    /// Query the session opens with
    pub fn initial_query(&self) -> CatalogueQuery {
        CatalogueQuery {
            scope: self.console.playlist,
            limit: match self.console.page_size {
                0 => PageLimit::All,
                n => PageLimit::Count(n),
            },
            ..CatalogueQuery::default()
        }
    }
}
