//! Playlist membership operations.

use crate::client::{check, decode};
use crate::error::{CatalogueError, Result};
use cue_playback::TrackId;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A playlist as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Playlist client for the catalogue server.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List every playlist
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, "Fetching playlists");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        let playlists: Vec<Playlist> = decode(response, "playlists").await?;

        debug!(count = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// Ids of the playlists containing `track`
    pub async fn membership(&self, track: TrackId) -> Result<Vec<u64>> {
        let url = format!("{}/api/tracks/{}/playlists", self.base_url, track);
        debug!(url = %url, "Fetching playlist membership");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        decode(response, "membership").await
    }

    /// Add `track` to a playlist
    pub async fn add_track(&self, playlist_id: u64, track: TrackId) -> Result<()> {
        let url = format!(
            "{}/api/playlists/{}/tracks/{}",
            self.base_url, playlist_id, track
        );

        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        check(response).await?;

        info!(playlist_id, track_id = %track, "Track added to playlist");
        Ok(())
    }

    /// Remove `track` from a playlist
    pub async fn remove_track(&self, playlist_id: u64, track: TrackId) -> Result<()> {
        let url = format!(
            "{}/api/playlists/{}/tracks/{}",
            self.base_url, playlist_id, track
        );

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        check(response).await?;

        info!(playlist_id, track_id = %track, "Track removed from playlist");
        Ok(())
    }

    /// Replace the order of a playlist's tracks
    pub async fn reorder(&self, playlist_id: u64, tracks: &[TrackId]) -> Result<()> {
        let url = format!("{}/api/playlists/{}/reorder", self.base_url, playlist_id);

        let response = self
            .http
            .post(&url)
            .json(tracks)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        check(response).await?;

        debug!(playlist_id, tracks = tracks.len(), "Playlist reordered");
        Ok(())
    }
}
