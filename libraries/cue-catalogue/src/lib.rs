//! Cue Catalogue Client
//!
//! HTTP client for the track catalogue server.
//!
//! # Features
//!
//! - **Pages**: Fetch one page of rows under a filter/sort/scope
//! - **Master list**: Fetch the ordered id sequence with each track's page
//! - **Playlists**: List playlists, membership, add/remove, reorder
//!
//! [`CatalogueClient`] implements [`cue_playback::CatalogueGateway`], so it
//! can drive a [`cue_playback::Controller`] directly.
//!
//! # Example
//!
//! ```ignore
//! use cue_catalogue::{CatalogueClient, CatalogueConfig};
//! use cue_playback::CatalogueQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogueClient::new(CatalogueConfig::new("https://tracks.example.com"))?;
//!
//!     let master = client.master(&CatalogueQuery::default()).await?;
//!     println!("{} tracks", master.len());
//!
//!     for playlist in client.playlists().list_playlists().await? {
//!         println!("{}: {}", playlist.id, playlist.name);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod playlists;

pub use client::{CatalogueClient, CatalogueConfig};
pub use error::{CatalogueError, Result};
pub use playlists::{Playlist, PlaylistClient};
