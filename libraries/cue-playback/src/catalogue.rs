//! Catalogue snapshots
//!
//! Two views of the catalogue are kept side by side:
//! - Page-local list: rows currently rendered (one page)
//! - Master list: every id matching the active filter/sort, with its page
//!
//! Both are rebuilt wholesale on every successful fetch.

use crate::types::{Track, TrackId, TrackRef};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Page size selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLimit {
    /// Every matching track on a single page
    #[default]
    All,

    /// Fixed number of rows per page
    Count(u32),
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLimit::All => f.write_str("all"),
            PageLimit::Count(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for PageLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PageLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(0) => Ok(PageLimit::All),
            Raw::Number(n) => Ok(PageLimit::Count(n)),
            Raw::Text(text) if text.eq_ignore_ascii_case("all") => Ok(PageLimit::All),
            Raw::Text(text) => match text.trim().parse::<u32>() {
                Ok(0) => Ok(PageLimit::All),
                Ok(n) => Ok(PageLimit::Count(n)),
                Err(_) => Err(de::Error::custom(format!("invalid page limit: {text}"))),
            },
        }
    }
}

/// Pagination metadata returned with every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-based)
    pub page: u32,

    /// Page size
    pub limit: PageLimit,

    /// Total number of pages (at least 1)
    pub total_pages: u32,

    /// Total number of matching tracks (when reported)
    #[serde(default)]
    pub total_tracks: Option<u32>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PageLimit::All,
            total_pages: 1,
            total_tracks: None,
        }
    }
}

/// Filter, sort and scope of the catalogue view
///
/// Pagination is not part of the query: a page transition keeps the query
/// and only changes the requested page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogueQuery {
    /// Free-form filters (`title_filter`, `producer_filter`, ...)
    #[serde(default)]
    pub filters: BTreeMap<String, String>,

    /// Sort column
    #[serde(default)]
    pub sort_by: Option<String>,

    /// Sort direction (`asc`/`desc`)
    #[serde(default)]
    pub sort_dir: Option<String>,

    /// Static scope, e.g. a single playlist
    #[serde(default)]
    pub scope: Option<u64>,

    /// Page size
    #[serde(default)]
    pub limit: PageLimit,
}

impl CatalogueQuery {
    /// Query pairs for a master-list request (no pagination)
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(ref sort_by) = self.sort_by {
            pairs.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(ref sort_dir) = self.sort_dir {
            pairs.push(("sort_dir".to_string(), sort_dir.clone()));
        }
        if let Some(scope) = self.scope {
            pairs.push(("playlist_id".to_string(), scope.to_string()));
        }

        pairs
    }

    /// Query pairs for a page request
    pub fn to_page_query_pairs(&self, page: u32) -> Vec<(String, String)> {
        let mut pairs = self.to_query_pairs();
        pairs.push(("page".to_string(), page.max(1).to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs
    }
}

/// Rows currently rendered
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLocalList {
    tracks: Vec<Track>,
    pagination: Pagination,
}

impl PageLocalList {
    /// Create from a fetched page
    pub fn new(tracks: Vec<Track>, pagination: Pagination) -> Self {
        Self { tracks, pagination }
    }

    /// Rendered page number
    pub fn page(&self) -> u32 {
        self.pagination.page
    }

    /// Pagination metadata
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Resolve a track id to its row
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Whether the id is rendered
    pub fn contains(&self, id: TrackId) -> bool {
        self.get(id).is_some()
    }

    /// Rows in display order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if no rows are rendered
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Full ordered id sequence for the active filter/sort
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasterList {
    entries: Vec<TrackRef>,
}

impl MasterList {
    /// Create from server order
    pub fn new(entries: Vec<TrackRef>) -> Self {
        Self { entries }
    }

    /// Entries in server sort order
    pub fn entries(&self) -> &[TrackRef] {
        &self.entries
    }

    /// Position of a track in server order
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.entries.iter().position(|r| r.id == id)
    }

    /// Page a track appears on
    pub fn page_of(&self, id: TrackId) -> Option<u32> {
        self.entries.iter().find(|r| r.id == id).map(|r| r.page)
    }

    /// Whether the id is part of the result set
    pub fn contains(&self, id: TrackId) -> bool {
        self.position_of(id).is_some()
    }

    /// Number of tracks in the result set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the result set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One fetched page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageData {
    /// Rows in display order
    pub tracks: Vec<Track>,

    /// Pagination metadata
    pub pagination: Pagination,
}

/// Result of a catalogue fetch
///
/// `master` is `None` for filter/sort-preserving page transitions, where the
/// current master list stays valid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogueUpdate {
    /// Freshly fetched page
    pub page: PageData,

    /// Freshly fetched master list, if it was refetched
    pub master: Option<MasterList>,
}

/// Monotonic marker for catalogue requests
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request tokens and recognises the latest one
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer {
    latest: u64,
}

impl TokenIssuer {
    /// Issue a new token, superseding every earlier one
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Latest issued token
    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest > 0).then_some(RequestToken(self.latest))
    }

    /// Whether a response carrying `token` may be applied
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest > 0 && token.0 == self.latest
    }
}

/// A fetch the driver must perform on behalf of the synchronizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Token to hand back with the result
    pub token: RequestToken,

    /// Query under which to fetch
    pub query: CatalogueQuery,

    /// Page to fetch
    pub page: u32,

    /// Whether the master list must be refetched as well
    pub include_master: bool,
}
