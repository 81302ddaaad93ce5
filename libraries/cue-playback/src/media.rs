//! Media reference resolution
//!
//! Track rows carry an external video link. Embeddable surfaces need the
//! bare 11-character video id, so links are resolved here once.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Length of an embeddable video id
const VIDEO_ID_LEN: usize = 11;

/// Embeddable video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve a video link to its id
    ///
    /// Accepts `watch?v=`, `/embed/`, `/v/`, `/e/` and short `youtu.be` links.
    /// A missing scheme is tolerated.
    pub fn from_url(link: &str) -> Option<Self> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        let url = Url::parse(link)
            .or_else(|_| Url::parse(&format!("https://{link}")))
            .ok()?;
        let host = url.host_str()?.to_ascii_lowercase();
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let candidate = if host == "youtu.be" || host.ends_with(".youtu.be") {
            segments.first().map(|s| (*s).to_string())
        } else if host == "youtube.com"
            || host.ends_with(".youtube.com")
            || host.ends_with("youtube-nocookie.com")
        {
            match segments.as_slice() {
                ["embed" | "v" | "e", id, ..] => Some((*id).to_string()),
                _ => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
                    .or_else(|| {
                        // youtube.com/<a>/<b>/<id>
                        (segments.len() >= 3).then(|| segments[segments.len() - 1].to_string())
                    }),
            }
        } else {
            None
        };

        candidate.and_then(|c| Self::parse(&c))
    }

    /// Validate a bare id
    pub fn parse(candidate: &str) -> Option<Self> {
        let id: String = candidate.chars().take(VIDEO_ID_LEN).collect();
        let valid = id.chars().count() == VIDEO_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then_some(Self(id))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
