use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

mod criteria;

pub use criteria::SearchCriteria;

/// Which kind of catalog a provider searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Film,
    Music,
}

impl MediaKind {
    /// User-facing message for an empty result set
    pub fn no_results_message(&self) -> &'static str {
        match self {
            MediaKind::Film => "No movies found matching your criteria.",
            MediaKind::Music => "No songs found matching your criteria.",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Film => write!(f, "film"),
            MediaKind::Music => write!(f, "music"),
        }
    }
}

/// A movie or track as returned by the upstream catalog, plus its trailer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub trailer_key: Option<String>,
}

impl MediaItem {
    /// Wraps an upstream JSON object; anything else is rejected
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self {
                fields,
                trailer_key: None,
            }),
            _ => None,
        }
    }

    /// Upstream identifier, whether the catalog sends it as a number or a string
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub items: Vec<MediaItem>,
    pub total_pages: u32,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Bearer token issued by a client-credentials exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// `None` when the lifetime is negative or the expiry is not representable
    pub fn new(value: String, issued_at: DateTime<Utc>, expires_in_secs: i64) -> Option<Self> {
        if expires_in_secs < 0 {
            return None;
        }
        let expires_at = Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))?;
        Some(Self { value, expires_at })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Upstream call selected for a search, decided before anything is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPlan {
    /// Free-text search endpoint with the assembled parameters
    DirectSearch { params: Vec<(String, String)> },
    /// Catalog discovery filtered by a resolved cast member
    DiscoverByCast {
        cast_id: u64,
        params: Vec<(String, String)>,
    },
}

impl RequestPlan {
    pub fn params(&self) -> &[(String, String)] {
        match self {
            RequestPlan::DirectSearch { params } => params,
            RequestPlan::DiscoverByCast { params, .. } => params,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            RequestPlan::DirectSearch { .. } => "direct_search",
            RequestPlan::DiscoverByCast { .. } => "discover_by_cast",
        }
    }
}

// ============================================================================
// Spotify API Types
// ============================================================================

/// Response from the client-credentials token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Response from GET /v1/search?type=track
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackSearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub total: u32,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged response shared by the search and discover endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagedResults {
    #[serde(default)]
    pub results: Option<Vec<Value>>,
    #[serde(default)]
    pub total_pages: u32,
}

impl From<PagedResults> for SearchResult {
    fn from(paged: PagedResults) -> Self {
        let items: Vec<MediaItem> = paged
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(MediaItem::from_value)
            .collect();

        if items.is_empty() {
            return SearchResult::empty();
        }

        SearchResult {
            items,
            total_pages: paged.total_pages,
        }
    }
}

/// Person lookup result
#[derive(Debug, Clone, Deserialize)]
pub struct PersonResult {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonSearchResponse {
    #[serde(default)]
    pub results: Vec<PersonResult>,
}

/// Response from GET /movie/{id}/videos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListing {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub key: String,
}

impl VideoListing {
    /// Key of the first YouTube trailer, if any
    pub fn youtube_trailer_key(&self) -> Option<String> {
        self.results
            .iter()
            .find(|video| video.site == "YouTube" && video.video_type == "Trailer")
            .map(|video| video.key.clone())
            .filter(|key| !key.is_empty())
    }
}
