/// Spotify track catalog provider
///
/// Authenticates with the client-credentials flow and searches
/// /v1/search?type=track with a fielded query such as
/// `track:Song+artist:Band+album:Record`. Spotify has no trailer lookup.
use crate::{
    error::{AppError, AppResult},
    models::{MediaItem, MediaKind, RequestPlan, SearchCriteria, SearchResult, TrackSearchResponse},
    services::{
        providers::{ensure_success, CatalogProvider},
        token::TokenProvider,
    },
};
use reqwest::Client as HttpClient;

/// Tracks per page; Spotify's own default
const PAGE_SIZE: u32 = 20;

/// Largest `offset` Spotify's search endpoint accepts
const MAX_OFFSET: u32 = 1000;

#[derive(Clone)]
pub struct SpotifyProvider {
    http_client: HttpClient,
    api_url: String,
    tokens: TokenProvider,
}

impl SpotifyProvider {
    pub fn new(http_client: HttpClient, api_url: String, tokens: TokenProvider) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Fielded query built from whichever of track/artist/album are present
    ///
    /// Fragments are separated by a space, which form encoding puts on the
    /// wire as `+`.
    pub fn build_query(criteria: &SearchCriteria) -> String {
        [
            ("track", &criteria.title),
            ("artist", &criteria.artist),
            ("album", &criteria.album),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| format!("{}:{}", field, v)))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Rejects pages whose offset Spotify would refuse
    pub fn build_plan(criteria: &SearchCriteria) -> AppResult<RequestPlan> {
        let offset = criteria
            .page
            .saturating_sub(1)
            .checked_mul(PAGE_SIZE)
            .filter(|offset| *offset <= MAX_OFFSET)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Page {} is beyond the last searchable page",
                    criteria.page
                ))
            })?;

        Ok(RequestPlan::DirectSearch {
            params: vec![
                ("q".to_string(), Self::build_query(criteria)),
                ("type".to_string(), "track".to_string()),
                ("limit".to_string(), PAGE_SIZE.to_string()),
                ("offset".to_string(), offset.to_string()),
            ],
        })
    }

    fn total_pages(total: u32) -> u32 {
        total.div_ceil(PAGE_SIZE)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for SpotifyProvider {
    async fn plan(&self, criteria: &SearchCriteria) -> AppResult<RequestPlan> {
        Self::build_plan(criteria)
    }

    async fn execute(&self, plan: &RequestPlan) -> AppResult<SearchResult> {
        if let RequestPlan::DiscoverByCast { .. } = plan {
            return Err(AppError::Internal(
                "Spotify does not support cast discovery".to_string(),
            ));
        }

        // Year-only searches have no fielded terms for Spotify to match
        if plan.param("q").map_or(true, str::is_empty) {
            tracing::info!("Track search has no query terms, skipping upstream call");
            return Ok(SearchResult::empty());
        }

        let token = self.tokens.get_token().await?;
        let url = format!("{}/v1/search", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token.value)
            .query(plan.params())
            .send()
            .await?;

        let response = ensure_success(response, "Spotify").await?;
        let response_text = response.text().await?;
        tracing::debug!(
            response = %response_text.chars().take(200).collect::<String>(),
            "Raw Spotify API response"
        );

        let parsed: TrackSearchResponse = serde_json::from_str(&response_text)
            .map_err(|e| AppError::Upstream(format!("Failed to parse Spotify response: {}", e)))?;

        let page = parsed.tracks.unwrap_or_default();
        let items: Vec<MediaItem> = page
            .items
            .into_iter()
            .filter_map(MediaItem::from_value)
            .collect();

        let result = if items.is_empty() {
            SearchResult::empty()
        } else {
            SearchResult {
                items,
                total_pages: Self::total_pages(page.total),
            }
        };

        tracing::info!(
            query = ?plan.param("q"),
            results = result.items.len(),
            total_pages = result.total_pages,
            provider = "spotify",
            "Track search completed"
        );

        Ok(result)
    }

    async fn trailer_key(&self, _item_id: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn has_trailers(&self) -> bool {
        false
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Music
    }

    fn name(&self) -> &'static str {
        "spotify"
    }
}
