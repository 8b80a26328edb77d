/// TMDB film catalog provider
///
/// API Flow:
/// 1. Person lookup (optional): /search/person → first matching person ID
/// 2. Search: /search/movie with title/year, or /discover/movie filtered by
///    the resolved cast member and sorted by popularity
/// 3. Trailers: /movie/{id}/videos → first YouTube trailer
use crate::{
    error::{AppError, AppResult},
    models::{
        MediaKind, PagedResults, PersonSearchResponse, RequestPlan, SearchCriteria, SearchResult,
        VideoListing,
    },
    services::providers::{ensure_success, CatalogProvider},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const SEARCH_PATH: &str = "/search/movie";
const DISCOVER_PATH: &str = "/discover/movie";
const PERSON_SEARCH_PATH: &str = "/search/person";
const DISCOVER_SORT: &str = "popularity.desc";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Resolve a person name to a TMDB person ID
    ///
    /// Takes the first match; several people sharing a name are not
    /// disambiguated. Returns `None` when nobody matches.
    pub async fn resolve_person(&self, name: &str) -> AppResult<Option<u64>> {
        let params = vec![
            ("query".to_string(), name.to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        let response: PersonSearchResponse = self.get_json(PERSON_SEARCH_PATH, &params).await?;

        let person = response.results.first();
        tracing::debug!(
            name = %name,
            matches = response.results.len(),
            person_id = ?person.map(|p| p.id),
            "Person lookup completed"
        );

        Ok(person.map(|p| p.id))
    }

    /// Fixed parameters sent with every film search
    fn base_params(&self, page: u32) -> Vec<(String, String)> {
        vec![
            ("language".to_string(), self.language.clone()),
            ("page".to_string(), page.to_string()),
            ("include_adult".to_string(), "false".to_string()),
        ]
    }

    /// Build the request plan once the person lookup (if any) has finished
    ///
    /// A resolved cast ID switches to discovery and drops the title query.
    pub fn build_plan(&self, criteria: &SearchCriteria, cast_id: Option<u64>) -> RequestPlan {
        let mut params = self.base_params(criteria.page);

        match cast_id {
            Some(cast_id) => {
                params.push(("with_cast".to_string(), cast_id.to_string()));
                params.push(("sort_by".to_string(), DISCOVER_SORT.to_string()));
                if let Some(year) = &criteria.year {
                    params.push(("year".to_string(), year.clone()));
                }
                RequestPlan::DiscoverByCast { cast_id, params }
            }
            None => {
                if let Some(title) = &criteria.title {
                    params.push(("query".to_string(), title.clone()));
                }
                if let Some(year) = &criteria.year {
                    params.push(("year".to_string(), year.clone()));
                }
                RequestPlan::DirectSearch { params }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let response = ensure_success(response, "TMDB").await?;
        let response_text = response.text().await?;
        tracing::debug!(path = %path, response = %response_text, "Raw TMDB API response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize TMDB response"
            );
            AppError::Upstream(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn plan(&self, criteria: &SearchCriteria) -> AppResult<RequestPlan> {
        let Some(person) = &criteria.artist else {
            return Ok(self.build_plan(criteria, None));
        };

        let cast_id = match self.resolve_person(person).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                tracing::info!(
                    person = %person,
                    "No person matched, falling back to title search"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    person = %person,
                    "Person lookup failed, falling back to title search"
                );
                None
            }
        };

        Ok(self.build_plan(criteria, cast_id))
    }

    async fn execute(&self, plan: &RequestPlan) -> AppResult<SearchResult> {
        let path = match plan {
            RequestPlan::DirectSearch { .. } => {
                // The search endpoint rejects requests without a query term
                if plan.param("query").is_none() {
                    tracing::info!("Film search has no title term, skipping upstream call");
                    return Ok(SearchResult::empty());
                }
                SEARCH_PATH
            }
            RequestPlan::DiscoverByCast { .. } => DISCOVER_PATH,
        };

        let paged: PagedResults = self.get_json(path, plan.params()).await?;
        let result = SearchResult::from(paged);

        tracing::info!(
            plan = plan.label(),
            results = result.items.len(),
            total_pages = result.total_pages,
            provider = "tmdb",
            "Film search completed"
        );

        Ok(result)
    }

    async fn trailer_key(&self, item_id: &str) -> AppResult<Option<String>> {
        let path = format!("/movie/{}/videos", item_id);
        let listing: VideoListing = self.get_json(&path, &[]).await?;
        Ok(listing.youtube_trailer_key())
    }

    fn has_trailers(&self) -> bool {
        true
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Film
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
