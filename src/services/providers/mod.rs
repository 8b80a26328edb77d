/// Catalog provider abstraction
///
/// Each upstream catalog (TMDB for films, Spotify for tracks) turns search
/// criteria into a `RequestPlan`, executes it, and optionally looks up trailers.
/// Splitting planning from execution keeps the endpoint decision testable
/// without HTTP.
use crate::{
    error::AppResult,
    models::{MediaKind, RequestPlan, SearchCriteria, SearchResult},
};

pub mod spotify;
pub mod tmdb;

pub use spotify::SpotifyProvider;
pub use tmdb::TmdbProvider;

/// Trait for upstream media catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Decide which endpoint and parameters serve these criteria
    ///
    /// May issue lookup calls (e.g. resolving a person name) but never the
    /// search itself.
    async fn plan(&self, criteria: &SearchCriteria) -> AppResult<RequestPlan>;

    /// Issue the planned call and parse one page of results
    async fn execute(&self, plan: &RequestPlan) -> AppResult<SearchResult>;

    /// Trailer key for a single item, `None` when the catalog has none
    async fn trailer_key(&self, item_id: &str) -> AppResult<Option<String>>;

    /// Whether `trailer_key` can ever return something
    fn has_trailers(&self) -> bool;

    fn kind(&self) -> MediaKind;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Turns a non-success upstream response into an error carrying its body
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    provider: &str,
) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(crate::error::AppError::Upstream(format!(
        "{} API returned status {}: {}",
        provider, status, body
    )))
}
