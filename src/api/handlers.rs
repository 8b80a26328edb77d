use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{MediaItem, SearchCriteria};
use crate::services::SearchOrchestrator;

use super::AppState;

// Request/Response types

/// Search form fields shared by the film and music pages
///
/// `title` doubles as `track`, `artist` doubles as `person`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default, alias = "track")]
    pub title: Option<String>,
    #[serde(default, alias = "person")]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl SearchForm {
    pub fn into_criteria(self) -> AppResult<SearchCriteria> {
        let page = SearchCriteria::parse_page(self.page.as_deref())?;
        Ok(SearchCriteria::new(
            self.title.as_deref(),
            self.artist.as_deref(),
            self.album.as_deref(),
            self.year.as_deref(),
            page,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    pub theme: Option<String>,
}

/// Everything the presentation layer needs to render a results page
#[derive(Debug, Serialize)]
pub struct SearchPageResponse {
    pub theme: String,
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<MediaItem>,
    /// Set when there is nothing to show: bad input or no matches
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoadMoreResponse {
    pub movies: Vec<MediaItem>,
    pub total_pages: u32,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Film search page
pub async fn search_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    path_theme: Option<Path<String>>,
    Query(query): Query<ThemeQuery>,
    Form(form): Form<SearchForm>,
) -> AppResult<Json<SearchPageResponse>> {
    let theme = resolve_theme(&state, path_theme, query);
    let page = search_page(state.movies()?, form, theme, &request_id).await?;
    Ok(Json(page))
}

/// Track search page
pub async fn search_tracks(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    path_theme: Option<Path<String>>,
    Query(query): Query<ThemeQuery>,
    Form(form): Form<SearchForm>,
) -> AppResult<Json<SearchPageResponse>> {
    let theme = resolve_theme(&state, path_theme, query);
    let page = search_page(state.music()?, form, theme, &request_id).await?;
    Ok(Json(page))
}

/// Next page of film results for the "load more" button
///
/// Answers 404 once the catalog has nothing further to return.
pub async fn load_more(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SearchForm>,
) -> AppResult<Json<LoadMoreResponse>> {
    let orchestrator = state.movies()?;
    let criteria = form.into_criteria()?;

    tracing::info!(
        request_id = %request_id,
        page = criteria.page,
        "Loading more movies"
    );

    let result = orchestrator.search(&criteria).await?;
    if result.is_empty() {
        return Err(AppError::NotFound("No more movies found".to_string()));
    }

    Ok(Json(LoadMoreResponse {
        movies: result.items,
        total_pages: result.total_pages,
    }))
}

/// Path segment wins over `?theme=`, which wins over the configured default
fn resolve_theme(
    state: &AppState,
    path_theme: Option<Path<String>>,
    query: ThemeQuery,
) -> String {
    path_theme
        .map(|Path(theme)| theme)
        .or(query.theme)
        .filter(|theme| !theme.trim().is_empty())
        .unwrap_or_else(|| state.default_theme.clone())
}

/// Runs a search and turns user-correctable outcomes into page messages
///
/// Bad input and empty results render normally with a message; upstream
/// failures propagate and become an error response.
async fn search_page(
    orchestrator: &SearchOrchestrator,
    form: SearchForm,
    theme: String,
    request_id: &RequestId,
) -> AppResult<SearchPageResponse> {
    let kind = orchestrator.kind();
    let mut page = SearchPageResponse {
        theme,
        page: 1,
        total_pages: 0,
        items: Vec::new(),
        message: None,
    };

    let outcome = match form.into_criteria() {
        Ok(criteria) => {
            page.page = criteria.page;
            tracing::info!(
                request_id = %request_id,
                kind = %kind,
                title = ?criteria.title,
                artist = ?criteria.artist,
                album = ?criteria.album,
                year = ?criteria.year,
                page = criteria.page,
                "Processing search request"
            );
            orchestrator.search(&criteria).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) if result.is_empty() => {
            page.message = Some(kind.no_results_message().to_string());
        }
        Ok(result) => {
            page.total_pages = result.total_pages;
            page.items = result.items;
        }
        Err(AppError::Validation(message)) => {
            tracing::info!(request_id = %request_id, reason = %message, "Search rejected");
            page.message = Some(message);
        }
        Err(e) => return Err(e),
    }

    tracing::info!(
        request_id = %request_id,
        results = page.items.len(),
        "Search completed"
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_form_into_criteria() {
        let form = SearchForm {
            title: Some(" Matrix ".to_string()),
            artist: Some("Keanu Reeves".to_string()),
            year: Some("1999".to_string()),
            page: Some("2".to_string()),
            ..Default::default()
        };
        let criteria = form.into_criteria().unwrap();
        assert_eq!(criteria.title.as_deref(), Some("Matrix"));
        assert_eq!(criteria.artist.as_deref(), Some("Keanu Reeves"));
        assert_eq!(criteria.year.as_deref(), Some("1999"));
        assert_eq!(criteria.album, None);
        assert_eq!(criteria.page, 2);
    }

    #[test]
    fn test_search_form_aliases() {
        let form: SearchForm =
            serde_json::from_value(json!({"track": "One", "person": "Metallica"})).unwrap();
        assert_eq!(form.title.as_deref(), Some("One"));
        assert_eq!(form.artist.as_deref(), Some("Metallica"));
    }

    #[test]
    fn test_search_form_invalid_page() {
        let form = SearchForm {
            title: Some("Matrix".to_string()),
            page: Some("-1".to_string()),
            ..Default::default()
        };
        assert!(form.into_criteria().unwrap_err().is_validation());
    }
}
