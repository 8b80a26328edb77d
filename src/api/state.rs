use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::{
    CatalogProvider, SearchOrchestrator, SpotifyProvider, TmdbProvider, TokenProvider,
};

/// Shared application state
///
/// A catalog is `None` when its credentials are not configured.
#[derive(Clone)]
pub struct AppState {
    pub movies: Option<Arc<SearchOrchestrator>>,
    pub music: Option<Arc<SearchOrchestrator>>,
    pub default_theme: String,
}

impl AppState {
    /// Builds providers from configuration, sharing one HTTP client
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let movies = config.tmdb_api_key.as_ref().map(|api_key| {
            let provider: Arc<dyn CatalogProvider> = Arc::new(TmdbProvider::new(
                http_client.clone(),
                api_key.clone(),
                config.tmdb_api_url.clone(),
                config.language.clone(),
            ));
            Arc::new(SearchOrchestrator::new(provider))
        });

        let music = config
            .spotify_credentials()
            .map(|(client_id, client_secret)| {
                let tokens = TokenProvider::new(
                    http_client.clone(),
                    config.spotify_token_url.clone(),
                    client_id,
                    client_secret,
                );
                let provider: Arc<dyn CatalogProvider> = Arc::new(SpotifyProvider::new(
                    http_client.clone(),
                    config.spotify_api_url.clone(),
                    tokens,
                ));
                Arc::new(SearchOrchestrator::new(provider))
            });

        if movies.is_none() && music.is_none() {
            tracing::warn!("No catalog credentials configured; every search will be rejected");
        }

        Ok(Self {
            movies,
            music,
            default_theme: config.default_theme.clone(),
        })
    }

    pub fn movies(&self) -> AppResult<&SearchOrchestrator> {
        self.movies
            .as_deref()
            .ok_or_else(|| AppError::Unavailable("Film search is not configured".to_string()))
    }

    pub fn music(&self) -> AppResult<&SearchOrchestrator> {
        self.music
            .as_deref()
            .ok_or_else(|| AppError::Unavailable("Music search is not configured".to_string()))
    }
}
