use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; film search is disabled when absent
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Spotify client credentials; music search is disabled unless both are set
    #[serde(default)]
    pub spotify_client_id: Option<String>,

    #[serde(default)]
    pub spotify_client_secret: Option<String>,

    /// Spotify Web API base URL
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,

    /// Spotify accounts token endpoint
    #[serde(default = "default_spotify_token_url")]
    pub spotify_token_url: String,

    /// Language sent with every film request
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Timeout applied to every upstream call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_spotify_api_url() -> String {
    "https://api.spotify.com".to_string()
}

fn default_spotify_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_theme() -> String {
    "quartz".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Spotify credentials, only when both halves are configured
    pub fn spotify_credentials(&self) -> Option<(String, String)> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.clone(), secret.clone()))
            }
            _ => None,
        }
    }

    /// Logs which catalogs are enabled without leaking secrets
    pub fn log_summary(&self) {
        tracing::info!(
            tmdb_enabled = self.tmdb_api_key.is_some(),
            spotify_enabled = self.spotify_credentials().is_some(),
            spotify_client_id = self.spotify_client_id.as_deref().unwrap_or("<unset>"),
            spotify_client_secret = %redact(self.spotify_client_secret.as_deref()),
            timeout_secs = self.request_timeout_secs,
            "Configuration loaded"
        );
    }
}

/// Keeps the first five characters of a secret
fn redact(secret: Option<&str>) -> String {
    match secret {
        Some(s) => format!("{}...", s.chars().take(5).collect::<String>()),
        None => "<unset>".to_string(),
    }
}
