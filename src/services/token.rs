use std::sync::Arc;

use chrono::Utc;
use reqwest::Client as HttpClient;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{AccessToken, TokenResponse},
};

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Client-credentials token source with a single cached slot
///
/// The cached token is reused until it expires. Concurrent callers that find
/// it expired may each refresh; the last write wins.
#[derive(Clone)]
pub struct TokenProvider {
    http_client: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Arc<RwLock<Option<AccessToken>>>,
}

impl TokenProvider {
    pub fn new(
        http_client: HttpClient,
        token_url: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            http_client,
            token_url,
            client_id,
            client_secret,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns a valid bearer token, exchanging credentials only when needed
    pub async fn get_token(&self) -> AppResult<AccessToken> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if !token.is_expired_at(Utc::now()) {
                return Ok(token.clone());
            }
        }

        let token = self.request_token().await?;
        *self.cached.write().await = Some(token.clone());
        Ok(token)
    }

    async fn request_token(&self) -> AppResult<AccessToken> {
        // basic_auth sends base64("id:secret")
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Token request completed");

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = %status, response = %body, "Token request rejected");
            return Err(AppError::Auth(format!(
                "Token endpoint returned status {}: {}",
                status, body
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Token response is not valid JSON");
            AppError::Auth(format!("Failed to parse token response: {}", e))
        })?;

        let value = parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::error!("Access token not found in token response");
                AppError::Auth("Access token not found in token response".to_string())
            })?;

        let expires_in = parsed.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let token = AccessToken::new(value, Utc::now(), expires_in).ok_or_else(|| {
            tracing::error!(expires_in_secs = expires_in, "Token lifetime out of range");
            AppError::Auth(format!("Invalid expires_in in token response: {}", expires_in))
        })?;
        tracing::info!(expires_in_secs = expires_in, "Obtained new access token");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_provider() -> TokenProvider {
        TokenProvider::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/api/token".to_string(),
            "client".to_string(),
            "secret".to_string(),
        )
    }

    #[tokio::test]
    async fn test_cached_token_is_reused_without_network() {
        let provider = create_test_provider();
        let token = AccessToken {
            value: "cached".to_string(),
            expires_at: Utc::now() + Duration::minutes(30),
        };
        *provider.cached.write().await = Some(token.clone());

        // Nothing listens on the token URL, so any refresh attempt would error
        let fetched = provider.get_token().await.unwrap();
        assert_eq!(fetched, token);
    }

    #[tokio::test]
    async fn test_expired_token_triggers_refresh() {
        let provider = create_test_provider();
        *provider.cached.write().await = Some(AccessToken {
            value: "stale".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        });

        // Refresh goes to the network, which is unreachable here
        let err = provider.get_token().await.unwrap_err();
        assert!(matches!(err, AppError::HttpClient(_)), "got {:?}", err);
    }
}
