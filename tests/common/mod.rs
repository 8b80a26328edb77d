//! Shared helpers for integration tests

#![allow(dead_code)]

use media_search_api::config::Config;

pub const TMDB_KEY: &str = "test_key";
pub const CLIENT_ID: &str = "client";
pub const CLIENT_SECRET: &str = "secret";
/// base64("client:secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";

/// Config pointing every upstream at a single mock server
pub fn test_config(server_url: &str) -> Config {
    Config {
        tmdb_api_key: Some(TMDB_KEY.to_string()),
        tmdb_api_url: server_url.to_string(),
        spotify_client_id: Some(CLIENT_ID.to_string()),
        spotify_client_secret: Some(CLIENT_SECRET.to_string()),
        spotify_api_url: server_url.to_string(),
        spotify_token_url: format!("{}/api/token", server_url),
        language: "en-US".to_string(),
        default_theme: "quartz".to_string(),
        request_timeout_secs: 5,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn token_body(token: &str, expires_in: i64) -> String {
    format!(
        r#"{{"access_token": "{}", "token_type": "Bearer", "expires_in": {}}}"#,
        token, expires_in
    )
}

pub const MATRIX_RESULTS: &str = r#"{
    "page": 1,
    "results": [
        {
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "overview": "Set in the 22nd century, The Matrix tells the story of a computer hacker",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "vote_average": 8.2
        }
    ],
    "total_pages": 1,
    "total_results": 1
}"#;

pub const MATRIX_VIDEOS: &str = r#"{
    "id": 603,
    "results": [
        {"site": "YouTube", "type": "Featurette", "key": "behind-the-scenes"},
        {"site": "YouTube", "type": "Trailer", "key": "m8e-FF8MsqU"}
    ]
}"#;

pub const NO_VIDEOS: &str = r#"{"id": 0, "results": []}"#;
