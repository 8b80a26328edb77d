//! Media search service
//!
//! Accepts search form input, queries a film (TMDB) or music (Spotify)
//! catalog, attaches trailer keys, and returns the results as JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
