pub mod decorator;
pub mod providers;
pub mod search;
pub mod token;

pub use providers::{CatalogProvider, SpotifyProvider, TmdbProvider};
pub use search::SearchOrchestrator;
pub use token::TokenProvider;
