use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MediaKind, SearchCriteria, SearchResult},
    services::{decorator, providers::CatalogProvider},
};

/// Runs a search against one catalog: validate, plan, execute, decorate
///
/// Person lookups happen while planning and may switch the request to a
/// discovery call. Trailer lookups happen after the primary call succeeds.
#[derive(Clone)]
pub struct SearchOrchestrator {
    provider: Arc<dyn CatalogProvider>,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub fn kind(&self) -> MediaKind {
        self.provider.kind()
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<SearchResult> {
        criteria.validate()?;

        let plan = self.provider.plan(criteria).await?;
        tracing::info!(
            provider = self.provider.name(),
            plan = plan.label(),
            page = criteria.page,
            "Executing search"
        );

        let result = self.provider.execute(&plan).await?;
        if result.is_empty() {
            tracing::info!(provider = self.provider.name(), "Search returned no results");
            return Ok(result);
        }

        let items = decorator::decorate(self.provider.clone(), result.items).await;

        Ok(SearchResult {
            items,
            total_pages: result.total_pages,
        })
    }
}
