use std::sync::Arc;

use crate::{models::MediaItem, services::providers::CatalogProvider};

/// Attaches a trailer key to every item
///
/// Lookups run in parallel, one task per item, and are merged back in the
/// original order. A failed lookup leaves that item's `trailer_key` empty;
/// it never fails the batch.
pub async fn decorate(provider: Arc<dyn CatalogProvider>, items: Vec<MediaItem>) -> Vec<MediaItem> {
    if !provider.has_trailers() || items.is_empty() {
        return items;
    }

    let mut tasks = Vec::with_capacity(items.len());

    for item in &items {
        let provider = provider.clone();
        let item_id = item.id();
        let task = tokio::spawn(async move {
            match item_id {
                Some(id) => provider.trailer_key(&id).await,
                None => Ok(None),
            }
        });
        tasks.push(task);
    }

    let mut decorated = Vec::with_capacity(items.len());
    let mut failures = 0usize;

    for (mut item, task) in items.into_iter().zip(tasks) {
        item.trailer_key = match task.await {
            Ok(Ok(key)) => key,
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    item_id = ?item.id(),
                    provider = provider.name(),
                    "Trailer lookup failed"
                );
                failures += 1;
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Trailer task join error");
                failures += 1;
                None
            }
        };
        decorated.push(item);
    }

    if failures > 0 {
        tracing::warn!(
            total = decorated.len(),
            failures,
            "Partial trailer decoration"
        );
    }

    decorated
}
