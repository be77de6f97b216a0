//! Search orchestration with ordered fallback strategies.

use tracing::{debug, warn};

use crate::traits::search::SearchProvider;
use crate::types::{config::PipelineConfig, product::ProductAttributes, search::SearchResult};

/// Run the search fallback chain for a product.
///
/// Never errors: a failed or timed-out attempt degrades to the next
/// strategy, and the worst case is an empty list. Attempts are strictly
/// sequential, each preceded (after the first) by a fixed courtesy
/// delay rather than a backoff:
///
/// 1. the primary query
/// 2. on primary failure, if a product name is known and differs from
///    the primary query: `"{name} nutrition facts ingredients"`
/// 3. if that did not run or also failed, a barcode is known, and
///    nothing has been found yet: the raw barcode
///
/// Results from successful attempts are concatenated in execution
/// order, each attempt's internal ordering preserved. Duplicate URLs
/// across attempts are kept as-is.
pub async fn search_with_fallbacks<S: SearchProvider>(
    provider: &S,
    config: &PipelineConfig,
    query: &str,
    attrs: &ProductAttributes,
) -> Vec<SearchResult> {
    let mut aggregated: Vec<SearchResult> = Vec::new();

    let mut fallback_ran = false;
    let mut fallback_succeeded = false;

    match attempt(provider, config, query).await {
        Some(results) => aggregated.extend(results),
        None => {
            let name = attrs
                .product_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty());

            if let Some(name) = name.filter(|n| *n != query) {
                fallback_ran = true;
                tokio::time::sleep(config.fallback_delay).await;

                let fallback_query = format!("{name} nutrition facts ingredients");
                if let Some(results) = attempt(provider, config, &fallback_query).await {
                    aggregated.extend(results);
                    fallback_succeeded = true;
                }
            }
        }
    }

    if (!fallback_ran || !fallback_succeeded) && aggregated.is_empty() {
        let barcode = attrs
            .barcode
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty());

        if let Some(barcode) = barcode {
            tokio::time::sleep(config.fallback_delay).await;

            if let Some(results) = attempt(provider, config, barcode).await {
                aggregated.extend(results);
            }
        }
    }

    debug!(
        query = %query,
        total = aggregated.len(),
        "search chain complete"
    );

    aggregated
}

/// One bounded search attempt; a timeout or provider error is a miss.
async fn attempt<S: SearchProvider>(
    provider: &S,
    config: &PipelineConfig,
    query: &str,
) -> Option<Vec<SearchResult>> {
    match tokio::time::timeout(
        config.search_timeout,
        provider.search(query, config.max_search_results),
    )
    .await
    {
        Ok(Ok(results)) => {
            debug!(query = %query, returned = results.len(), "search attempt succeeded");
            Some(results)
        }
        Ok(Err(e)) => {
            warn!(query = %query, error = %e, "search attempt failed");
            None
        }
        Err(_) => {
            warn!(query = %query, timeout = ?config.search_timeout, "search attempt timed out");
            None
        }
    }
}
