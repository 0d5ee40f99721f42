use aerodesk_core::provider::SearchProvider;
use aerodesk_core::search::{SearchRequest, SearchResults, RESULT_LIMIT};
use aerodesk_core::{CoreError, CoreResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::files::read_optional;

/// Serves searches from an offline offers file in the provider's response shape.
///
/// Offers are matched on route and departure date, then narrowed by the request filters.
pub struct FixtureSearchProvider {
    path: PathBuf,
}

impl FixtureSearchProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SearchProvider for FixtureSearchProvider {
    async fn search(&self, request: &SearchRequest) -> CoreResult<SearchResults> {
        let contents = read_optional(&self.path)
            .await
            .map_err(|e| CoreError::ProviderUnavailable(e.to_string()))?
            .ok_or_else(|| {
                warn!("Offers file {} is missing", self.path.display());
                CoreError::ProviderUnavailable("No offers available".to_string())
            })?;

        let catalogue: SearchResults = serde_json::from_str(&contents)
            .map_err(|e| CoreError::ProviderUnavailable(format!("Malformed offers file: {}", e)))?;

        let offers: Vec<_> = catalogue
            .offers
            .into_iter()
            .filter(|offer| request.matches_route(offer) && request.filters.matches(offer))
            .take(RESULT_LIMIT as usize)
            .collect();

        info!(
            "Search {} -> {} on {}: {} offer(s)",
            request.origin,
            request.destination,
            request.departure_date,
            offers.len()
        );

        Ok(SearchResults {
            offers,
            dictionaries: catalogue.dictionaries,
        })
    }
}
