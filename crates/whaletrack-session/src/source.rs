//! The seam between the session and whatever serves sightings.

use std::fmt::Display;
use std::future::Future;

use whaletrack_core::{SearchCriteria, SearchResult, TaxonSuggestion};
use whaletrack_inat::{InatClient, InatError};

/// Upstream operations the session depends on.
///
/// `search` propagates failures so the coordinator can report them;
/// `suggest` is best-effort and yields an empty list on failure.
pub trait SightingSource: Send + Sync + 'static {
    type Error: Display + Send + 'static;

    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<SearchResult, Self::Error>> + Send;

    fn suggest(&self, query: &str) -> impl Future<Output = Vec<TaxonSuggestion>> + Send;
}

impl SightingSource for InatClient {
    type Error = InatError;

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, InatError> {
        self.fetch_sightings(criteria).await
    }

    async fn suggest(&self, query: &str) -> Vec<TaxonSuggestion> {
        self.fetch_suggestions(query).await
    }
}
