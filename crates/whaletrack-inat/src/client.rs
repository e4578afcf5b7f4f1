//! HTTP client for the iNaturalist v1 REST API.
//!
//! Owns every detail of the upstream contract: base URL, endpoint paths,
//! parameter names and fixed parameter values. Responses are handed to
//! [`crate::normalize`] before leaving this module.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use whaletrack_core::{AppConfig, SearchCriteria, SearchResult, TaxonSuggestion};

use crate::error::InatError;
use crate::normalize::{normalize_observations, normalize_suggestions};
use crate::types::{AutocompleteResponse, ObservationsResponse};

/// Maximum number of taxon suggestions requested per lookup.
pub const SUGGESTION_LIMIT: u32 = 10;

/// Queries shorter than this (after trimming) never reach the network.
const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

const AUTOCOMPLETE_PATH: &str = "taxa/autocomplete";
const OBSERVATIONS_PATH: &str = "observations";

/// Client for the iNaturalist v1 REST API.
///
/// Use [`InatClient::from_config`] for production or
/// [`InatClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct InatClient {
    client: Client,
    base_url: Url,
}

impl InatClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`InatClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, InatError> {
        Self::with_base_url(
            &config.inat_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InatError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`InatError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, InatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends to the versioned path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| InatError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Best-effort taxon autocomplete.
    ///
    /// Returns an empty list without any request when the trimmed query is
    /// shorter than two characters. Failures are logged at `warn` and also
    /// produce an empty list; use [`InatClient::try_fetch_suggestions`] to
    /// observe them.
    pub async fn fetch_suggestions(&self, query: &str) -> Vec<TaxonSuggestion> {
        match self.try_fetch_suggestions(query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!(query, error = %e, "taxon suggestion lookup failed");
                Vec::new()
            }
        }
    }

    /// Taxon autocomplete that surfaces failures.
    ///
    /// # Errors
    ///
    /// - [`InatError::Http`] on network failure.
    /// - [`InatError::UnexpectedStatus`] on a non-2xx response.
    /// - [`InatError::Deserialize`] if the envelope does not match.
    pub async fn try_fetch_suggestions(
        &self,
        query: &str,
    ) -> Result<Vec<TaxonSuggestion>, InatError> {
        if query.trim().chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let limit = SUGGESTION_LIMIT.to_string();
        let url = self.build_url(
            AUTOCOMPLETE_PATH,
            &[("q", query), ("per_page", &limit), ("order_by", "default")],
        )?;
        let body: AutocompleteResponse = self.get_json(&url, AUTOCOMPLETE_PATH).await?;
        Ok(normalize_suggestions(body.results))
    }

    /// Searches observations for `criteria`, resolving unset dates against
    /// the local calendar date.
    ///
    /// # Errors
    ///
    /// - [`InatError::Http`] on network failure.
    /// - [`InatError::UnexpectedStatus`] on a non-2xx response.
    /// - [`InatError::Deserialize`] if the envelope does not match.
    pub async fn fetch_sightings(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<SearchResult, InatError> {
        let today = chrono::Local::now().date_naive();
        self.fetch_sightings_as_of(criteria, today).await
    }

    /// Same as [`InatClient::fetch_sightings`] with an explicit "today".
    ///
    /// # Errors
    ///
    /// See [`InatClient::fetch_sightings`].
    pub async fn fetch_sightings_as_of(
        &self,
        criteria: &SearchCriteria,
        today: NaiveDate,
    ) -> Result<SearchResult, InatError> {
        let url = self.observations_url(criteria, today)?;
        let body: ObservationsResponse = self.get_json(&url, OBSERVATIONS_PATH).await?;

        let sightings = normalize_observations(body.results);
        tracing::debug!(
            taxon_name = %criteria.taxon_name,
            page = body.page,
            total = body.total_results,
            returned = sightings.len(),
            "observation page fetched"
        );

        Ok(SearchResult {
            total_count: body.total_results,
            page_number: body.page,
            page_size: body.per_page,
            sightings,
        })
    }

    fn observations_url(
        &self,
        criteria: &SearchCriteria,
        today: NaiveDate,
    ) -> Result<Url, InatError> {
        let (d1, d2) = criteria.resolved_dates(today);
        let d1 = d1.format("%Y-%m-%d").to_string();
        let d2 = d2.format("%Y-%m-%d").to_string();
        let per_page = criteria.page_size.to_string();
        let page = criteria.page_number.to_string();

        self.build_url(
            OBSERVATIONS_PATH,
            &[
                ("taxon_name", &criteria.taxon_name),
                ("d1", &d1),
                ("d2", &d2),
                ("per_page", &per_page),
                ("page", &page),
                ("order_by", "observed_on"),
                ("order", "desc"),
                ("return_format", "json"),
            ],
        )
    }

    /// Joins `path` onto the base URL and appends percent-encoded query
    /// parameters in the given order.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, InatError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| InatError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and decodes the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, InatError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InatError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| InatError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
