//! Search coordinator: owns criteria, the current result, fetch status and
//! the selection, and decides which fetch responses may touch them.
//!
//! Every criteria change (fresh search or page change) issues a
//! [`FetchTicket`] carrying a new sequence number. Only the completion for
//! the latest ticket is applied; anything older is discarded so a slow
//! earlier response can never overwrite a faster later one.

use std::fmt::Display;

use chrono::NaiveDate;
use serde::Serialize;
use whaletrack_core::{
    CriteriaError, SearchCriteria, SearchResult, SelectionError, Sighting, SightingId,
};

use crate::selection::Selection;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch observations. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

/// A fetch the caller must run: `criteria` is what to ask for, `seq`
/// identifies it when the response comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub criteria: SearchCriteria,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct SearchCoordinator {
    criteria: SearchCriteria,
    status: SearchStatus,
    result: SearchResult,
    selection: Selection,
    latest_seq: u64,
}

impl SearchCoordinator {
    #[must_use]
    pub fn new(criteria: SearchCriteria) -> Self {
        let result = SearchResult::empty(criteria.page_number, criteria.page_size);
        Self {
            criteria,
            status: SearchStatus::Idle,
            result,
            selection: Selection::default(),
            latest_seq: 0,
        }
    }

    #[must_use]
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    #[must_use]
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Sighting> {
        self.selection.resolve(&self.result)
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<SightingId> {
        self.selection.id()
    }

    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Issues the fetch for the current criteria (the initial load).
    pub fn start(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Replaces the criteria with a fresh search on page 1.
    ///
    /// # Errors
    ///
    /// Returns the [`CriteriaError`] from [`SearchCriteria::for_search`];
    /// state is left untouched and no fetch is issued.
    pub fn submit_search(
        &mut self,
        taxon_name: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<FetchTicket, CriteriaError> {
        self.criteria = SearchCriteria::for_search(taxon_name, date_from, date_to, today)?;
        Ok(self.begin_fetch())
    }

    /// Moves to another page, keeping taxon and dates.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidPage`] for page 0; state is left
    /// untouched and no fetch is issued.
    pub fn change_page(&mut self, page_number: u32) -> Result<FetchTicket, CriteriaError> {
        self.criteria = self.criteria.with_page(page_number)?;
        Ok(self.begin_fetch())
    }

    /// Sets or clears the active sighting.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NotInResult`] if `id` is not part of the
    /// current result; the previous selection is kept.
    pub fn select(&mut self, id: Option<SightingId>) -> Result<(), SelectionError> {
        match id {
            None => self.selection.clear(),
            Some(id) => {
                let sighting = self
                    .result
                    .find(id)
                    .ok_or(SelectionError::NotInResult(id))?;
                self.selection.select(sighting);
            }
        }
        Ok(())
    }

    /// Applies the outcome of the fetch identified by `seq`.
    ///
    /// Outcomes for any ticket other than the latest outstanding one are
    /// dropped and reported as [`Completion::Stale`].
    pub fn complete<E: Display>(
        &mut self,
        seq: u64,
        outcome: Result<SearchResult, E>,
    ) -> Completion {
        if seq != self.latest_seq || self.status != SearchStatus::Loading {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return Completion::Stale;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(
                    seq,
                    taxon_name = %self.criteria.taxon_name,
                    page = result.page_number,
                    total = result.total_count,
                    "search completed"
                );
                self.result = result;
                self.status = SearchStatus::Loaded;
                if self.selection.is_empty() {
                    if let Some(first) = self.result.sightings.first() {
                        self.selection.select(first);
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    seq,
                    taxon_name = %self.criteria.taxon_name,
                    page = self.criteria.page_number,
                    error = %e,
                    "search failed"
                );
                self.result =
                    SearchResult::empty(self.criteria.page_number, self.criteria.page_size);
                self.status = SearchStatus::Failed {
                    message: FETCH_FAILED_MESSAGE.to_string(),
                };
            }
        }
        Completion::Applied
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.selection.clear();
        self.result = SearchResult::empty(self.criteria.page_number, self.criteria.page_size);
        self.status = SearchStatus::Loading;
        tracing::debug!(
            seq = self.latest_seq,
            taxon_name = %self.criteria.taxon_name,
            page = self.criteria.page_number,
            "search started"
        );
        FetchTicket {
            seq: self.latest_seq,
            criteria: self.criteria.clone(),
        }
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
