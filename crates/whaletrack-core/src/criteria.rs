//! Search criteria and the validation applied before they may replace the
//! current ones.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;

/// Fixed page size for every request in a session.
pub const PAGE_SIZE: u32 = 200;

pub const DEFAULT_TAXON_NAME: &str = "Humpback Whale";

/// Length of the trailing window used when a date bound is unset.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// User-controlled search parameters.
///
/// Criteria are replaced wholesale on every search or page action; the
/// builders below return new values rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub taxon_name: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page_size: u32,
    pub page_number: u32,
}

impl Default for SearchCriteria {
    /// Session start: the default species over the trailing window, page 1.
    fn default() -> Self {
        Self {
            taxon_name: DEFAULT_TAXON_NAME.to_string(),
            date_from: None,
            date_to: None,
            page_size: PAGE_SIZE,
            page_number: 1,
        }
    }
}

impl SearchCriteria {
    /// Builds criteria for a fresh search, always on page 1.
    ///
    /// # Errors
    ///
    /// - [`CriteriaError::EmptyTaxonName`] if `taxon_name` is blank.
    /// - [`CriteriaError::InvertedDateRange`] if both dates are set and
    ///   `date_from > date_to`.
    /// - [`CriteriaError::FutureDate`] if either date is after `today`.
    pub fn for_search(
        taxon_name: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, CriteriaError> {
        let taxon_name = taxon_name.trim();
        if taxon_name.is_empty() {
            return Err(CriteriaError::EmptyTaxonName);
        }

        for date in [date_from, date_to].into_iter().flatten() {
            if date > today {
                return Err(CriteriaError::FutureDate { date, today });
            }
        }

        if let (Some(from), Some(to)) = (date_from, date_to) {
            if from > to {
                return Err(CriteriaError::InvertedDateRange { from, to });
            }
        }

        Ok(Self {
            taxon_name: taxon_name.to_string(),
            date_from,
            date_to,
            page_size: PAGE_SIZE,
            page_number: 1,
        })
    }

    /// Same criteria on another page.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidPage`] if `page_number` is 0.
    pub fn with_page(&self, page_number: u32) -> Result<Self, CriteriaError> {
        if page_number < 1 {
            return Err(CriteriaError::InvalidPage(page_number));
        }
        Ok(Self {
            page_number,
            ..self.clone()
        })
    }

    /// Concrete `(d1, d2)` bounds sent upstream: unset `date_from` becomes
    /// `today - 30 days`, unset `date_to` becomes `today`.
    #[must_use]
    pub fn resolved_dates(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = self
            .date_from
            .unwrap_or_else(|| today - Duration::days(DEFAULT_WINDOW_DAYS));
        let to = self.date_to.unwrap_or(today);
        (from, to)
    }
}
