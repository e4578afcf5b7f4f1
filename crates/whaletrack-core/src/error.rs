use chrono::NaiveDate;
use thiserror::Error;

use crate::sighting::SightingId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejections raised before a criteria change is allowed to start a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("species name must not be empty")]
    EmptyTaxonName,

    #[error("page number must be at least 1 (got {0})")]
    InvalidPage(u32),

    #[error("start date {from} is after end date {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },

    #[error("date {date} is in the future (today is {today})")]
    FutureDate { date: NaiveDate, today: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("sighting {0} is not part of the current result set")]
    NotInResult(SightingId),
}
