//! Data access for the iNaturalist v1 REST API.
//!
//! [`InatClient`] issues the taxon autocomplete and observation search
//! requests; [`normalize`] turns the loosely-typed payloads into the
//! [`whaletrack_core`] record model.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{InatClient, SUGGESTION_LIMIT};
pub use error::InatError;
pub use normalize::{
    normalize_observation, normalize_observations, normalize_suggestion, normalize_suggestions,
};
