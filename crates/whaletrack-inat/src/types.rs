//! iNaturalist v1 API response types.
//!
//! Envelopes are strict: a missing `total_results` or `results` means the
//! payload is not what we asked for. Individual records are kept as raw
//! [`serde_json::Value`]s so one malformed element cannot fail the batch;
//! [`crate::normalize`] decodes them one at a time into the `Raw*` shapes
//! below, where every field except `id` is optional and a field of the
//! wrong type decodes as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decodes an optional field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ---------------------------------------------------------------------------
// GET /taxa/autocomplete
// ---------------------------------------------------------------------------

/// Envelope for `/taxa/autocomplete`.
#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    pub results: Vec<serde_json::Value>,
}

/// One taxon as returned by the autocomplete endpoint.
#[derive(Debug, Deserialize)]
pub struct RawTaxon {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub matched_term: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_common_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub iconic_taxon_name: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /observations
// ---------------------------------------------------------------------------

/// Envelope for `/observations`.
#[derive(Debug, Deserialize)]
pub struct ObservationsResponse {
    pub total_results: u64,
    pub page: u32,
    pub per_page: u32,
    pub results: Vec<serde_json::Value>,
}

/// One observation record.
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub species_guess: Option<String>,
    /// Human-formatted observation date, e.g. `"2025-07-04 9:12:00 AM HST"`.
    #[serde(default, deserialize_with = "lenient")]
    pub observed_on_string: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub geojson: Option<RawGeoJson>,
    #[serde(default, deserialize_with = "lenient")]
    pub place_guess: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<RawUser>,
    #[serde(default, deserialize_with = "lenient")]
    pub photos: Option<Vec<serde_json::Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub quality_grade: Option<String>,
}

/// GeoJSON point; `coordinates` is `[longitude, latitude]`. Axes are kept
/// raw so a single non-numeric axis defaults on its own.
#[derive(Debug, Deserialize)]
pub struct RawGeoJson {
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawUser {
    #[serde(default, deserialize_with = "lenient")]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Photo reference; `url` points at the `square` thumbnail variant. Decoded
/// per element from [`RawObservation::photos`].
#[derive(Debug, Deserialize)]
pub struct RawPhoto {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}
