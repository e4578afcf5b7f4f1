//! Normalization of iNaturalist payloads into [`whaletrack_core`] records.
//!
//! Missing optional fields are defaulted silently. Only a record that is
//! not a JSON object, or that has no `id`, is reported as an error, and the
//! batch helpers drop such records instead of failing the whole page.

use whaletrack_core::{Location, Observer, Photo, Sighting, SightingId, TaxonSuggestion};

use crate::error::InatError;
use crate::types::{RawGeoJson, RawObservation, RawPhoto, RawTaxon, RawUser};

pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Rewrites a `square` thumbnail URL to its `medium` variant.
///
/// Only the first occurrence is replaced; URLs without `square` are
/// returned unchanged.
#[must_use]
pub fn medium_photo_url(url: &str) -> String {
    url.replacen("square", "medium", 1)
}

/// Swaps GeoJSON `[lon, lat]` into a [`Location`]. Missing or non-numeric
/// axes become `0`.
#[must_use]
pub fn location_from_geojson(geojson: Option<&RawGeoJson>) -> Location {
    let coords = geojson.and_then(|g| g.coordinates.as_deref()).unwrap_or(&[]);
    let axis = |i: usize| {
        coords
            .get(i)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0)
    };
    Location::new(axis(1), axis(0))
}

fn observer_from_user(user: Option<RawUser>) -> Observer {
    let user = user.unwrap_or_default();
    let login_handle = user.login.unwrap_or_default();
    let display_name = user
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| login_handle.clone());
    Observer {
        login_handle,
        display_name,
    }
}

/// Converts a decoded [`RawObservation`] into a [`Sighting`]. Infallible:
/// every optional field has a default.
#[must_use]
pub fn sighting_from_raw(raw: RawObservation) -> Sighting {
    let location = location_from_geojson(raw.geojson.as_ref());

    let place_guess = raw
        .place_guess
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    let photos = raw
        .photos
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| serde_json::from_value::<RawPhoto>(p).ok()?.url)
        .map(|url| Photo {
            url: medium_photo_url(&url),
        })
        .collect();

    Sighting {
        id: SightingId(raw.id),
        species_guess: raw.species_guess.unwrap_or_default(),
        observed_on: raw.observed_on_string.unwrap_or_default(),
        location,
        place_guess,
        observer: observer_from_user(raw.user),
        photos,
        source_uri: raw.uri.unwrap_or_default(),
        quality_grade: raw.quality_grade.unwrap_or_default(),
    }
}

/// Rejects values that are not objects or that carry no usable `id`.
fn check_record_shape(value: &serde_json::Value) -> Result<i64, InatError> {
    let Some(object) = value.as_object() else {
        return Err(InatError::Malformed {
            reason: "expected a JSON object".to_string(),
        });
    };
    object
        .get("id")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| InatError::Malformed {
            reason: "missing mandatory `id`".to_string(),
        })
}

/// Normalizes one raw observation object.
///
/// # Errors
///
/// [`InatError::Malformed`] if `value` is not an object or has no `id`.
/// Optional fields of the wrong type fall back to their defaults.
pub fn normalize_observation(value: serde_json::Value) -> Result<Sighting, InatError> {
    let id = check_record_shape(&value)?;
    let raw: RawObservation =
        serde_json::from_value(value).map_err(|e| InatError::Deserialize {
            context: format!("observation {id}"),
            source: e,
        })?;
    Ok(sighting_from_raw(raw))
}

/// Normalizes a page of observations, preserving order and skipping
/// malformed records.
#[must_use]
pub fn normalize_observations(values: Vec<serde_json::Value>) -> Vec<Sighting> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match normalize_observation(value) {
            Ok(sighting) => Some(sighting),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed observation");
                None
            }
        })
        .collect()
}

/// Projects one raw autocomplete result onto a [`TaxonSuggestion`].
///
/// # Errors
///
/// - [`InatError::Malformed`] if `value` is not an object or has no `id`.
/// - [`InatError::Deserialize`] if `name` is missing or not a string. Other
///   fields of the wrong type are passed through as absent.
pub fn normalize_suggestion(value: serde_json::Value) -> Result<TaxonSuggestion, InatError> {
    let id = check_record_shape(&value)?;
    let raw: RawTaxon = serde_json::from_value(value).map_err(|e| InatError::Deserialize {
        context: format!("taxon {id}"),
        source: e,
    })?;
    Ok(TaxonSuggestion {
        id: raw.id,
        name: raw.name,
        matched_term: raw.matched_term,
        preferred_common_name: raw.preferred_common_name,
        rank: raw.rank,
        iconic_taxon_name: raw.iconic_taxon_name,
    })
}

/// Normalizes an autocomplete page, skipping malformed entries.
#[must_use]
pub fn normalize_suggestions(values: Vec<serde_json::Value>) -> Vec<TaxonSuggestion> {
    values
        .into_iter()
        .filter_map(|value| {
            normalize_suggestion(value)
                .inspect_err(|e| tracing::warn!(error = %e, "skipping malformed taxon suggestion"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
