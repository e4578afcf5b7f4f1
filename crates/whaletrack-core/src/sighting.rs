//! Normalized sighting records and the result sets that own them.

use serde::{Deserialize, Serialize};

/// Identity key of a sighting, unique per upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SightingId(pub i64);

impl std::fmt::Display for SightingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `(latitude, longitude)` pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observer {
    pub login_handle: String,
    /// Falls back to `login_handle` when the source has no display name.
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
}

/// One normalized wildlife observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: SightingId,
    pub species_guess: String,
    /// Pre-formatted by the source; never parsed.
    pub observed_on: String,
    /// `(0, 0)` when the source carried no coordinates.
    pub location: Location,
    pub place_guess: String,
    pub observer: Observer,
    pub photos: Vec<Photo>,
    pub source_uri: String,
    pub quality_grade: String,
}

impl Sighting {
    /// URL of the first photo, used as list thumbnail and popup image.
    #[must_use]
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(|p| p.url.as_str())
    }

    #[must_use]
    pub fn quality(&self) -> QualityGrade {
        QualityGrade::from_source(&self.quality_grade)
    }
}

/// Display classification of the upstream `quality_grade` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Research,
    NeedsId,
    /// `casual` and anything the source adds later.
    Other,
}

impl QualityGrade {
    #[must_use]
    pub fn from_source(grade: &str) -> Self {
        match grade {
            "research" => Self::Research,
            "needs_id" => Self::NeedsId,
            _ => Self::Other,
        }
    }
}

/// A candidate taxon returned by the autocomplete lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonSuggestion {
    pub id: i64,
    pub name: String,
    pub matched_term: Option<String>,
    pub preferred_common_name: Option<String>,
    pub rank: Option<String>,
    pub iconic_taxon_name: Option<String>,
}

impl TaxonSuggestion {
    /// The common name when known, otherwise the scientific name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.preferred_common_name.as_deref().unwrap_or(&self.name)
    }

    /// Scientific name shown beside a common name; `None` when the label
    /// already is the scientific name.
    #[must_use]
    pub fn secondary_label(&self) -> Option<&str> {
        match self.preferred_common_name {
            Some(_) if !self.name.is_empty() => Some(&self.name),
            _ => None,
        }
    }
}

/// One page of sightings for a given set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    /// Source order, newest first.
    pub sightings: Vec<Sighting>,
}

impl SearchResult {
    #[must_use]
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self {
            total_count: 0,
            page_number,
            page_size,
            sightings: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: SightingId) -> Option<&Sighting> {
        self.sightings.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: SightingId) -> bool {
        self.find(id).is_some()
    }

    /// Number of pages implied by `total_count`; see [`crate::page_count`].
    #[must_use]
    pub fn page_count(&self) -> u64 {
        crate::pagination::page_count(self.total_count, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::sighting;

    fn suggestion(common: Option<&str>) -> TaxonSuggestion {
        TaxonSuggestion {
            id: 41_482,
            name: "Megaptera novaeangliae".to_string(),
            matched_term: Some("humpback".to_string()),
            preferred_common_name: common.map(str::to_string),
            rank: Some("species".to_string()),
            iconic_taxon_name: Some("Mammalia".to_string()),
        }
    }

    #[test]
    fn quality_grade_maps_known_values() {
        assert_eq!(QualityGrade::from_source("research"), QualityGrade::Research);
        assert_eq!(QualityGrade::from_source("needs_id"), QualityGrade::NeedsId);
        assert_eq!(QualityGrade::from_source("casual"), QualityGrade::Other);
        assert_eq!(QualityGrade::from_source(""), QualityGrade::Other);
    }

    #[test]
    fn primary_photo_is_first_photo() {
        let mut s = sighting(1);
        assert!(s.primary_photo().is_none());
        s.photos = vec![
            Photo {
                url: "https://img/a/medium.jpg".to_string(),
            },
            Photo {
                url: "https://img/b/medium.jpg".to_string(),
            },
        ];
        assert_eq!(s.primary_photo(), Some("https://img/a/medium.jpg"));
    }

    #[test]
    fn display_label_prefers_common_name() {
        let s = suggestion(Some("Humpback Whale"));
        assert_eq!(s.display_label(), "Humpback Whale");
        assert_eq!(s.secondary_label(), Some("Megaptera novaeangliae"));
    }

    #[test]
    fn display_label_falls_back_to_scientific_name() {
        let s = suggestion(None);
        assert_eq!(s.display_label(), "Megaptera novaeangliae");
        assert!(s.secondary_label().is_none());
    }

    #[test]
    fn search_result_find_and_contains() {
        let result = SearchResult {
            total_count: 2,
            page_number: 1,
            page_size: 200,
            sightings: vec![sighting(7), sighting(9)],
        };
        assert_eq!(result.find(SightingId(9)).map(|s| s.id), Some(SightingId(9)));
        assert!(!result.contains(SightingId(8)));
    }

    #[test]
    fn sighting_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&SightingId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
