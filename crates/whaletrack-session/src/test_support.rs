use whaletrack_core::{
    Location, Observer, Photo, SearchResult, Sighting, SightingId, TaxonSuggestion, PAGE_SIZE,
};

pub(crate) fn sighting(id: i64) -> Sighting {
    Sighting {
        id: SightingId(id),
        species_guess: "Humpback Whale".to_string(),
        observed_on: "2025-07-04".to_string(),
        location: Location::new(20.8, -156.3),
        place_guess: "Maui, HI, USA".to_string(),
        observer: Observer {
            login_handle: "kai".to_string(),
            display_name: "Kai".to_string(),
        },
        photos: vec![Photo {
            url: format!("https://static.inaturalist.org/photos/{id}/medium.jpg"),
        }],
        source_uri: format!("https://www.inaturalist.org/observations/{id}"),
        quality_grade: "research".to_string(),
    }
}

pub(crate) fn result_of(ids: &[i64], total_count: u64) -> SearchResult {
    SearchResult {
        total_count,
        page_number: 1,
        page_size: PAGE_SIZE,
        sightings: ids.iter().copied().map(sighting).collect(),
    }
}

pub(crate) fn suggestion(id: i64, name: &str, common: Option<&str>) -> TaxonSuggestion {
    TaxonSuggestion {
        id,
        name: name.to_string(),
        matched_term: None,
        preferred_common_name: common.map(str::to_string),
        rank: Some("species".to_string()),
        iconic_taxon_name: Some("Mammalia".to_string()),
    }
}
