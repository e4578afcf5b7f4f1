use crate::sighting::{Location, Observer, Sighting, SightingId};

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
        photos: vec![],
        source_uri: format!("https://www.inaturalist.org/observations/{id}"),
        quality_grade: "research".to_string(),
    }
}

pub(crate) fn sighting_at(id: i64, latitude: f64, longitude: f64) -> Sighting {
    Sighting {
        location: Location::new(latitude, longitude),
        ..sighting(id)
    }
}
