//! Map view model: center, tile layer, markers and marker icons.
//!
//! Icons are immutable descriptors picked per marker at render time by
//! [`icon_for`]; nothing here holds a shared default that rendering mutates.

use serde::Serialize;

use crate::sighting::{Location, SearchResult, Sighting, SightingId};

pub const DEFAULT_ZOOM: u8 = 3;

pub const MAP_EMPTY_MESSAGE: &str = "No observations to display on the map";

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const MARKER_ICON_URL: &str = "https://unpkg.com/leaflet@1.7.1/dist/images/marker-icon.png";
const MARKER_SHADOW_URL: &str = "https://unpkg.com/leaflet@1.7.1/dist/images/marker-shadow.png";

/// Pixel geometry and image URLs for a marker icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    pub icon_url: &'static str,
    pub shadow_url: &'static str,
    pub icon_size: [u16; 2],
    pub icon_anchor: [u16; 2],
    pub popup_anchor: [i16; 2],
    pub shadow_size: [u16; 2],
}

const DEFAULT_ICON: IconSpec = IconSpec {
    icon_url: MARKER_ICON_URL,
    shadow_url: MARKER_SHADOW_URL,
    icon_size: [25, 41],
    icon_anchor: [12, 41],
    popup_anchor: [1, -34],
    shadow_size: [41, 41],
};

const SELECTED_ICON: IconSpec = IconSpec {
    icon_url: MARKER_ICON_URL,
    shadow_url: MARKER_SHADOW_URL,
    icon_size: [35, 51],
    icon_anchor: [17, 51],
    popup_anchor: [1, -34],
    shadow_size: [41, 41],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    Default,
    Selected,
}

impl IconRef {
    #[must_use]
    pub fn spec(self) -> &'static IconSpec {
        match self {
            IconRef::Default => &DEFAULT_ICON,
            IconRef::Selected => &SELECTED_ICON,
        }
    }
}

/// Icon for one marker given the current selection.
#[must_use]
pub fn icon_for(sighting: &Sighting, selected: Option<SightingId>) -> IconRef {
    if selected == Some(sighting.id) {
        IconRef::Selected
    } else {
        IconRef::Default
    }
}

/// Mean latitude and longitude of all sightings; `(0, 0)` when empty.
#[must_use]
pub fn map_center(sightings: &[Sighting]) -> Location {
    if sightings.is_empty() {
        return Location::default();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = sightings.len() as f64;
    let (lat_sum, lng_sum) = sightings.iter().fold((0.0, 0.0), |(lat, lng), s| {
        (lat + s.location.latitude, lng + s.location.longitude)
    });
    Location::new(lat_sum / n, lng_sum / n)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub observed_on: String,
    pub place: String,
    pub recorded_by: String,
    pub photo_url: Option<String>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: SightingId,
    pub position: Location,
    pub icon: IconRef,
    pub popup: Popup,
}

impl Marker {
    fn from_sighting(sighting: &Sighting, selected: Option<SightingId>) -> Self {
        Self {
            id: sighting.id,
            position: sighting.location,
            icon: icon_for(sighting, selected),
            popup: Popup {
                title: sighting.species_guess.clone(),
                observed_on: sighting.observed_on.clone(),
                place: sighting.place_guess.clone(),
                recorded_by: format!("Recorded by: {}", sighting.observer.display_name),
                photo_url: sighting.primary_photo().map(str::to_owned),
                link: sighting.source_uri.clone(),
            },
        }
    }
}

/// One marker per sighting, in result order.
#[must_use]
pub fn markers(sightings: &[Sighting], selected: Option<SightingId>) -> Vec<Marker> {
    sightings
        .iter()
        .map(|s| Marker::from_sighting(s, selected))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Location,
    pub zoom: u8,
    pub tile_url: &'static str,
    pub attribution: &'static str,
    pub markers: Vec<Marker>,
}

impl MapView {
    #[must_use]
    pub fn for_result(result: &SearchResult, selected: Option<SightingId>) -> Self {
        Self {
            center: map_center(&result.sightings),
            zoom: DEFAULT_ZOOM,
            tile_url: TILE_URL,
            attribution: TILE_ATTRIBUTION,
            markers: markers(&result.sightings, selected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sighting::Photo;
    use crate::test_support::{sighting, sighting_at};

    #[test]
    fn center_of_empty_set_is_origin() {
        assert_eq!(map_center(&[]), Location::new(0.0, 0.0));
    }

    #[test]
    fn center_is_mean_of_coordinates() {
        let sightings = vec![sighting_at(1, 10.0, -20.0), sighting_at(2, 30.0, 40.0)];
        assert_eq!(map_center(&sightings), Location::new(20.0, 10.0));
    }

    #[test]
    fn icon_for_marks_only_selected_sighting() {
        let a = sighting(1);
        let b = sighting(2);
        assert_eq!(icon_for(&a, Some(SightingId(1))), IconRef::Selected);
        assert_eq!(icon_for(&b, Some(SightingId(1))), IconRef::Default);
        assert_eq!(icon_for(&a, None), IconRef::Default);
    }

    #[test]
    fn selected_icon_is_larger_than_default() {
        let default = IconRef::Default.spec();
        let selected = IconRef::Selected.spec();
        assert_eq!(default.icon_size, [25, 41]);
        assert_eq!(default.icon_anchor, [12, 41]);
        assert_eq!(selected.icon_size, [35, 51]);
        assert_eq!(selected.icon_anchor, [17, 51]);
        assert_eq!(selected.popup_anchor, default.popup_anchor);
    }

    #[test]
    fn markers_follow_result_order_and_carry_popup() {
        let mut first = sighting(5);
        first.photos = vec![Photo {
            url: "https://static.example/photos/5/medium.jpg".to_string(),
        }];
        let sightings = vec![first, sighting(3)];

        let out = markers(&sightings, Some(SightingId(3)));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, SightingId(5));
        assert_eq!(out[0].icon, IconRef::Default);
        assert_eq!(out[1].icon, IconRef::Selected);
        assert_eq!(out[0].popup.recorded_by, "Recorded by: Kai");
        assert_eq!(
            out[0].popup.photo_url.as_deref(),
            Some("https://static.example/photos/5/medium.jpg")
        );
        assert!(out[1].popup.photo_url.is_none());
    }

    #[test]
    fn map_view_uses_fixed_zoom_and_osm_tiles() {
        let result = SearchResult {
            total_count: 1,
            page_number: 1,
            page_size: 200,
            sightings: vec![sighting_at(1, 4.0, 8.0)],
        };
        let view = MapView::for_result(&result, None);
        assert_eq!(view.zoom, 3);
        assert_eq!(view.center, Location::new(4.0, 8.0));
        assert!(view.tile_url.contains("tile.openstreetmap.org"));
    }
}
