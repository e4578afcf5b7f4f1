//! List and detail view models.
//!
//! These are pure projections of a [`SearchResult`] and the current
//! selection; renderers format them but never recompute them.

use serde::Serialize;

use crate::pagination::PageInfo;
use crate::sighting::{QualityGrade, SearchResult, Sighting, SightingId};

pub const EMPTY_LIST_MESSAGE: &str = "No observations found";
pub const NO_IMAGE_LABEL: &str = "No image";
pub const DETAIL_PLACEHOLDER: &str = "Select an observation on the map to view details";
pub const SOURCE_LINK_LABEL: &str = "View on iNaturalist";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: SightingId,
    pub title: String,
    pub observed_on: String,
    pub place: String,
    pub thumbnail_url: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub heading: String,
    pub rows: Vec<ListRow>,
    /// Set instead of rows when the result is empty.
    pub empty_message: Option<&'static str>,
    pub pagination: PageInfo,
}

#[must_use]
pub fn list_view(result: &SearchResult, selected: Option<SightingId>) -> ListView {
    let rows = result
        .sightings
        .iter()
        .map(|s| ListRow {
            id: s.id,
            title: s.species_guess.clone(),
            observed_on: s.observed_on.clone(),
            place: s.place_guess.clone(),
            thumbnail_url: s.primary_photo().map(str::to_owned),
            selected: selected == Some(s.id),
        })
        .collect::<Vec<_>>();

    ListView {
        heading: format!("{} Observations Found", result.total_count),
        empty_message: rows.is_empty().then_some(EMPTY_LIST_MESSAGE),
        rows,
        pagination: PageInfo::for_result(result),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityBadge {
    pub grade: QualityGrade,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SightingDetail {
    pub id: SightingId,
    pub title: String,
    pub photo_url: Option<String>,
    pub observed_on: String,
    pub place: String,
    pub coordinates: String,
    pub observer: String,
    pub quality: QualityBadge,
    pub link: String,
    pub link_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Placeholder { message: &'static str },
    Sighting(Box<SightingDetail>),
}

#[must_use]
pub fn detail_view(selected: Option<&Sighting>) -> DetailView {
    let Some(s) = selected else {
        return DetailView::Placeholder {
            message: DETAIL_PLACEHOLDER,
        };
    };

    DetailView::Sighting(Box::new(SightingDetail {
        id: s.id,
        title: s.species_guess.clone(),
        photo_url: s.primary_photo().map(str::to_owned),
        observed_on: s.observed_on.clone(),
        place: s.place_guess.clone(),
        coordinates: format!("{:.5}, {:.5}", s.location.latitude, s.location.longitude),
        observer: s.observer.display_name.clone(),
        quality: QualityBadge {
            grade: s.quality(),
            label: s.quality_grade.replacen('_', " ", 1),
        },
        link: s.source_uri.clone(),
        link_label: SOURCE_LINK_LABEL,
    }))
}
