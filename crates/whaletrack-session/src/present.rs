//! Panel models derived from a [`BrowserState`] snapshot.

use serde::Serialize;
use whaletrack_core::{
    detail_view, list_view, DetailView, ListView, MapView, SightingId, MAP_EMPTY_MESSAGE,
};

use crate::coordinator::SearchStatus;
use crate::session::BrowserState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListPanel {
    Loading,
    Error { message: String },
    Results(ListView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapPanel {
    Loading,
    Empty { message: &'static str },
    Map(MapView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub list: ListPanel,
    pub map: MapPanel,
    pub detail: DetailView,
}

impl Presentation {
    #[must_use]
    pub fn from_state(state: &BrowserState) -> Self {
        let selected = state.selected.as_ref().map(|s| s.id);
        Self {
            list: list_panel(state, selected),
            map: map_panel(state, selected),
            detail: detail_view(state.selected.as_ref()),
        }
    }
}

fn list_panel(state: &BrowserState, selected: Option<SightingId>) -> ListPanel {
    match &state.status {
        SearchStatus::Loading => ListPanel::Loading,
        SearchStatus::Failed { message } => ListPanel::Error {
            message: message.clone(),
        },
        SearchStatus::Idle | SearchStatus::Loaded => {
            ListPanel::Results(list_view(&state.result, selected))
        }
    }
}

fn map_panel(state: &BrowserState, selected: Option<SightingId>) -> MapPanel {
    match state.status {
        SearchStatus::Loading => MapPanel::Loading,
        _ if state.result.is_empty() => MapPanel::Empty {
            message: MAP_EMPTY_MESSAGE,
        },
        _ => MapPanel::Map(MapView::for_result(&state.result, selected)),
    }
}

#[cfg(test)]
mod tests {
    use whaletrack_core::{IconRef, SearchCriteria, SearchResult, EMPTY_LIST_MESSAGE};

    use super::*;
    use crate::autocomplete::AutocompleteState;
    use crate::coordinator::FETCH_FAILED_MESSAGE;
    use crate::test_support::{result_of, sighting};

    fn state(status: SearchStatus, result: SearchResult, selected: Option<i64>) -> BrowserState {
        BrowserState {
            criteria: SearchCriteria::default(),
            status,
            result,
            selected: selected.map(sighting),
            autocomplete: AutocompleteState::default(),
        }
    }

    #[test]
    fn loading_shows_indicators_and_placeholder() {
        let p = Presentation::from_state(&state(
            SearchStatus::Loading,
            SearchResult::empty(1, 200),
            None,
        ));
        assert_eq!(p.list, ListPanel::Loading);
        assert_eq!(p.map, MapPanel::Loading);
        assert!(matches!(p.detail, DetailView::Placeholder { .. }));
    }

    #[test]
    fn failure_shows_message_and_empty_map() {
        let p = Presentation::from_state(&state(
            SearchStatus::Failed {
                message: FETCH_FAILED_MESSAGE.to_string(),
            },
            SearchResult::empty(1, 200),
            None,
        ));
        assert_eq!(
            p.list,
            ListPanel::Error {
                message: FETCH_FAILED_MESSAGE.to_string()
            }
        );
        assert_eq!(
            p.map,
            MapPanel::Empty {
                message: MAP_EMPTY_MESSAGE
            }
        );
    }

    #[test]
    fn empty_result_shows_empty_list_and_map() {
        let p = Presentation::from_state(&state(
            SearchStatus::Loaded,
            SearchResult::empty(1, 200),
            None,
        ));
        match p.list {
            ListPanel::Results(view) => {
                assert!(view.rows.is_empty());
                assert_eq!(view.empty_message, Some(EMPTY_LIST_MESSAGE));
            }
            other => panic!("expected results, got {other:?}"),
        }
        assert!(matches!(p.map, MapPanel::Empty { .. }));
    }

    #[test]
    fn loaded_result_marks_selection_everywhere() {
        let p = Presentation::from_state(&state(
            SearchStatus::Loaded,
            result_of(&[1, 2, 3], 450),
            Some(2),
        ));

        let ListPanel::Results(list) = p.list else {
            panic!("expected results");
        };
        assert_eq!(list.heading, "450 Observations Found");
        let selected: Vec<_> = list.rows.iter().filter(|r| r.selected).map(|r| r.id).collect();
        assert_eq!(selected, vec![SightingId(2)]);
        assert_eq!(list.pagination.total_pages, 3);

        let MapPanel::Map(map) = p.map else {
            panic!("expected map");
        };
        let icons: Vec<_> = map.markers.iter().map(|m| m.icon).collect();
        assert_eq!(icons, vec![IconRef::Default, IconRef::Selected, IconRef::Default]);

        match p.detail {
            DetailView::Sighting(detail) => assert_eq!(detail.id, SightingId(2)),
            DetailView::Placeholder { .. } => panic!("expected detail"),
        }
    }

    #[test]
    fn panels_serialize_with_kind_tag() {
        let p = Presentation::from_state(&state(
            SearchStatus::Loading,
            SearchResult::empty(1, 200),
            None,
        ));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["list"]["kind"], "loading");
        assert_eq!(json["map"]["kind"], "loading");
        assert_eq!(json["detail"]["kind"], "placeholder");
    }
}
