//! Domain model and pure presentation logic for the whaletrack sighting
//! browser. Nothing in this crate performs I/O beyond reading environment
//! variables for configuration.

pub mod app_config;
pub mod config;
pub mod criteria;
pub mod error;
pub mod map;
pub mod pagination;
pub mod sighting;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{SearchCriteria, DEFAULT_TAXON_NAME, DEFAULT_WINDOW_DAYS, PAGE_SIZE};
pub use error::{ConfigError, CriteriaError, SelectionError};
pub use map::{
    icon_for, map_center, markers, IconRef, IconSpec, MapView, Marker, Popup, DEFAULT_ZOOM,
    MAP_EMPTY_MESSAGE,
};
pub use pagination::{page_count, PageInfo};
pub use sighting::{
    Location, Observer, Photo, QualityGrade, SearchResult, Sighting, SightingId, TaxonSuggestion,
};
pub use view::{
    detail_view, list_view, DetailView, ListRow, ListView, QualityBadge, SightingDetail,
    EMPTY_LIST_MESSAGE,
};
