use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use whaletrack_core::TaxonSuggestion;

use crate::middleware::RequestId;

use super::{map_session_error, ApiError, ApiResponse, AppState, SnapshotData};

#[derive(Debug, Deserialize)]
pub(super) struct InputBody {
    text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChooseBody {
    id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct LookupQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SuggestionItem {
    id: i64,
    label: String,
    secondary_label: Option<String>,
    name: String,
    matched_term: Option<String>,
    rank: Option<String>,
    iconic_taxon_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChooseData {
    label: String,
    state: SnapshotData,
}

impl From<TaxonSuggestion> for SuggestionItem {
    fn from(s: TaxonSuggestion) -> Self {
        Self {
            id: s.id,
            label: s.display_label().to_string(),
            secondary_label: s.secondary_label().map(str::to_string),
            name: s.name,
            matched_term: s.matched_term,
            rank: s.rank,
            iconic_taxon_name: s.iconic_taxon_name,
        }
    }
}

/// Records taxon input; the debounced lookup lands in later snapshots.
pub(super) async fn input_taxon(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<InputBody>,
) -> Result<Json<ApiResponse<SnapshotData>>, ApiError> {
    let snapshot = state
        .session
        .input_taxon(&body.text)
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, snapshot.into())))
}

pub(super) async fn choose_suggestion(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ChooseBody>,
) -> Result<Json<ApiResponse<ChooseData>>, ApiError> {
    let label = state
        .session
        .choose_suggestion(body.id)
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("no suggestion with id {}", body.id),
            )
        })?;

    let data = ChooseData {
        label,
        state: state.session.state().into(),
    };
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

/// Direct, undebounced lookup.
pub(super) async fn lookup(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<Vec<SuggestionItem>>>, ApiError> {
    let suggestions = state
        .session
        .suggest(&query.q)
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    let data = suggestions.into_iter().map(SuggestionItem::from).collect();
    Ok(Json(ApiResponse::new(req_id.0, data)))
}
