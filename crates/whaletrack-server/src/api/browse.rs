use axum::{extract::State, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use whaletrack_core::SightingId;

use crate::middleware::RequestId;

use super::{map_session_error, ApiError, ApiResponse, AppState, SnapshotData};

type SnapshotResponse = Result<Json<ApiResponse<SnapshotData>>, ApiError>;

#[derive(Debug, Deserialize)]
pub(super) struct SearchBody {
    taxon_name: String,
    #[serde(default)]
    date_from: Option<NaiveDate>,
    #[serde(default)]
    date_to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PageBody {
    page: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct SelectionBody {
    id: Option<i64>,
}

pub(super) async fn get_state(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SnapshotData>> {
    let snapshot = state.session.state();
    Json(ApiResponse::new(req_id.0, snapshot.into()))
}

pub(super) async fn submit_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchBody>,
) -> SnapshotResponse {
    let snapshot = state
        .session
        .submit_search(&body.taxon_name, body.date_from, body.date_to)
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, snapshot.into())))
}

pub(super) async fn change_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PageBody>,
) -> SnapshotResponse {
    let snapshot = state
        .session
        .change_page(body.page)
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, snapshot.into())))
}

pub(super) async fn select(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SelectionBody>,
) -> SnapshotResponse {
    let snapshot = state
        .session
        .select(body.id.map(SightingId))
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, snapshot.into())))
}
