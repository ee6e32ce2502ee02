//! Corporation handlers
//!
//! Forwards corporation CRUD to the organization service

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::IdQuery;
use crate::entity::{Corporation, ListQuery, Page, UpdateCorporationRequest};
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::state::AppState;

/// GET /api/corporation/get
pub async fn get_corporation(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Corporation>>> {
    let corp = state.client.get_corporation(&query.id).await?;
    Ok(Json(ApiResponse::success(corp)))
}

/// GET /api/corporation/list
pub async fn list_corporations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Page<Corporation>>>> {
    let page = state.client.list_corporations(&query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/corporation/update
pub async fn update_corporation(
    State(state): State<AppState>,
    Json(req): Json<UpdateCorporationRequest>,
) -> AppResult<Json<ApiResponse<Corporation>>> {
    let corp = state.client.update_corporation(&req).await?;
    tracing::info!("updated corporation {} ({})", corp.name, corp.id);
    state.tree.refetch().await;
    Ok(Json(ApiResponse::success(corp)))
}

/// POST /api/corporation/delete
pub async fn delete_corporation(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.client.delete_corporation(&query.id).await?;
    tracing::info!("deleted corporation {}", query.id);
    state.tree.refetch().await;
    Ok(Json(ApiResponse::success_msg("success")))
}
