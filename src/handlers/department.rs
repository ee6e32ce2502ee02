//! Department handlers
//!
//! Forwards department CRUD to the organization service

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::IdQuery;
use crate::entity::{Department, ListQuery, Page, UpdateDepartmentRequest};
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::state::AppState;

/// GET /api/department/get
pub async fn get_department(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let dept = state.client.get_department(&query.id).await?;
    Ok(Json(ApiResponse::success(dept)))
}

/// GET /api/department/list
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Page<Department>>>> {
    let page = state.client.list_departments(&query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/department/update
pub async fn update_department(
    State(state): State<AppState>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let dept = state.client.update_department(&req).await?;
    tracing::info!("updated department {} ({})", dept.name, dept.id);
    state.tree.refetch().await;
    Ok(Json(ApiResponse::success(dept)))
}

/// POST /api/department/delete
pub async fn delete_department(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.client.delete_department(&query.id).await?;
    tracing::info!("deleted department {}", query.id);
    state.tree.refetch().await;
    Ok(Json(ApiResponse::success_msg("success")))
}
