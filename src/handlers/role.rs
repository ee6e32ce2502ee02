//! Role handlers
//!
//! Role templates grant permission keys from the catalogue

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::IdQuery;
use crate::entity::{ListQuery, Page, RoleRequest, RoleTemplate};
use crate::error::AppResult;
use crate::permission::{catalogue, PermissionInfo, PermissionInput};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Add or update role request
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// Comma-separated permissions or array of permissions
    #[serde(default)]
    pub permissions: PermissionInput,
}

impl From<RoleForm> for RoleRequest {
    fn from(form: RoleForm) -> Self {
        Self {
            id: form.id,
            name: form.name,
            description: form.description,
            permissions: form.permissions.normalize(),
        }
    }
}

/// Role response
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub permissions: String,
    /// Permissions as array for frontend convenience
    #[serde(rename = "permissionList")]
    pub permission_list: Vec<String>,
}

impl From<RoleTemplate> for RoleResponse {
    fn from(r: RoleTemplate) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            permissions: r.permissions.join(","),
            permission_list: r.permissions,
        }
    }
}

/// POST /api/role/add
pub async fn add_role(
    State(state): State<AppState>,
    Json(form): Json<RoleForm>,
) -> AppResult<Json<ApiResponse<RoleResponse>>> {
    let role = state.client.create_role(&form.into()).await?;
    tracing::info!("created role {} ({})", role.name, role.id);
    Ok(Json(ApiResponse::success(role.into())))
}

/// POST /api/role/update
pub async fn update_role(
    State(state): State<AppState>,
    Json(form): Json<RoleForm>,
) -> AppResult<Json<ApiResponse<RoleResponse>>> {
    let role = state.client.update_role(&form.into()).await?;
    tracing::info!("updated role {} ({})", role.name, role.id);
    Ok(Json(ApiResponse::success(role.into())))
}

/// POST /api/role/delete
pub async fn delete_role(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.client.delete_role(&query.id).await?;
    tracing::info!("deleted role {}", query.id);
    Ok(Json(ApiResponse::success_msg("success")))
}

/// GET /api/role/get
pub async fn get_role(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<RoleResponse>>> {
    let role = state.client.get_role(&query.id).await?;
    Ok(Json(ApiResponse::success(role.into())))
}

/// GET /api/role/list
pub async fn list_roles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Page<RoleResponse>>>> {
    let page = state.client.list_roles(&query).await?;
    Ok(Json(ApiResponse::success(Page {
        items: page.items.into_iter().map(RoleResponse::from).collect(),
        total: page.total,
    })))
}

/// GET /api/role/permissions - Get list of available permissions
pub async fn get_available_permissions() -> Json<ApiResponse<Vec<PermissionInfo>>> {
    Json(ApiResponse::success(catalogue()))
}
