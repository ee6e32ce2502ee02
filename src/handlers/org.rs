//! Organization tree handlers

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{OrgTreeQuery, OrgUnit};
use crate::entity::{CreateOrgUnitRequest, TreeNode};
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::view::{FetchStatus, OrgTreeState};

/// Tree fetch parameters; omitted ones use the configured defaults
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeParams {
    pub corp_id: Option<String>,
    pub include_departments: Option<bool>,
    pub include_employee_count: Option<bool>,
    pub depth: Option<u32>,
}

impl TreeParams {
    fn resolve(self, defaults: OrgTreeQuery) -> OrgTreeQuery {
        OrgTreeQuery {
            corp_id: self
                .corp_id
                .filter(|id| !id.trim().is_empty())
                .or(defaults.corp_id),
            include_departments: self
                .include_departments
                .unwrap_or(defaults.include_departments),
            include_employee_count: self
                .include_employee_count
                .unwrap_or(defaults.include_employee_count),
            depth: self.depth.or(defaults.depth),
        }
    }
}

/// Tree state as rendered by the console
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    pub status: FetchStatus,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub tree: Vec<TreeNode>,
    pub expanded_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl From<OrgTreeState> for TreeResponse {
    fn from(state: OrgTreeState) -> Self {
        Self {
            status: state.status,
            loading: state.loading,
            error: state.error.map(|e| e.to_string()),
            tree: state.tree,
            expanded_keys: state.expanded_keys,
            fetched_at: state.fetched_at,
        }
    }
}

/// GET /api/org/tree
pub async fn get_tree(
    State(state): State<AppState>,
    Query(params): Query<TreeParams>,
) -> Json<ApiResponse<TreeResponse>> {
    let query = params.resolve(OrgTreeQuery::from(&state.config.tree));
    let snapshot = state.tree.set_params(query).await;
    Json(ApiResponse::success(snapshot.into()))
}

/// POST /api/org/tree/refetch
pub async fn refetch_tree(State(state): State<AppState>) -> Json<ApiResponse<TreeResponse>> {
    let snapshot = state.tree.refetch().await;
    Json(ApiResponse::success(snapshot.into()))
}

/// POST /api/org/create
pub async fn create_org_unit(
    State(state): State<AppState>,
    Json(req): Json<CreateOrgUnitRequest>,
) -> AppResult<Json<ApiResponse<OrgUnit>>> {
    let unit = state.client.create_org_unit(&req).await?;
    match &unit {
        OrgUnit::Corp(corp) => tracing::info!("created corporation {} ({})", corp.name, corp.id),
        OrgUnit::Dept(dept) => tracing::info!("created department {} ({})", dept.name, dept.id),
    }
    state.tree.refetch().await;
    Ok(Json(ApiResponse::success(unit)))
}
