//! Department selector handlers
//!
//! Each open modal is a session keyed by UUID. Selection changes stay in the
//! session until confirm, which persists them through the organization service.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{EmployeeDepartmentInfo, TreeNode};
use crate::error::{AppError, AppResult, OptionExt};
use crate::routes::ApiResponse;
use crate::state::{AppState, SelectorSession};
use crate::view::DepartmentSelector;

/// Open a selector for an employee. Without `value` the current memberships
/// are loaded from the organization service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    pub employee_id: String,
    pub value: Option<Vec<EmployeeDepartmentInfo>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub session_id: Uuid,
    pub key: String,
    pub checked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeptRequest {
    pub session_id: Uuid,
    pub dept_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub session_id: Uuid,
    #[serde(default)]
    pub keyword: String,
}

/// Session state plus, for open and search, the tree to render
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorResponse {
    pub session_id: Uuid,
    pub employee_id: String,
    pub selector: DepartmentSelector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<TreeNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelectorResponse {
    fn new(session_id: Uuid, session: &SelectorSession) -> Self {
        Self {
            session_id,
            employee_id: session.employee_id.clone(),
            selector: session.selector.clone(),
            tree: None,
            expanded_keys: None,
            error: None,
        }
    }
}

/// Run `f` against a session; the map guard never crosses an await
fn with_session<R>(
    state: &AppState,
    session_id: &Uuid,
    f: impl FnOnce(&mut SelectorSession) -> R,
) -> AppResult<(R, SelectorResponse)> {
    let mut entry = state
        .selectors
        .get_mut(session_id)
        .ok_or_not_found(format!("selector session {}", session_id))?;
    let out = f(entry.value_mut());
    Ok((out, SelectorResponse::new(*session_id, entry.value())))
}

/// POST /api/selector/open
pub async fn open(
    State(state): State<AppState>,
    Json(req): Json<OpenRequest>,
) -> AppResult<Json<ApiResponse<SelectorResponse>>> {
    let mut selector = DepartmentSelector::new();
    let tree_state = match req.value {
        Some(value) => selector.open(value, &state.tree).await,
        None => {
            // Memberships and tree load together; the tree is fetched once
            let (value, tree_state) = futures::join!(
                state.client.get_employee_departments(&req.employee_id),
                state.tree.ensure_loaded()
            );
            selector.show(value?);
            tree_state
        }
    };

    let session = SelectorSession {
        employee_id: req.employee_id,
        selector,
    };
    let mut response = SelectorResponse::new(Uuid::nil(), &session);
    response.session_id = state.insert_selector(session);
    response.tree = Some(tree_state.tree);
    response.expanded_keys = Some(tree_state.expanded_keys);
    response.error = tree_state.error.map(|e| e.to_string());

    tracing::debug!("selector {} opened for {}", response.session_id, response.employee_id);
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/selector/check
pub async fn check(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> AppResult<Json<ApiResponse<SelectorResponse>>> {
    let tree = state.tree.tree().await;
    let ((), response) = with_session(&state, &req.session_id, |session| {
        session.selector.check(&req.key, req.checked, &tree)
    })?;
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/selector/remove
pub async fn remove(
    State(state): State<AppState>,
    Json(req): Json<DeptRequest>,
) -> AppResult<Json<ApiResponse<SelectorResponse>>> {
    let ((), response) = with_session(&state, &req.session_id, |session| {
        session.selector.remove(&req.dept_id)
    })?;
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/selector/primary
pub async fn set_primary(
    State(state): State<AppState>,
    Json(req): Json<DeptRequest>,
) -> AppResult<Json<ApiResponse<SelectorResponse>>> {
    let ((), response) = with_session(&state, &req.session_id, |session| {
        session.selector.set_primary(&req.dept_id)
    })?;
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/selector/search
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<Json<ApiResponse<SelectorResponse>>> {
    let tree = state.tree.tree().await;
    let (filtered, mut response) = with_session(&state, &req.session_id, |session| {
        session.selector.search(&req.keyword, &tree)
    })?;
    response.tree = Some(filtered.nodes);
    response.expanded_keys = Some(filtered.expanded_keys);
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/selector/clear
pub async fn clear(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> AppResult<Json<ApiResponse<SelectorResponse>>> {
    let ((), response) =
        with_session(&state, &req.session_id, |session| session.selector.clear())?;
    Ok(Json(ApiResponse::success(response)))
}

/// POST /api/selector/confirm
///
/// The session survives a failed save so the user can retry.
pub async fn confirm(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> AppResult<Json<ApiResponse<Vec<EmployeeDepartmentInfo>>>> {
    let mut session = state
        .selectors
        .get(&req.session_id)
        .map(|entry| entry.value().clone())
        .ok_or_not_found(format!("selector session {}", req.session_id))?;

    let client = state.client.clone();
    let employee_id = session.employee_id.clone();
    let save = session
        .selector
        .confirm(move |depts| async move {
            client.update_employee_departments(&employee_id, depts).await
        })
        .ok_or_else(|| AppError::BadRequest("selector is not open".to_string()))?;

    let saved = save.await?;
    state.remove_selector(&req.session_id);
    tracing::info!(
        "saved {} department memberships for {}",
        saved.len(),
        session.employee_id
    );
    Ok(Json(ApiResponse::success(saved)))
}

/// POST /api/selector/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Json<ApiResponse<()>> {
    // Cancelling an already-closed session is not an error
    state.remove_selector(&req.session_id);
    Json(ApiResponse::success_msg("success"))
}
