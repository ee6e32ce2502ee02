//! Employee directory handlers

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::entity::{Employee, EmployeeDepartmentInfo, EmployeeQuery, Page};
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmployeeIdQuery {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
}

/// GET /api/employee/list
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<ApiResponse<Page<Employee>>>> {
    let page = state.client.list_employees(&query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/employee/departments
pub async fn get_employee_departments(
    State(state): State<AppState>,
    Query(query): Query<EmployeeIdQuery>,
) -> AppResult<Json<ApiResponse<Vec<EmployeeDepartmentInfo>>>> {
    let depts = state
        .client
        .get_employee_departments(&query.employee_id)
        .await?;
    Ok(Json(ApiResponse::success(depts)))
}
