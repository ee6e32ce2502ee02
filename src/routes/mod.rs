use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

pub mod health;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Organization tree
        .route("/org/tree", get(handlers::org::get_tree))
        .route("/org/tree/refetch", post(handlers::org::refetch_tree))
        .route("/org/create", post(handlers::org::create_org_unit))
        // Corporation routes
        .route("/corporation/get", get(handlers::corporation::get_corporation))
        .route("/corporation/list", get(handlers::corporation::list_corporations))
        .route("/corporation/update", post(handlers::corporation::update_corporation))
        .route("/corporation/delete", post(handlers::corporation::delete_corporation))
        // Department routes
        .route("/department/get", get(handlers::department::get_department))
        .route("/department/list", get(handlers::department::list_departments))
        .route("/department/update", post(handlers::department::update_department))
        .route("/department/delete", post(handlers::department::delete_department))
        // Role routes
        .route("/role/add", post(handlers::role::add_role))
        .route("/role/update", post(handlers::role::update_role))
        .route("/role/delete", post(handlers::role::delete_role))
        .route("/role/get", get(handlers::role::get_role))
        .route("/role/list", get(handlers::role::list_roles))
        .route("/role/permissions", get(handlers::role::get_available_permissions))
        // Employee directory
        .route("/employee/list", get(handlers::employee::list_employees))
        .route("/employee/departments", get(handlers::employee::get_employee_departments))
        // Department selector sessions
        .route("/selector/open", post(handlers::selector::open))
        .route("/selector/check", post(handlers::selector::check))
        .route("/selector/remove", post(handlers::selector::remove))
        .route("/selector/primary", post(handlers::selector::set_primary))
        .route("/selector/search", post(handlers::selector::search))
        .route("/selector/clear", post(handlers::selector::clear))
        .route("/selector/confirm", post(handlers::selector::confirm))
        .route("/selector/cancel", post(handlers::selector::cancel));

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
