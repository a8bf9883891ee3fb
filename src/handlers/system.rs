// handlers/system.rs - public service endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::entities::{
    Article, Entity, HelpRequest, MenuItemReview, RecommendationRequest,
    UcsbDiningCommonsMenuItem, UcsbOrganization,
};

/// GET / - service description
pub async fn root() -> Json<Value> {
    let resources: Vec<String> = [
        Article::RESOURCE,
        HelpRequest::RESOURCE,
        RecommendationRequest::RESOURCE,
        UcsbDiningCommonsMenuItem::RESOURCE,
        UcsbOrganization::RESOURCE,
        MenuItemReview::RESOURCE,
    ]
    .iter()
    .map(|r| format!("/api/{}", r))
    .collect();

    Json(json!({
        "name": "CS156 example API",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": resources,
    }))
}

/// GET /health - liveness plus database connectivity
pub async fn health(State(database): State<Option<DatabaseManager>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(database) = database else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "in-memory" })),
        );
    };

    match database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                })),
            )
        }
    }
}
