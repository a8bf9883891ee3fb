pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    http::{header, HeaderName, HeaderValue},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::database::Repositories;
use crate::entities::{
    Article, HelpRequest, MenuItemReview, RecommendationRequest, UcsbDiningCommonsMenuItem,
    UcsbOrganization,
};
use crate::handlers::{resource_routes, system};
use crate::middleware::{session_middleware, AuthKeys, XSRF_HEADER};

/// Full application router
pub fn app(repos: Repositories, security: &SecurityConfig) -> Router {
    let keys = AuthKeys::new(security.jwt_secret.clone());

    Router::new()
        // Public
        .route("/", get(system::root))
        .merge(
            Router::new()
                .route("/health", get(system::health))
                .with_state(repos.database.clone()),
        )
        // Resources (guarded per handler)
        .merge(resource_routes::<Article>(repos.articles))
        .merge(resource_routes::<HelpRequest>(repos.help_requests))
        .merge(resource_routes::<RecommendationRequest>(repos.recommendation_requests))
        .merge(resource_routes::<UcsbDiningCommonsMenuItem>(repos.menu_items))
        .merge(resource_routes::<UcsbOrganization>(repos.organizations))
        .merge(resource_routes::<MenuItemReview>(repos.menu_item_reviews))
        // Global middleware
        .layer(axum::middleware::from_fn_with_state(keys, session_middleware))
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(XSRF_HEADER),
        ])
}
