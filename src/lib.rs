pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::state::AppState;

/// The full HTTP surface: public routes, then everything behind the bearer token
pub fn app(state: AppState) -> Router {
    let config = config::config();

    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Protected
        .merge(protected_routes())
        // Global middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.security))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        )
        .with_state(state)
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(exam_routes())
        .merge(user_surgery_routes())
        .merge(catalog_routes())
        .route_layer(from_fn(middleware::jwt_auth_middleware))
}

fn exam_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::protected::exams;

    Router::new()
        .route("/exams", post(exams::exam_save))
        .route("/exams/download", get(exams::exam_download))
        .route("/exams/user/:userId", get(exams::exam_list))
}

fn user_surgery_routes() -> Router<AppState> {
    use handlers::protected::user_surgeries as surgeries;

    Router::new()
        .route(
            "/user-surgeries",
            axum::routing::post(surgeries::user_surgery_save)
                .put(surgeries::user_surgery_update)
                .delete(surgeries::user_surgery_delete),
        )
        .route("/user-surgeries/user/:userId", get(surgeries::user_surgery_list))
        .route("/user-surgeries/:id", get(surgeries::user_surgery_get))
}

fn catalog_routes() -> Router<AppState> {
    use handlers::protected::catalog;

    Router::new()
        .route("/surgeries", get(catalog::surgery_list))
        .route("/diseases", get(catalog::disease_list))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
