use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        auth::{login, signup, validate},
        health::{health, prometheus_metrics},
        todos::{complete_todo, create_todo, list_todos},
    },
    middleware::rate_limit,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Identity and todo routes, rate limited
    let api_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/validate", get(validate).post(validate))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}/complete", post(complete_todo))
        .layer(middleware::from_fn_with_state(
            state.rate_limit.clone(),
            rate_limit,
        ))
        .layer(cors);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ))
        .with_state(state)
}
