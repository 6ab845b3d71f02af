//! HTTP surface of the command host.

pub mod health;
pub mod invoke;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::commands::CommandRouter;

/// `GET /api/health` and `POST /api/invoke/:command`, open to any origin.
pub fn app(commands: CommandRouter) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/invoke/:command", post(invoke::invoke_command))
        .with_state(commands)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
