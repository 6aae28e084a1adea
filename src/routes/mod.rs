//! Router assembly.

mod common;
mod hardware;

#[cfg(test)]
mod tests;

pub use common::common_routes;
pub use hardware::hardware_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const HARDWARE_PREFIX: &str = "/hardware_inventory";

/// Full application router with request tracing and a body size limit.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(HARDWARE_PREFIX, hardware_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
