//! Hardware inventory routes, mounted under `/hardware_inventory`.

use crate::handlers::{category, hardware};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn hardware_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(hardware::list).post(hardware::create))
        .route("/batch", post(hardware::create_many))
        .route("/categories", get(category::list))
        .route("/details/:id", get(hardware::read_details))
        .route(
            "/:id",
            get(hardware::read).put(hardware::update).delete(hardware::delete),
        )
        .route("/:id/:status", post(hardware::change_status))
        .with_state(state)
}
