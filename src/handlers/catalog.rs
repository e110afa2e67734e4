use axum::{extract::State, response::IntoResponse, routing::get, Router};

use super::common::success_response;
use crate::AppState;

async fn list_equipments(State(state): State<AppState>) -> impl IntoResponse {
    success_response(state.catalog.equipments().to_vec())
}

async fn list_managers(State(state): State<AppState>) -> impl IntoResponse {
    success_response(state.catalog.managers().to_vec())
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/equipments", get(list_equipments))
        .route("/managers", get(list_managers))
}
