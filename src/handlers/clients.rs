use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::{
    created_response, no_content_response, paginate, success_response, PaginationParams,
};
use crate::auth::ActingUser;
use crate::errors::ServiceError;
use crate::models::NewClient;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

async fn create_client(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(new): Json<NewClient>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let client = state.clients.create(new).await?;
    Ok(created_response(client))
}

async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let page = params.resolve(
        state.config.api_default_page_size as u64,
        state.config.api_max_page_size as u64,
    );
    let clients = state.clients.list().await?;
    Ok(success_response(paginate(clients, &page)))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let client = state.clients.get(id).await?;
    Ok(success_response(client))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
    Json(new): Json<NewClient>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let client = state.clients.update(id, new).await?;
    Ok(success_response(client))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.clients.delete(id).await?;
    Ok(no_content_response())
}

async fn import_clients(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(new): Json<Vec<NewClient>>,
) -> Result<impl IntoResponse, ServiceError> {
    for record in &new {
        record.validate()?;
    }
    let clients = state.clients.create_many(new).await?;
    Ok(created_response(clients))
}

async fn bulk_delete_clients(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let removed = state.clients.delete_many(&req.ids).await?;
    Ok(success_response(serde_json::json!({ "deleted": removed })))
}

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_client))
        .route("/", get(list_clients))
        .route("/:id", get(get_client))
        .route("/:id", put(update_client))
        .route("/:id", delete(delete_client))
        .route("/import", post(import_clients))
        .route("/bulk-delete", post(bulk_delete_clients))
}
