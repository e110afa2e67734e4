use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{created_response, no_content_response, success_response};
use crate::auth::ActingUser;
use crate::errors::ServiceError;
use crate::models::ProposalStatus;
use crate::services::proposals::{ItemInput, ProposalDetails};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetTermRequest {
    pub term: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: ProposalStatus,
}

async fn create_proposal(
    State(state): State<AppState>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.create().await?;
    Ok(created_response(proposal))
}

async fn list_proposals(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let directory = state.directory.snapshot();
    let proposals = state.proposals.list_visible(&user, &directory).await?;
    Ok(success_response(proposals))
}

async fn get_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.get(id).await?;
    Ok(success_response(proposal))
}

async fn update_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
    Json(details): Json<ProposalDetails>,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.update_details(id, details).await?;
    Ok(success_response(proposal))
}

async fn delete_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.proposals.delete(id).await?;
    Ok(no_content_response())
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
    Json(input): Json<ItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.add_item(id, input).await?;
    Ok(created_response(proposal))
}

async fn update_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    _user: ActingUser,
    Json(input): Json<ItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.update_item(id, item_id, input).await?;
    Ok(success_response(proposal))
}

async fn remove_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.remove_item(id, item_id).await?;
    Ok(success_response(proposal))
}

async fn set_term(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
    Json(req): Json<SetTermRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.set_term(id, req.term).await?;
    Ok(success_response(proposal))
}

async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
    Json(req): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.set_status(id, req.status).await?;
    Ok(success_response(proposal))
}

async fn recalculate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let proposal = state.proposals.recalculate(id).await?;
    Ok(success_response(proposal))
}

async fn validation_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.proposals.validate(id).await?;
    Ok(success_response(report))
}

pub fn proposal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_proposal))
        .route("/", get(list_proposals))
        .route("/:id", get(get_proposal))
        .route("/:id", put(update_proposal))
        .route("/:id", delete(delete_proposal))
        .route("/:id/items", post(add_item))
        .route("/:id/items/:item_id", put(update_item))
        .route("/:id/items/:item_id", delete(remove_item))
        .route("/:id/term", put(set_term))
        .route("/:id/status", put(set_status))
        .route("/:id/recalculate", post(recalculate))
        .route("/:id/validation", get(validation_report))
}
