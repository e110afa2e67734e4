use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::{created_response, no_content_response, success_response};
use crate::auth::{ActingUser, NewUser, UserUpdate};
use crate::errors::ServiceError;
use crate::models::user::{User, UserRole};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn require_admin(user: &User) -> Result<(), ServiceError> {
    if user.role != UserRole::Admin {
        return Err(ServiceError::Forbidden(
            "administrator role required".to_string(),
        ));
    }
    Ok(())
}

/// Admins manage any team; a supervisor may manage their own.
fn require_team_access(user: &User, supervisor_id: Uuid) -> Result<(), ServiceError> {
    if user.role == UserRole::Admin || user.id == supervisor_id {
        return Ok(());
    }
    Err(ServiceError::Forbidden(
        "cannot manage another supervisor's team".to_string(),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.directory.authenticate(&req.username, &req.password)?;
    Ok(success_response(user))
}

async fn list_users(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    require_admin(&user)?;
    Ok(success_response(state.directory.snapshot()))
}

async fn create_user(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    Json(new): Json<NewUser>,
) -> Result<impl IntoResponse, ServiceError> {
    require_admin(&user)?;
    new.validate()?;
    let created = state.directory.create_user(new);
    Ok(created_response(created))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    require_admin(&user)?;
    Ok(success_response(state.directory.get(id)?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActingUser(user): ActingUser,
    Json(update): Json<UserUpdate>,
) -> Result<impl IntoResponse, ServiceError> {
    require_admin(&user)?;
    let updated = state.directory.update_user(id, update)?;
    Ok(success_response(updated))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    require_admin(&user)?;
    state.directory.delete_user(id, user.id)?;
    Ok(no_content_response())
}

async fn team_members(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    require_team_access(&user, id)?;
    Ok(success_response(state.directory.team_members(id)?))
}

async fn assign_team_member(
    State(state): State<AppState>,
    Path((id, manager_id)): Path<(Uuid, Uuid)>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    require_team_access(&user, id)?;
    state.directory.assign_team_member(id, manager_id)?;
    Ok(no_content_response())
}

async fn remove_team_member(
    State(state): State<AppState>,
    Path((id, manager_id)): Path<(Uuid, Uuid)>,
    ActingUser(user): ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    require_team_access(&user, id)?;
    state.directory.remove_team_member(id, manager_id)?;
    Ok(no_content_response())
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route("/:id/team", get(team_members))
        .route("/:id/team/:manager_id", post(assign_team_member))
        .route("/:id/team/:manager_id", delete(remove_team_member))
}
