use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;
use validator::Validate;

use super::clients::BulkDeleteRequest;
use super::common::{
    created_response, no_content_response, paginate, success_response, PaginationParams,
};
use crate::auth::ActingUser;
use crate::errors::ServiceError;
use crate::models::NewProduct;
use crate::AppState;

async fn create_product(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(new): Json<NewProduct>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let product = state.products.create(new).await?;
    Ok(created_response(product))
}

async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let page = params.resolve(
        state.config.api_default_page_size as u64,
        state.config.api_max_page_size as u64,
    );
    let products = state.products.list().await?;
    Ok(success_response(paginate(products, &page)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.products.get(id).await?;
    Ok(success_response(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
    Json(new): Json<NewProduct>,
) -> Result<impl IntoResponse, ServiceError> {
    new.validate()?;
    let product = state.products.update(id, new).await?;
    Ok(success_response(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: ActingUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.products.delete(id).await?;
    Ok(no_content_response())
}

async fn import_products(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(new): Json<Vec<NewProduct>>,
) -> Result<impl IntoResponse, ServiceError> {
    for record in &new {
        record.validate()?;
    }
    let products = state.products.create_many(new).await?;
    Ok(created_response(products))
}

async fn bulk_delete_products(
    State(state): State<AppState>,
    _user: ActingUser,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let removed = state.products.delete_many(&req.ids).await?;
    Ok(success_response(serde_json::json!({ "deleted": removed })))
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product))
        .route("/import", post(import_products))
        .route("/bulk-delete", post(bulk_delete_products))
}
