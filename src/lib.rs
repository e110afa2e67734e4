//! Proposal management API: pricing, validation and role-based visibility
//! for commercial proposals, with client and product registers alongside.

pub mod auth;
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod middleware_helpers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod store;
pub mod tracing;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::auth::UserDirectory;
use crate::config::AppConfig;
use crate::events::EventSender;
use crate::models::user::seed_users;
use crate::services::{Catalog, ClientService, ProductService, ProposalService};
use crate::store::InMemoryStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<UserDirectory>,
    pub catalog: Arc<Catalog>,
    pub proposals: Arc<ProposalService>,
    pub clients: Arc<ClientService>,
    pub products: Arc<ProductService>,
    pub event_sender: EventSender,
}

impl AppState {
    /// Wire up the services against a fresh in-memory store, the seeded
    /// catalog and the seeded user directory.
    pub fn new(config: AppConfig, event_sender: EventSender) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Arc::new(Catalog::seeded());
        let directory = Arc::new(UserDirectory::new(seed_users()));

        let proposals = Arc::new(ProposalService::new(
            store.clone(),
            catalog.clone(),
            event_sender.clone(),
        ));
        let clients = Arc::new(ClientService::new(store.clone(), event_sender.clone()));
        let products = Arc::new(ProductService::new(store, event_sender.clone()));

        Self {
            config: Arc::new(config),
            directory,
            catalog,
            proposals,
            clients,
            products,
            event_sender,
        }
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .nest("/proposals", handlers::proposal_routes())
        .nest("/clients", handlers::client_routes())
        .nest("/products", handlers::product_routes())
        .nest("/catalog", handlers::catalog_routes())
        .nest("/users", handlers::user_routes())
}

/// The full application router: API, health and interactive docs.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(openapi::swagger_ui())
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
}

async fn api_status() -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let status_data = json!({
        "status": "ok",
        "version": version,
        "service": "proposal-api",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    // The store is in-process, so liveness is a directory probe.
    let directory_status = if state.directory.snapshot().is_empty() {
        "unhealthy"
    } else {
        "healthy"
    };

    let health_data = json!({
        "status": directory_status,
        "checks": {
            "directory": directory_status,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}
