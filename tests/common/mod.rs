use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use proposal_api::{
    app_router, auth::USER_ID_HEADER, config::AppConfig, events, models::user::UserRole, AppState,
};

/// Helper harness wiring the full router against a fresh in-memory store and
/// the seeded user directory.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub fn new() -> Self {
        let mut cfg = AppConfig::new("127.0.0.1".to_string(), 18_080, "test".to_string());
        cfg.cors_allow_any_origin = true;

        let (event_sender, event_rx) = events::channel(256);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let state = AppState::new(cfg, event_sender);
        let router = app_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// The seeded admin account's id.
    pub fn admin_id(&self) -> Uuid {
        self.user_id_by_role(UserRole::Admin)
    }

    pub fn user_id_by_name(&self, name: &str) -> Uuid {
        self.state
            .directory
            .snapshot()
            .iter()
            .find(|u| u.name == name)
            .unwrap_or_else(|| panic!("seed user {name} missing"))
            .id
    }

    fn user_id_by_role(&self, role: UserRole) -> Uuid {
        self.state
            .directory
            .snapshot()
            .iter()
            .find(|u| u.role == role)
            .expect("seed directory has every role")
            .id
    }

    /// Send a request against the router, acting as the given user.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        acting_as: Option<Uuid>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(user_id) = acting_as {
            builder = builder.header(USER_ID_HEADER, user_id.to_string());
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("router error")
    }

    pub async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        serde_json::from_slice(&bytes).expect("response body is not valid json")
    }
}
