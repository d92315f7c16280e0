#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use folio_core::catalog::ProjectCatalog;
use folio_core::contact::ContactSubmission;
use folio_mail::{ContactNotifier, EmailError};
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;

/// Small dataset covering every filter dimension.
pub const PROJECTS_JSON: &str = r#"[
    {
        "id": "booking",
        "title": "Booking Platform",
        "description": "Online reservations for a travel agency",
        "category": "web-development",
        "technologies": ["Rust", "PostgreSQL", "React"],
        "skills": ["API design"],
        "projectType": "web-application",
        "status": "completed",
        "featured": true,
        "completedDate": "2023-06-01",
        "duration": "4 months",
        "client": "Acme Travel",
        "myRole": "Lead developer"
    },
    {
        "id": "field-app",
        "title": "Field App",
        "description": "Offline-first inspections",
        "category": "mobile-development",
        "technologies": ["Kotlin"],
        "projectType": "mobile-application",
        "status": "in-progress",
        "completedDate": "2024-02-15",
        "duration": "2 weeks",
        "myRole": "Mobile developer"
    },
    {
        "id": "dashboard",
        "title": "analytics dashboard",
        "description": "Sales reporting",
        "category": "web-development",
        "technologies": ["TypeScript"],
        "skills": ["Data visualisation"],
        "projectType": "web-application",
        "status": "completed",
        "completedDate": "2022-11-30",
        "duration": "10 days",
        "myRole": "Frontend developer"
    }
]"#;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        projects_path: "unused".to_string(),
    }
}

/// Records every submission it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<ContactSubmission>>,
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn send_contact(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// Always fails, as an unreachable SMTP relay would.
pub struct FailingNotifier;

#[async_trait]
impl ContactNotifier for FailingNotifier {
    async fn send_contact(&self, _submission: &ContactSubmission) -> Result<(), EmailError> {
        Err(EmailError::Build("relay unavailable".to_string()))
    }
}

/// Build the full application router around the sample dataset.
pub fn build_test_app_with(notifier: Arc<dyn ContactNotifier>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(ProjectCatalog::from_json(PROJECTS_JSON).unwrap()),
        notifier,
    };
    build_app_router(state, &config)
}

pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(RecordingNotifier::default()))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
