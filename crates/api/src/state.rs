use std::sync::Arc;

use folio_core::catalog::ProjectCatalog;
use folio_mail::ContactNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Project dataset, loaded once at startup and never mutated.
    pub catalog: Arc<ProjectCatalog>,
    /// Delivers validated contact submissions.
    pub notifier: Arc<dyn ContactNotifier>,
}
