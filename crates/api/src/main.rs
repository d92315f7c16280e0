use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use folio_core::catalog::ProjectCatalog;
use folio_mail::{ContactNotifier, EmailConfig, LogNotifier, SmtpNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,folio_mail=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Project dataset ---
    let raw = std::fs::read_to_string(&config.projects_path).unwrap_or_else(|e| {
        panic!("Failed to read project dataset '{}': {e}", config.projects_path)
    });
    let catalog = ProjectCatalog::from_json(&raw).expect("Project dataset is invalid");
    tracing::info!(
        path = %config.projects_path,
        projects = catalog.len(),
        "Project dataset loaded",
    );

    // --- Contact notifier ---
    let notifier: Arc<dyn ContactNotifier> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(
                smtp_host = %email_config.smtp_host,
                inbox = %email_config.contact_inbox,
                "SMTP contact notifier enabled",
            );
            Arc::new(SmtpNotifier::new(email_config).expect("Failed to build SMTP transport"))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; contact submissions will only be logged");
            Arc::new(LogNotifier)
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        notifier,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);

    // In-flight requests get `shutdown_timeout_secs` to finish once a signal
    // arrives; after that the process exits regardless. Both futures listen
    // for the same signal independently: one stops accepting connections,
    // the other starts the drain deadline.
    tokio::select! {
        result = server => result.expect("Server error"),
        () = async {
            shutdown_signal().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(timeout_secs = drain.as_secs(), "Shutdown drain timed out");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
