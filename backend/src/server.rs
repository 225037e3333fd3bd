use std::sync::Arc;

use axum::{Extension, Router};
use contact_storage::contact::ContactStorage;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{readiness::Readiness, routes, types::Config};

/// Builds the application router with its dependencies and middleware
pub fn router(
    config: &Config,
    contact_storage: Arc<ContactStorage>,
    readiness: Readiness,
) -> Router {
    let mut router = routes::handler();

    if let Some(static_dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
        .layer(Extension(contact_storage))
        .layer(Extension(readiness))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
}

/// Starts the server with the given configuration and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    config: Config,
    contact_storage: Arc<ContactStorage>,
    readiness: Readiness,
) -> anyhow::Result<()> {
    let router = router(&config, contact_storage, readiness);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Contacts backend started on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
