//! Credential Service Binary
//!
//! Runs the issuance service, the verification service, or both, depending
//! on `CREDENTIAL_SERVICE_ROLE`.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use credential_core::{IdentityResolver, WorkerEnv};
use credential_service::{create_router, open_store, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let identity: Arc<dyn IdentityResolver> = Arc::new(WorkerEnv::capture());
    let store = open_store(config.database_url.as_deref()).await?;

    info!(
        role = %config.role,
        worker = %identity.resolve(),
        duplicate_policy = %config.duplicate_policy,
        persistent = config.database_url.is_some(),
        "Starting credential service"
    );

    let state = Arc::new(AppState::new(
        config.role,
        store,
        identity,
        config.duplicate_policy,
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!(addr = %config.bind_address, service = config.role.service_name(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM (pod termination)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Graceful shutdown initiated");
}
