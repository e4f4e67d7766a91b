//! Backend entry-point: loads settings, prepares storage and runs the REST
//! and gRPC servers until a shutdown signal arrives.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pvz_backend::inbound::http::health::HealthState;
use pvz_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Resolve on SIGINT or, on Unix, SIGTERM. A handler that cannot be
/// installed never fires.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load settings")?;
    let database_url = settings.database_url()?;
    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply migrations")?;
    }
    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to build connection pool")?;

    let config = ServerConfig::new(
        settings.http_addr()?,
        settings.grpc_addr()?,
        settings.jwt_secret()?,
    )
    .with_db_pool(pool);

    let health_state = web::Data::new(HealthState::new());
    let servers = create_server(health_state.clone(), config)?;
    let outcome = servers.run(shutdown_signal()).await;

    health_state.mark_unhealthy();
    info!("servers stopped");
    outcome
}
