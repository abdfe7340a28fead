//! Backend entry-point: loads settings, wires storage, and serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use habit_backend::inbound::http::health::HealthState;
use habit_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use habit_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use habit_backend::settings::AppSettings;
use server::{ServerConfig, create_server, fail_liveness_on};

/// Open the connection pool when a database is configured, applying pending
/// migrations first if asked to.
async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url().map(str::to_owned) else {
        return Ok(None);
    };

    if settings.run_migrations {
        let migration_url = url.clone();
        tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
    }

    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config).await.map_err(std::io::Error::other)?;
    Ok(Some(pool))
}

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM listener unavailable"),
        }
    }
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "shutdown signal listener unavailable");
        std::future::pending::<()>().await;
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("invalid settings: {err}")))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;
    let db_pool = connect_database(&settings).await?;

    let config = ServerConfig::new(session, bind_addr).with_db_pool(db_pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_prometheus()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        fail_liveness_on(shutdown_signal(), &health_state).await;
        handle.stop(true).await;
    });
    info!(%bind_addr, "habit backend listening");
    server.await
}
