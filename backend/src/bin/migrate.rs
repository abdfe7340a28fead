//! Apply pending database migrations and exit.
//!
//! Reads the connection string from `HABITS_DATABASE_URL` (or
//! `--database-url`) using the same settings loader as the server.

use color_eyre::eyre::{Result, WrapErr, eyre};
use habit_backend::outbound::persistence::run_pending_migrations;
use habit_backend::settings::AppSettings;
use ortho_config::OrthoConfig as _;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("invalid settings: {err}"))?;
    let url = settings
        .database_url()
        .ok_or_else(|| eyre!("HABITS_DATABASE_URL is not set"))?;

    let applied = run_pending_migrations(url).wrap_err("apply migrations")?;
    if applied.is_empty() {
        info!("schema already up to date");
    }
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
