//! Backend entry-point: loads settings, opens the pool, and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::dev::ServerHandle;
use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use weather::inbound::http::health::HealthState;
use weather::outbound::persistence::DbPool;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let db_pool = DbPool::new(settings.pool_config())
        .await
        .wrap_err("failed to build database pool")?;

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(bind_addr, db_pool)
        .with_shutdown_timeout(settings.shutdown_timeout());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "weather API listening");

    actix_web::rt::spawn(drain_on_signal(health_state, server.handle()));
    server.await.wrap_err("server terminated with an error")?;
    info!("weather API stopped");
    Ok(())
}

/// Merge CLI arguments, `WEATHER_*` variables, and configuration files.
fn load_settings<I, T>(args: I) -> color_eyre::Result<ServerSettings>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ServerSettings::load_from_iter(args)
        .map_err(|err| eyre!("failed to load server settings: {err}"))
}

/// Flip liveness off, then stop accepting and let in-flight requests finish.
async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    wait_for_shutdown_signal().await;
    info!("shutdown signal received, draining");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable, waiting for ctrl-c only");
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "ctrl-c handler failed");
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler failed");
    }
}

#[cfg(test)]
mod tests {
    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn cli_port_overrides_environment() {
        let _guard = lock_env([("WEATHER_PORT", Some("4000".to_owned()))]);

        let settings = load_settings(["weather", "--port", "5000"]).expect("settings load");

        assert_eq!(settings.bind_addr().port(), 5000);
    }

    #[rstest]
    fn malformed_port_is_reported() {
        let _guard = lock_env([("WEATHER_PORT", Some("not-a-port".to_owned()))]);

        let err = load_settings(["weather"]).expect_err("port must be numeric");

        assert!(err.to_string().contains("failed to load server settings"));
    }
}
