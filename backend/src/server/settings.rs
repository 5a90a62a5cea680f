//! Server settings loaded via OrthoConfig from CLI flags, `WEATHER_*`
//! environment variables, and configuration files.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use weather::outbound::persistence::PoolConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost/weather";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Listener, database, and lifecycle settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEATHER")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds a request may wait for a pooled connection.
    pub pool_acquire_timeout_secs: Option<u64>,
    /// Seconds in-flight requests get to finish on shutdown.
    pub shutdown_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url())
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_acquire_timeout(Duration::from_secs(
                self.pool_acquire_timeout_secs
                    .unwrap_or(DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS),
            ))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(
            self.shutdown_timeout_secs
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        )
    }
}
