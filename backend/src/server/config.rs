//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use weather::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs beyond the health flags.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Defaults to a 30 second graceful shutdown window.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            shutdown_timeout: Duration::from_secs(30),
        }
    }

    /// How long in-flight requests may run after shutdown starts.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}
