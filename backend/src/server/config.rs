//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use travel_backend::domain::TextGenerator;
use travel_backend::outbound::persistence::DbPool;

/// Everything the server needs once startup has finished its fallible steps.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) text: Arc<TextGenerator>,
}

impl ServerConfig {
    /// Construct a configuration from a migrated pool and a loaded model.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, text: Arc<TextGenerator>) -> Self {
        Self {
            bind_addr,
            db_pool,
            text,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
