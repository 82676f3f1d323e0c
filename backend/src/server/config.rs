//! HTTP server configuration object.

use std::net::SocketAddr;

use qa_backend::inbound::http::session_config::SessionSettings;

/// Everything the HTTP server needs besides the handler state.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self { session, bind_addr }
    }
}
