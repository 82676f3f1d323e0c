//! Application settings loaded via OrthoConfig.
//!
//! Values come from `QA_*` environment variables, an optional config file,
//! or command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised when settings hold unusable values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {message}")]
    Load { message: String },
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QA")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Postgres URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
    /// Seed a confirmed demo user and question at startup.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Maximum pool size.
    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "QA_BIND_ADDR",
        "QA_DATABASE_URL",
        "QA_DATABASE_MAX_CONNECTIONS",
        "QA_SEED_DEMO_DATA",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("qa-backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("socket address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.database_max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(!settings.seed_demo_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("QA_BIND_ADDR", Some("127.0.0.1:3000".to_owned())),
            ("QA_DATABASE_URL", Some("postgres://localhost/qa".to_owned())),
            ("QA_DATABASE_MAX_CONNECTIONS", Some("4".to_owned())),
            ("QA_SEED_DEMO_DATA", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("bind address"),
            "127.0.0.1:3000".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/qa"));
        assert_eq!(settings.database_max_connections(), 4);
        assert!(settings.seed_demo_data);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn blank_database_url_means_in_memory(#[case] url: Option<&str>) {
        let settings = AppSettings {
            bind_addr: None,
            database_url: url.map(str::to_owned),
            database_max_connections: None,
            seed_demo_data: false,
        };
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            database_max_connections: None,
            seed_demo_data: false,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
