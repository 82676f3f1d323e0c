//! Backend entry-point: loads settings, prepares persistence, and serves the
//! Q&A pages.

mod server;

use std::ffi::OsString;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use qa_backend::inbound::http::health::HealthState;
use qa_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use qa_backend::inbound::http::state::HttpState;
use qa_backend::settings::{AppSettings, SettingsError};
use server::{ServerConfig, StartupError, build_http_state, create_server};

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

    let (http_state, config) = prepare(std::env::args_os().collect())
        .await
        .map_err(std::io::Error::other)?;
    info!(bind_addr = %config.bind_addr, "starting server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

async fn prepare(
    args: Vec<OsString>,
) -> Result<(HttpState, ServerConfig), StartupError> {
    let settings = AppSettings::load_from_iter(args).map_err(|err| SettingsError::Load {
        message: err.to_string(),
    })?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
    let bind_addr = settings.bind_addr()?;
    let http_state = build_http_state(&settings).await?;
    Ok((http_state, ServerConfig::new(session, bind_addr)))
}
