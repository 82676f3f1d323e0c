//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use qa_backend::Trace;
use qa_backend::domain::DemoSeedingError;
use qa_backend::inbound::http::answers::{create_answer, downvote, new_answer, upvote};
use qa_backend::inbound::http::health::{HealthState, live, ready};
use qa_backend::inbound::http::questions::{index, show};
use qa_backend::inbound::http::session_config::{SessionConfigError, SessionSettings};
use qa_backend::inbound::http::state::HttpState;
use qa_backend::inbound::http::users::{sign_in, sign_in_form, sign_out, sign_out_form};
use qa_backend::outbound::persistence::{MigrationError, PoolError};
use qa_backend::settings::SettingsError;

/// Largest accepted form body; answers are capped well below this.
const FORM_LIMIT_BYTES: usize = 256 * 1024;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("session configuration: {0}")]
    Session(#[from] SessionConfigError),
    #[error("migrations: {0}")]
    Migration(#[from] MigrationError),
    #[error("database pool: {0}")]
    Pool(#[from] PoolError),
    #[error("demo data: {0}")]
    Seed(#[from] DemoSeedingError),
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("qa")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let pages = web::scope("")
        .wrap(session.middleware())
        .app_data(web::FormConfig::default().limit(FORM_LIMIT_BYTES))
        .service(index)
        .service(show)
        .service(new_answer)
        .service(create_answer)
        .service(upvote)
        .service(downvote)
        .service(sign_in_form)
        .service(sign_in)
        .service(sign_out)
        .service(sign_out_form);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(pages)
}

/// Construct the Actix HTTP server.
///
/// Readiness flips to healthy once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig { session, bind_addr } = config;
    #[cfg(feature = "metrics")]
    let prometheus = make_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(
            server_health_state.clone(),
            http_state.clone(),
            session.clone(),
        );

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use qa_backend::domain::TRACE_ID_HEADER;
    use qa_backend::settings::AppSettings;
    use rstest::rstest;

    fn session_settings() -> SessionSettings {
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    async fn in_memory_state() -> HttpState {
        build_http_state(&AppSettings {
            bind_addr: None,
            database_url: None,
            database_max_connections: None,
            seed_demo_data: true,
        })
        .await
        .expect("in-memory state")
    }

    #[rstest]
    #[case("/questions/6f1c1d3e-0000-4000-8000-000000000001/answers/new")]
    #[case("/answers/6f1c1d3e-0000-4000-8000-000000000001/upvote")]
    #[actix_rt::test]
    async fn protected_routes_redirect_to_sign_in(#[case] uri: &str) {
        let health = web::Data::new(HealthState::new());
        let state = web::Data::new(in_memory_state().await);
        let app = test::init_service(build_app(health, state, session_settings())).await;

        let method = if uri.ends_with("/new") {
            test::TestRequest::get()
        } else {
            test::TestRequest::post()
        };
        let res = test::call_service(&app, method.uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/users/sign_in")
        );
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_rt::test]
    async fn home_page_lists_seeded_question() {
        let health = web::Data::new(HealthState::new());
        let state = web::Data::new(in_memory_state().await);
        let app = test::init_service(build_app(health, state, session_settings())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(html.contains("How do I share data between threads?"));
    }
}
