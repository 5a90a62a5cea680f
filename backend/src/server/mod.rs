//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use weather::Trace;
#[cfg(debug_assertions)]
use weather::doc::ApiDoc;
use weather::inbound::http::configure_resources;
use weather::inbound::http::health::{HealthState, live, ready};
use weather::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_resources)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the Actix server and mark the service ready.
///
/// Signal handling is left to the caller: the returned [`Server`] does not
/// install its own, so `main` can flip liveness before draining.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config.db_pool);
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        shutdown_timeout,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .shutdown_timeout(shutdown_timeout.as_secs())
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
