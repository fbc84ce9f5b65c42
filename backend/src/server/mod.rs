//! Server construction and middleware wiring.

mod config;
mod shutdown;
mod state_builders;

pub use config::{ConfigError, ServerSettings, StoreBackend};
pub use state_builders::{StoreBootstrapError, build_store};

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::DocumentStore;
use crate::inbound::http::error::unknown_route;
use crate::inbound::http::health::{HealthState, live, ready, welcome};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::middleware::cors::cors;

use self::shutdown::{drain_on, termination_signal};

/// Assemble the application: routes, probes, CORS and trace middleware.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors())
        .wrap(Trace)
        .configure(crate::inbound::http::configure)
        .service(welcome)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app
        .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(unknown_route))
}

/// Bind the HTTP server over an already connected store.
///
/// Readiness is flipped only once the listener is bound. On Ctrl-C or
/// `SIGTERM` liveness fails first and in-flight requests are drained.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
    store: Arc<dyn DocumentStore>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::from_store(store));
    let server_health_state = health_state.clone();

    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .disable_signals()
            .bind(settings.bind_addr())?
            .run();

    actix_web::rt::spawn(drain_on(
        termination_signal(),
        health_state.clone(),
        server.handle(),
    ));
    health_state.mark_ready();
    Ok(server)
}
