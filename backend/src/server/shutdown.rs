//! Graceful shutdown.
//!
//! Actix's own signal handling is disabled so liveness can fail before the
//! listener stops accepting connections.

use std::future::Future;

use actix_web::dev::ServerHandle;
use actix_web::rt::signal;
use actix_web::web;
use tracing::{info, warn};

use crate::inbound::http::health::HealthState;

/// Resolves on Ctrl-C or, on Unix, `SIGTERM`.
pub async fn termination_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Wait for `signal`, fail the liveness probe, then stop the server
/// gracefully.
pub async fn drain_on<F>(signal: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpServer};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let server = HttpServer::new(App::new)
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();

        actix_web::rt::spawn(drain_on(
            std::future::ready(()),
            health_state.clone(),
            server.handle(),
        ));
        server.await.expect("server stops cleanly");

        assert!(!health_state.is_alive());
        assert!(health_state.is_ready());
    }
}
