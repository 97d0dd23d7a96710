//! Presence gateway binary.
//!
//! Boot order: config -> logging -> store + sweeper -> listener.
//! On SIGINT/SIGTERM readiness flips to draining and the sweeper is stopped
//! before the listener drains in-flight requests.

use std::process::ExitCode;

use presence_gateway::{app_state::AppState, config, logging, router};

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = match config::load_from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::init(&config::LoggingSection::default());
            tracing::error!(error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&cfg.logging);

    let listen = match cfg.server.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid listen address");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(cfg);
    let app = router::build_router(state.clone());

    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to listen");
            state.shutdown().await;
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%listen, "listening");

    let drain_state = state.clone();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            drain_state.shutdown().await;
        })
        .await;

    if let Err(e) = served {
        tracing::error!(error = %e, "server failed");
        state.shutdown().await;
        return ExitCode::FAILURE;
    }

    tracing::info!("server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    tracing::info!(signal, "shutting down");
}
