//! # fiq-server
//!
//! HTTP API for the FormularIQ usability study.
//!
//! Every save endpoint answers `success: true` as long as the request body
//! parses. Scoring problems surface as `null` scores plus `issues`, and an
//! unreachable store or backend degrades to the log fallback with the record
//! attached as `backup`.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /health` | service status |
//! | `POST /api/questionnaire/save` | SUS / trust / preference questionnaire |
//! | `POST /api/study/complete` | whole-study record with A/B comparison |
//! | `POST /api/study/save` | whole study in one request, scored from raw answers |
//! | `POST /api/form/save` | Variant A form values |
//! | `POST /api/dialog/save` | Variant B dialog answers and chat history |
//! | `POST /api/dialog/start` | open a Variant B dialog |
//! | `POST /api/dialog/message` | one participant message in a dialog |
//! | `POST /api/generate-instructions` | Variant A form fields and hints |
//! | `POST /api/chat` | Variant A help chat |
//! | `POST /api/error/report` | client error report |

mod error;
mod records;
mod routes;
mod sessions;
mod state;

pub use error::{ApiError, ServerError};
pub use routes::router;
pub use sessions::{DialogSessions, SharedDialog};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use fiq_config::FiqConfig;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// The router with CORS and request tracing applied.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError`] if the state cannot be built or the address
/// cannot be bound.
pub async fn serve(config: FiqConfig) -> Result<(), ServerError> {
    let address = config.server.bind_addr();
    let state = AppState::from_config(config)?;
    tracing::info!(
        storage = %state.archive.describe(),
        backend_candidates = state.backend.candidates().len(),
        "state initialized"
    );

    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "server listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
