//! axum transport in front of the ingest [`Router`](crate::core::router::Router).
//!
//! Every request is handed to the router as (method, path, body bytes); the
//! router decides the endpoint and the response. Log appends are blocking file
//! writes, so dispatch runs on tokio's blocking pool.

use crate::core::router::{Method, Router as IngestRouter};
use crate::domain::model::IngestResponse;
use crate::domain::ports::LogSink;
use crate::utils::error::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{self, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub fn build_app<G, T>(router: Arc<IngestRouter<G, T>>) -> Router
where
    G: LogSink + 'static,
    T: LogSink + 'static,
{
    Router::new()
        .fallback(handle::<G, T>)
        .with_state(router)
        .layer(TraceLayer::new_for_http())
}

async fn handle<G, T>(
    State(router): State<Arc<IngestRouter<G, T>>>,
    method: http::Method,
    uri: Uri,
    body: Bytes,
) -> Response
where
    G: LogSink + 'static,
    T: LogSink + 'static,
{
    let method = Method::parse(method.as_str());
    let path = uri.path().to_string();

    let response = match tokio::task::spawn_blocking(move || router.dispatch(&method, &path, &body))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Request handler panicked: {}", e);
            IngestResponse::error(500, "Internal server error")
        }
    };

    into_http(response)
}

fn into_http(response: IngestResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

/// Serves until `shutdown` resolves.
pub async fn serve<G, T, F>(
    listener: TcpListener,
    router: Arc<IngestRouter<G, T>>,
    shutdown: F,
) -> Result<()>
where
    G: LogSink + 'static,
    T: LogSink + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(router);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
