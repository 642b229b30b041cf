//! HTTP API exposing the query engine.
//!
//! Endpoints:
//!
//! - `GET /query` runs a pattern and returns matches with context,
//!   publishing the result set under a fresh handle.
//! - `GET /export` renders a published result set (the latest one when
//!   no `id` is given) as TSV.
//! - `GET /stats` reports corpus and vocabulary counts.
//! - `GET /healthz` is a liveness probe.

pub mod handlers;
pub mod store;

use std::future::Future;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, web};
use tokio::signal;

use crate::error::{ConcordError, Result};
use crate::search::ConcordanceEngine;

pub use self::store::{DEFAULT_CAPACITY, ResultStore};

/// Shared state behind every request handler.
pub struct AppState {
    pub engine: Arc<ConcordanceEngine>,
    pub store: ResultStore,
}

impl ResponseError for ConcordError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConcordError::Parse(_) | ConcordError::InvalidQuery(_) | ConcordError::Pattern(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// Serve the engine over HTTP until SIGINT.
///
/// The engine and result store are shared across all workers; queries
/// run on the engine's own thread pool so HTTP workers stay free.
pub async fn serve(engine: ConcordanceEngine, host: &str, port: u16) -> Result<()> {
    serve_until(engine, host, port, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("shutdown signal listener failed: {e}");
    }
}

/// Serve until `shutdown` resolves, then stop the workers gracefully.
async fn serve_until(
    engine: ConcordanceEngine,
    host: &str,
    port: u16,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let state = web::Data::new(AppState {
        engine: Arc::new(engine),
        store: ResultStore::default(),
    });

    tracing::info!("serving at http://{host}:{port}");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .route("/query", web::get().to(handlers::query))
            .route("/export", web::get().to(handlers::export))
            .route("/stats", web::get().to(handlers::stats))
            .route("/healthz", web::get().to(handlers::healthz))
    })
    .disable_signals()
    .bind((host, port))?
    .run();

    let handle = server.handle();
    let mut server = tokio::spawn(server);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("shutdown signal received, stopping workers");
            handle.stop(true).await;
            server
                .await
                .map_err(|e| ConcordError::other(format!("server task failed: {e}")))??;
        }
        res = &mut server => {
            tracing::warn!("server stopped before the shutdown signal");
            res.map_err(|e| ConcordError::other(format!("server task failed: {e}")))??;
        }
    }

    Ok(())
}
