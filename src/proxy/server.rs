use crate::error::{AppError, AppResult};
use crate::models::Settings;
use crate::proxy::upstream::UpstreamClient;
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Request body limit; inline base64 PDFs easily exceed axum's 2 MB default
pub const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http_client: reqwest::Client,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(settings: Settings) -> AppResult<Self> {
        let settings = Arc::new(settings);
        let http_client = crate::utils::http::create_client(&settings)?;
        let upstream = Arc::new(UpstreamClient::new(http_client.clone(), settings.clone()));

        Ok(Self {
            settings,
            http_client,
            upstream,
        })
    }
}

/// Build routes
pub fn build_router(state: AppState) -> Router {
    use crate::proxy::handlers;

    Router::new()
        .route(
            "/journal-entry",
            post(handlers::journal_entry::handle_journal_entry),
        )
        .route("/healthz", get(health_check_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            crate::proxy::middleware::logging_middleware,
        ))
        .with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(state: AppState) -> AppResult<(Self, tokio::task::JoinHandle<()>)> {
        let addr = state.settings.bind_address();
        let app = build_router(state);

        // Bind address
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bind address {}: {}", addr, e)))?;

        tracing::info!("Journal entry proxy started at http://{}", addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Journal entry proxy stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt as _;

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new(Settings::default()).unwrap();
        let response = build_router(state)
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let settings = Settings {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Settings::default()
        };
        let (server, handle) = AxumServer::start(AppState::new(settings).unwrap())
            .await
            .unwrap();
        server.stop();
        handle.await.unwrap();
    }
}
