use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, error, info, warn};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::api::types::{ErrorResponse, HealthResponse, ProblemDescription, ScaffoldResponse};
use crate::config::NamingConfig;
use crate::error::ScaffoldError;
use crate::scaffold;

#[derive(Clone)]
pub struct AppState {
    naming: Arc<NamingConfig>,
    template: Arc<Vec<u8>>,
}

impl AppState {
    pub fn new(naming: NamingConfig, template: Vec<u8>) -> Self {
        Self {
            naming: Arc::new(naming),
            template: Arc::new(template),
        }
    }
}

/// Per-request failures. None of them take the server down.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("Invalid problem JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("Scaffold task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Body(rejection) => rejection.status(),
            AppError::Decode(e) if e.is_data() => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Scaffold(ScaffoldError::InvalidProblem(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Scaffold(ScaffoldError::NotADirectory(_)) => StatusCode::CONFLICT,
            AppError::Scaffold(ScaffoldError::Io { .. }) | AppError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health).post(submit))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::started())
}

async fn submit(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ScaffoldResponse>), AppError> {
    // Content-Type is not checked, any body is parsed as JSON
    let problem: ProblemDescription = serde_json::from_slice(&body?)?;
    info!(
        "Received '{}' from '{}' ({} tests, {} ms, {} MB)",
        problem.name,
        problem.group,
        problem.tests.len(),
        problem.time_limit,
        problem.memory_limit
    );
    debug!("{:?}", problem);

    let report = tokio::task::spawn_blocking(move || {
        scaffold::materialize(&problem, &state.naming, &state.template)
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(ScaffoldResponse {
            directory: report.directory,
            code_file: report.code_file,
            files: report.written,
        }),
    ))
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
