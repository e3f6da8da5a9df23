use crate::error::FillError;
use crate::fill::FormFiller;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
const GENERATE_FAILED: &str = "Failed to generate PDF";

#[derive(Clone)]
struct AppState {
    filler: Arc<FormFiller>,
}

#[derive(Debug, Serialize)]
struct HealthRes {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorRes {
    error: String,
    code: &'static str,
    message: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: ErrorRes,
}

impl From<FillError> for ApiError {
    fn from(err: FillError) -> Self {
        match &err {
            FillError::Validation(reason) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorRes {
                    error: reason.clone(),
                    code: err.code(),
                    message: err.to_string(),
                },
            },
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorRes {
                    error: GENERATE_FAILED.to_string(),
                    code: err.code(),
                    message: err.to_string(),
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn router(filler: Arc<FormFiller>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pdf/generate", post(generate_pdf))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(AppState { filler })
}

pub async fn serve(filler: Arc<FormFiller>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "E-SOC fill server listening");
    axum::serve(listener, router(filler)).await
}

async fn health() -> Json<HealthRes> {
    Json(HealthRes { status: "ok" })
}

async fn generate_pdf(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let filler = state.filler.clone();
    let filled = tokio::task::spawn_blocking(move || filler.fill_json(&body))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "fill task aborted");
            ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorRes {
                    error: GENERATE_FAILED.to_string(),
                    code: "InternalError",
                    message: err.to_string(),
                },
            }
        })?
        .map_err(|err| {
            if err.is_client_error() {
                tracing::info!(error = %err, "rejected fill request");
            } else {
                tracing::error!(error = %err, code = err.code(), "fill failed");
            }
            ApiError::from(err)
        })?;

    let filename = download_filename(chrono::Utc::now().timestamp_millis());
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        filled.bytes,
    )
        .into_response())
}

pub fn download_filename(millis: i64) -> String {
    format!("E-SOC-Filled-{millis}.pdf")
}
