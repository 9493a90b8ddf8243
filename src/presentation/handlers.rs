// HTTP request handlers
use crate::application::pipeline_error::PipelineError;
use crate::application::reading_request::ReadingRequestParams;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, Response, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub fn error_status(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::MissingRequiredField(_) | PipelineError::InvalidDateFormat(_) => {
            StatusCode::BAD_REQUEST
        }
        PipelineError::NoDataAvailable => StatusCode::NOT_FOUND,
        PipelineError::InternalProcessingFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Plain JSON 500 for when the real response cannot be produced.
fn internal_failure_response() -> Response<Body> {
    let body = format!(
        r#"{{"error":"{}"}}"#,
        PipelineError::InternalProcessingFailure
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response<Body> {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(_) => internal_failure_response(),
    }
}

async fn error_response(status: StatusCode, message: String, compress: bool) -> Response<Body> {
    respond(status, &ErrorBody { error: message }, compress).await
}

/// Clean, classify and summarise readings for one field of a project
pub async fn query_readings(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReadingRequestParams>, JsonRejection>,
) -> Response<Body> {
    let compress = accepts_brotli(&headers);

    let Json(params) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Malformed readings request: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text(), compress).await;
        }
    };

    match state.reading_service.process(params).await {
        Ok(report) => respond(StatusCode::OK, &report, compress).await,
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!("Readings request rejected: {}", e);
            }
            error_response(error_status(&e), e.to_string(), compress).await
        }
    }
}
