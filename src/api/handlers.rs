//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{error::CountdownError, state::AppState};
use super::responses::{ApiResponse, HealthResponse, StartRequest, StatusResponse};

type HandlerResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Handle POST /countdown - Submit the countdown form
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> HandlerResult {
    match state.engine.start(&request.name, &request.date) {
        Ok(()) => {
            info!("Countdown endpoint called - countdown started");
            Ok(Json(ApiResponse::ok(
                format!("Countdown '{}' started", request.name),
                state.engine.snapshot(),
            )))
        }
        Err(CountdownError::Validation(reason)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::invalid(
                reason.user_message().to_string(),
                state.engine.snapshot(),
            )),
        )),
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string(), state.engine.snapshot())),
            ))
        }
    }
}

/// Handle POST /reset - Reset or start a new countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.engine.reset() {
        Ok(()) => {
            info!("Reset endpoint called - countdown cleared");
            Ok(Json(ApiResponse::ok(
                "Countdown reset".to_string(),
                state.engine.snapshot(),
            )))
        }
        Err(e) => {
            error!("Failed to reset countdown: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string(), state.engine.snapshot())),
            ))
        }
    }
}

/// Handle GET /status - Return engine and view state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        countdown: state.engine.snapshot(),
        view: state.view.snapshot(),
        min_date: state.min_date(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
