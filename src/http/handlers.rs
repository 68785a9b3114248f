//! Request handlers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::problem::Problem;
use crate::http::server::AppState;
use crate::run::{RunParams, Submission};

/// `{"status": ...}` body shared by every successful answer.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    fn new(status: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: status.into(),
        })
    }
}

/// Liveness probe.
pub async fn health() -> Json<StatusBody> {
    StatusBody::new("ok")
}

/// Start a run. Answers as soon as the run is accepted, not when it ends.
pub async fn start_run(
    State(state): State<AppState>,
    Query(params): Query<RunParams>,
) -> Response {
    match state.orchestrator.submit(params).await {
        Ok(Submission::Accepted(handle)) => {
            tracing::debug!(run_id = %handle.run_id(), endpoint = %handle.target(), "Run accepted");
            StatusBody::new("ok").into_response()
        }
        Ok(Submission::AlreadyRunning(target)) => {
            StatusBody::new(format!("already running against {}", target)).into_response()
        }
        Err(e) => Problem::from(&e).into_response(),
    }
}
