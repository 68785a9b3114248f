//! Problem responses (`application/problem+json`).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::run::RunError;

/// Problem details body returned for rejected requests.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn bad_request(title: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: "about:blank".to_string(),
            title: title.to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: detail.into(),
        }
    }
}

impl From<&RunError> for Problem {
    fn from(error: &RunError) -> Self {
        let detail = match error {
            RunError::MissingParameters(_) => error.title().to_string(),
            RunError::InvalidDuration { reason, .. } => format!("Can't parse duration: {}", reason),
            RunError::InvalidService { source, .. } => format!("Can't find url file: {}", source),
        };
        Problem::bad_request(error.title(), detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_REQUEST);
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}
