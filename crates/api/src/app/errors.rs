use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use movies_core::{FieldIssue, IssueCode, MovieError, ValidationError};

use crate::app::dto::MessageResponse;

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

pub fn movie_error_to_response(err: MovieError) -> axum::response::Response {
    match err {
        MovieError::Validation(e) => validation_error(e),
        MovieError::NotFound => not_found(),
    }
}

/// `400 {"error": [issues...]}`.
pub fn validation_error(err: ValidationError) -> axum::response::Response {
    tracing::debug!(%err, "rejected movie body");
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({ "error": err.into_issues() })),
    )
        .into_response()
}

/// Body could not be read as JSON at all; reported in the validation shape.
pub fn invalid_json(rejection: JsonRejection) -> axum::response::Response {
    validation_error(ValidationError::single(FieldIssue::new(
        IssueCode::InvalidJson,
        "JSON object",
        None,
        rejection.body_text(),
    )))
}

/// Query string did not fit `ListMoviesQuery`, e.g. a repeated `genre`.
pub fn invalid_query(rejection: QueryRejection) -> axum::response::Response {
    validation_error(ValidationError::single(FieldIssue::new(
        IssueCode::InvalidQuery,
        "at most one genre",
        None,
        rejection.body_text(),
    )))
}

pub fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(MessageResponse::new(NOT_FOUND_MESSAGE)),
    )
        .into_response()
}
