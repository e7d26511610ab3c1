use axum::{http::StatusCode, Json};

use crate::app::dto::MessageResponse;

pub const GREETING: &str = "Hola Mundo Jumbosoft";

pub async fn greeting() -> Json<MessageResponse> {
    Json(MessageResponse::new(GREETING))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
