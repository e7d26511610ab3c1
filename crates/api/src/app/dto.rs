use serde::{Deserialize, Serialize};

/// Query string of `GET /movies`.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesQuery {
    pub genre: Option<String>,
}

impl ListMoviesQuery {
    /// Requested genre; an empty `genre=` counts as no filter.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}

/// Body of the greeting and not-found responses.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
