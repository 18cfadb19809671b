use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no image supplied")]
    MissingImage,

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// The provider (or the proxy, seen from a client) answered with a non-success status.
    #[error("upstream responded with status {status}")]
    Upstream { status: u16, details: Value },

    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode upstream response: {0}")]
    Decode(String),

    #[error("model reply is not the expected JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingImage | Error::InvalidImage(_) | Error::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Transport(_) | Error::Decode(_) | Error::MalformedReply(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        match self {
            Error::MissingImage => json!({ "error": "Missing image", "message": self.to_string() }),
            Error::InvalidImage(_) => json!({ "error": "Invalid image", "message": self.to_string() }),
            Error::BadRequest(_) => json!({ "error": "Bad request", "message": self.to_string() }),
            Error::Upstream { details, .. } => json!({
                "error": "API request failed",
                "details": details,
            }),
            Error::Transport(_) | Error::Decode(_) | Error::MalformedReply(_) => json!({
                "error": "Internal server error",
                "message": self.to_string(),
            }),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Upstream { status, details } => {
                tracing::error!(status, %details, "provider API error");
            }
            Error::MissingImage | Error::InvalidImage(_) | Error::BadRequest(_) => {
                tracing::warn!(error = %self, "rejected request");
            }
            _ => tracing::error!(error = %self, "server error"),
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}
