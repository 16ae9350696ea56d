use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The server-side webhook secret is not configured. A deployment
    /// failure, surfaced on every request rather than at boot.
    #[error("Webhook token is not configured")]
    MissingSecret,
    /// The gateway presented a missing or mismatched `token` parameter.
    #[error("Invalid webhook token")]
    InvalidToken,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// An unexpected failure while processing an authenticated callback. The
    /// public message is the only detail returned to the gateway.
    #[error("{public}")]
    Processing {
        public: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn processing(public: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Processing { public, source: source.into() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSecret => {
                tracing::error!("Webhook token is not configured; rejecting request");
                let body = Json(json!({ "error": "Server configuration error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            Self::InvalidToken => {
                // The presented token is deliberately not logged.
                tracing::warn!("Webhook call with missing or mismatched token");
                let body = Json(json!({ "error": "Forbidden - invalid token" }));
                (StatusCode::FORBIDDEN, body).into_response()
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                let body = Json(json!({ "error": "Internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            Self::Processing { public, source } => {
                tracing::error!(error = %source, "{public}");
                let body = Json(json!({ "status": "error", "message": public }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
