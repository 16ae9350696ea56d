use crate::api::AppState;
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderValue, Request, request::Parts},
};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct TokenParams {
    token: Option<String>,
}

/// Authenticates a gateway callback by its `token` query parameter against
/// the configured shared secret. Runs before any parameter processing.
#[derive(Debug)]
pub struct GatewayAuth;

impl FromRequestParts<AppState> for GatewayAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(secret) = state.config.webhook.token.as_deref() else {
            return Err(AppError::MissingSecret);
        };

        let provided = Query::<TokenParams>::try_from_uri(&parts.uri).ok().and_then(|q| q.0.token);

        match provided {
            Some(token) if token == secret => Ok(Self),
            _ => Err(AppError::InvalidToken),
        }
    }
}

/// Reuses an inbound `x-request-id` header or generates a fresh UUID.
#[derive(Clone, Copy, Debug)]
pub struct MakeRequestUuidOrHeader;

impl MakeRequestId for MakeRequestUuidOrHeader {
    fn make_request_id<B>(&mut self, request: &Request<B>) -> Option<RequestId> {
        if let Some(id) = request.headers().get("x-request-id") {
            return Some(RequestId::new(id.clone()));
        }
        HeaderValue::from_str(&Uuid::new_v4().to_string()).ok().map(RequestId::new)
    }
}
