use crate::api::AppState;
use crate::api::middleware::GatewayAuth;
use crate::api::schemas::webhooks::{DlrAck, DlrParams, MoAck, MoParams};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

const DLR_FAILURE: &str = "Failed to process delivery receipt";
const MO_FAILURE: &str = "Failed to process incoming message";

/// Delivery-receipt callback for a previously sent outbound SMS.
///
/// # Errors
/// Returns `AppError::Processing` if the receipt cannot be applied.
pub async fn delivery_receipt(
    _auth: GatewayAuth,
    State(state): State<AppState>,
    Query(params): Query<DlrParams>,
) -> Result<impl IntoResponse> {
    let receipt = state
        .webhook_service
        .process_delivery_receipt(params)
        .await
        .map_err(|e| AppError::processing(DLR_FAILURE, e))?;

    Ok(Json(DlrAck {
        status: "success",
        message: "Delivery receipt processed",
        message_key: receipt.message_key,
    }))
}

/// Inbound (mobile-originated) citizen message callback.
///
/// # Errors
/// Returns `AppError::Processing` if the message cannot be recorded.
pub async fn inbound_message(
    _auth: GatewayAuth,
    State(state): State<AppState>,
    Query(params): Query<MoParams>,
) -> Result<impl IntoResponse> {
    state
        .webhook_service
        .process_inbound_message(params)
        .await
        .map_err(|e| AppError::processing(MO_FAILURE, e))?;

    Ok(Json(MoAck { status: "success", message: "Incoming message processed" }))
}
