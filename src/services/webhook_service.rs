use crate::api::schemas::webhooks::{DlrParams, MoParams};
use crate::domain::delivery::{DeliveryReceipt, DeliveryStatus};
use crate::domain::inbound::InboundMessage;
use crate::domain::msisdn::mask_msisdn;
use crate::domain::provider_time;
use crate::error::Result;
use crate::services::store::{DeliveryStore, ReceiptOutcome};
use opentelemetry::{
    KeyValue, global,
    metrics::Counter,
};
use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) receipts_total: Counter<u64>,
    pub(crate) inbound_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("munigate");
        Self {
            receipts_total: meter
                .u64_counter("munigate_delivery_receipts_total")
                .with_description("Delivery receipts processed, by delivery status")
                .build(),
            inbound_total: meter
                .u64_counter("munigate_inbound_messages_total")
                .with_description("Inbound citizen messages processed")
                .build(),
        }
    }
}

/// Normalizes authenticated gateway callbacks into domain records, logs them
/// with masked subscriber numbers, and applies them to the store.
#[derive(Clone, Debug)]
pub struct WebhookService {
    store: Arc<dyn DeliveryStore>,
    metrics: Metrics,
}

impl WebhookService {
    #[must_use]
    pub fn new(store: Arc<dyn DeliveryStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Processes a delivery receipt callback.
    ///
    /// Malformed upstream data (non-numeric `SC`, unparsable `TS`) is
    /// recovered locally and never fails the request.
    ///
    /// # Errors
    /// Returns `AppError::Database` if persisting the receipt fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, params),
        fields(message_key = ?params.message_ref)
    )]
    pub async fn process_delivery_receipt(&self, params: DlrParams) -> Result<DeliveryReceipt> {
        let received_at = OffsetDateTime::now_utc();

        tracing::info!(
            recipient = ?params.recipient_number,
            sender = ?params.sender_number,
            status_code = ?params.status_code,
            carrier_status = ?params.carrier_status,
            message_ref = ?params.message_ref,
            timestamp = ?params.timestamp,
            "Received delivery receipt callback"
        );

        let status_code = params.status_code.as_deref().and_then(|s| s.trim().parse::<i32>().ok());
        let delivery_status = DeliveryStatus::from_status_code(status_code);
        let timestamp = resolve_timestamp(params.timestamp.as_deref(), received_at);

        let receipt = DeliveryReceipt {
            message_key: params.message_ref,
            recipient_number: params.recipient_number.unwrap_or_default(),
            sender_number: params.sender_number.unwrap_or_default(),
            status_code,
            carrier_status: params.carrier_status,
            delivery_status,
            timestamp,
            received_at,
        };

        tracing::info!(
            recipient = %mask_msisdn(&receipt.recipient_number),
            sender = %mask_msisdn(&receipt.sender_number),
            status = %receipt.delivery_status,
            timestamp = %receipt.timestamp,
            "Processed delivery receipt"
        );

        if let Some(key) = &receipt.message_key {
            match self.store.upsert_delivery_status(key, &receipt).await? {
                ReceiptOutcome::Created => tracing::debug!("Delivery status recorded"),
                ReceiptOutcome::Updated => tracing::debug!("Delivery status updated"),
                ReceiptOutcome::Duplicate => {
                    tracing::info!(message_key = %key, "Duplicate delivery receipt; store unchanged");
                }
            }
        } else {
            // Flagged upstream rather than assigned a synthetic key, since
            // that could mask gateway-side bugs.
            tracing::warn!("Delivery receipt without message reference; not persisted");
        }

        self.metrics
            .receipts_total
            .add(1, &[KeyValue::new("status", receipt.delivery_status.as_str())]);

        Ok(receipt)
    }

    /// Processes an inbound citizen message callback.
    ///
    /// # Errors
    /// Returns `AppError::Database` if recording the message fails.
    #[tracing::instrument(err(level = "warn"), skip(self, params))]
    pub async fn process_inbound_message(&self, params: MoParams) -> Result<InboundMessage> {
        let received_at = OffsetDateTime::now_utc();

        tracing::info!(
            from = ?params.from_number,
            to = ?params.to_number,
            message = ?params.message,
            timestamp = ?params.timestamp,
            "Received inbound message callback"
        );

        let timestamp = resolve_timestamp(params.timestamp.as_deref(), received_at);

        let message = InboundMessage {
            from_number: params.from_number.unwrap_or_default(),
            to_number: params.to_number.unwrap_or_default(),
            message_text: params.message.unwrap_or_default(),
            timestamp,
            received_at,
        };

        tracing::info!(
            from = %mask_msisdn(&message.from_number),
            to = %mask_msisdn(&message.to_number),
            length = message.message_text.chars().count(),
            timestamp = %message.timestamp,
            "Processed inbound message"
        );

        self.store.record_inbound(&message).await?;
        self.metrics.inbound_total.add(1, &[]);

        Ok(message)
    }
}

/// Applies the provider-timestamp fallback rule: absent or unparsable values
/// resolve to the local receipt time, so records never carry an unset time.
fn resolve_timestamp(raw: Option<&str>, received_at: OffsetDateTime) -> OffsetDateTime {
    match raw {
        None => received_at,
        Some(raw) => provider_time::parse_provider_timestamp(raw).unwrap_or_else(|| {
            tracing::warn!(raw, "Unparsable provider timestamp; falling back to receipt time");
            received_at
        }),
    }
}
