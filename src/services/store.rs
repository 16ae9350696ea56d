use crate::domain::delivery::{DeliveryReceipt, StoredReceipt};
use crate::domain::inbound::InboundMessage;
use crate::error::Result;
use async_trait::async_trait;

/// What applying a delivery receipt did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptOutcome {
    /// First receipt seen for this message key.
    Created,
    /// A receipt existed and its status changed.
    Updated,
    /// A receipt existed with the same status; the gateway redelivered and
    /// the store was left untouched.
    Duplicate,
}

/// Persistence port for gateway callbacks. Keyed writes make duplicate
/// gateway deliveries no-ops, so webhook processing stays at-most-once
/// effective despite at-least-once delivery upstream.
#[async_trait]
pub trait DeliveryStore: Send + Sync + std::fmt::Debug {
    /// Looks up the stored receipt for an outbound message reference.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the lookup fails.
    async fn find_by_message_key(&self, message_key: &str) -> Result<Option<StoredReceipt>>;

    /// Applies a delivery receipt, keyed on its message reference.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the write fails.
    async fn upsert_delivery_status(&self, message_key: &str, receipt: &DeliveryReceipt)
    -> Result<ReceiptOutcome>;

    /// Records an inbound citizen message. Inbound messages carry no
    /// provider key, so these are plain inserts.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the write fails.
    async fn record_inbound(&self, message: &InboundMessage) -> Result<()>;
}
