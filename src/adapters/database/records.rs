use crate::domain::delivery::{DeliveryStatus, StoredReceipt};
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct ReceiptRecord {
    pub(crate) message_key: String,
    pub(crate) delivery_status: String,
    pub(crate) provider_timestamp: OffsetDateTime,
    pub(crate) received_at: OffsetDateTime,
}

impl From<ReceiptRecord> for StoredReceipt {
    fn from(record: ReceiptRecord) -> Self {
        Self {
            message_key: record.message_key,
            delivery_status: DeliveryStatus::from_str_lossy(&record.delivery_status),
            timestamp: record.provider_timestamp,
            received_at: record.received_at,
        }
    }
}
