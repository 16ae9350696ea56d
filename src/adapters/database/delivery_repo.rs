use crate::adapters::database::DbPool;
use crate::adapters::database::records::ReceiptRecord;
use crate::domain::delivery::{DeliveryReceipt, StoredReceipt};
use crate::domain::inbound::InboundMessage;
use crate::error::Result;
use crate::services::store::{DeliveryStore, ReceiptOutcome};
use async_trait::async_trait;

/// Postgres-backed [`DeliveryStore`].
#[derive(Clone, Debug)]
pub struct DeliveryRepository {
    pool: DbPool,
}

impl DeliveryRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryStore for DeliveryRepository {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_by_message_key(&self, message_key: &str) -> Result<Option<StoredReceipt>> {
        let record = sqlx::query_as::<_, ReceiptRecord>(
            r"
            SELECT message_key, delivery_status, provider_timestamp, received_at
            FROM delivery_receipts
            WHERE message_key = $1
            ",
        )
        .bind(message_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, receipt))]
    async fn upsert_delivery_status(&self, message_key: &str, receipt: &DeliveryReceipt) -> Result<ReceiptOutcome> {
        let existing = self.find_by_message_key(message_key).await?;

        if let Some(existing) = &existing {
            if existing.delivery_status == receipt.delivery_status {
                return Ok(ReceiptOutcome::Duplicate);
            }
        }

        // Keyed on message_key so a racing redelivery lands on the same row.
        sqlx::query(
            r"
            INSERT INTO delivery_receipts
                (message_key, recipient_number, sender_number, status_code,
                 carrier_status, delivery_status, provider_timestamp, received_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (message_key) DO UPDATE SET
                status_code = EXCLUDED.status_code,
                carrier_status = EXCLUDED.carrier_status,
                delivery_status = EXCLUDED.delivery_status,
                provider_timestamp = EXCLUDED.provider_timestamp,
                received_at = EXCLUDED.received_at,
                updated_at = NOW()
            ",
        )
        .bind(message_key)
        .bind(&receipt.recipient_number)
        .bind(&receipt.sender_number)
        .bind(receipt.status_code)
        .bind(&receipt.carrier_status)
        .bind(receipt.delivery_status.as_str())
        .bind(receipt.timestamp)
        .bind(receipt.received_at)
        .execute(&self.pool)
        .await?;

        Ok(if existing.is_some() { ReceiptOutcome::Updated } else { ReceiptOutcome::Created })
    }

    #[tracing::instrument(level = "debug", skip(self, message))]
    async fn record_inbound(&self, message: &InboundMessage) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO inbound_messages
                (from_number, to_number, message_text, provider_timestamp, received_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&message.from_number)
        .bind(&message.to_number)
        .bind(&message.message_text)
        .bind(message.timestamp)
        .bind(message.received_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
