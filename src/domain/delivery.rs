use std::fmt;
use time::OffsetDateTime;

/// Carrier delivery state derived from the gateway's `SC` status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed,
    Unknown,
}

impl DeliveryStatus {
    /// Maps the raw `SC` parameter: `1` is delivered, `0` is failed, anything
    /// else (other codes, non-numeric, absent) is unknown.
    #[must_use]
    pub fn from_status_code(code: Option<i32>) -> Self {
        match code {
            Some(1) => Self::Delivered,
            Some(0) => Self::Failed,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`Self::as_str`], tolerant of unrecognized input.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "delivered" => Self::Delivered,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized delivery receipt for a previously sent outbound SMS.
///
/// Phone numbers are held raw; masking happens only at the log boundary.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    /// Gateway reference (`RF`) correlating to the outbound message. The
    /// gateway has been observed to omit it; no synthetic key is invented.
    pub message_key: Option<String>,
    /// Number the message was delivered to (`FN`).
    pub recipient_number: String,
    /// Originating number (`TN`).
    pub sender_number: String,
    /// `SC` as an integer, when it parsed as one.
    pub status_code: Option<i32>,
    /// Carrier status text (`ST`), passed through untouched.
    pub carrier_status: Option<String>,
    pub delivery_status: DeliveryStatus,
    /// Provider-supplied send/delivery time; falls back to `received_at`
    /// when absent or unparsable. Never unset.
    pub timestamp: OffsetDateTime,
    /// Local receipt time, always set.
    pub received_at: OffsetDateTime,
}

/// The persisted view of a receipt, as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub message_key: String,
    pub delivery_status: DeliveryStatus,
    pub timestamp: OffsetDateTime,
    pub received_at: OffsetDateTime,
}
