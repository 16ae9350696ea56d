use time::OffsetDateTime;

/// A mobile-originated message from a citizen, normalized from the gateway's
/// `MO` callback parameters.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Citizen's number (`FN`), raw. Masked only in log output.
    pub from_number: String,
    /// The platform's receiving number (`TN`).
    pub to_number: String,
    /// Free text from the citizen (`MS`).
    pub message_text: String,
    /// Provider-supplied time; falls back to `received_at` when absent or
    /// unparsable. Never unset.
    pub timestamp: OffsetDateTime,
    /// Local receipt time, always set.
    pub received_at: OffsetDateTime,
}
