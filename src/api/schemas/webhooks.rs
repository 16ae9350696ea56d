use serde::{Deserialize, Serialize};

/// Query parameters of a delivery-receipt (`DLR`) callback. Everything
/// arrives as untyped strings; coercion happens in the service layer with
/// documented fallback rules.
#[derive(Debug, Clone, Deserialize)]
pub struct DlrParams {
    /// Recipient number on device.
    #[serde(rename = "FN")]
    pub recipient_number: Option<String>,
    /// Originating/sender number.
    #[serde(rename = "TN")]
    pub sender_number: Option<String>,
    /// Status code as a numeric string.
    #[serde(rename = "SC")]
    pub status_code: Option<String>,
    /// Status text from the carrier.
    #[serde(rename = "ST")]
    pub carrier_status: Option<String>,
    /// Message reference correlating to a sent outbound message.
    #[serde(rename = "RF")]
    pub message_ref: Option<String>,
    /// Timestamp string, format not guaranteed.
    #[serde(rename = "TS")]
    pub timestamp: Option<String>,
}

/// Query parameters of a mobile-originated (`MO`) inbound message callback.
#[derive(Debug, Clone, Deserialize)]
pub struct MoParams {
    /// Citizen's number.
    #[serde(rename = "FN")]
    pub from_number: Option<String>,
    /// The platform's receiving number.
    #[serde(rename = "TN")]
    pub to_number: Option<String>,
    /// Message text.
    #[serde(rename = "MS")]
    pub message: Option<String>,
    /// Timestamp string, format not guaranteed.
    #[serde(rename = "TS")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DlrAck {
    pub status: &'static str,
    pub message: &'static str,
    /// Echoes the gateway's `RF`; omitted entirely when the callback carried
    /// none.
    #[serde(rename = "messageKey", skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoAck {
    pub status: &'static str,
    pub message: &'static str,
}
