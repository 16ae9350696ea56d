use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

// The gateway does not guarantee a timestamp format; these cover the shapes
// seen in practice. Naive forms are assumed UTC.
const NAIVE_SPACE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const NAIVE_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Best-effort parse of a provider-supplied timestamp. Returns `None` when
/// the value is absent, empty, or matches no known shape; callers fall back
/// to the local receipt time.
#[must_use]
pub fn parse_provider_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }

    for format in [NAIVE_SPACE, NAIVE_T] {
        if let Ok(ts) = PrimitiveDateTime::parse(raw, format) {
            return Some(ts.assume_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            parse_provider_timestamp("2024-01-15T10:00:00Z"),
            Some(datetime!(2024-01-15 10:00:00 UTC))
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_provider_timestamp("2024-01-15T12:00:00+02:00"),
            Some(datetime!(2024-01-15 10:00:00 UTC))
        );
    }

    #[test]
    fn test_parse_naive_space() {
        assert_eq!(
            parse_provider_timestamp("2024-01-15 10:00:00"),
            Some(datetime!(2024-01-15 10:00:00 UTC))
        );
    }

    #[test]
    fn test_parse_naive_t() {
        assert_eq!(
            parse_provider_timestamp("2024-01-15T10:00:00"),
            Some(datetime!(2024-01-15 10:00:00 UTC))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_provider_timestamp("not-a-date"), None);
        assert_eq!(parse_provider_timestamp("bad-timestamp"), None);
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert_eq!(parse_provider_timestamp(""), None);
        assert_eq!(parse_provider_timestamp("   "), None);
    }
}
