// Parsing helpers for the raw-item boundary.
use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{Amount, RawItem};

/// Converts a timestamp string to `DateTime<Utc>`, if possible.
/// Accepts RFC 3339 and bare `YYYY-MM-DD` dates (interpreted as midnight UTC).
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

/// Extracts a usable price from an amount. Only positive finite values count;
/// anything else is discarded upstream.
pub fn parse_amount(amount: &Amount) -> Option<f64> {
    let value = match amount {
        Amount::Number(v) => *v,
        Amount::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// The timestamp of record for an item: sale time when known, listing time
/// otherwise.
pub fn item_timestamp(item: &RawItem) -> Option<DateTime<Utc>> {
    item.sold_at
        .as_deref()
        .and_then(parse_datetime)
        .or_else(|| item.created_at.as_deref().and_then(parse_datetime))
}
