//! 时间工具
//!
//! 时间戳统一使用 epoch 毫秒 (i64) 存储，便于范围过滤；
//! API 响应和导出使用 RFC 3339 字符串。

use chrono::{DateTime, NaiveDate, Utc};

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render epoch milliseconds as an RFC 3339 timestamp
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

/// Parse a date query parameter into epoch milliseconds.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates
/// (interpreted as midnight UTC).
pub fn parse_date_param(raw: &str) -> Option<i64> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_dates_as_midnight_utc() {
        let ms = parse_date_param("2026-01-15").unwrap();
        assert_eq!(millis_to_rfc3339(ms), "2026-01-15T00:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339() {
        let ms = parse_date_param("2026-01-15T12:30:00Z").unwrap();
        assert!(millis_to_rfc3339(ms).starts_with("2026-01-15T12:30:00"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date_param("not-a-date"), None);
    }
}
