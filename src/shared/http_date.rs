//! HTTP-date handling for `Last-Modified` / `If-Modified-Since`.
//!
//! HTTP dates carry whole seconds only, so timestamps that are compared
//! against them are truncated with [`to_http_precision`] before they are stored.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 form, e.g. `Sunday, 06-Nov-94 08:49:37 GMT`
const RFC850_DATE: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// ANSI C asctime() form, e.g. `Sun Nov  6 08:49:37 1994`
const ASCTIME_DATE: &str = "%a %b %e %H:%M:%S %Y";

/// Format a timestamp as an IMF-fixdate in UTC
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(IMF_FIXDATE).to_string()
}

/// Parse an HTTP-date in any of the three RFC 9110 forms, or an RFC 3339 timestamp.
///
/// Returns `None` when nothing matches; callers treat that as "header absent".
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    [RFC850_DATE, ASCTIME_DATE]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Drop sub-second precision so the value survives an HTTP-date round trip
pub fn to_http_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap()
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(reference()), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_all_http_forms() {
        assert_eq!(
            parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"),
            Some(reference())
        );
        assert_eq!(
            parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"),
            Some(reference())
        );
        assert_eq!(
            parse_http_date("Wed Nov 16 08:49:37 1994"),
            Some(reference() + chrono::Duration::days(10))
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_http_date("1994-11-06T10:49:37+02:00"),
            Some(reference())
        );
        assert_eq!(parse_http_date("1994-11-06T08:49:37Z"), Some(reference()));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_http_date(""), None);
        assert_eq!(parse_http_date("yesterday"), None);
        assert_eq!(parse_http_date("06/11/1994"), None);
    }

    #[test]
    fn test_round_trip_after_truncation() {
        let precise = reference() + chrono::Duration::milliseconds(750);
        let truncated = to_http_precision(precise);
        assert_eq!(truncated, reference());
        assert_eq!(parse_http_date(&format_http_date(truncated)), Some(truncated));
    }
}
