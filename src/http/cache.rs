//! HTTP cache control module
//!
//! `Last-Modified` generation and `If-Modified-Since` conditional requests.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::SystemTime;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 form, e.g. `Sunday, 06-Nov-94 08:49:37 GMT`
const RFC850_DATE: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// ANSI C `asctime()` form, e.g. `Sun Nov  6 08:49:37 1994`
const ASCTIME_DATE: &str = "%a %b %e %H:%M:%S %Y";

/// Format a file modification time as an HTTP date
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}

/// Parse any of the three HTTP date formats
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    [RFC850_DATE, ASCTIME_DATE]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Check whether the client's cached copy is still fresh
///
/// `If-Modified-Since` is ignored when `If-None-Match` is present or the date
/// cannot be parsed. Comparison is at whole-second precision, as HTTP dates are.
///
/// # Returns
/// Returns true if a 304 should be sent
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    modified: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
