//! Display formatting for dates.

use chrono::{DateTime, Datelike, TimeZone};

/// Abbreviated month names of the Brazilian Portuguese locale.
const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a date as `dd MMM yyyy` with Brazilian Portuguese month names.
///
/// The date is rendered in its own time zone; convert it first to show
/// another one.
///
/// # Examples
/// ```
/// use chrono::DateTime;
/// use lede_core::format::short_date;
///
/// let date = DateTime::parse_from_rfc3339("2021-03-05T19:25:28+00:00").unwrap();
/// assert_eq!(short_date(&date), "05 mar 2021");
/// ```
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        PT_BR_MONTHS[date.month0() as usize],
        date.year()
    )
}
