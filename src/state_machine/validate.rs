//! Validation of the free-text fields that have a required format

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("valid date regex"));

static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}-[0-9]{2}:[0-9]{2}$").expect("valid time range regex")
});

/// Why a booking date was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRejection {
    /// Not `DD/MM/YYYY`, or not a real calendar day
    Malformed,
    /// Earlier than today
    InPast,
}

/// Parse a `DD/MM/YYYY` date that must not be before `today`
pub fn parse_booking_date(text: &str, today: NaiveDate) -> Result<NaiveDate, DateRejection> {
    if !DATE_RE.is_match(text) {
        return Err(DateRejection::Malformed);
    }

    let date =
        NaiveDate::parse_from_str(text, "%d/%m/%Y").map_err(|_| DateRejection::Malformed)?;

    if date < today {
        return Err(DateRejection::InPast);
    }
    Ok(date)
}

/// `HH:MM-HH:MM`; ordering and clock ranges are not checked
pub fn is_custom_time_range(text: &str) -> bool {
    TIME_RANGE_RE.is_match(text)
}
