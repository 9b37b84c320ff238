//! Permit expiry detection for conditional date fields.
//!
//! Unparseable values are treated as not expired.

use chrono::{DateTime, NaiveDate};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse an expiry value as entered in a conditional field.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, `YYYY/MM/DD` and RFC 3339 timestamps.
#[must_use]
pub fn parse_expiry_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[rstest]
    #[case("2026-10-16", true)]
    #[case("2026-10-17", false)]
    #[case("2027-01-01", false)]
    #[case("10/16/2026", true)]
    #[case("2025/12/31", true)]
    #[case("2026-10-16T23:59:00+00:00", true)]
    #[case(" 2020-01-01 ", true)]
    #[case("", false)]
    #[case("not a date", false)]
    #[case("2026-13-45", false)]
    fn expiry_cases(#[case] value: &str, #[case] expected: bool) {
        let expired = parse_expiry_date(value).is_some_and(|date| date < today());
        assert_eq!(expired, expected, "value {value:?}");
    }

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_expiry_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }
}
