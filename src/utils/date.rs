use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const NAIVE_DATE_TIME_FMTS: [&str; 4] = [DATE_FMT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];
const NAIVE_DATE_FMTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
// offsets written without a colon, e.g. +0100
const OFFSET_DATE_TIME_FMTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Parses a date independent of locale. Strings carrying an offset keep it,
/// strings without one are read as UTC, and date-only strings land on UTC midnight.
/// Returns None for blank or unparseable input.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Some(date.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATE_TIME_FMTS {
        if let Ok(date) = DateTime::parse_from_str(s, fmt) {
            return Some(date.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATE_TIME_FMTS {
        if let Ok(date) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&date));
        }
    }
    for fmt in NAIVE_DATE_FMTS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|d| Utc.from_utc_datetime(&d));
        }
    }
    parse_reduced_date(s)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|d| Utc.from_utc_datetime(&d))
}

// ISO-8601 reduced precision: YYYY and YYYY-MM mean the first day of the year or month
fn parse_reduced_date(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('-') {
        None if s.len() == 4 && all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        Some((year, month)) if year.len() == 4 && month.len() == 2 && all_digits(year) && all_digits(month) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

// e.g. 2023-01-05T00:00:00.000Z
pub fn iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn opt_iso_string(date: Option<&DateTime<Utc>>) -> Option<String> {
    date.map(iso_string)
}

pub mod serializer {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::utils::date::{opt_iso_string, parse_date};

    pub fn serialize<S: Serializer>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        opt_iso_string(time.as_ref()).serialize(serializer)
    }

    // lenient: anything that does not parse is read back as absent
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        Ok(str_time.as_deref().and_then(parse_date))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crate::utils::date::{iso_string, opt_iso_string, parse_date};

    #[tokio::test]
    async fn test_should_parse_supported_formats() {
        let midnight = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(Some(midnight), parse_date("2023-01-05"));
        assert_eq!(Some(midnight), parse_date("2023/01/05"));
        assert_eq!(Some(midnight), parse_date(" 2023-01-05T00:00:00.000Z "));
        assert_eq!(Some(midnight), parse_date("2023-01-05T01:00:00+01:00"));
        assert_eq!(Some(midnight), parse_date("2023-01-05 00:00:00"));
        assert_eq!(Some(midnight), parse_date("Thu, 05 Jan 2023 00:00:00 +0000"));
        let morning = Utc.with_ymd_and_hms(2023, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(Some(morning), parse_date("2023-01-05T09:30"));
    }

    #[tokio::test]
    async fn test_should_parse_reduced_precision_and_compact_offsets() {
        let new_year = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Some(new_year), parse_date("2023"));
        assert_eq!(Some(new_year), parse_date("2023-01"));
        assert_eq!(Some(Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap()), parse_date("2023-11"));
        let midnight = Utc.with_ymd_and_hms(2023, 1, 4, 23, 0, 0).unwrap();
        assert_eq!(Some(midnight), parse_date("2023-01-05T00:00:00+0100"));
        assert_eq!(Some(midnight), parse_date("2023-01-05T00:00+0100"));
        for s in ["202", "20231", "2023-1", "2023-13", "2023-00", "abcd", "2023-ab"] {
            assert_eq!(None, parse_date(s), "{} should not parse", s);
        }
    }

    #[tokio::test]
    async fn test_should_reject_malformed_dates() {
        for s in ["", "   ", "yesterday", "2023-13-45", "2023-02-30", "05.01.2023", "not a date at all"] {
            assert_eq!(None, parse_date(s), "{} should not parse", s);
        }
    }

    #[tokio::test]
    async fn test_should_format_iso_string() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!("2024-03-09T14:05:07.000Z", iso_string(&date));
        assert_eq!(Some(date), parse_date(iso_string(&date).as_str()));
        assert_eq!(None, opt_iso_string(None));
    }
}
