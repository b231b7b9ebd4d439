use chrono::{Days, NaiveDate};
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date(value: &str) -> LibraryResult<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), DATE_FMT)?)
}

/// Shifts a date by a signed number of days. Fails with `InvalidArgument` when the
/// result falls outside the calendar range chrono can represent.
pub fn add_days(date: NaiveDate, days: i64) -> LibraryResult<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| LibraryError::invalid_argument(
        format!("cannot shift {} by {} days", date.format(DATE_FMT), days).as_str()))
}

// Signed number of days from start to end.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

pub mod serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        date.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let str_date: String = Deserialize::deserialize(deserializer)?;
        let date = NaiveDate::parse_from_str(&str_date, DATE_FMT).map_err(D::Error::custom)?;
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::library::LibraryError;
    use crate::utils::date::{add_days, days_between, parse_date};

    #[test]
    fn test_should_parse_date() {
        assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), parse_date("2024-02-29").expect("should parse"));
        assert!(matches!(parse_date("29/02/2024"), Err(LibraryError::InvalidArgument { .. })));
    }

    #[test]
    fn test_should_add_days_across_months() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap(), add_days(start, 14).unwrap());
        assert_eq!(NaiveDate::from_ymd_opt(2023, 12, 26).unwrap(), add_days(start, -30).unwrap());
    }

    #[test]
    fn test_should_reject_out_of_range_shift() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        assert!(matches!(add_days(start, 200_000_000), Err(LibraryError::InvalidArgument { .. })));
        assert!(matches!(add_days(start, i64::MAX), Err(LibraryError::InvalidArgument { .. })));
        assert!(matches!(add_days(start, i64::MIN), Err(LibraryError::InvalidArgument { .. })));
    }

    #[test]
    fn test_should_count_signed_days() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(16, days_between(due, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert_eq!(-5, days_between(due, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert_eq!(0, days_between(due, due));
    }
}
