use chrono::{NaiveDate, TimeDelta};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar window sent to AWDB as `beginDate`/`endDate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("Invalid date '{0}'. Expected format: YYYY-MM-DD")]
    BadDate(String),
    #[error("start_date {start} is after end_date {end}")]
    Reversed { start: String, end: String },
    #[error("days must be at least 1")]
    EmptyWindow,
    #[error("{0} days reaches past the supported calendar")]
    OutOfRange(u32),
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(DateRangeError::Reversed {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The `days` days leading up to and including `today`.
    pub fn trailing(today: NaiveDate, days: u32) -> Result<Self, DateRangeError> {
        if days == 0 {
            return Err(DateRangeError::EmptyWindow);
        }
        let start = today
            .checked_sub_signed(TimeDelta::days(i64::from(days)))
            .ok_or(DateRangeError::OutOfRange(days))?;
        Ok(Self { start, end: today })
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// Strict `YYYY-MM-DD`; chrono alone would also take unpadded months and days.
fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .filter(|date| trimmed.len() == 10 && date.format(DATE_FORMAT).to_string() == trimmed)
        .ok_or_else(|| DateRangeError::BadDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range = DateRange::parse("2024-01-01", "2024-03-31").unwrap();
        assert_eq!(range.start_param(), "2024-01-01");
        assert_eq!(range.end_param(), "2024-03-31");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            DateRange::parse("01/01/2024", "2024-03-31"),
            Err(DateRangeError::BadDate("01/01/2024".to_string()))
        );
        assert_eq!(
            DateRange::parse("2024-1-1", "2024-03-31"),
            Err(DateRangeError::BadDate("2024-1-1".to_string()))
        );
        assert_eq!(
            DateRange::parse("2024-01-01", "2024-03-5"),
            Err(DateRangeError::BadDate("2024-03-5".to_string()))
        );
        assert!(matches!(
            DateRange::parse("2024-04-01", "2024-03-31"),
            Err(DateRangeError::Reversed { .. })
        ));
    }

    #[test]
    fn test_trailing_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let range = DateRange::trailing(today, 30).unwrap();
        assert_eq!(range.start_param(), "2024-01-31");
        assert_eq!(range.end, today);
        assert_eq!(DateRange::trailing(today, 0), Err(DateRangeError::EmptyWindow));
        assert_eq!(
            DateRange::trailing(today, u32::MAX),
            Err(DateRangeError::OutOfRange(u32::MAX))
        );
    }
}
