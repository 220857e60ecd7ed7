use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A calendar month - the unit every listing, summary, and history
/// request is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// 1-based month, January = 1.
    pub month: u32,
    pub year: i32,
}

impl Period {
    /// Years accepted for a period. Keeps every derived date (including the
    /// neighbors reached through `previous`/`next`) representable by chrono.
    pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

    pub fn new(month: u32, year: i32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        if !Self::YEAR_RANGE.contains(&year) {
            return Err(DomainError::validation(format!(
                "Year must be between 1 and 9999, got {year}"
            )));
        }
        Ok(Self { month, year })
    }

    /// The month before, wrapping January back to December of the prior year.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// The month after, wrapping December forward to January of the next year.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    /// Half-open date range covered by this month: first day inclusive,
    /// first day of the following month exclusive.
    pub fn date_range(self) -> (NaiveDate, NaiveDate) {
        let after = self.next();
        // Infallible: `new` bounds the year to YEAR_RANGE and chrono
        // represents a far wider span, so every period reachable from a
        // validated one stays representable.
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("period month and year are bounded");
        let end = NaiveDate::from_ymd_opt(after.year, after.month, 1)
            .expect("period month and year are bounded");
        (start, end)
    }

    /// Whether `date` falls inside this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        let (start, end) = self.date_range();
        date >= start && date < end
    }

    /// The `n` periods ending at `self`, oldest first.
    pub fn trailing(self, n: u32) -> Vec<Self> {
        let mut periods = Vec::with_capacity(n as usize);
        let mut current = self;
        for _ in 0..n {
            periods.push(current);
            current = current.previous();
        }
        periods.reverse();
        periods
    }

    /// Short display label, e.g. `Mar/2025`.
    pub fn label(self) -> String {
        let (start, _) = self.date_range();
        start.format("%b/%Y").to_string()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_wraps_january_to_prior_december() {
        let period = Period::new(1, 2025).unwrap();
        assert_eq!(period.previous(), Period { month: 12, year: 2024 });
    }

    #[test]
    fn test_next_wraps_december_to_next_january() {
        let period = Period::new(12, 2024).unwrap();
        assert_eq!(period.next(), Period { month: 1, year: 2025 });
    }

    #[test]
    fn test_previous_and_next_mid_year() {
        let period = Period::new(6, 2025).unwrap();
        assert_eq!(period.previous(), Period { month: 5, year: 2025 });
        assert_eq!(period.next(), Period { month: 7, year: 2025 });
    }

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(Period::new(0, 2025).is_err());
        assert!(Period::new(13, 2025).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_year() {
        assert!(Period::new(1, 0).is_err());
        assert!(Period::new(1, -5).is_err());
        assert!(Period::new(1, 10_000).is_err());
        assert!(Period::new(1, 999_999).is_err());
        assert!(Period::new(12, i32::MAX).is_err());
    }

    #[test]
    fn test_date_range_at_year_bounds() {
        let (start, end) = Period::new(12, 9999).unwrap().date_range();
        assert_eq!(start, NaiveDate::from_ymd_opt(9999, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(10000, 1, 1).unwrap());

        let (start, end) = Period::new(1, 1).unwrap().date_range();
        assert_eq!(start, NaiveDate::from_ymd_opt(1, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(1, 2, 1).unwrap());
        assert!(!Period::new(1, 1).unwrap().contains(NaiveDate::MAX));
    }

    #[test]
    fn test_date_range_is_half_open() {
        let period = Period::new(2, 2024).unwrap();
        let (start, end) = period.date_range();

        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!period.contains(end));
    }

    #[test]
    fn test_date_range_across_year_boundary() {
        let period = Period::new(12, 2024).unwrap();
        let (start, end) = period.date_range();

        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_trailing_is_oldest_first() {
        let period = Period::new(2, 2025).unwrap();
        let window = period.trailing(4);

        assert_eq!(
            window,
            vec![
                Period { month: 11, year: 2024 },
                Period { month: 12, year: 2024 },
                Period { month: 1, year: 2025 },
                Period { month: 2, year: 2025 },
            ]
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(Period::new(3, 2025).unwrap().label(), "Mar/2025");
    }
}
