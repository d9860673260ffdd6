//! Business-day arithmetic over weekends and a holiday set.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::holidays::{HolidaySet, JapaneseHolidays};
use crate::schedule::ScheduleError;

/// Working-day calendar: Monday to Friday, minus the holiday set.
#[derive(Clone, Debug, Default)]
pub struct BusinessCalendar {
    holidays: HolidaySet,
}

impl BusinessCalendar {
    pub fn new(holidays: HolidaySet) -> Self {
        Self { holidays }
    }

    /// Japanese working days over `[from, to]`, with or without the year-end closure.
    ///
    /// Dates outside the span are treated as holiday-free.
    pub fn for_span(from: NaiveDate, to: NaiveDate, year_end_block: bool) -> Self {
        Self::new(HolidaySet::between(&JapaneseHolidays, from, to, year_end_block))
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.holidays.contains(date)
    }

    /// First business day on or after `date`.
    pub fn roll_forward(&self, date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        let mut current = date;
        while !self.is_business_day(current) {
            current = current
                .succ_opt()
                .ok_or(ScheduleError::DateOutOfRange(date))?;
        }
        Ok(current)
    }

    /// Advance `days` business days from `date`.
    ///
    /// A non-working `date` is first rolled forward to the next business day,
    /// so `add_business_days(d, 0)` is the first business day on or after `d`
    /// and a span of N business days starting at S ends at
    /// `add_business_days(S, N - 1)`.
    pub fn add_business_days(&self, date: NaiveDate, days: u32) -> Result<NaiveDate, ScheduleError> {
        let mut current = self.roll_forward(date)?;
        for _ in 0..days {
            current = current
                .succ_opt()
                .ok_or(ScheduleError::DateOutOfRange(date))?;
            current = self.roll_forward(current)?;
        }
        Ok(current)
    }

    /// The business day after `date`.
    pub fn next_business_day(&self, date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        self.add_business_days(date, 1)
    }

    /// Number of business days in `[from, to]`.
    pub fn count_business_days(&self, from: NaiveDate, to: NaiveDate) -> usize {
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_business_day(*d))
            .count()
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn calendar_with(holidays: &[NaiveDate]) -> BusinessCalendar {
        BusinessCalendar::new(HolidaySet::from_dates(holidays.iter().copied()))
    }

    #[test]
    fn test_zero_days_on_business_day() {
        let cal = calendar_with(&[]);
        let wed = make_date(2025, 1, 15);
        assert_eq!(cal.add_business_days(wed, 0).unwrap(), wed);
    }

    #[test]
    fn test_zero_days_on_weekend_rolls_forward() {
        let cal = calendar_with(&[]);
        let sat = make_date(2025, 1, 18);
        assert_eq!(cal.add_business_days(sat, 0).unwrap(), make_date(2025, 1, 20));
    }

    #[test]
    fn test_skips_weekend() {
        let cal = calendar_with(&[]);
        let fri = make_date(2025, 1, 17);
        assert_eq!(cal.add_business_days(fri, 1).unwrap(), make_date(2025, 1, 20));
        assert_eq!(cal.add_business_days(fri, 3).unwrap(), make_date(2025, 1, 22));
    }

    #[test]
    fn test_skips_holidays() {
        // Monday Jan 20 is a holiday
        let cal = calendar_with(&[make_date(2025, 1, 20)]);
        let fri = make_date(2025, 1, 17);
        assert_eq!(cal.next_business_day(fri).unwrap(), make_date(2025, 1, 21));
        assert!(!cal.is_business_day(make_date(2025, 1, 20)));
    }

    #[test]
    fn test_count_business_days() {
        let cal = calendar_with(&[make_date(2025, 1, 20)]);
        // Fri 17 .. Fri 24: 17, 21, 22, 23, 24
        assert_eq!(
            cal.count_business_days(make_date(2025, 1, 17), make_date(2025, 1, 24)),
            5
        );
    }

    #[test]
    fn test_for_span_closure_toggle() {
        let from = make_date(2025, 12, 26);
        let to = make_date(2026, 1, 9);
        let closed = BusinessCalendar::for_span(from, to, true);
        let open = BusinessCalendar::for_span(from, to, false);

        assert!(!closed.is_business_day(make_date(2025, 12, 29)));
        assert!(open.is_business_day(make_date(2025, 12, 29)));
        // New Year's Day is a public holiday either way
        assert!(!open.is_business_day(make_date(2026, 1, 1)));
        assert!(closed.holidays().contains(make_date(2026, 1, 3)));
        assert_eq!(open.holidays().dates(), &[make_date(2026, 1, 1)]);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let cal = calendar_with(&[]);
        let result = cal.add_business_days(NaiveDate::MAX, 2);
        assert!(matches!(result, Err(ScheduleError::DateOutOfRange(_))));
    }
}
