//! Public holidays and the year-end closure, as a sorted date set.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use rustc_hash::FxHashSet;

/// Calendar of public holidays for one locale.
pub trait HolidaySource {
    /// Whether `date` is a public holiday.
    fn is_public_holiday(&self, date: NaiveDate) -> bool;

    /// All public holidays in `[from, to]`, ascending.
    fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_public_holiday(*d))
            .collect()
    }
}

/// Japanese national holidays (国民の祝日), including substitute and
/// sandwiched "citizens' holidays".
///
/// Rules are those in force from 2016 on, with the 2019 accession days and the
/// 2020/2021 Olympic relocations. Equinoxes use the 1980-2099 approximation.
#[derive(Clone, Copy, Debug, Default)]
pub struct JapaneseHolidays;

impl JapaneseHolidays {
    /// Holidays named by law for `year`, before substitute and citizens' days.
    fn statutory(year: i32) -> Vec<NaiveDate> {
        let ymd = |m: u32, d: u32| NaiveDate::from_ymd_opt(year, m, d);
        let monday = |m: u32, n: u8| NaiveDate::from_weekday_of_month_opt(year, m, Weekday::Mon, n);

        let mut days = vec![
            ymd(1, 1),
            monday(1, 2),
            ymd(2, 11),
            ymd(3, vernal_equinox_day(year)),
            ymd(4, 29),
            ymd(5, 3),
            ymd(5, 4),
            ymd(5, 5),
            monday(9, 3),
            ymd(9, autumnal_equinox_day(year)),
            ymd(11, 3),
            ymd(11, 23),
        ];

        match year {
            y if y >= 2020 => days.push(ymd(2, 23)),
            y if y < 2019 => days.push(ymd(12, 23)),
            _ => {}
        }

        // Marine Day, Mountain Day, Sports Day
        match year {
            2020 => days.extend([ymd(7, 23), ymd(8, 10), ymd(7, 24)]),
            2021 => days.extend([ymd(7, 22), ymd(8, 8), ymd(7, 23)]),
            _ => {
                days.push(monday(7, 3));
                days.push(monday(10, 2));
                if year >= 2016 {
                    days.push(ymd(8, 11));
                }
            }
        }

        if year == 2019 {
            days.extend([ymd(5, 1), ymd(10, 22)]);
        }

        let mut days: Vec<NaiveDate> = days.into_iter().flatten().collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    /// Every holiday of `year`, ascending.
    pub fn for_year(year: i32) -> Vec<NaiveDate> {
        let statutory = Self::statutory(year);
        let mut all: FxHashSet<NaiveDate> = statutory.iter().copied().collect();

        // A day sandwiched between two holidays is itself a holiday
        for pair in statutory.windows(2) {
            if let Some(middle) = pair[0].checked_add_days(Days::new(1)) {
                if middle.checked_add_days(Days::new(1)) == Some(pair[1]) {
                    all.insert(middle);
                }
            }
        }

        // A holiday on Sunday moves to the next day that is not a holiday
        for day in &statutory {
            if day.weekday() != Weekday::Sun {
                continue;
            }
            let mut substitute = day.succ_opt();
            while let Some(candidate) = substitute {
                if !all.contains(&candidate) {
                    break;
                }
                substitute = candidate.succ_opt();
            }
            if let Some(candidate) = substitute {
                all.insert(candidate);
            }
        }

        let mut days: Vec<NaiveDate> = all.into_iter().collect();
        days.sort_unstable();
        days
    }
}

impl HolidaySource for JapaneseHolidays {
    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        Self::for_year(date.year()).binary_search(&date).is_ok()
    }

    fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        if from > to {
            return Vec::new();
        }
        (from.year()..=to.year())
            .flat_map(Self::for_year)
            .filter(|d| *d >= from && *d <= to)
            .collect()
    }
}

fn equinox_day(base: f64, year: i32) -> u32 {
    let offset = (year - 1980) as f64;
    let leap_correction = ((year - 1980) as f64 / 4.0).floor();
    (base + 0.242194 * offset - leap_correction).floor() as u32
}

/// Day in March of the vernal equinox holiday.
pub fn vernal_equinox_day(year: i32) -> u32 {
    equinox_day(20.8431, year)
}

/// Day in September of the autumnal equinox holiday.
pub fn autumnal_equinox_day(year: i32) -> u32 {
    equinox_day(23.2488, year)
}

/// Sorted, deduplicated set of non-working dates other than weekends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: Vec<NaiveDate>,
}

impl HolidaySet {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    /// Public holidays in `[from, to]`, plus the Dec 29 - Jan 3 closure days
    /// on or after `from` when `year_end_block` is set.
    ///
    /// The closure of the last year is included whole even when it runs past `to`.
    pub fn between(
        source: &impl HolidaySource,
        from: NaiveDate,
        to: NaiveDate,
        year_end_block: bool,
    ) -> Self {
        let mut dates = source.holidays_between(from, to);
        if year_end_block {
            // Jan 1-3 of from.year() belong to the previous year's closure
            for year in from.year().saturating_sub(1)..=to.year() {
                dates.extend(year_end_closure(year).into_iter().filter(|d| *d >= from));
            }
        }
        Self::from_dates(dates)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Dec 29 of `year` through Jan 3 of the following year.
pub fn year_end_closure(year: i32) -> Vec<NaiveDate> {
    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, 12, 29),
        NaiveDate::from_ymd_opt(year + 1, 1, 3),
    ) else {
        return Vec::new();
    };
    first.iter_days().take_while(|d| *d <= last).collect()
}

/// `base_date` plus `years`, clamped to the last representable date.
pub fn horizon_end(base_date: NaiveDate, years: u32) -> NaiveDate {
    base_date
        .checked_add_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MAX)
}

/// Japanese holidays and the year-end closure from `base_date` to `years` later.
pub fn get_holidays(base_date: NaiveDate, years: u32) -> HolidaySet {
    HolidaySet::between(&JapaneseHolidays, base_date, horizon_end(base_date, years), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_japanese_holidays_2025() {
        let expected: Vec<NaiveDate> = [
            (1, 1),
            (1, 13),
            (2, 11),
            (2, 23),
            (2, 24), // substitute
            (3, 20),
            (4, 29),
            (5, 3),
            (5, 4),
            (5, 5),
            (5, 6), // substitute for May 4
            (7, 21),
            (8, 11),
            (9, 15),
            (9, 23),
            (10, 13),
            (11, 3),
            (11, 23),
            (11, 24), // substitute
        ]
        .into_iter()
        .map(|(m, d)| make_date(2025, m, d))
        .collect();

        assert_eq!(JapaneseHolidays::for_year(2025), expected);
    }

    #[test]
    fn test_citizens_holiday_between_holidays() {
        // 2026: Respect for the Aged Day Sep 21, equinox Sep 23
        let holidays = JapaneseHolidays::for_year(2026);
        assert!(holidays.contains(&make_date(2026, 9, 21)));
        assert!(holidays.contains(&make_date(2026, 9, 22)));
        assert!(holidays.contains(&make_date(2026, 9, 23)));
    }

    #[test]
    fn test_substitute_skips_consecutive_holidays() {
        // 2026: May 3 is a Sunday, May 4 and 5 are holidays, so May 6 substitutes
        let holidays = JapaneseHolidays::for_year(2026);
        assert!(holidays.contains(&make_date(2026, 5, 6)));
        assert!(!holidays.contains(&make_date(2026, 5, 7)));
    }

    #[test]
    fn test_olympic_relocations() {
        let holidays = JapaneseHolidays::for_year(2021);
        assert!(holidays.contains(&make_date(2021, 7, 22)));
        assert!(holidays.contains(&make_date(2021, 7, 23)));
        assert!(holidays.contains(&make_date(2021, 8, 8)));
        assert!(holidays.contains(&make_date(2021, 8, 9))); // substitute
        assert!(!holidays.contains(&make_date(2021, 10, 11)));
    }

    #[test]
    fn test_equinox_days() {
        assert_eq!(vernal_equinox_day(2024), 20);
        assert_eq!(vernal_equinox_day(2025), 20);
        assert_eq!(autumnal_equinox_day(2024), 22);
        assert_eq!(autumnal_equinox_day(2025), 23);
    }

    #[test]
    fn test_year_end_closure() {
        let closure = year_end_closure(2025);
        assert_eq!(closure.len(), 6);
        assert_eq!(closure.first(), Some(&make_date(2025, 12, 29)));
        assert_eq!(closure.last(), Some(&make_date(2026, 1, 3)));
    }

    #[test]
    fn test_get_holidays_range_and_closure() {
        let base = make_date(2025, 10, 14);
        let set = get_holidays(base, 1);

        // before the base date
        assert!(!set.contains(make_date(2025, 9, 23)));
        assert!(set.contains(make_date(2025, 11, 3)));
        assert!(set.contains(make_date(2025, 12, 30)));
        assert!(set.contains(make_date(2026, 1, 12)));
        // past the horizon, but inside the closure of the horizon's year
        assert!(set.contains(make_date(2026, 12, 31)));
        assert!(!set.contains(make_date(2026, 11, 3)));

        let dates = set.dates();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_between_without_closure() {
        let set = HolidaySet::between(
            &JapaneseHolidays,
            make_date(2025, 12, 1),
            make_date(2026, 1, 31),
            false,
        );
        assert!(!set.contains(make_date(2025, 12, 30)));
        assert!(set.contains(make_date(2026, 1, 1)));
        assert_eq!(set.len(), 2); // New Year's Day, Coming of Age Day
    }

    #[test]
    fn test_between_starting_inside_new_year_closure() {
        let set = HolidaySet::between(
            &JapaneseHolidays,
            make_date(2026, 1, 2),
            make_date(2026, 1, 10),
            true,
        );
        assert!(set.contains(make_date(2026, 1, 2)));
        assert!(set.contains(make_date(2026, 1, 3)));
        // nothing before the range start
        assert!(!set.contains(make_date(2026, 1, 1)));
        assert!(!set.contains(make_date(2025, 12, 31)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_horizon_end_clamps_leap_day() {
        assert_eq!(horizon_end(make_date(2024, 2, 29), 1), make_date(2025, 2, 28));
        assert_eq!(horizon_end(make_date(2025, 10, 14), 2), make_date(2027, 10, 14));
    }

    #[test]
    fn test_from_dates_dedups() {
        let d = make_date(2025, 1, 1);
        let set = HolidaySet::from_dates([d, d, make_date(2024, 12, 31)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.dates()[0], make_date(2024, 12, 31));
    }

    #[test]
    fn test_holidays_between_inverted_range() {
        let holidays =
            JapaneseHolidays.holidays_between(make_date(2025, 5, 1), make_date(2025, 4, 1));
        assert!(holidays.is_empty());
    }
}
