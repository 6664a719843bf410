use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::warn;

/// Holiday lookup capability. The service only ever asks one question: is
/// this date a holiday, and if so what is it called.
pub trait HolidayCalendar: Send + Sync {
    fn lookup(&self, date: NaiveDate) -> Option<String>;
}

/// Fixed holiday table, typically parsed from the `HOLIDAYS` config value.
#[derive(Debug, Default)]
pub struct StaticHolidayCalendar {
    entries: BTreeMap<NaiveDate, String>,
}

impl StaticHolidayCalendar {
    /// Parses `YYYY-MM-DD=Name` entries separated by `;`. Malformed entries
    /// are skipped with a warning rather than failing startup.
    pub fn parse(raw: &str) -> Self {
        let mut entries = BTreeMap::new();
        for item in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            match item.split_once('=') {
                Some((date, name)) if !name.trim().is_empty() => {
                    match date.trim().parse::<NaiveDate>() {
                        Ok(date) => {
                            entries.insert(date, name.trim().to_string());
                        }
                        Err(_) => warn!(entry = item, "skipping holiday with unparsable date"),
                    }
                }
                _ => warn!(entry = item, "skipping malformed holiday entry"),
            }
        }
        Self { entries }
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn lookup(&self, date: NaiveDate) -> Option<String> {
        self.entries.get(&date).cloned()
    }
}

/// Calendar facts for one date, computed once when an event is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFacts {
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
}

impl DayFacts {
    pub fn is_working_day(&self) -> bool {
        !self.is_weekend && !self.is_holiday
    }
}

/// Saturday and Sunday are ISO weekdays 6 and 7.
pub fn classify(date: NaiveDate, holidays: &dyn HolidayCalendar) -> DayFacts {
    let is_weekend = date.weekday().number_from_monday() >= 6;
    let holiday_name = holidays.lookup(date);
    DayFacts {
        is_weekend,
        is_holiday: holiday_name.is_some(),
        holiday_name,
    }
}

/// Strictly after the threshold counts as overtime; punching out exactly at
/// the threshold does not.
pub fn is_overtime(time: NaiveTime, threshold: NaiveTime) -> bool {
    time > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn saturday_and_sunday_are_weekends() {
        let none = StaticHolidayCalendar::default();
        // 2026-03-07 is a Saturday, 2026-03-08 a Sunday.
        assert!(classify(date(2026, 3, 7), &none).is_weekend);
        assert!(classify(date(2026, 3, 8), &none).is_weekend);
        assert!(!classify(date(2026, 3, 9), &none).is_weekend);
    }

    #[test]
    fn weekday_without_holiday_is_a_working_day() {
        let none = StaticHolidayCalendar::default();
        let facts = classify(date(2026, 3, 2), &none);
        assert!(facts.is_working_day());
        assert!(!facts.is_holiday);
        assert_eq!(facts.holiday_name, None);
    }

    #[test]
    fn holiday_lookup_sets_name_and_clears_working_day() {
        let calendar = StaticHolidayCalendar::parse("2026-12-25=Christmas Day");
        let facts = classify(date(2026, 12, 25), &calendar);
        assert!(facts.is_holiday);
        assert_eq!(facts.holiday_name.as_deref(), Some("Christmas Day"));
        assert!(!facts.is_working_day());
    }

    #[test]
    fn classification_is_idempotent() {
        let calendar = StaticHolidayCalendar::parse("2026-12-25=Christmas Day");
        let first = classify(date(2026, 12, 25), &calendar);
        let second = classify(date(2026, 12, 25), &calendar);
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_holiday_entries_are_skipped() {
        let calendar =
            StaticHolidayCalendar::parse("garbage;2026-13-40=Nope;2026-01-01=New Year's Day");
        assert_eq!(calendar.lookup(date(2026, 1, 1)).as_deref(), Some("New Year's Day"));
        assert_eq!(calendar.entries.len(), 1);
    }

    #[test]
    fn overtime_is_strictly_after_threshold() {
        let threshold = time(18, 0);
        assert!(!is_overtime(time(17, 59), threshold));
        assert!(!is_overtime(time(18, 0), threshold));
        assert!(is_overtime(time(18, 1), threshold));
    }
}
