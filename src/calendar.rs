// src/calendar.rs
//! Calendar arithmetic: Sunday-aligned weeks, gap-filled from the scraped days.
//! Pure; dates are `NaiveDate` so there is no timezone to drift in.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

/// One scraped (or synthesized) day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// 0..=4
    pub level: u8,
    /// Absent on layouts that only publish the level.
    pub count: Option<u64>,
}

impl DailyRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self { date, level: 0, count: Some(0) }
    }

    /// ISO `YYYY-MM-DD`
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Sunday first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Week {
    pub days: [DailyRecord; 7],
}

impl Week {
    pub fn start(&self) -> NaiveDate {
        self.days[0].date
    }
}

/// Sunday on or before `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Days::new(u64::from(d.weekday().num_days_from_sunday()))
}

/// Bucket ascending, one-per-day records into weeks running from the Sunday on or
/// before the first record through the week holding the last one.
/// Empty in → empty out.
pub fn build_weeks(records: &[DailyRecord]) -> Vec<Week> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Vec::new();
    };

    let by_date: HashMap<NaiveDate, &DailyRecord> =
        records.iter().map(|r| (r.date, r)).collect();

    let mut weeks = Vec::with_capacity(records.len() / 7 + 2);
    let mut cursor = week_start(first.date);

    while cursor <= last.date {
        let days = std::array::from_fn(|offset| {
            let day = cursor + Days::new(offset as u64);
            by_date
                .get(&day)
                .map(|r| (*r).clone())
                .unwrap_or_else(|| DailyRecord::empty(day))
        });
        weeks.push(Week { days });
        cursor = cursor + Days::new(7);
    }

    weeks
}
