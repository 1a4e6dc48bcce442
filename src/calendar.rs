use chrono::{Datelike, FixedOffset, NaiveDate, Utc};

use crate::foundation::error::{YeargridError, YeargridResult};

/// Classification of a single dot relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    Past,
    Today,
    Future,
}

/// Build a fixed UTC offset from minutes east of UTC.
pub fn fixed_offset(minutes_east: i32) -> YeargridResult<FixedOffset> {
    minutes_east
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            YeargridError::validation(format!(
                "utc offset of {minutes_east} minutes is out of range"
            ))
        })
}

/// Current calendar date at the given offset.
pub fn today_in(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// 1-based ordinal day of `date` within its year (1..=366).
pub fn day_of_year(date: impl Datelike) -> u32 {
    date.ordinal()
}

pub fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 12, 31).is_some_and(|d| d.ordinal() == 366) {
        366
    } else {
        365
    }
}

/// How far through the year we are, expressed against a fixed number of dots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct YearProgress {
    pub day_of_year: u32,
    pub dots: u32,
    /// Dots `1..=past_count` are in the past.
    pub past_count: u32,
    /// 1-based index of today's dot, absent when today falls beyond the last dot.
    pub today: Option<u32>,
}

impl YearProgress {
    pub fn new(day_of_year: u32, dots: u32) -> Self {
        let past_count = day_of_year.saturating_sub(1).min(dots);
        let today = (1..=dots).contains(&day_of_year).then_some(day_of_year);
        Self {
            day_of_year,
            dots,
            past_count,
            today,
        }
    }

    pub fn for_date(date: NaiveDate, dots: u32) -> Self {
        Self::new(day_of_year(date), dots)
    }

    /// State of the 1-based dot `day_index`.
    pub fn state(&self, day_index: u32) -> DayState {
        if day_index <= self.past_count {
            DayState::Past
        } else if self.today == Some(day_index) {
            DayState::Today
        } else {
            DayState::Future
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/calendar.rs"]
mod tests;
