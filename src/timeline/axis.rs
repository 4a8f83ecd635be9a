use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::range::DateRange;
use super::zoom::ZoomLevel;

/// A contiguous run of day cells sharing one calendar period (week, month
/// or quarter), rendered as a header band above the day cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodGroup {
    pub label: String,
    pub span_days: usize,
}

/// The daily grid between two dates, plus per-zoom header metadata.
///
/// The day sequence is contiguous and inclusive of both range endpoints;
/// every lookup is against this one vector so the axis cannot drift from
/// what is painted.
#[derive(Debug, Clone)]
pub struct DateAxis {
    days: Vec<NaiveDate>,
    zoom: ZoomLevel,
    week_start: Weekday,
}

impl DateAxis {
    pub fn build(range: DateRange, zoom: ZoomLevel, week_start: Weekday) -> Self {
        let mut days = Vec::with_capacity(range.num_days().max(0) as usize);
        let mut current = range.start;
        while current <= range.end {
            days.push(current);
            current += Duration::days(1);
        }
        Self {
            days,
            zoom,
            week_start,
        }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Cell index of a date, if it falls on the axis. Linear scan; the axis
    /// is at most a few hundred cells.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| *d == date)
    }

    /// Calendar-aligned period bands for the header. Empty at `Days` zoom,
    /// which shows flat per-day labels only.
    pub fn period_groups(&self) -> Vec<PeriodGroup> {
        if self.zoom == ZoomLevel::Days {
            return Vec::new();
        }

        let mut groups = Vec::new();
        let mut i = 0;
        while i < self.days.len() {
            let first = self.days[i];
            let key = self.period_key(first);
            let mut span = 1;
            while i + span < self.days.len() && self.period_key(self.days[i + span]) == key {
                span += 1;
            }
            let last = self.days[i + span - 1];
            groups.push(PeriodGroup {
                label: self.period_label(first, last),
                span_days: span,
            });
            i += span;
        }
        groups
    }

    /// Label for one day cell. Denser zooms label every cell; sparser zooms
    /// label only landmark days so the header stays readable.
    pub fn day_label(&self, date: NaiveDate) -> String {
        match self.zoom {
            ZoomLevel::Days => format!("{} {}", date.format("%a"), date.day()),
            ZoomLevel::Weeks => {
                if date.weekday() == self.week_start {
                    format!("{} {}", date.format("%b"), date.day())
                } else {
                    String::new()
                }
            }
            ZoomLevel::Months => {
                if date.day() % 5 == 0 {
                    date.day().to_string()
                } else {
                    String::new()
                }
            }
            ZoomLevel::Quarters => {
                if date.day() == 1 {
                    date.format("%b").to_string()
                } else if date.day() % 10 == 0 {
                    date.day().to_string()
                } else {
                    String::new()
                }
            }
        }
    }

    /// Identity of the calendar period a day belongs to at this zoom.
    fn period_key(&self, date: NaiveDate) -> (i32, u32) {
        match self.zoom {
            ZoomLevel::Days => (0, 0),
            ZoomLevel::Weeks => {
                let anchor = week_anchor(date, self.week_start);
                (anchor.year(), anchor.ordinal())
            }
            ZoomLevel::Months => (date.year(), date.month()),
            ZoomLevel::Quarters => (date.year(), date.month0() / 3),
        }
    }

    fn period_label(&self, first: NaiveDate, last: NaiveDate) -> String {
        match self.zoom {
            ZoomLevel::Days => String::new(),
            ZoomLevel::Weeks => format!(
                "{} {} - {} {}",
                first.format("%b"),
                first.day(),
                last.format("%b"),
                last.day()
            ),
            ZoomLevel::Months => first.format("%B %Y").to_string(),
            ZoomLevel::Quarters => {
                format!("Q{} {}", first.month0() / 3 + 1, first.year())
            }
        }
    }
}

/// The week-start day on or before `date`.
fn week_anchor(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    date - Duration::days(offset as i64)
}
