use chrono::{Duration, Months, NaiveDate};

use super::zoom::ZoomLevel;
use super::Interval;

/// An inclusive range of visible days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of day cells in the range, counting both endpoints.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Direction of a prev/next navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

/// Earliest and latest day touched by any of the given intervals.
pub fn interval_bounds(intervals: &[Interval]) -> Option<DateRange> {
    let start = intervals.iter().map(|iv| iv.start).min()?;
    let end = intervals.iter().map(|iv| iv.end).max()?;
    Some(DateRange { start, end })
}

/// Compute the visible window around `anchor` for a zoom level.
///
/// Starts from the zoom's default span, then widens (never shrinks) to keep
/// every task in `bounds` visible with a buffer of
/// `max(days_per_column * 4, 7)` days on each side.
pub fn visible_range(
    anchor: NaiveDate,
    zoom: ZoomLevel,
    bounds: Option<DateRange>,
) -> DateRange {
    let (mut start, mut end) = match zoom {
        ZoomLevel::Days => (
            anchor - Duration::days(7),
            anchor + Duration::days(14),
        ),
        ZoomLevel::Weeks => (
            anchor - Duration::days(14),
            anchor + Duration::days(28),
        ),
        ZoomLevel::Months => (
            sub_months(anchor, 2),
            add_months(anchor, 4),
        ),
        ZoomLevel::Quarters => (
            sub_months(anchor, 6),
            add_months(anchor, 12),
        ),
    };

    if let Some(bounds) = bounds {
        let buffer = Duration::days((zoom.days_per_column() * 4).max(7));
        start = start.min(bounds.start - buffer);
        end = end.max(bounds.end + buffer);
    }

    DateRange { start, end }
}

/// Shift the anchor by one zoom-dependent navigation step.
pub fn shift_anchor(anchor: NaiveDate, zoom: ZoomLevel, direction: NavDirection) -> NaiveDate {
    let forward = direction == NavDirection::Next;
    match zoom {
        ZoomLevel::Days => anchor + Duration::days(if forward { 7 } else { -7 }),
        ZoomLevel::Weeks => anchor + Duration::days(if forward { 14 } else { -14 }),
        ZoomLevel::Months => {
            if forward {
                add_months(anchor, 2)
            } else {
                sub_months(anchor, 2)
            }
        }
        ZoomLevel::Quarters => {
            if forward {
                add_months(anchor, 3)
            } else {
                sub_months(anchor, 3)
            }
        }
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_window_per_zoom() {
        let anchor = d(2025, 6, 15);
        let days = visible_range(anchor, ZoomLevel::Days, None);
        assert_eq!(days.start, d(2025, 6, 8));
        assert_eq!(days.end, d(2025, 6, 29));

        let weeks = visible_range(anchor, ZoomLevel::Weeks, None);
        assert_eq!(weeks.start, d(2025, 6, 1));
        assert_eq!(weeks.end, d(2025, 7, 13));

        let months = visible_range(anchor, ZoomLevel::Months, None);
        assert_eq!(months.start, d(2025, 4, 15));
        assert_eq!(months.end, d(2025, 10, 15));

        let quarters = visible_range(anchor, ZoomLevel::Quarters, None);
        assert_eq!(quarters.start, d(2024, 12, 15));
        assert_eq!(quarters.end, d(2026, 6, 15));
    }

    #[test]
    fn bounds_expand_but_never_shrink() {
        let anchor = d(2025, 6, 15);
        // Days zoom: buffer is 7 days. Bounds deeper inside the window than
        // the buffer leave it unchanged.
        let inner = DateRange {
            start: d(2025, 6, 16),
            end: d(2025, 6, 20),
        };
        let range = visible_range(anchor, ZoomLevel::Days, Some(inner));
        assert_eq!(range.start, d(2025, 6, 8));
        assert_eq!(range.end, d(2025, 6, 29));

        // Weeks zoom: buffer is 28 days, so bounds near the window start
        // widen that edge while the end keeps its default.
        let near_start = DateRange {
            start: d(2025, 6, 5),
            end: d(2025, 6, 10),
        };
        let range = visible_range(anchor, ZoomLevel::Weeks, Some(near_start));
        assert_eq!(range.start, d(2025, 6, 5) - Duration::days(28));
        assert_eq!(range.end, d(2025, 7, 13));

        // A task far in the future widens the end by its buffer.
        let wide = DateRange {
            start: d(2025, 6, 29),
            end: d(2025, 9, 1),
        };
        let range = visible_range(anchor, ZoomLevel::Weeks, Some(wide));
        assert_eq!(range.start, d(2025, 6, 1));
        assert_eq!(range.end, d(2025, 9, 1) + Duration::days(28));
    }

    #[test]
    fn buffer_has_a_floor_of_seven_days() {
        let anchor = d(2025, 6, 15);
        let bounds = DateRange {
            start: d(2025, 5, 1),
            end: d(2025, 6, 15),
        };
        // Days zoom: days_per_column * 4 = 4, so the floor applies.
        let range = visible_range(anchor, ZoomLevel::Days, Some(bounds));
        assert_eq!(range.start, d(2025, 5, 1) - Duration::days(7));
    }

    #[test]
    fn interval_bounds_cover_min_and_max() {
        let intervals = [
            Interval::new(d(2025, 3, 5), d(2025, 3, 9)),
            Interval::new(d(2025, 2, 1), d(2025, 2, 2)),
            Interval::new(d(2025, 4, 1), d(2025, 4, 20)),
        ];
        let bounds = interval_bounds(&intervals).unwrap();
        assert_eq!(bounds.start, d(2025, 2, 1));
        assert_eq!(bounds.end, d(2025, 4, 20));
        assert!(interval_bounds(&[]).is_none());
    }

    #[test]
    fn navigation_steps_follow_zoom() {
        let anchor = d(2025, 6, 15);
        assert_eq!(
            shift_anchor(anchor, ZoomLevel::Days, NavDirection::Next),
            d(2025, 6, 22)
        );
        assert_eq!(
            shift_anchor(anchor, ZoomLevel::Weeks, NavDirection::Prev),
            d(2025, 6, 1)
        );
        assert_eq!(
            shift_anchor(anchor, ZoomLevel::Months, NavDirection::Next),
            d(2025, 8, 15)
        );
        assert_eq!(
            shift_anchor(anchor, ZoomLevel::Quarters, NavDirection::Prev),
            d(2025, 3, 15)
        );
    }

    #[test]
    fn month_arithmetic_clamps_short_months() {
        assert_eq!(
            shift_anchor(d(2025, 1, 31), ZoomLevel::Months, NavDirection::Next),
            d(2025, 3, 31)
        );
        // Mar 31 - 2 months clamps into February.
        assert_eq!(
            shift_anchor(d(2025, 3, 31), ZoomLevel::Months, NavDirection::Prev),
            d(2025, 1, 31)
        );
    }
}
