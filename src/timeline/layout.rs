use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::task::{GroupBy, TaskRecord};

use super::pack;
use super::range::DateRange;
use super::Interval;

/// Pixel geometry for one task bar. A fresh value every relayout; nothing
/// here is ever mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub task_id: Uuid,
    /// The interval actually used for placement (the live override when a
    /// session targets the task, otherwise the committed interval).
    pub interval: Interval,
    pub left: f32,
    pub width: f32,
    /// Globally unique row index; never collides across groups.
    pub row: usize,
}

/// One laid-out group: its key and the bars stacked from `row_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    pub key: String,
    pub row_offset: usize,
    pub row_count: usize,
    pub bars: Vec<BarGeometry>,
}

/// Host-supplied rendering constants plus the visible window.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub range: DateRange,
    pub pixels_per_day: f32,
    pub min_bar_width: f32,
    pub today: NaiveDate,
}

/// Lay out every task against the visible window.
///
/// Tasks are partitioned by group key (input order decides group order),
/// packed into rows per group, and stacked vertically with a running row
/// offset. Tasks whose interval lies entirely outside the window are
/// excluded whole; groups left with no visible bars are omitted.
pub fn layout_timeline(
    tasks: &[&TaskRecord],
    group_by: GroupBy,
    params: &LayoutParams,
    live_override: Option<(Uuid, Interval)>,
) -> Vec<GroupLayout> {
    let mut layouts = Vec::new();
    let mut row_offset = 0;

    for (key, members) in partition(tasks, group_by) {
        let mut visible: Vec<(&TaskRecord, Interval)> = Vec::with_capacity(members.len());
        for task in members {
            let interval = match live_override {
                Some((id, iv)) if id == task.id => iv,
                _ => task.interval(params.today),
            };
            if interval.end < params.range.start || interval.start > params.range.end {
                continue;
            }
            visible.push((task, interval));
        }
        if visible.is_empty() {
            continue;
        }

        let intervals: Vec<Interval> = visible.iter().map(|(_, iv)| *iv).collect();
        let rows = pack::assign_rows(&intervals);
        let row_count = pack::row_count(&rows);

        let bars = visible
            .iter()
            .zip(&rows)
            .map(|(&(task, interval), &row)| {
                let days_in = (interval.start - params.range.start).num_days();
                let duration = interval.duration_days().max(1);
                BarGeometry {
                    task_id: task.id,
                    interval,
                    left: (days_in as f32 * params.pixels_per_day).max(0.0),
                    width: (duration as f32 * params.pixels_per_day)
                        .max(params.min_bar_width),
                    row: row_offset + row,
                }
            })
            .collect();

        layouts.push(GroupLayout {
            key,
            row_offset,
            row_count,
            bars,
        });
        row_offset += row_count;
    }

    layouts
}

/// Total number of rows across all groups.
pub fn total_rows(layouts: &[GroupLayout]) -> usize {
    layouts
        .last()
        .map_or(0, |group| group.row_offset + group.row_count)
}

/// Partition tasks by group key, preserving the input order of both keys
/// and members. The key order is what the fetch returned, which keeps the
/// vertical arrangement stable across relayouts.
fn partition<'a>(
    tasks: &[&'a TaskRecord],
    group_by: GroupBy,
) -> Vec<(String, Vec<&'a TaskRecord>)> {
    let mut groups: Vec<(String, Vec<&TaskRecord>)> = Vec::new();
    for &task in tasks {
        let key = group_by.key_for(task);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(task),
            None => groups.push((key, vec![task])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::utc_midnight;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(title: &str, start: NaiveDate, end: NaiveDate) -> TaskRecord {
        let mut task = TaskRecord::new(title, utc_midnight(start));
        task.due_date = Some(utc_midnight(end));
        task
    }

    fn params() -> LayoutParams {
        LayoutParams {
            range: DateRange {
                start: d(2025, 3, 1),
                end: d(2025, 3, 31),
            },
            pixels_per_day: 20.0,
            min_bar_width: 50.0,
            today: d(2025, 3, 15),
        }
    }

    fn flat(layouts: &[GroupLayout]) -> Vec<&BarGeometry> {
        layouts.iter().flat_map(|g| &g.bars).collect()
    }

    #[test]
    fn geometry_is_clamped_and_positive() {
        let tasks = vec![
            task("a", d(2025, 3, 5), d(2025, 3, 9)),
            // Starts before the window: left clamps to 0.
            task("b", d(2025, 2, 20), d(2025, 3, 2)),
            // Single day: width clamps to the minimum.
            task("c", d(2025, 3, 20), d(2025, 3, 20)),
        ];
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let layouts = layout_timeline(&refs, GroupBy::None, &params(), None);
        for bar in flat(&layouts) {
            assert!(bar.left >= 0.0);
            assert!(bar.width >= 50.0);
        }
        let bars = flat(&layouts);
        assert_eq!(bars[0].left, 4.0 * 20.0);
        assert_eq!(bars[0].width, 4.0 * 20.0);
        assert_eq!(bars[1].left, 0.0);
        assert_eq!(bars[2].width, 50.0);
    }

    #[test]
    fn tasks_fully_outside_the_window_are_excluded() {
        let tasks = vec![
            task("before", d(2025, 1, 1), d(2025, 2, 25)),
            task("inside", d(2025, 3, 10), d(2025, 3, 12)),
            task("after", d(2025, 4, 2), d(2025, 4, 9)),
            // Straddles the start: kept, not clipped away.
            task("straddle", d(2025, 2, 25), d(2025, 3, 3)),
        ];
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let layouts = layout_timeline(&refs, GroupBy::None, &params(), None);
        let ids: Vec<Uuid> = flat(&layouts).iter().map(|b| b.task_id).collect();
        assert_eq!(ids, vec![tasks[1].id, tasks[3].id]);
    }

    #[test]
    fn layout_is_idempotent_without_a_session() {
        let tasks = vec![
            task("a", d(2025, 3, 1), d(2025, 3, 6)),
            task("b", d(2025, 3, 4), d(2025, 3, 9)),
            task("c", d(2025, 3, 7), d(2025, 3, 8)),
        ];
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let first = layout_timeline(&refs, GroupBy::None, &params(), None);
        let second = layout_timeline(&refs, GroupBy::None, &params(), None);
        assert_eq!(first, second);
    }

    #[test]
    fn groups_stack_without_row_collisions() {
        let mut a = task("a", d(2025, 3, 1), d(2025, 3, 6));
        let mut b = task("b", d(2025, 3, 2), d(2025, 3, 7));
        let mut c = task("c", d(2025, 3, 1), d(2025, 3, 3));
        a.category = Some("design".to_string());
        b.category = Some("design".to_string());
        c.category = Some("build".to_string());
        let tasks = vec![a, b, c];
        let refs: Vec<&TaskRecord> = tasks.iter().collect();

        let layouts = layout_timeline(&refs, GroupBy::Category, &params(), None);
        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].key, "Design");
        assert_eq!(layouts[0].row_offset, 0);
        assert_eq!(layouts[0].row_count, 2);
        assert_eq!(layouts[1].key, "Build");
        assert_eq!(layouts[1].row_offset, 2);
        assert_eq!(layouts[1].bars[0].row, 2);
        assert_eq!(total_rows(&layouts), 3);
    }

    #[test]
    fn live_override_moves_only_the_targeted_bar() {
        let tasks = vec![
            task("a", d(2025, 3, 5), d(2025, 3, 7)),
            task("b", d(2025, 3, 10), d(2025, 3, 12)),
        ];
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let moved = Interval::new(d(2025, 3, 20), d(2025, 3, 22));
        let layouts =
            layout_timeline(&refs, GroupBy::None, &params(), Some((tasks[0].id, moved)));
        let bars = flat(&layouts);
        assert_eq!(bars[0].interval, moved);
        assert_eq!(bars[0].left, 19.0 * 20.0);
        assert_eq!(bars[1].left, 9.0 * 20.0);
    }

    #[test]
    fn empty_groups_are_omitted() {
        let mut a = task("a", d(2025, 3, 5), d(2025, 3, 7));
        let mut b = task("b", d(2025, 1, 1), d(2025, 1, 2));
        a.category = Some("visible".to_string());
        b.category = Some("offscreen".to_string());
        let tasks = vec![a, b];
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let layouts = layout_timeline(&refs, GroupBy::Category, &params(), None);
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].key, "Visible");
    }
}
