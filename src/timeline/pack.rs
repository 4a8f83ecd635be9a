use super::Interval;

/// Assign each interval to the lowest display row where it overlaps no
/// earlier occupant (greedy first-fit interval scheduling).
///
/// Intervals are visited in order of ascending start; ties keep input
/// order (stable sort). Returns one row index per input interval, in the
/// original input order.
pub fn assign_rows(intervals: &[Interval]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&i| intervals[i].start);

    let mut rows: Vec<Vec<Interval>> = Vec::new();
    let mut assigned = vec![0usize; intervals.len()];

    for &i in &order {
        let interval = intervals[i];
        let found = rows
            .iter()
            .position(|occupants| occupants.iter().all(|o| !o.overlaps(&interval)));
        match found {
            Some(row) => {
                rows[row].push(interval);
                assigned[i] = row;
            }
            None => {
                rows.push(vec![interval]);
                assigned[i] = rows.len() - 1;
            }
        }
    }

    assigned
}

/// Number of rows used by an `assign_rows` result (0 when empty).
pub fn row_count(rows: &[usize]) -> usize {
    rows.iter().max().map_or(0, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn iv(start: u32, end: u32) -> Interval {
        Interval::new(
            NaiveDate::from_ymd_opt(2025, 1, start).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, end).unwrap(),
        )
    }

    #[test]
    fn overlapping_pair_then_free_slot() {
        // [Jan1,Jan3], [Jan2,Jan4], [Jan5,Jan6] -> rows 0, 1, 0.
        let rows = assign_rows(&[iv(1, 3), iv(2, 4), iv(5, 6)]);
        assert_eq!(rows, vec![0, 1, 0]);
        assert_eq!(row_count(&rows), 2);
    }

    #[test]
    fn overlapping_tasks_never_share_a_row() {
        let intervals = [
            iv(1, 10),
            iv(2, 5),
            iv(4, 12),
            iv(6, 8),
            iv(11, 14),
            iv(13, 20),
        ];
        let rows = assign_rows(&intervals);
        for a in 0..intervals.len() {
            for b in a + 1..intervals.len() {
                if intervals[a].overlaps(&intervals[b]) {
                    assert_ne!(rows[a], rows[b], "intervals {a} and {b} collide");
                }
            }
        }
    }

    #[test]
    fn placement_is_minimal() {
        // A task sits at row r only if every lower row holds something
        // overlapping it.
        let intervals = [iv(1, 4), iv(2, 6), iv(3, 8), iv(5, 9), iv(7, 10)];
        let rows = assign_rows(&intervals);
        for (i, &row) in rows.iter().enumerate() {
            for lower in 0..row {
                let blocked = intervals
                    .iter()
                    .enumerate()
                    .any(|(j, other)| {
                        j != i && rows[j] == lower && other.overlaps(&intervals[i])
                    });
                assert!(blocked, "interval {i} skipped free row {lower}");
            }
        }
    }

    #[test]
    fn row_count_matches_max_overlap_depth() {
        // Three mutually overlapping intervals need exactly three rows.
        let rows = assign_rows(&[iv(1, 9), iv(2, 8), iv(3, 7)]);
        assert_eq!(row_count(&rows), 3);
    }

    #[test]
    fn shared_edge_counts_as_overlap() {
        // End of one lands on the start of the next: distinct rows.
        let rows = assign_rows(&[iv(1, 5), iv(5, 9)]);
        assert_ne!(rows[0], rows[1]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        // Same start date: the earlier input element claims the lower row.
        let rows = assign_rows(&[iv(3, 6), iv(3, 4), iv(3, 5)]);
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn empty_input() {
        assert!(assign_rows(&[]).is_empty());
        assert_eq!(row_count(&[]), 0);
    }
}
