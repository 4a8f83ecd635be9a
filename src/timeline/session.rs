use std::time::{Duration as StdDuration, Instant};

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::Interval;

/// Which edge of a bar a resize gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// The gesture a live session performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeEdge),
}

/// Partial date update produced by a finished gesture (or by the task
/// detail view). Carries only the field(s) the gesture actually revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateUpdate {
    pub task_id: Uuid,
    pub start: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// One live drag or resize gesture against a single task bar.
#[derive(Debug, Clone)]
struct Session {
    task_id: Uuid,
    kind: GestureKind,
    /// Snapshot of the interval at pointer-down; the committed task list
    /// is never touched while the session lives.
    committed: Interval,
    /// The live override, once a move has produced one.
    proposed: Option<Interval>,
    /// Horizontal distance from the bar's left edge to the grab point.
    pointer_offset: f32,
    /// Latest pointer x since the last tick; moves arriving between frames
    /// coalesce here and only the last one applies.
    pending_x: Option<f32>,
}

/// Owns the at-most-one live gesture plus the short post-gesture window
/// during which bar clicks are swallowed.
///
/// Pointer positions are timeline-local pixels (x = 0 at the visible range
/// start). The host feeds `pointer_moved` as events arrive and calls
/// `tick` once per frame; `release` ends the gesture and yields the commit
/// payload, if the gesture ever produced one.
#[derive(Debug, Default)]
pub struct InteractionController {
    session: Option<Session>,
    suppress_until: Option<Instant>,
}

const CLICK_SUPPRESS_WINDOW: StdDuration = StdDuration::from_millis(100);

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_task(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.task_id)
    }

    pub fn kind(&self) -> Option<GestureKind> {
        self.session.as_ref().map(|s| s.kind)
    }

    /// Begin a move gesture. Replaces any session still live.
    pub fn begin_drag(
        &mut self,
        task_id: Uuid,
        committed: Interval,
        pointer_x: f32,
        bar_left: f32,
    ) {
        self.session = Some(Session {
            task_id,
            kind: GestureKind::Drag,
            committed,
            proposed: None,
            pointer_offset: pointer_x - bar_left,
            pending_x: None,
        });
    }

    /// Begin an edge-resize gesture. Replaces any session still live.
    pub fn begin_resize(&mut self, task_id: Uuid, committed: Interval, edge: ResizeEdge) {
        self.session = Some(Session {
            task_id,
            kind: GestureKind::Resize(edge),
            committed,
            proposed: None,
            pointer_offset: 0.0,
            pending_x: None,
        });
    }

    /// Record the latest pointer position. Cheap; call on every move.
    pub fn pointer_moved(&mut self, pointer_x: f32) {
        if let Some(session) = &mut self.session {
            session.pending_x = Some(pointer_x);
        }
    }

    /// Consume the pending pointer position and refresh the proposal.
    /// Call once per frame; returns true when the proposal changed.
    pub fn tick(&mut self, range_start: NaiveDate, pixels_per_day: f32) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        let Some(x) = session.pending_x.take() else {
            return false;
        };

        let next = match session.kind {
            GestureKind::Drag => {
                let days = pointer_days(x - session.pointer_offset, pixels_per_day);
                let start = range_start + Duration::days(days);
                let end = start + Duration::days(session.committed.duration_days());
                Some(Interval::new(start, end))
            }
            GestureKind::Resize(ResizeEdge::Start) => {
                let date = range_start + Duration::days(pointer_days(x, pixels_per_day));
                // A start past the committed end would cross the opposite
                // edge: reject this tick, keep the previous valid value.
                (date <= session.committed.end)
                    .then(|| Interval::new(date, session.committed.end))
            }
            GestureKind::Resize(ResizeEdge::End) => {
                let date = range_start + Duration::days(pointer_days(x, pixels_per_day));
                (date >= session.committed.start)
                    .then(|| Interval::new(session.committed.start, date))
            }
        };

        match next {
            Some(interval) if session.proposed != Some(interval) => {
                session.proposed = Some(interval);
                true
            }
            _ => false,
        }
    }

    /// The live interval for a task, when a session targets it.
    pub fn override_for(&self, task_id: Uuid) -> Option<Interval> {
        self.session
            .as_ref()
            .filter(|s| s.task_id == task_id)
            .and_then(|s| s.proposed)
    }

    /// End the session. Returns the commit payload when the gesture
    /// produced a new interval; a degenerate press-and-release yields
    /// nothing. Either way the click-suppression window opens.
    pub fn release(&mut self) -> Option<DateUpdate> {
        self.release_at(Instant::now())
    }

    /// True while the just-interacted window is open. The host skips bar
    /// clicks during it, so the mouse-up that ends a gesture cannot open
    /// the task detail view.
    pub fn suppress_click(&self) -> bool {
        self.suppress_click_at(Instant::now())
    }

    fn release_at(&mut self, now: Instant) -> Option<DateUpdate> {
        let session = self.session.take()?;
        self.suppress_until = Some(now + CLICK_SUPPRESS_WINDOW);
        let proposed = session.proposed?;
        Some(match session.kind {
            GestureKind::Drag => DateUpdate {
                task_id: session.task_id,
                start: Some(proposed.start),
                due_date: Some(proposed.end),
            },
            GestureKind::Resize(ResizeEdge::Start) => DateUpdate {
                task_id: session.task_id,
                start: Some(proposed.start),
                due_date: None,
            },
            GestureKind::Resize(ResizeEdge::End) => DateUpdate {
                task_id: session.task_id,
                start: None,
                due_date: Some(proposed.end),
            },
        })
    }

    fn suppress_click_at(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }
}

/// Quantize a timeline-local x offset to whole days, floored at the range
/// start so bars cannot leave the window to the left.
fn pointer_days(x: f32, pixels_per_day: f32) -> i64 {
    ((x / pixels_per_day).round() as i64).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn range_start() -> NaiveDate {
        d(3, 1)
    }

    const PPD: f32 = 20.0;

    fn drag_controller(committed: Interval, bar_left: f32) -> (InteractionController, Uuid) {
        let task_id = Uuid::new_v4();
        let mut controller = InteractionController::new();
        controller.begin_drag(task_id, committed, bar_left + 5.0, bar_left);
        (controller, task_id)
    }

    #[test]
    fn drag_by_five_days_preserves_duration() {
        // [Mar 10, Mar 12] at 20 px/day; bar sits 180 px into the range.
        let committed = Interval::new(d(3, 10), d(3, 12));
        let (mut controller, task_id) = drag_controller(committed, 180.0);

        // Pointer travels 100 px to the right of the grab point.
        controller.pointer_moved(285.0);
        assert!(controller.tick(range_start(), PPD));

        let live = controller.override_for(task_id).unwrap();
        assert_eq!(live.start, d(3, 15));
        assert_eq!(live.end, d(3, 17));

        let update = controller.release().unwrap();
        assert_eq!(update.task_id, task_id);
        assert_eq!(update.start, Some(d(3, 15)));
        assert_eq!(update.due_date, Some(d(3, 17)));
        assert!(!controller.is_active());
    }

    #[test]
    fn moves_between_ticks_coalesce_to_the_latest() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let (mut controller, task_id) = drag_controller(committed, 180.0);

        controller.pointer_moved(225.0);
        controller.pointer_moved(245.0);
        controller.pointer_moved(265.0);
        assert!(controller.tick(range_start(), PPD));
        // Only the last move applied: 260 px -> 13 days.
        assert_eq!(
            controller.override_for(task_id).unwrap().start,
            d(3, 14)
        );
        // Nothing pending: the next tick is a no-op.
        assert!(!controller.tick(range_start(), PPD));
    }

    #[test]
    fn degenerate_click_commits_nothing() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let (mut controller, _) = drag_controller(committed, 180.0);
        assert!(controller.release().is_none());
        assert!(!controller.is_active());
    }

    #[test]
    fn drag_cannot_leave_the_window_to_the_left() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let (mut controller, task_id) = drag_controller(committed, 180.0);
        controller.pointer_moved(-400.0);
        controller.tick(range_start(), PPD);
        assert_eq!(controller.override_for(task_id).unwrap().start, range_start());
    }

    #[test]
    fn resize_end_edge_commits_only_the_due_date() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let task_id = Uuid::new_v4();
        let mut controller = InteractionController::new();
        controller.begin_resize(task_id, committed, ResizeEdge::End);

        // Pointer over the Mar 16 cell boundary.
        controller.pointer_moved(15.0 * PPD);
        assert!(controller.tick(range_start(), PPD));
        let live = controller.override_for(task_id).unwrap();
        assert_eq!(live.start, d(3, 10));
        assert_eq!(live.end, d(3, 16));

        let update = controller.release().unwrap();
        assert_eq!(update.start, None);
        assert_eq!(update.due_date, Some(d(3, 16)));
    }

    #[test]
    fn resize_end_before_start_is_rejected() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let task_id = Uuid::new_v4();
        let mut controller = InteractionController::new();
        controller.begin_resize(task_id, committed, ResizeEdge::End);

        // Mar 5 is before the committed start: the tick is rejected and no
        // proposal exists, so releasing commits nothing.
        controller.pointer_moved(4.0 * PPD);
        assert!(!controller.tick(range_start(), PPD));
        assert!(controller.override_for(task_id).is_none());
        assert!(controller.release().is_none());
    }

    #[test]
    fn rejected_tick_retains_previous_valid_proposal() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let task_id = Uuid::new_v4();
        let mut controller = InteractionController::new();
        controller.begin_resize(task_id, committed, ResizeEdge::End);

        controller.pointer_moved(14.0 * PPD);
        assert!(controller.tick(range_start(), PPD));
        let valid = controller.override_for(task_id).unwrap();

        // Crossing proposal: previous value retained, not clamped.
        controller.pointer_moved(2.0 * PPD);
        assert!(!controller.tick(range_start(), PPD));
        assert_eq!(controller.override_for(task_id), Some(valid));

        let update = controller.release().unwrap();
        assert_eq!(update.due_date, Some(valid.end));
    }

    #[test]
    fn resize_start_edge_cannot_cross_committed_end() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let task_id = Uuid::new_v4();
        let mut controller = InteractionController::new();
        controller.begin_resize(task_id, committed, ResizeEdge::Start);

        controller.pointer_moved(20.0 * PPD);
        assert!(!controller.tick(range_start(), PPD));

        controller.pointer_moved(7.0 * PPD);
        assert!(controller.tick(range_start(), PPD));
        let update = controller.release().unwrap();
        assert_eq!(update.start, Some(d(3, 8)));
        assert_eq!(update.due_date, None);
    }

    #[test]
    fn click_suppression_window_opens_and_closes() {
        let committed = Interval::new(d(3, 10), d(3, 12));
        let (mut controller, _) = drag_controller(committed, 180.0);
        controller.pointer_moved(285.0);
        controller.tick(range_start(), PPD);

        let release_time = Instant::now();
        controller.release_at(release_time);
        assert!(controller.suppress_click_at(release_time + StdDuration::from_millis(50)));
        assert!(!controller.suppress_click_at(release_time + StdDuration::from_millis(150)));
    }
}
