//! Drag and resize gestures on the chart.
//!
//! [`DragGesture`] is a small state machine: idle until a pointer press
//! claims a shape, then the live dates are re-derived from the press-time
//! originals on every pointer move, until the gesture is released (one
//! commit) or cancelled (none).

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::date;
use crate::model::{Project, ScheduleMode};

/// What a gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Shift a sub-package's whole range.
    Move,
    /// Drag the left edge; the end stays put.
    ResizeStart,
    /// Drag the right edge; the start stays put.
    ResizeEnd,
    /// Shift a milestone's single date.
    MoveMilestone,
}

/// Identity of the shape being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    SubPackage {
        work_package: Uuid,
        sub_package: Uuid,
    },
    Milestone {
        milestone: Uuid,
    },
}

/// Date payload carried through a gesture. Milestones use `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DragDates {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }
}

/// The one update a finished gesture asks the store to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragCommit {
    pub target: DragTarget,
    pub dates: DragDates,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    kind: DragKind,
    target: DragTarget,
    /// Dates captured at pointer press; every move re-derives from these.
    original: DragDates,
    live: DragDates,
    anchor_x: f32,
}

#[derive(Debug, Default)]
pub struct DragGesture {
    active: Option<ActiveDrag>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<DragKind> {
        self.active.as_ref().map(|d| d.kind)
    }

    pub fn target(&self) -> Option<DragTarget> {
        self.active.as_ref().map(|d| d.target)
    }

    /// Live (uncommitted) dates when the gesture targets `target`.
    pub fn live_for(&self, target: DragTarget) -> Option<DragDates> {
        let drag = self.active.as_ref()?;
        (drag.target == target).then_some(drag.live)
    }

    /// Begin a gesture at pointer x. Ignored while another gesture is in
    /// flight: one drag at a time, no queuing.
    pub fn pointer_down(&mut self, kind: DragKind, target: DragTarget, dates: DragDates, x: f32) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(ActiveDrag {
            kind,
            target,
            original: dates,
            live: dates,
            anchor_x: x,
        });
    }

    /// Re-derive the live dates from the cumulative pointer delta.
    ///
    /// `pixels_per_day` must come from the current frame's layout so the
    /// pixel-to-day conversion never uses a stale density. `clamp_range`
    /// carries the parent bounds when the target is constrained.
    pub fn pointer_move(
        &mut self,
        x: f32,
        pixels_per_day: f32,
        clamp_range: Option<(NaiveDate, NaiveDate)>,
    ) {
        let Some(drag) = self.active.as_mut() else {
            return;
        };
        if pixels_per_day <= 0.0 {
            return;
        }
        let delta_days = ((x - drag.anchor_x) / pixels_per_day).round() as i64;

        let orig = drag.original;
        let mut start = orig.start;
        let mut end = orig.end;
        match drag.kind {
            DragKind::Move | DragKind::MoveMilestone => {
                start = date::add_days(orig.start, delta_days);
                end = date::add_days(orig.end, delta_days);
            }
            DragKind::ResizeStart => {
                start = date::add_days(orig.start, delta_days);
                if date::days_between(start, end) < 1 {
                    start = date::add_days(end, -1);
                }
            }
            DragKind::ResizeEnd => {
                end = date::add_days(orig.end, delta_days);
                if date::days_between(start, end) < 1 {
                    end = date::add_days(start, 1);
                }
            }
        }
        if let Some((min, max)) = clamp_range {
            start = date::clamp_date(start, min, max);
            end = date::clamp_date(end, min, max);
        }
        drag.live = DragDates { start, end };
    }

    /// Finish the gesture on pointer release.
    ///
    /// Returns the single commit for the store when the live dates actually
    /// moved; a zero-delta drag yields nothing.
    pub fn release(&mut self) -> Option<DragCommit> {
        let drag = self.active.take()?;
        (drag.live != drag.original).then_some(DragCommit {
            target: drag.target,
            dates: drag.live,
        })
    }

    /// Abort with no commit: Escape, the pointer left the surface, or the
    /// target disappeared mid-gesture.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Parent bounds a dragged target must stay inside, per the project
/// settings. Only sub-packages under a manual-mode parent are constrained.
pub fn clamp_range_for(project: &Project, target: DragTarget) -> Option<(NaiveDate, NaiveDate)> {
    if !project.settings.clamp_to_manual_parent {
        return None;
    }
    let DragTarget::SubPackage { work_package, .. } = target else {
        return None;
    };
    let wp = project.work_package(work_package)?;
    (wp.mode == ScheduleMode::Manual).then_some((wp.start, wp.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SubPackage, WorkPackage};
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        date::parse_date(s).unwrap()
    }

    fn sub_target() -> DragTarget {
        DragTarget::SubPackage {
            work_package: Uuid::new_v4(),
            sub_package: Uuid::new_v4(),
        }
    }

    const PX_PER_DAY: f32 = 18.0;

    #[test]
    fn move_shifts_both_dates_by_rounded_days() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            100.0,
        );
        // 54 px at 18 px/day is exactly 3 days.
        gesture.pointer_move(154.0, PX_PER_DAY, None);

        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-05-13"));
        assert_eq!(commit.dates.end, d("2023-05-23"));
        assert!(!gesture.is_active());
    }

    #[test]
    fn deltas_come_from_press_time_originals_not_intermediate_frames() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            100.0,
        );
        // Wander around first; only the final cumulative delta counts.
        gesture.pointer_move(118.0, PX_PER_DAY, None);
        gesture.pointer_move(64.0, PX_PER_DAY, None);
        gesture.pointer_move(154.0, PX_PER_DAY, None);

        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-05-13"));
        assert_eq!(commit.dates.end, d("2023-05-23"));
    }

    #[test]
    fn fractional_deltas_round_to_the_nearest_day() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            0.0,
        );
        // 8 px at 18 px/day rounds to zero days.
        gesture.pointer_move(8.0, PX_PER_DAY, None);
        assert!(gesture.release().is_none());

        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            0.0,
        );
        // 10 px rounds up to one day.
        gesture.pointer_move(10.0, PX_PER_DAY, None);
        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-05-11"));
    }

    #[test]
    fn resize_start_keeps_at_least_one_day() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::ResizeStart,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            0.0,
        );
        // Way past the end edge.
        gesture.pointer_move(50.0 * PX_PER_DAY, PX_PER_DAY, None);

        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-05-19"));
        assert_eq!(commit.dates.end, d("2023-05-20"));
    }

    #[test]
    fn resize_end_keeps_at_least_one_day() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::ResizeEnd,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            0.0,
        );
        gesture.pointer_move(-50.0 * PX_PER_DAY, PX_PER_DAY, None);

        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-05-10"));
        assert_eq!(commit.dates.end, d("2023-05-11"));
    }

    #[test]
    fn clamped_drag_commits_the_parent_boundary() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-03-05"), d("2023-03-10")),
            0.0,
        );
        // 13 days left would put the start at 2023-02-20, well before the
        // parent range.
        gesture.pointer_move(
            -13.0 * PX_PER_DAY,
            PX_PER_DAY,
            Some((d("2023-03-01"), d("2023-03-31"))),
        );

        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-03-01"));
    }

    #[test]
    fn unclamped_drag_may_leave_the_parent_range() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-03-05"), d("2023-03-10")),
            0.0,
        );
        gesture.pointer_move(-13.0 * PX_PER_DAY, PX_PER_DAY, None);

        let commit = gesture.release().unwrap();
        assert_eq!(commit.dates.start, d("2023-02-20"));
        assert_eq!(commit.dates.end, d("2023-02-25"));
    }

    #[test]
    fn zero_delta_release_commits_nothing() {
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            sub_target(),
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            100.0,
        );
        gesture.pointer_move(100.0, PX_PER_DAY, None);
        assert!(gesture.release().is_none());

        // Release without any press is a no-op too.
        assert!(gesture.release().is_none());
    }

    #[test]
    fn second_press_is_ignored_while_a_drag_is_active() {
        let first = sub_target();
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            first,
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            0.0,
        );
        gesture.pointer_down(
            DragKind::MoveMilestone,
            DragTarget::Milestone { milestone: Uuid::new_v4() },
            DragDates::single(d("2023-07-01")),
            500.0,
        );

        assert_eq!(gesture.target(), Some(first));
        gesture.pointer_move(PX_PER_DAY, PX_PER_DAY, None);
        let commit = gesture.release().unwrap();
        assert_eq!(commit.target, first);
    }

    #[test]
    fn cancel_reverts_without_a_commit() {
        let target = sub_target();
        let mut gesture = DragGesture::new();
        gesture.pointer_down(
            DragKind::Move,
            target,
            DragDates::range(d("2023-05-10"), d("2023-05-20")),
            0.0,
        );
        gesture.pointer_move(5.0 * PX_PER_DAY, PX_PER_DAY, None);
        assert!(gesture.live_for(target).is_some());

        gesture.cancel();
        assert!(!gesture.is_active());
        assert!(gesture.release().is_none());
    }

    #[test]
    fn milestone_drag_moves_a_single_date() {
        let target = DragTarget::Milestone { milestone: Uuid::new_v4() };
        let mut gesture = DragGesture::new();
        gesture.pointer_down(DragKind::MoveMilestone, target, DragDates::single(d("2023-07-01")), 0.0);
        gesture.pointer_move(-2.0 * PX_PER_DAY, PX_PER_DAY, None);

        let live = gesture.live_for(target).unwrap();
        assert_eq!(live.start, d("2023-06-29"));
        assert_eq!(live.start, live.end);
    }

    #[test]
    fn clamp_range_only_applies_under_manual_parents() {
        let mut project = Project::new("Demo");
        let mut manual = WorkPackage::new("Manual", d("2023-03-01"), d("2023-03-31"));
        manual.mode = ScheduleMode::Manual;
        let sub = SubPackage::new("Task", d("2023-03-05"), d("2023-03-10"));
        let manual_target = DragTarget::SubPackage {
            work_package: manual.id,
            sub_package: sub.id,
        };
        manual.sub_packages.push(sub);
        project.work_packages.push(manual);

        let auto = WorkPackage::new("Auto", d("2023-04-01"), d("2023-04-30"));
        let auto_target = DragTarget::SubPackage {
            work_package: auto.id,
            sub_package: Uuid::new_v4(),
        };
        project.work_packages.push(auto);

        // Setting disabled: nobody is clamped.
        assert_eq!(clamp_range_for(&project, manual_target), None);

        project.settings.clamp_to_manual_parent = true;
        assert_eq!(
            clamp_range_for(&project, manual_target),
            Some((d("2023-03-01"), d("2023-03-31")))
        );
        assert_eq!(clamp_range_for(&project, auto_target), None);
        assert_eq!(
            clamp_range_for(&project, DragTarget::Milestone { milestone: Uuid::new_v4() }),
            None
        );
    }

    proptest! {
        #[test]
        fn resize_never_drops_below_one_day(delta_px in -2_000.0f32..2_000.0, from_start in proptest::bool::ANY) {
            let kind = if from_start { DragKind::ResizeStart } else { DragKind::ResizeEnd };
            let mut gesture = DragGesture::new();
            gesture.pointer_down(
                kind,
                sub_target(),
                DragDates::range(d("2023-05-10"), d("2023-05-20")),
                0.0,
            );
            gesture.pointer_move(delta_px, PX_PER_DAY, None);
            let live = gesture.live_for(gesture.target().unwrap()).unwrap();
            prop_assert!(date::days_between(live.start, live.end) >= 1);
        }

        #[test]
        fn move_preserves_duration(delta_px in -2_000.0f32..2_000.0) {
            let mut gesture = DragGesture::new();
            gesture.pointer_down(
                DragKind::Move,
                sub_target(),
                DragDates::range(d("2023-05-10"), d("2023-05-20")),
                0.0,
            );
            gesture.pointer_move(delta_px, PX_PER_DAY, None);
            let live = gesture.live_for(gesture.target().unwrap()).unwrap();
            prop_assert_eq!(date::days_between(live.start, live.end), 10);
        }
    }
}
