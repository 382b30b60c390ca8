//! Pure geometry for the timeline chart.
//!
//! [`TimelineLayout::compute`] turns a project snapshot, a resolution
//! selection, a container width and a render mode into pixel rectangles,
//! axis ticks and milestone markers. It holds no state of its own and is
//! recomputed on every change, so the drawing can never go stale.

pub mod metrics;

pub use metrics::{Metrics, RenderMode};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::date;
use crate::model::scale::{LabelKind, Resolution, ScaleConfig};
use crate::model::{Project, WorkPackage};

/// Ticks stop after this many intervals even if the view end was not
/// reached. Guards against degenerate tick spacings.
const TICK_SAFETY_CAP: usize = 200;

/// Axis-aligned rectangle in chart coordinates, origin at the top-left of
/// the drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// One vertical gridline on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub date: NaiveDate,
    pub x: f32,
    /// `None` for the unlabeled closing tick.
    pub label: Option<String>,
}

/// Geometry for one sub-package bar.
#[derive(Debug, Clone)]
pub struct SubBar {
    pub work_package: Uuid,
    pub sub_package: Uuid,
    pub rect: BarRect,
    pub title: String,
    pub range_label: String,
}

/// Geometry for one work-package row: title, summary bar and the stack of
/// sub-package bars below it.
#[derive(Debug, Clone)]
pub struct PackageRow {
    pub work_package: Uuid,
    /// Top edge of the row band.
    pub y: f32,
    pub height: f32,
    /// Thin summary bar spanning the package's effective range.
    pub bar: BarRect,
    /// Center anchor for the title above the bar.
    pub label_x: f32,
    pub label_y: f32,
    pub title: String,
    pub range_label: String,
    pub sub_bars: Vec<SubBar>,
}

/// Diamond marker for one milestone, anchored near the bottom edge.
#[derive(Debug, Clone)]
pub struct MilestoneMarker {
    pub milestone: Uuid,
    pub x: f32,
    /// Vertical center of the diamond.
    pub y: f32,
    pub title: String,
    pub date_label: String,
}

/// Complete pixel geometry for one frame of the chart.
#[derive(Debug, Clone)]
pub struct TimelineLayout {
    pub mode: RenderMode,
    pub metrics: Metrics,
    pub scale: ScaleConfig,
    /// First and last visible date after padding.
    pub view_start: NaiveDate,
    pub view_end: NaiveDate,
    /// Horizontal density after stretching to the container.
    pub pixels_per_day: f32,
    pub width: f32,
    pub height: f32,
    pub ticks: Vec<Tick>,
    pub rows: Vec<PackageRow>,
    pub milestones: Vec<MilestoneMarker>,
}

impl TimelineLayout {
    pub fn compute(
        project: &Project,
        resolution: Resolution,
        view_width: f32,
        mode: RenderMode,
        today: NaiveDate,
    ) -> Self {
        let metrics = Metrics::for_mode(mode);

        // Raw extent of everything, or a default window around today for an
        // empty project.
        let (raw_min, raw_max) = project
            .date_bounds()
            .unwrap_or_else(|| (today, date::add_days(today, 30)));
        let span_days = date::days_between(raw_min, raw_max).max(1);

        // Resolve the preset, then pad one tick interval (at least a week)
        // on both sides so edge bars never touch the margins.
        let scale = resolution.resolve(span_days);
        let padding_days = scale.tick_days.max(7);
        let view_start = date::add_days(raw_min, -padding_days);
        let view_end = date::add_days(raw_max, padding_days);
        let view_days = date::days_between(view_start, view_end).max(1);

        // The drawing grows to fit the content but never shrinks below the
        // container (screen) or the print minimum (export). Whatever width is
        // left inside the margins sets the effective density.
        let content_width =
            view_days as f32 * scale.pixels_per_day + metrics.padding_left + metrics.padding_right;
        let width = match mode {
            RenderMode::Screen => view_width.max(content_width),
            RenderMode::Export => metrics.min_width.max(content_width),
        };
        let usable = width - metrics.padding_left - metrics.padding_right;
        let pixels_per_day = usable / view_days as f32;

        let mut layout = Self {
            mode,
            metrics,
            scale,
            view_start,
            view_end,
            pixels_per_day,
            width,
            height: 0.0,
            ticks: Vec::new(),
            rows: Vec::new(),
            milestones: Vec::new(),
        };

        layout.rows = layout.build_rows(project);
        let rows_height: f32 = layout.rows.iter().map(|row| row.height).sum();
        layout.height = metrics.header_height
            + metrics.padding_top
            + rows_height
            + metrics.padding_bottom
            + metrics.milestone_offset
            + metrics.footer_height;
        layout.ticks = layout.build_ticks();
        layout.milestones = layout.build_milestones(project);
        layout
    }

    /// X pixel of a date's left edge.
    pub fn x_of(&self, date: NaiveDate) -> f32 {
        self.metrics.padding_left
            + date::days_between(self.view_start, date) as f32 * self.pixels_per_day
    }

    /// Horizontal span of a bar covering `[start, end]`. The right edge sits
    /// at the day after `end`, so a one-day bar stays visibly wide.
    pub fn bar_span(&self, start: NaiveDate, end: NaiveDate) -> (f32, f32) {
        let x = self.x_of(start);
        let right = self.x_of(date::add_days(end, 1));
        (x, (right - x).max(1.0))
    }

    /// True when `date` falls inside the visible window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.view_start <= date && date <= self.view_end
    }

    fn row_height(&self, wp: &WorkPackage) -> f32 {
        let m = &self.metrics;
        let block = m.label_height + m.label_gap + m.package_bar_height + m.label_gap;
        block + self.stack_height(wp) + m.row_padding
    }

    /// Height of the sub-package stack, zero when collapsed or childless.
    fn stack_height(&self, wp: &WorkPackage) -> f32 {
        if wp.collapsed || wp.sub_packages.is_empty() {
            return 0.0;
        }
        let m = &self.metrics;
        let n = wp.sub_packages.len() as f32;
        n * m.sub_bar_height + (n - 1.0) * m.sub_stack_gap + 2.0 * m.stack_padding
    }

    fn build_rows(&self, project: &Project) -> Vec<PackageRow> {
        let m = self.metrics;
        let mut rows = Vec::with_capacity(project.work_packages.len());
        let mut y = m.header_height + m.padding_top;

        for wp in &project.work_packages {
            let height = self.row_height(wp);
            let (start, end) = wp.effective_range();
            let (bar_x, bar_width) = self.bar_span(start, end);
            let bar = BarRect {
                x: bar_x,
                y: y + m.label_height + m.label_gap,
                width: bar_width,
                height: m.package_bar_height,
            };

            let mut sub_bars = Vec::new();
            if !wp.collapsed {
                let stack_top = bar.bottom() + m.label_gap + m.stack_padding;
                for (i, sp) in wp.sub_packages.iter().enumerate() {
                    let (x, width) = self.bar_span(sp.start, sp.end);
                    sub_bars.push(SubBar {
                        work_package: wp.id,
                        sub_package: sp.id,
                        rect: BarRect {
                            x,
                            y: stack_top + i as f32 * (m.sub_bar_height + m.sub_stack_gap),
                            width,
                            height: m.sub_bar_height,
                        },
                        title: sp.title.clone(),
                        range_label: range_label(sp.start, sp.end),
                    });
                }
            }

            rows.push(PackageRow {
                work_package: wp.id,
                y,
                height,
                bar,
                label_x: bar.center_x(),
                label_y: y + m.label_height / 2.0,
                title: wp.title.clone(),
                range_label: range_label(start, end),
                sub_bars,
            });
            y += height;
        }
        rows
    }

    fn build_ticks(&self) -> Vec<Tick> {
        let mut ticks = vec![self.make_tick(self.view_start, true)];

        let mut next = date::add_days(self.view_start, self.scale.tick_days);
        let mut emitted = 0;
        while date::days_between(next, self.view_end) > 0 && emitted < TICK_SAFETY_CAP {
            ticks.push(self.make_tick(next, true));
            next = date::add_days(next, self.scale.tick_days);
            emitted += 1;
        }

        // Closing tick exactly at the view end. It gets a label only when the
        // safety cap left a gap wider than one interval.
        let last = ticks.last().map(|t| t.date).unwrap_or(self.view_start);
        let labeled = date::days_between(last, self.view_end) > self.scale.tick_days;
        ticks.push(self.make_tick(self.view_end, labeled));
        ticks
    }

    fn make_tick(&self, date: NaiveDate, labeled: bool) -> Tick {
        Tick {
            date,
            x: self.x_of(date),
            label: labeled.then(|| self.tick_label(date)),
        }
    }

    fn tick_label(&self, date: NaiveDate) -> String {
        match self.scale.label {
            LabelKind::Week => date::week_label(date),
            LabelKind::Month => date::month_label(date),
            LabelKind::Quarter => date::quarter_label(date),
            LabelKind::Year => date::year_label(date),
        }
    }

    fn build_milestones(&self, project: &Project) -> Vec<MilestoneMarker> {
        project
            .milestones
            .iter()
            .map(|ms| MilestoneMarker {
                milestone: ms.id,
                x: self.x_of(ms.date),
                y: self.height - self.metrics.milestone_offset,
                title: ms.title.clone(),
                date_label: date::short_label(ms.date),
            })
            .collect()
    }
}

/// Range caption under a bar, e.g. "05. Mar – 20. Mar".
pub fn range_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} – {}", date::short_label(start), date::short_label(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scale;
    use crate::model::{Milestone, SubPackage};

    fn d(s: &str) -> NaiveDate {
        date::parse_date(s).unwrap()
    }

    fn today() -> NaiveDate {
        d("2023-06-01")
    }

    /// Project whose raw span is exactly 100 days, so the month preset and a
    /// small container give a round 18 px/day density.
    fn hundred_day_project() -> Project {
        let mut project = Project::new("Demo");
        project
            .work_packages
            .push(WorkPackage::new("Build", d("2023-03-01"), d("2023-06-09")));
        project
    }

    #[test]
    fn empty_project_gets_a_default_window() {
        let layout =
            TimelineLayout::compute(&Project::default(), Resolution::Auto, 800.0, RenderMode::Screen, today());

        // 30-day span resolves to the month preset, padded by 30 days.
        assert_eq!(layout.scale, scale::MONTH);
        assert_eq!(layout.view_start, d("2023-05-02"));
        assert_eq!(layout.view_end, d("2023-07-31"));
        assert!(layout.rows.is_empty());
        assert!(layout.milestones.is_empty());
        assert!(!layout.ticks.is_empty());
        // 90 view days at 18 px/day plus margins outgrow the container.
        assert_eq!(layout.width, 90.0 * 18.0 + 80.0);
        assert!((layout.pixels_per_day - 18.0).abs() < 1e-4);
    }

    #[test]
    fn width_stretches_density_to_fill_the_container() {
        // 100-day span + 30 days padding each side = 160 view days. The
        // container is wider than the natural content, so density stretches.
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            4_000.0,
            RenderMode::Screen,
            today(),
        );
        assert_eq!(layout.width, 4_000.0);
        let expected = (4_000.0 - 80.0) / 160.0;
        assert!((layout.pixels_per_day - expected).abs() < 1e-4);
    }

    #[test]
    fn narrow_container_keeps_preset_density() {
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        // Content is wider than the container: width comes from the content
        // and the density stays at the month preset.
        assert_eq!(layout.width, 160.0 * 18.0 + 80.0);
        assert!((layout.pixels_per_day - 18.0).abs() < 1e-4);
    }

    #[test]
    fn x_positions_are_linear_in_days() {
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        assert_eq!(layout.x_of(layout.view_start), 40.0);
        let x0 = layout.x_of(d("2023-03-01"));
        let x1 = layout.x_of(d("2023-03-11"));
        assert!((x1 - x0 - 10.0 * 18.0).abs() < 1e-3);
    }

    #[test]
    fn one_day_bar_keeps_a_visible_width() {
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        let (_, width) = layout.bar_span(d("2023-03-01"), d("2023-03-01"));
        assert!((width - 18.0).abs() < 1e-3);

        // Even at extreme zoom-out a bar never collapses below one pixel.
        let wide = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Year,
            100.0,
            RenderMode::Screen,
            today(),
        );
        let (_, w) = wide.bar_span(d("2023-03-01"), d("2023-03-01"));
        assert!(w >= 1.0);
    }

    #[test]
    fn bar_right_edge_is_end_inclusive() {
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        let (x, width) = layout.bar_span(d("2023-03-01"), d("2023-03-10"));
        assert!((x + width - layout.x_of(d("2023-03-11"))).abs() < 1e-3);
    }

    #[test]
    fn childless_row_height_is_the_fixed_block() {
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        let m = layout.metrics;
        let expected = m.label_height + m.label_gap + m.package_bar_height + m.label_gap + m.row_padding;
        assert_eq!(layout.rows.len(), 1);
        assert!((layout.rows[0].height - expected).abs() < 1e-3);
        assert!(layout.rows[0].sub_bars.is_empty());
    }

    #[test]
    fn stacked_rows_accumulate_heights_in_order() {
        let mut project = hundred_day_project();
        let mut second = WorkPackage::new("Fit-out", d("2023-04-01"), d("2023-05-15"));
        second
            .sub_packages
            .push(SubPackage::new("Wiring", d("2023-04-01"), d("2023-04-20")));
        second
            .sub_packages
            .push(SubPackage::new("Plumbing", d("2023-04-10"), d("2023-05-15")));
        project.work_packages.push(second);

        let layout =
            TimelineLayout::compute(&project, Resolution::Month, 300.0, RenderMode::Screen, today());
        let m = layout.metrics;

        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0].y, m.header_height + m.padding_top);
        assert_eq!(layout.rows[1].y, layout.rows[0].y + layout.rows[0].height);

        let block = m.label_height + m.label_gap + m.package_bar_height + m.label_gap;
        let stack = 2.0 * m.sub_bar_height + m.sub_stack_gap + 2.0 * m.stack_padding;
        assert!((layout.rows[1].height - (block + stack + m.row_padding)).abs() < 1e-3);

        // Sub bars stack downward inside their row.
        let bars = &layout.rows[1].sub_bars;
        assert_eq!(bars.len(), 2);
        assert!((bars[1].rect.y - bars[0].rect.y - (m.sub_bar_height + m.sub_stack_gap)).abs() < 1e-3);
    }

    #[test]
    fn collapsed_package_drops_its_stack() {
        let mut project = Project::new("Demo");
        let mut wp = WorkPackage::new("Build", d("2023-03-01"), d("2023-06-09"));
        wp.sub_packages
            .push(SubPackage::new("Frame", d("2023-03-05"), d("2023-04-01")));
        wp.collapsed = true;
        project.work_packages.push(wp);

        let layout =
            TimelineLayout::compute(&project, Resolution::Month, 300.0, RenderMode::Screen, today());
        let m = layout.metrics;
        let expected = m.label_height + m.label_gap + m.package_bar_height + m.label_gap + m.row_padding;
        assert!((layout.rows[0].height - expected).abs() < 1e-3);
        assert!(layout.rows[0].sub_bars.is_empty());
    }

    #[test]
    fn height_sums_header_rows_and_milestone_band() {
        let mut project = hundred_day_project();
        project.milestones.push(Milestone::new("Done", d("2023-06-09")));

        let layout =
            TimelineLayout::compute(&project, Resolution::Month, 300.0, RenderMode::Screen, today());
        let m = layout.metrics;
        let rows: f32 = layout.rows.iter().map(|r| r.height).sum();
        let expected = m.header_height
            + m.padding_top
            + rows
            + m.padding_bottom
            + m.milestone_offset
            + m.footer_height;
        assert!((layout.height - expected).abs() < 1e-3);

        let marker = &layout.milestones[0];
        assert!((marker.y - (layout.height - m.milestone_offset)).abs() < 1e-3);
        assert!((marker.x - layout.x_of(d("2023-06-09"))).abs() < 1e-3);
    }

    #[test]
    fn ticks_step_by_interval_and_close_unlabeled() {
        let layout = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        let ticks = &layout.ticks;
        assert_eq!(ticks[0].date, layout.view_start);
        assert!(ticks[0].label.is_some());
        for pair in ticks.windows(2).take(ticks.len().saturating_sub(2)) {
            assert_eq!(date::days_between(pair[0].date, pair[1].date), 30);
        }
        let last = ticks.last().unwrap();
        assert_eq!(last.date, layout.view_end);
        assert_eq!(last.label, None);
    }

    #[test]
    fn tick_generation_is_capped() {
        let base = TimelineLayout::compute(
            &hundred_day_project(),
            Resolution::Month,
            300.0,
            RenderMode::Screen,
            today(),
        );
        // A degenerate spacing would loop forever without the cap.
        let mut layout = base.clone();
        layout.scale = ScaleConfig {
            tick_days: 0,
            pixels_per_day: 18.0,
            label: LabelKind::Month,
        };
        let ticks = layout.build_ticks();
        assert!(ticks.len() <= TICK_SAFETY_CAP + 2);
        let last = ticks.last().unwrap();
        assert_eq!(last.date, layout.view_end);
        // The truncated axis labels its closing tick.
        assert!(last.label.is_some());
    }

    #[test]
    fn export_mode_enforces_the_minimum_width() {
        let mut project = Project::new("Tiny");
        project
            .work_packages
            .push(WorkPackage::new("Spike", d("2023-06-01"), d("2023-06-03")));

        let layout =
            TimelineLayout::compute(&project, Resolution::Month, 5_000.0, RenderMode::Export, today());
        // Export ignores the container and uses the print minimum.
        assert_eq!(layout.width, 640.0);
        assert_eq!(layout.metrics.header_height, 50.0);
    }

    #[test]
    fn auto_resolution_flows_through_to_geometry() {
        let mut project = Project::new("Long");
        project
            .work_packages
            .push(WorkPackage::new("Phase", d("2023-01-01"), d("2024-06-01")));

        let layout =
            TimelineLayout::compute(&project, Resolution::Auto, 800.0, RenderMode::Screen, today());
        assert_eq!(layout.scale, scale::YEAR);
        assert_eq!(
            date::days_between(layout.view_start, d("2023-01-01")),
            365
        );
    }
}
