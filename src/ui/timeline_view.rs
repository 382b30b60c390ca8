use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::interact::{clamp_range_for, DragCommit, DragDates, DragGesture, DragKind, DragTarget};
use crate::layout::{BarRect, RenderMode, TimelineLayout};
use crate::model::scale::Resolution;
use crate::model::{date, Project, SubPackage};
use crate::ui::theme;
use crate::ui::Selection;

const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// What the chart asks the app to do after this frame.
#[derive(Debug, Default)]
pub struct ChartActions {
    /// Finished drag to apply to the store.
    pub commit: Option<DragCommit>,
    pub edit: Option<Selection>,
    pub delete: Option<Selection>,
    pub add_sub_package: Option<Uuid>,
    pub toggle_collapse: Option<Uuid>,
}

/// Render the timeline chart and run its interactions.
///
/// The geometry is recomputed from the project snapshot every frame; an
/// in-flight drag only overrides the dates of its own target shape.
pub fn show_timeline(
    project: &Project,
    resolution: Resolution,
    mode: RenderMode,
    gesture: &mut DragGesture,
    selected: &mut Option<Selection>,
    ui: &mut Ui,
) -> ChartActions {
    let mut actions = ChartActions::default();
    let today = chrono::Local::now().date_naive();
    let available = ui.available_size();
    let layout = TimelineLayout::compute(project, resolution, available.x, mode, today);

    // A gesture whose target vanished mid-drag is abandoned, not committed.
    if let Some(target) = gesture.target() {
        if !target_exists(project, target) {
            gesture.cancel();
        }
    }
    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        gesture.cancel();
    }

    egui::ScrollArea::both()
        .id_salt("timeline-canvas")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let size = Vec2::new(layout.width, layout.height.max(available.y));
            let (response, painter) = ui.allocate_painter(size, Sense::click());
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::canvas_bg(mode));

            draw_grid(&painter, origin, &layout);
            draw_header(&painter, origin, &layout, project, mode);
            draw_milestone_guides(&painter, origin, &layout, gesture, project);
            if mode == RenderMode::Screen && layout.contains(today) {
                draw_today_line(&painter, origin, &layout, today);
            }

            for (row_index, row) in layout.rows.iter().enumerate() {
                let Some(wp) = project.work_package(row.work_package) else {
                    continue;
                };
                let (package_color, sub_color) = theme::package_colors(row_index);

                draw_package_bar(&painter, origin, row, package_color, mode);
                if mode == RenderMode::Screen {
                    let bar_rect = to_rect(origin, &row.bar);
                    let wp_response = ui.interact(
                        bar_rect.expand(2.0),
                        ui.make_persistent_id(("package-bar", row.work_package)),
                        Sense::click(),
                    );
                    if wp_response.clicked() {
                        *selected = Some(Selection::WorkPackage(row.work_package));
                        consumed_click = true;
                    }
                    if *selected == Some(Selection::WorkPackage(row.work_package)) {
                        painter.rect_stroke(
                            bar_rect.expand(1.5),
                            Rounding::same(theme::package_bar_rounding(mode) + 1.5),
                            Stroke::new(2.0, theme::SELECTION_OUTLINE),
                        );
                    }
                    wp_response.context_menu(|ui| {
                        if ui.button("Edit...").clicked() {
                            actions.edit = Some(Selection::WorkPackage(row.work_package));
                            ui.close_menu();
                        }
                        if ui.button("Add sub-package...").clicked() {
                            actions.add_sub_package = Some(row.work_package);
                            ui.close_menu();
                        }
                        let label = if wp.collapsed { "Expand" } else { "Collapse" };
                        if ui.button(label).clicked() {
                            actions.toggle_collapse = Some(row.work_package);
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui.button("Delete").clicked() {
                            actions.delete = Some(Selection::WorkPackage(row.work_package));
                            ui.close_menu();
                        }
                    });
                    if wp_response.hovered() && !gesture.is_active() {
                        egui::show_tooltip_at_pointer(
                            ui.ctx(),
                            ui.layer_id(),
                            egui::Id::new(("package-tip", row.work_package)),
                            |ui| {
                                ui.strong(&row.title);
                                ui.label(&row.range_label);
                                if !wp.sub_packages.is_empty() {
                                    ui.label(format!("{} sub-packages", wp.sub_packages.len()));
                                }
                            },
                        );
                    }
                }

                for bar in &row.sub_bars {
                    let Some(sp) = wp.sub_package(bar.sub_package) else {
                        continue;
                    };
                    show_sub_bar(
                        ui, &painter, origin, &layout, project, sp, bar, row.work_package,
                        sub_color, package_color, mode, gesture, selected, &mut actions,
                        &mut consumed_click,
                    );
                }
            }

            for marker in &layout.milestones {
                show_milestone(
                    ui, &painter, origin, &layout, project, marker, mode, gesture, selected,
                    &mut actions, &mut consumed_click,
                );
            }

            if mode == RenderMode::Export {
                painter.rect_stroke(response.rect.shrink(0.5), 0.0, Stroke::new(1.0, theme::PRINT_FRAME));
            }

            // Empty click on the background clears the selection.
            if response.clicked() && !consumed_click {
                *selected = None;
            }
        });

    actions
}

fn target_exists(project: &Project, target: DragTarget) -> bool {
    match target {
        DragTarget::SubPackage {
            work_package,
            sub_package,
        } => project
            .work_package(work_package)
            .is_some_and(|wp| wp.sub_package(sub_package).is_some()),
        DragTarget::Milestone { milestone } => project.milestone(milestone).is_some(),
    }
}

fn to_rect(origin: Pos2, bar: &BarRect) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x + bar.x, origin.y + bar.y),
        Vec2::new(bar.width, bar.height),
    )
}

#[allow(clippy::too_many_arguments)]
fn show_sub_bar(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    project: &Project,
    sp: &SubPackage,
    bar: &crate::layout::SubBar,
    work_package: Uuid,
    sub_color: Color32,
    package_color: Color32,
    mode: RenderMode,
    gesture: &mut DragGesture,
    selected: &mut Option<Selection>,
    actions: &mut ChartActions,
    consumed_click: &mut bool,
) {
    let target = DragTarget::SubPackage {
        work_package,
        sub_package: bar.sub_package,
    };
    let selection = Selection::SubPackage {
        work_package,
        sub_package: bar.sub_package,
    };

    // An in-flight drag overrides the stored dates of its own target.
    let live = gesture.live_for(target);
    let (start, end) = live.map(|l| (l.start, l.end)).unwrap_or((sp.start, sp.end));
    let (x, width) = layout.bar_span(start, end);
    let rect = to_rect(
        origin,
        &BarRect {
            x,
            y: bar.rect.y,
            width,
            height: bar.rect.height,
        },
    );

    let fill = sp.color.unwrap_or(sub_color);
    let rounding = Rounding::same(theme::sub_bar_rounding(mode));
    painter.rect_filled(rect, rounding, fill);
    painter.rect_stroke(rect, rounding, Stroke::new(1.0, package_color));

    // Title and range sit to the right of the bar.
    let label_x = rect.right() + 14.0;
    painter.text(
        Pos2::new(label_x, rect.center().y - 7.0),
        egui::Align2::LEFT_CENTER,
        &bar.title,
        theme::font_bar(),
        theme::text_color(mode),
    );
    let range = crate::layout::range_label(start, end);
    painter.text(
        Pos2::new(label_x, rect.center().y + 7.0),
        egui::Align2::LEFT_CENTER,
        range,
        theme::font_small(),
        theme::metadata_color(mode),
    );

    if mode == RenderMode::Export {
        return;
    }

    let bar_response = ui.interact(
        rect,
        ui.make_persistent_id(("sub-bar", bar.sub_package)),
        Sense::click_and_drag(),
    );
    let left_handle = Rect::from_min_max(
        Pos2::new(rect.left() - HANDLE_WIDTH * 0.5, rect.top()),
        Pos2::new(rect.left() + HANDLE_WIDTH * 0.5, rect.bottom()),
    );
    let right_handle = Rect::from_min_max(
        Pos2::new(rect.right() - HANDLE_WIDTH * 0.5, rect.top()),
        Pos2::new(rect.right() + HANDLE_WIDTH * 0.5, rect.bottom()),
    );
    let left_response = ui.interact(
        left_handle.expand(4.0),
        ui.make_persistent_id(("sub-resize-left", bar.sub_package)),
        Sense::drag(),
    );
    let right_response = ui.interact(
        right_handle.expand(4.0),
        ui.make_persistent_id(("sub-resize-right", bar.sub_package)),
        Sense::drag(),
    );

    if bar_response.clicked() {
        *selected = Some(selection);
        *consumed_click = true;
    }

    // Press: capture the stored dates once; they stay the reference for the
    // whole gesture.
    let pressed = [
        (&left_response, DragKind::ResizeStart),
        (&right_response, DragKind::ResizeEnd),
        (&bar_response, DragKind::Move),
    ];
    for (response, kind) in pressed {
        if response.drag_started() {
            let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
            gesture.pointer_down(kind, target, DragDates::range(sp.start, sp.end), ptr_x);
            *selected = Some(selection);
            *consumed_click = true;
        }
    }

    if gesture.target() == Some(target) {
        let dragging = [
            (&left_response, egui::CursorIcon::ResizeHorizontal),
            (&right_response, egui::CursorIcon::ResizeHorizontal),
            (&bar_response, egui::CursorIcon::Grabbing),
        ];
        for (response, icon) in dragging {
            if response.dragged() {
                ui.ctx().set_cursor_icon(icon);
                let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                gesture.pointer_move(ptr_x, layout.pixels_per_day, clamp_range_for(project, target));
            }
        }
        if bar_response.drag_stopped()
            || left_response.drag_stopped()
            || right_response.drag_stopped()
        {
            if let Some(commit) = gesture.release() {
                actions.commit = Some(commit);
            }
        }
    }

    // Handle affordances on hover or selection.
    let handles_hot = left_response.hovered() || right_response.hovered();
    if *selected == Some(selection) || handles_hot {
        if handles_hot {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        } else if bar_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        let handle_h = rect.height() * 0.55;
        let handle_y = rect.center().y - handle_h / 2.0;
        let lh = Rect::from_min_size(Pos2::new(rect.left() - 1.5, handle_y), Vec2::new(4.0, handle_h));
        let rh = Rect::from_min_size(Pos2::new(rect.right() - 2.5, handle_y), Vec2::new(4.0, handle_h));
        painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
        painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
    }
    if *selected == Some(selection) {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::sub_bar_rounding(mode) + 1.5),
            Stroke::new(2.0, theme::SELECTION_OUTLINE),
        );
    }

    bar_response.context_menu(|ui| {
        if ui.button("Edit...").clicked() {
            actions.edit = Some(selection);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Delete").clicked() {
            actions.delete = Some(selection);
            ui.close_menu();
        }
    });

    let hovered = bar_response.hovered() || handles_hot;
    if hovered && !gesture.is_active() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("sub-tip", bar.sub_package)),
            |ui| {
                ui.strong(&bar.title);
                ui.label(crate::layout::range_label(sp.start, sp.end));
                if let Some(category) = &sp.category {
                    ui.label(format!("Category: {category}"));
                }
                if let Some(assignees) = &sp.assignees {
                    ui.label(assignees.join(", "));
                }
            },
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn show_milestone(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    project: &Project,
    marker: &crate::layout::MilestoneMarker,
    mode: RenderMode,
    gesture: &mut DragGesture,
    selected: &mut Option<Selection>,
    actions: &mut ChartActions,
    consumed_click: &mut bool,
) {
    let Some(ms) = project.milestone(marker.milestone) else {
        return;
    };
    let target = DragTarget::Milestone {
        milestone: marker.milestone,
    };
    let selection = Selection::Milestone(marker.milestone);

    let display_date = gesture.live_for(target).map(|l| l.start).unwrap_or(ms.date);
    let x = origin.x + layout.x_of(display_date);
    let center = Pos2::new(x, origin.y + marker.y);
    let half = theme::MILESTONE_HALF;
    let color = theme::milestone_color(mode);

    let points = vec![
        Pos2::new(center.x, center.y - half),
        Pos2::new(center.x + half, center.y),
        Pos2::new(center.x, center.y + half),
        Pos2::new(center.x - half, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(
        points.clone(),
        color,
        Stroke::new(1.0, theme::axis_color(mode)),
    ));

    painter.text(
        Pos2::new(center.x, center.y - half - 8.0),
        egui::Align2::CENTER_BOTTOM,
        &marker.title,
        theme::font_bar(),
        theme::text_color(mode),
    );
    painter.text(
        Pos2::new(center.x, center.y + half + 8.0),
        egui::Align2::CENTER_TOP,
        date::short_label(display_date),
        theme::font_small(),
        theme::metadata_color(mode),
    );

    if mode == RenderMode::Export {
        return;
    }

    let response = ui.interact(
        Rect::from_center_size(center, Vec2::splat(half * 2.0 + 2.0)).expand(4.0),
        ui.make_persistent_id(("milestone", marker.milestone)),
        Sense::click_and_drag(),
    );

    if response.clicked() {
        *selected = Some(selection);
        *consumed_click = true;
    }
    if response.drag_started() {
        let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
        gesture.pointer_down(
            DragKind::MoveMilestone,
            target,
            DragDates::single(ms.date),
            ptr_x,
        );
        *selected = Some(selection);
        *consumed_click = true;
    }
    if gesture.target() == Some(target) {
        if response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
            gesture.pointer_move(ptr_x, layout.pixels_per_day, None);
        }
        if response.drag_stopped() {
            if let Some(commit) = gesture.release() {
                actions.commit = Some(commit);
            }
        }
    }

    if *selected == Some(selection) {
        painter.add(egui::Shape::convex_polygon(
            points,
            Color32::TRANSPARENT,
            Stroke::new(2.0, theme::SELECTION_OUTLINE),
        ));
    }

    response.context_menu(|ui| {
        if ui.button("Edit...").clicked() {
            actions.edit = Some(selection);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Delete").clicked() {
            actions.delete = Some(selection);
            ui.close_menu();
        }
    });

    if response.hovered() && !gesture.is_active() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("milestone-tip", marker.milestone)),
            |ui| {
                ui.strong(&marker.title);
                ui.label(date::iso_string(ms.date));
            },
        );
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    project: &Project,
    mode: RenderMode,
) {
    let m = &layout.metrics;

    painter.text(
        Pos2::new(origin.x + m.padding_left, origin.y + 10.0),
        egui::Align2::LEFT_TOP,
        &project.name,
        theme::font_title(),
        theme::text_color(mode),
    );
    // The short export header only has room for the title line.
    if mode == RenderMode::Screen {
        if let Some(description) = &project.description {
            painter.text(
                Pos2::new(origin.x + m.padding_left, origin.y + 36.0),
                egui::Align2::LEFT_TOP,
                description,
                theme::font_sub(),
                theme::metadata_color(mode),
            );
        }
    }

    for tick in &layout.ticks {
        if let Some(label) = &tick.label {
            painter.text(
                Pos2::new(origin.x + tick.x, origin.y + m.header_height - 18.0),
                egui::Align2::CENTER_CENTER,
                label,
                theme::font_header(),
                theme::axis_color(mode),
            );
        }
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + m.header_height),
            Pos2::new(origin.x + layout.width, origin.y + m.header_height),
        ],
        Stroke::new(1.0, theme::grid_color(mode)),
    );
}

fn draw_grid(painter: &egui::Painter, origin: Pos2, layout: &TimelineLayout) {
    let stroke = Stroke::new(0.5, theme::grid_color(layout.mode));
    for tick in &layout.ticks {
        let x = origin.x + tick.x;
        painter.line_segment(
            [
                Pos2::new(x, origin.y + layout.metrics.header_height),
                Pos2::new(x, origin.y + layout.height),
            ],
            stroke,
        );
    }
}

fn draw_milestone_guides(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    gesture: &DragGesture,
    project: &Project,
) {
    for marker in &layout.milestones {
        let target = DragTarget::Milestone {
            milestone: marker.milestone,
        };
        let display_date = gesture
            .live_for(target)
            .map(|l| l.start)
            .or_else(|| project.milestone(marker.milestone).map(|ms| ms.date));
        let Some(display_date) = display_date else {
            continue;
        };
        let x = origin.x + layout.x_of(display_date);
        painter.extend(egui::Shape::dashed_line(
            &[
                Pos2::new(x, origin.y + layout.metrics.header_height),
                Pos2::new(x, origin.y + marker.y - theme::MILESTONE_HALF),
            ],
            Stroke::new(1.0, theme::milestone_color(layout.mode)),
            4.0,
            4.0,
        ));
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    today: NaiveDate,
) {
    let x = origin.x + layout.x_of(today);
    painter.line_segment(
        [
            Pos2::new(x, origin.y + layout.metrics.header_height),
            Pos2::new(x, origin.y + layout.height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + layout.metrics.header_height - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_package_bar(
    painter: &egui::Painter,
    origin: Pos2,
    row: &crate::layout::PackageRow,
    package_color: Color32,
    mode: RenderMode,
) {
    let rect = to_rect(origin, &row.bar);
    let rounding = Rounding::same(theme::package_bar_rounding(mode));
    match mode {
        RenderMode::Screen => painter.rect_filled(rect, rounding, package_color),
        RenderMode::Export => painter.rect_stroke(rect, rounding, Stroke::new(1.5, package_color)),
    };

    painter.text(
        Pos2::new(origin.x + row.label_x, origin.y + row.label_y),
        egui::Align2::CENTER_CENTER,
        &row.title,
        theme::font_header(),
        match mode {
            RenderMode::Screen => package_color,
            RenderMode::Export => theme::PRINT_AXIS,
        },
    );
    painter.text(
        Pos2::new(rect.center().x, rect.bottom() + 8.0),
        egui::Align2::CENTER_TOP,
        &row.range_label,
        theme::font_small(),
        theme::metadata_color(mode),
    );
}
