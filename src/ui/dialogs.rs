use egui::{Color32, Context, RichText, Window};

use crate::app::TimelineApp;
use crate::model::ScheduleMode;
use crate::ui::theme;
use crate::ui::Selection;

const DIALOG_WIDTH: f32 = 320.0;

fn accent_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text.to_owned()).color(Color32::WHITE))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(4.0))
}

/// Render the "Add Work Package" dialog.
pub fn show_add_package_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Work Package").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("add_package_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title");
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_package_title)
                            .hint_text("Work package title..."),
                    );
                    ui.end_row();

                    ui.label("Start");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_package_start)
                            .id_salt("add_wp_start"),
                    );
                    ui.end_row();

                    ui.label("End");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_package_end)
                            .id_salt("add_wp_end"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], accent_button("Create")).clicked()
                    && app.create_package_from_dialog()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_package = false;
    }
}

/// Render the "Add Milestone" dialog.
pub fn show_add_milestone_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Milestone").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("add_milestone_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title");
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_milestone_title)
                            .hint_text("Milestone title..."),
                    );
                    ui.end_row();

                    ui.label("Date");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_milestone_date)
                            .id_salt("add_ms_date"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], accent_button("Create")).clicked()
                    && app.create_milestone_from_dialog()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_milestone = false;
    }
}

/// Render the "Add Sub-Package" dialog for the pending parent.
pub fn show_add_sub_package_dialog(app: &mut TimelineApp, ctx: &Context) {
    let Some(parent) = app.add_sub_parent else {
        return;
    };
    let parent_title = app
        .store
        .project()
        .work_package(parent)
        .map(|wp| wp.title.clone())
        .unwrap_or_default();

    let mut should_close = false;
    Window::new(RichText::new("Add Sub-Package").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(format!("In: {parent_title}")).small().weak());
            ui.add_space(4.0);
            egui::Grid::new("add_sub_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title");
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_sub_title)
                            .hint_text("Sub-package title..."),
                    );
                    ui.end_row();

                    ui.label("Start");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_sub_start)
                            .id_salt("add_sub_start"),
                    );
                    ui.end_row();

                    ui.label("End");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_sub_end)
                            .id_salt("add_sub_end"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], accent_button("Create")).clicked()
                    && app.create_sub_package_from_dialog()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.add_sub_parent = None;
    }
}

/// Render the edit dialog for the staged selection.
pub fn show_edit_dialog(app: &mut TimelineApp, ctx: &Context) {
    let Some(target) = app.edit_target else {
        return;
    };
    let title = match target {
        Selection::WorkPackage(_) => "Edit Work Package",
        Selection::SubPackage { .. } => "Edit Sub-Package",
        Selection::Milestone(_) => "Edit Milestone",
    };

    let mut should_close = false;
    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("edit_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title");
                    ui.add_sized([220.0, 24.0], egui::TextEdit::singleline(&mut app.edit_title));
                    ui.end_row();

                    match target {
                        Selection::WorkPackage(_) => {
                            ui.label("Mode");
                            egui::ComboBox::from_id_salt("edit_wp_mode")
                                .selected_text(match app.edit_mode {
                                    ScheduleMode::Auto => "Auto (from sub-packages)",
                                    ScheduleMode::Manual => "Manual",
                                })
                                .show_ui(ui, |ui| {
                                    ui.selectable_value(
                                        &mut app.edit_mode,
                                        ScheduleMode::Auto,
                                        "Auto (from sub-packages)",
                                    );
                                    ui.selectable_value(
                                        &mut app.edit_mode,
                                        ScheduleMode::Manual,
                                        "Manual",
                                    );
                                });
                            ui.end_row();

                            ui.label("Start");
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.edit_start)
                                    .id_salt("edit_wp_start"),
                            );
                            ui.end_row();

                            ui.label("End");
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.edit_end)
                                    .id_salt("edit_wp_end"),
                            );
                            ui.end_row();

                            if app.edit_mode == ScheduleMode::Auto {
                                ui.label("");
                                ui.label(
                                    RichText::new("Displayed dates roll up from sub-packages.")
                                        .small()
                                        .weak(),
                                );
                                ui.end_row();
                            }
                        }
                        Selection::SubPackage { .. } => {
                            ui.label("Start");
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.edit_start)
                                    .id_salt("edit_sub_start"),
                            );
                            ui.end_row();

                            ui.label("End");
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.edit_end)
                                    .id_salt("edit_sub_end"),
                            );
                            ui.end_row();

                            ui.label("Category");
                            ui.add_sized(
                                [220.0, 24.0],
                                egui::TextEdit::singleline(&mut app.edit_category)
                                    .hint_text("Optional"),
                            );
                            ui.end_row();

                            ui.label("Assignees");
                            ui.add_sized(
                                [220.0, 24.0],
                                egui::TextEdit::singleline(&mut app.edit_assignees)
                                    .hint_text("Comma-separated, optional"),
                            );
                            ui.end_row();

                            ui.label("Color");
                            ui.horizontal(|ui| {
                                ui.checkbox(&mut app.edit_use_custom_color, "Custom");
                                if app.edit_use_custom_color {
                                    ui.color_edit_button_srgba(&mut app.edit_color);
                                }
                            });
                            ui.end_row();
                        }
                        Selection::Milestone(_) => {
                            ui.label("Date");
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.edit_date)
                                    .id_salt("edit_ms_date"),
                            );
                            ui.end_row();
                        }
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], accent_button("Save")).clicked()
                    && app.apply_edit_dialog()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.edit_target = None;
    }
}

/// Render the "Project Settings" dialog.
pub fn show_settings_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Project Settings").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH + 40.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.add_sized([240.0, 24.0], egui::TextEdit::singleline(&mut app.settings_name));
                    ui.end_row();

                    ui.label("Description");
                    ui.add_sized(
                        [240.0, 24.0],
                        egui::TextEdit::singleline(&mut app.settings_description)
                            .hint_text("Optional"),
                    );
                    ui.end_row();

                    ui.label("Timeline start");
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut app.settings_has_start, "");
                        if app.settings_has_start {
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.settings_start)
                                    .id_salt("settings_start"),
                            );
                        } else {
                            ui.label(RichText::new("from content").weak());
                        }
                    });
                    ui.end_row();

                    ui.label("Timeline end");
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut app.settings_has_end, "");
                        if app.settings_has_end {
                            ui.add(
                                egui_extras::DatePickerButton::new(&mut app.settings_end)
                                    .id_salt("settings_end"),
                            );
                        } else {
                            ui.label(RichText::new("from content").weak());
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(4.0);
            ui.checkbox(
                &mut app.settings_clamp,
                "Keep sub-packages inside manual work packages",
            );
            ui.label(
                RichText::new("Applies while dragging, for parents with manual dates.")
                    .small()
                    .weak(),
            );

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], accent_button("Save")).clicked()
                    && app.apply_settings_dialog()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_settings = false;
    }
}

/// Render the "Import JSON" dialog: paste or load a file, then import.
pub fn show_import_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Import Project JSON").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([520.0, 380.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new("Paste project JSON below, or load it from a file. Importing replaces the current project.")
                    .small(),
            );
            ui.add_space(4.0);

            egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut app.import_text)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY)
                        .desired_rows(12),
                );
            });

            if let Some(error) = &app.import_error {
                ui.add_space(4.0);
                ui.colored_label(Color32::from_rgb(240, 100, 100), error);
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], accent_button("Import")).clicked()
                    && app.import_from_dialog()
                {
                    should_close = true;
                }
                if ui
                    .add_sized([100.0, 28.0], egui::Button::new("From File..."))
                    .clicked()
                {
                    app.load_import_text_from_file();
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_import = false;
        app.import_error = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Clarity Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A project timeline editor");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
