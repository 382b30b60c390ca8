use std::path::PathBuf;

use chrono::NaiveDate;
use egui::Color32;
use tracing::{info, warn};
use uuid::Uuid;

use crate::interact::DragGesture;
use crate::layout::RenderMode;
use crate::logging;
use crate::model::date;
use crate::model::scale::Resolution;
use crate::model::{Milestone, Project, ScheduleMode, SubPackage, WorkPackage};
use crate::store::{MilestonePatch, ProjectStore, SubPackagePatch, WorkPackagePatch};
use crate::ui;
use crate::ui::Selection;

/// Main application state.
pub struct TimelineApp {
    pub store: ProjectStore,
    pub resolution: Resolution,
    pub render_mode: RenderMode,
    pub gesture: DragGesture,
    pub selected: Option<Selection>,
    pub file_path: Option<PathBuf>,

    // Dialog state
    pub show_add_package: bool,
    pub new_package_title: String,
    pub new_package_start: NaiveDate,
    pub new_package_end: NaiveDate,

    pub show_add_milestone: bool,
    pub new_milestone_title: String,
    pub new_milestone_date: NaiveDate,

    pub add_sub_parent: Option<Uuid>,
    pub new_sub_title: String,
    pub new_sub_start: NaiveDate,
    pub new_sub_end: NaiveDate,

    pub edit_target: Option<Selection>,
    pub edit_title: String,
    pub edit_mode: ScheduleMode,
    pub edit_start: NaiveDate,
    pub edit_end: NaiveDate,
    pub edit_date: NaiveDate,
    pub edit_category: String,
    pub edit_assignees: String,
    pub edit_use_custom_color: bool,
    pub edit_color: Color32,

    pub show_settings: bool,
    pub settings_name: String,
    pub settings_description: String,
    pub settings_has_start: bool,
    pub settings_start: NaiveDate,
    pub settings_has_end: bool,
    pub settings_end: NaiveDate,
    pub settings_clamp: bool,

    pub show_import: bool,
    pub import_text: String,
    pub import_error: Option<String>,

    pub show_about: bool,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline
        // with text.
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();
        Self {
            store: ProjectStore::new(Self::sample_project(today)),
            resolution: Resolution::Auto,
            render_mode: RenderMode::Screen,
            gesture: DragGesture::new(),
            selected: None,
            file_path: None,
            show_add_package: false,
            new_package_title: String::new(),
            new_package_start: today,
            new_package_end: date::add_days(today, 30),
            show_add_milestone: false,
            new_milestone_title: String::new(),
            new_milestone_date: today,
            add_sub_parent: None,
            new_sub_title: String::new(),
            new_sub_start: today,
            new_sub_end: date::add_days(today, 7),
            edit_target: None,
            edit_title: String::new(),
            edit_mode: ScheduleMode::Auto,
            edit_start: today,
            edit_end: today,
            edit_date: today,
            edit_category: String::new(),
            edit_assignees: String::new(),
            edit_use_custom_color: false,
            edit_color: ui::theme::ACCENT,
            show_settings: false,
            settings_name: String::new(),
            settings_description: String::new(),
            settings_has_start: false,
            settings_start: today,
            settings_has_end: false,
            settings_end: date::add_days(today, 90),
            settings_clamp: false,
            show_import: false,
            import_text: String::new(),
            import_error: None,
            show_about: false,
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample project for demonstration.
    fn sample_project(today: NaiveDate) -> Project {
        let day = |n: i64| date::add_days(today, n);
        let mut project = Project::new("Sample Project");
        project.description =
            Some("Drag bars to move them, pull their edges to resize.".to_string());

        let mut design = WorkPackage::new("Design", day(-20), day(5));
        let mut survey = SubPackage::new("Site survey", day(-20), day(-12));
        survey.category = Some("Field".to_string());
        survey.assignees = Some(vec!["MH".to_string()]);
        design.sub_packages.push(survey);
        design
            .sub_packages
            .push(SubPackage::new("Concept drawings", day(-14), day(-2)));
        design
            .sub_packages
            .push(SubPackage::new("Detail drawings", day(-4), day(5)));
        project.work_packages.push(design);

        let mut build = WorkPackage::new("Construction", day(2), day(45));
        build.mode = ScheduleMode::Manual;
        let mut groundwork = SubPackage::new("Groundwork", day(3), day(14));
        groundwork.category = Some("Site".to_string());
        groundwork.assignees = Some(vec!["AB".to_string(), "CD".to_string()]);
        build.sub_packages.push(groundwork);
        let mut shell = SubPackage::new("Shell", day(12), day(32));
        shell.color = Some(Color32::from_rgb(0x2F, 0x6B, 0x4F));
        build.sub_packages.push(shell);
        build
            .sub_packages
            .push(SubPackage::new("Fit-out", day(28), day(44)));
        project.work_packages.push(build);

        project
            .work_packages
            .push(WorkPackage::new("Commissioning", day(45), day(58)));

        project
            .milestones
            .push(Milestone::new("Design freeze", day(5)));
        project.milestones.push(Milestone::new("Handover", day(60)));
        project
    }

    // --- File operations ---

    pub fn new_project(&mut self) {
        self.store.replace(Project::default());
        self.file_path = None;
        self.selected = None;
        self.gesture.cancel();
        self.status_message = "New project created".to_string();
    }

    pub fn open_project(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["json"])
            .pick_file()
        {
            match crate::io::load_project(&path) {
                Ok(project) => {
                    self.store.replace(project);
                    self.file_path = Some(path);
                    self.selected = None;
                    self.gesture.cancel();
                    self.status_message = "Project loaded".to_string();
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "load failed");
                    self.status_message = format!("Error loading: {e}");
                }
            }
        }
    }

    pub fn save_project(&mut self) {
        if let Some(path) = self.file_path.clone() {
            match crate::io::save_project(self.store.project(), &path) {
                Ok(()) => self.status_message = "Project saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {e}"),
            }
        } else {
            self.save_project_as();
        }
    }

    pub fn save_project_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["json"])
            .set_file_name(format!("{}.json", self.store.project().name))
            .save_file()
        {
            match crate::io::save_project(self.store.project(), &path) {
                Ok(()) => {
                    self.file_path = Some(path);
                    self.status_message = "Project saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {e}"),
            }
        }
    }

    pub fn copy_json(&mut self, ctx: &egui::Context) {
        match crate::io::project_to_json(self.store.project()) {
            Ok(json) => {
                ctx.copy_text(json);
                self.status_message = "Project JSON copied to clipboard".to_string();
            }
            Err(e) => self.status_message = format!("Error serializing: {e}"),
        }
    }

    pub fn open_log_folder(&mut self) {
        match logging::log_dir() {
            Some(dir) => {
                if let Err(e) = open::that(&dir) {
                    self.status_message = format!("Could not open log folder: {e}");
                }
            }
            None => self.status_message = "No log folder on this system".to_string(),
        }
    }

    // --- Import dialog ---

    pub fn open_import_dialog(&mut self) {
        self.import_text.clear();
        self.import_error = None;
        self.show_import = true;
    }

    pub fn load_import_text_from_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["json"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    self.import_text = text;
                    self.import_error = None;
                }
                Err(e) => self.import_error = Some(format!("Could not read file: {e}")),
            }
        }
    }

    /// Replace the project with the pasted JSON. A failed import leaves the
    /// current project untouched and keeps the dialog open with the error.
    pub fn import_from_dialog(&mut self) -> bool {
        match crate::io::project_from_json(&self.import_text) {
            Ok(project) => {
                info!(name = %project.name, "project imported");
                self.store.replace(project);
                self.file_path = None;
                self.selected = None;
                self.gesture.cancel();
                self.import_error = None;
                self.status_message = "Project imported".to_string();
                true
            }
            Err(e) => {
                warn!(error = %e, "import rejected");
                self.import_error = Some(e.to_string());
                false
            }
        }
    }

    // --- Add dialogs ---

    pub fn open_add_package_dialog(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_package_title.clear();
        self.new_package_start = today;
        self.new_package_end = date::add_days(today, 30);
        self.show_add_package = true;
    }

    pub fn create_package_from_dialog(&mut self) -> bool {
        let title = dialog_title(&self.new_package_title, "New Work Package");
        match self
            .store
            .add_work_package(title, self.new_package_start, self.new_package_end)
        {
            Ok(id) => {
                self.selected = Some(Selection::WorkPackage(id));
                self.status_message = "Work package added".to_string();
                true
            }
            Err(e) => {
                self.status_message = e.to_string();
                false
            }
        }
    }

    pub fn open_add_milestone_dialog(&mut self) {
        self.new_milestone_title.clear();
        self.new_milestone_date = chrono::Local::now().date_naive();
        self.show_add_milestone = true;
    }

    pub fn create_milestone_from_dialog(&mut self) -> bool {
        let title = dialog_title(&self.new_milestone_title, "New Milestone");
        let id = self.store.add_milestone(title, self.new_milestone_date);
        self.selected = Some(Selection::Milestone(id));
        self.status_message = "Milestone added".to_string();
        true
    }

    /// Stage the add-sub-package dialog under `parent`, defaulting the dates
    /// into the parent's current range.
    pub fn open_add_sub_dialog(&mut self, parent: Uuid) {
        let Some(wp) = self.store.project().work_package(parent) else {
            return;
        };
        let (start, end) = wp.effective_range();
        self.new_sub_title.clear();
        self.new_sub_start = start;
        self.new_sub_end = date::clamp_date(date::add_days(start, 7), start, end);
        self.add_sub_parent = Some(parent);
    }

    pub fn create_sub_package_from_dialog(&mut self) -> bool {
        let Some(parent) = self.add_sub_parent else {
            return false;
        };
        let title = dialog_title(&self.new_sub_title, "New Sub-Package");
        match self
            .store
            .add_sub_package(parent, title, self.new_sub_start, self.new_sub_end)
        {
            Ok(id) => {
                self.selected = Some(Selection::SubPackage {
                    work_package: parent,
                    sub_package: id,
                });
                self.status_message = "Sub-package added".to_string();
                true
            }
            Err(e) => {
                self.status_message = e.to_string();
                false
            }
        }
    }

    // --- Edit dialog ---

    /// Stage the edit dialog from the current stored fields of `target`.
    pub fn open_edit_dialog(&mut self, target: Selection) {
        let project = self.store.project();
        match target {
            Selection::WorkPackage(id) => {
                let Some(wp) = project.work_package(id) else {
                    return;
                };
                self.edit_title = wp.title.clone();
                self.edit_mode = wp.mode;
                self.edit_start = wp.start;
                self.edit_end = wp.end;
            }
            Selection::SubPackage {
                work_package,
                sub_package,
            } => {
                let Some(sp) = project
                    .work_package(work_package)
                    .and_then(|wp| wp.sub_package(sub_package))
                else {
                    return;
                };
                self.edit_title = sp.title.clone();
                self.edit_start = sp.start;
                self.edit_end = sp.end;
                self.edit_category = sp.category.clone().unwrap_or_default();
                self.edit_assignees = sp
                    .assignees
                    .as_deref()
                    .map(|names| names.join(", "))
                    .unwrap_or_default();
                self.edit_use_custom_color = sp.color.is_some();
                self.edit_color = sp.color.unwrap_or(ui::theme::ACCENT);
            }
            Selection::Milestone(id) => {
                let Some(ms) = project.milestone(id) else {
                    return;
                };
                self.edit_title = ms.title.clone();
                self.edit_date = ms.date;
            }
        }
        self.edit_target = Some(target);
    }

    pub fn apply_edit_dialog(&mut self) -> bool {
        let Some(target) = self.edit_target else {
            return false;
        };
        let title = self.edit_title.trim().to_string();
        let result = match target {
            Selection::WorkPackage(id) => self.store.update_work_package(
                id,
                WorkPackagePatch {
                    title: Some(title),
                    start: Some(self.edit_start),
                    end: Some(self.edit_end),
                    mode: Some(self.edit_mode),
                    ..WorkPackagePatch::default()
                },
            ),
            Selection::SubPackage {
                work_package,
                sub_package,
            } => {
                let assignees: Vec<String> = self
                    .edit_assignees
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                self.store.update_sub_package(
                    work_package,
                    sub_package,
                    SubPackagePatch {
                        title: Some(title),
                        start: Some(self.edit_start),
                        end: Some(self.edit_end),
                        category: Some(Some(self.edit_category.trim().to_string())),
                        color: Some(self.edit_use_custom_color.then_some(self.edit_color)),
                        assignees: Some(Some(assignees)),
                    },
                )
            }
            Selection::Milestone(id) => self.store.update_milestone(
                id,
                MilestonePatch {
                    title: Some(title),
                    date: Some(self.edit_date),
                },
            ),
        };
        match result {
            Ok(()) => {
                self.status_message = "Changes saved".to_string();
                true
            }
            Err(e) => {
                warn!(error = %e, "edit rejected");
                self.status_message = e.to_string();
                false
            }
        }
    }

    // --- Project settings ---

    pub fn open_settings_dialog(&mut self) {
        let project = self.store.project();
        let today = chrono::Local::now().date_naive();
        self.settings_name = project.name.clone();
        self.settings_description = project.description.clone().unwrap_or_default();
        self.settings_has_start = project.start.is_some();
        self.settings_start = project.start.unwrap_or(today);
        self.settings_has_end = project.end.is_some();
        self.settings_end = project.end.unwrap_or(date::add_days(today, 90));
        self.settings_clamp = project.settings.clamp_to_manual_parent;
        self.show_settings = true;
    }

    pub fn apply_settings_dialog(&mut self) -> bool {
        let name = self.settings_name.trim().to_string();
        if name.is_empty() {
            self.status_message = "Project name cannot be empty".to_string();
            return false;
        }
        let start = self.settings_has_start.then_some(self.settings_start);
        let end = self.settings_has_end.then_some(self.settings_end);
        if let Err(e) = self.store.set_bounds(start, end) {
            self.status_message = e.to_string();
            return false;
        }
        self.store.rename(name);
        self.store
            .set_description(Some(self.settings_description.trim().to_string()));
        self.store.set_clamping(self.settings_clamp);
        self.status_message = "Settings saved".to_string();
        true
    }

    // --- View ---

    pub fn set_print_preview(&mut self, enabled: bool) {
        self.render_mode = if enabled {
            RenderMode::Export
        } else {
            RenderMode::Screen
        };
        // Export mode is non-interactive; an in-flight gesture is dropped.
        self.gesture.cancel();
        self.selected = None;
    }

    // --- Deletion ---

    /// Delete `target` after a confirmation prompt.
    pub fn delete_with_confirm(&mut self, target: Selection) {
        let project = self.store.project();
        let description = match target {
            Selection::WorkPackage(id) => project.work_package(id).map(|wp| {
                if wp.sub_packages.is_empty() {
                    format!("Delete work package '{}'?", wp.title)
                } else {
                    format!(
                        "Delete work package '{}' and its {} sub-packages?",
                        wp.title,
                        wp.sub_packages.len()
                    )
                }
            }),
            Selection::SubPackage {
                work_package,
                sub_package,
            } => project
                .work_package(work_package)
                .and_then(|wp| wp.sub_package(sub_package))
                .map(|sp| format!("Delete sub-package '{}'?", sp.title)),
            Selection::Milestone(id) => project
                .milestone(id)
                .map(|ms| format!("Delete milestone '{}'?", ms.title)),
        };
        let Some(description) = description else {
            return;
        };

        let confirm = rfd::MessageDialog::new()
            .set_title("Delete")
            .set_description(description)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        if confirm != rfd::MessageDialogResult::Yes {
            return;
        }

        let result = match target {
            Selection::WorkPackage(id) => self.store.delete_work_package(id),
            Selection::SubPackage {
                work_package,
                sub_package,
            } => self.store.delete_sub_package(work_package, sub_package),
            Selection::Milestone(id) => self.store.delete_milestone(id),
        };
        match result {
            Ok(()) => {
                if self.selected == Some(target) {
                    self.selected = None;
                }
                self.status_message = "Deleted".to_string();
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn any_dialog_open(&self) -> bool {
        self.show_add_package
            || self.show_add_milestone
            || self.add_sub_parent.is_some()
            || self.edit_target.is_some()
            || self.show_settings
            || self.show_import
            || self.show_about
    }
}

fn dialog_title(input: &str, fallback: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts, handled outside panel closures.
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_project();
        }
        let text_focused = ctx.memory(|m| m.focused().is_some());
        let delete_pressed = ctx
            .input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
        if delete_pressed && !text_focused && !self.any_dialog_open() {
            if let Some(target) = self.selected {
                self.delete_with_confirm(target);
            }
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let project = self.store.project();
                        ui.label(
                            egui::RichText::new(format!(
                                "Packages: {} · Milestones: {} · Scale: {}",
                                project.work_packages.len(),
                                project.milestones.len(),
                                self.resolution.label()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_SECONDARY),
                        );
                    });
                });
            });

        // Central panel: the timeline chart
        let chart_frame = egui::Frame::default().inner_margin(egui::Margin::ZERO);
        let mut actions = ui::timeline_view::ChartActions::default();
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            actions = ui::timeline_view::show_timeline(
                self.store.project(),
                self.resolution,
                self.render_mode,
                &mut self.gesture,
                &mut self.selected,
                ui,
            );
        });

        // Route chart actions into the store.
        if let Some(commit) = actions.commit {
            match self.store.apply(commit) {
                Ok(()) => {
                    self.status_message = format!(
                        "Updated ({} – {})",
                        date::iso_string(commit.dates.start),
                        date::iso_string(commit.dates.end)
                    );
                }
                Err(e) => {
                    // The target vanished between release and apply.
                    warn!(error = %e, "drag commit dropped");
                    self.status_message = e.to_string();
                }
            }
        }
        if let Some(target) = actions.edit {
            self.open_edit_dialog(target);
        }
        if let Some(target) = actions.delete {
            self.delete_with_confirm(target);
        }
        if let Some(parent) = actions.add_sub_package {
            self.open_add_sub_dialog(parent);
        }
        if let Some(id) = actions.toggle_collapse {
            if let Err(e) = self.store.toggle_collapsed(id) {
                self.status_message = e.to_string();
            }
        }

        // Dialogs
        if self.show_add_package {
            ui::dialogs::show_add_package_dialog(self, ctx);
        }
        if self.show_add_milestone {
            ui::dialogs::show_add_milestone_dialog(self, ctx);
        }
        if self.add_sub_parent.is_some() {
            ui::dialogs::show_add_sub_package_dialog(self, ctx);
        }
        if self.edit_target.is_some() {
            ui::dialogs::show_edit_dialog(self, ctx);
        }
        if self.show_settings {
            ui::dialogs::show_settings_dialog(self, ctx);
        }
        if self.show_import {
            ui::dialogs::show_import_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
