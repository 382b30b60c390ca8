use egui::{menu, RichText, Ui};

use crate::app::TimelineApp;
use crate::layout::RenderMode;
use crate::model::scale::Resolution;
use crate::ui::theme;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_header()), |ui| {
            if ui.button("  New Project").clicked() {
                app.new_project();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_project();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_project_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import JSON...").clicked() {
                app.open_import_dialog();
                ui.close_menu();
            }
            if ui.button("  Copy JSON to Clipboard").clicked() {
                app.copy_json(ui.ctx());
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Timeline  ").font(theme::font_header()), |ui| {
            ui.label(RichText::new("Resolution").small().weak());
            for resolution in Resolution::ALL {
                if ui
                    .radio_value(&mut app.resolution, resolution, resolution.label())
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            let mut preview = app.render_mode == RenderMode::Export;
            if ui.checkbox(&mut preview, "Print preview").clicked() {
                app.set_print_preview(preview);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Project Settings...").clicked() {
                app.open_settings_dialog();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_header()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
            if ui.button("Open Log Folder").clicked() {
                app.open_log_folder();
                ui.close_menu();
            }
        });

        ui.separator();
        if ui
            .button(format!("{} Work Package", egui_phosphor::regular::PLUS))
            .clicked()
        {
            app.open_add_package_dialog();
        }
        if ui
            .button(format!("{} Milestone", egui_phosphor::regular::FLAG))
            .clicked()
        {
            app.open_add_milestone_dialog();
        }

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.store.project().name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
