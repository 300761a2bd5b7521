// src/ui/upload.rs
use eframe::egui;

use super::widgets::trigger_button;
use crate::file::{format_file_size, MAX_UPLOAD_BYTES};
use crate::input::Command;
use crate::workflow::UploadController;

pub fn show_upload_view(ui: &mut egui::Ui, upload: &UploadController, commands: &mut Vec<Command>) {
    ui.heading("Upload Sales Data");
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.set_min_height(120.0);
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.label(egui::RichText::new("📁").size(32.0));
            ui.label("Drop a CSV or Excel file here, or");
            if ui.button("Choose File...").clicked() {
                commands.push(Command::PickFile);
            }
            ui.weak(format!(
                "Accepted: .csv, .xlsx, .xls up to {}",
                format_file_size(MAX_UPLOAD_BYTES)
            ));
        });
    });

    ui.add_space(16.0);

    match upload.staged() {
        Some(staged) => {
            ui.horizontal(|ui| {
                ui.label("Selected:");
                ui.strong(&staged.name);
                ui.weak(format_file_size(staged.size_bytes));
            });
            ui.add_space(8.0);
            if trigger_button(ui, "⬆ Upload & Analyze", upload.submit_enabled()) {
                commands.push(Command::SubmitUpload);
            }
        }
        None => {
            ui.weak("No file selected.");
        }
    }
}

/// Paths of files dropped onto the window this frame.
pub fn dropped_paths(ctx: &egui::Context) -> Vec<std::path::PathBuf> {
    ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter_map(|file| file.path.clone())
            .collect()
    })
}
