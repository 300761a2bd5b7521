// src/ui/mod.rs
use eframe::egui;

pub mod advanced;
pub mod charts;
pub mod chat;
pub mod growth;
pub mod notifications;
pub mod report;
pub mod upload;
pub mod widgets;

/// Styling is fixed for the lifetime of the app and applied once at startup.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.hyperlink_color = egui::Color32::from_rgb(0, 123, 255);
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    ctx.set_style(style);
}
