// src/ui/notifications.rs
use eframe::egui;

use crate::input::Command;
use crate::state::notifications::{NotificationKind, Notifications};

fn kind_colors(kind: NotificationKind) -> (egui::Color32, &'static str) {
    match kind {
        NotificationKind::Error => (egui::Color32::from_rgb(220, 53, 69), "⚠"),
        NotificationKind::Success => (egui::Color32::from_rgb(40, 167, 69), "✔"),
        NotificationKind::Info => (egui::Color32::from_rgb(23, 162, 184), "ℹ"),
    }
}

/// Banner stack in the top-right corner, newest on top.
pub fn show_notifications(ctx: &egui::Context, notifications: &Notifications, commands: &mut Vec<Command>) {
    if notifications.is_empty() {
        return;
    }

    egui::Area::new("notifications")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 40.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for notification in notifications.iter() {
                let (color, icon) = kind_colors(notification.kind);
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(color, icon);
                            ui.label(&notification.message);
                            if ui.small_button("✖").clicked() {
                                commands.push(Command::DismissNotification(notification.id));
                            }
                        });
                    });
                ui.add_space(4.0);
            }
        });
}
