// src/app.rs
use std::time::{Duration, Instant};

use eframe::egui;

use crate::input::Command;
use crate::state::{AppState, Modal, Screen};
use crate::ui;

const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct AnalyzerApp {
    state: AppState,
}

impl AnalyzerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        ui::apply_theme(&cc.egui_ctx);
        Self { state }
    }

    fn show_menu(&self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        egui::menu::bar(ui, |ui| {
            ui.strong("📈 Smart Analyzer");
            ui.separator();

            for screen in Screen::ALL {
                if ui
                    .selectable_label(self.state.current_screen == screen, screen.label())
                    .clicked()
                {
                    commands.push(Command::SwitchScreen(screen));
                }
            }
        });
    }

    fn show_screen(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        let state = &mut self.state;
        match state.current_screen {
            Screen::Upload => ui::upload::show_upload_view(ui, &state.upload, commands),
            Screen::Report => {
                ui::report::show_report_view(ui, &state.report, &mut state.drafts.email, commands)
            }
            Screen::Growth => ui::growth::show_growth_view(ui, &state.growth, commands),
            Screen::Advanced => ui::advanced::show_advanced_view(ui, &state.advanced, commands),
            Screen::Chat => {
                ui::chat::show_chat_view(ui, &state.chat, &mut state.drafts.question, commands)
            }
        }
    }

    fn show_modal(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        match &self.state.modal {
            Modal::None => {}
            Modal::Investigate { product } => ui::growth::show_investigation(ctx, product, commands),
            Modal::SavedRecommendations(snapshot) => {
                ui::growth::show_saved_recommendations(ctx, snapshot, commands)
            }
        }
    }

    fn schedule_repaint(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(next_expiry) = self.state.notifications.expire(now) {
            ctx.request_repaint_after(next_expiry.saturating_duration_since(now));
        }
        // Results arrive off the UI thread; keep polling while anything is pending
        if self.state.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.state.poll();
        self.schedule_repaint(ctx);

        let mut commands: Vec<Command> = ui::upload::dropped_paths(ctx)
            .into_iter()
            .map(|path| {
                tracing::debug!("File dropped: {}", path.display());
                Command::SelectFile(path)
            })
            .collect();
        if !commands.is_empty() {
            commands.insert(0, Command::SwitchScreen(Screen::Upload));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui, &mut commands);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_screen(ui, &mut commands);
        });

        ui::notifications::show_notifications(ctx, &self.state.notifications, &mut commands);
        self.show_modal(ctx, &mut commands);

        for command in commands {
            tracing::debug!("Command: {:?}", command);
            if let Err(e) = command.execute(&mut self.state, frame.storage_mut()) {
                tracing::warn!("Command failed: {:#}", e);
                self.state.notifications.error(e.to_string());
            }
        }
    }
}
