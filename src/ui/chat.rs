// src/ui/chat.rs
use eframe::egui;

use crate::input::Command;
use crate::workflow::chat::{ChatAuthor, ChatController, ChatEntry, ChatMessage, ExchangeState};

pub fn show_chat_view(
    ui: &mut egui::Ui,
    chat: &ChatController,
    question_draft: &mut String,
    commands: &mut Vec<Command>,
) {
    ui.heading("Ask Your Data");
    ui.add_space(8.0);

    let log_height = (ui.available_height() - 90.0).max(120.0);
    egui::ScrollArea::vertical()
        .id_source("chat_log")
        .max_height(log_height)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if chat.log().is_empty() {
                ui.weak("Ask a question about your sales data to get started.");
            }
            for entry in chat.log() {
                match entry {
                    ChatEntry::Message(message) => show_message(ui, message),
                    ChatEntry::Typing { .. } => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.weak("Analyzing...");
                        });
                    }
                }
            }
        });

    ui.separator();
    ui.horizontal_wrapped(|ui| {
        for button in chat.suggestion_buttons() {
            if ui
                .button(&button.label)
                .on_hover_text(&button.question)
                .clicked()
            {
                commands.push(Command::AskSuggestion(button.question));
            }
        }
    });

    ui.horizontal(|ui| {
        let input = ui.add(
            egui::TextEdit::singleline(question_draft)
                .hint_text("e.g. Which product grew fastest last month?")
                .desired_width(ui.available_width() - 80.0),
        );
        let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let idle = chat.state() == ExchangeState::Idle;
        let clicked = ui.add_enabled(idle, egui::Button::new("Send")).clicked();
        if clicked || submitted {
            commands.push(Command::SubmitQuestion);
        }
    });
}

fn show_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let (who, color) = match message.author {
        ChatAuthor::User => ("You", egui::Color32::from_rgb(0, 123, 255)),
        ChatAuthor::Assistant => ("Assistant", egui::Color32::from_rgb(40, 167, 69)),
    };
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.colored_label(color, egui::RichText::new(who).strong());
            ui.weak(message.time_label());
        });
        ui.label(&message.text);
    });
}
