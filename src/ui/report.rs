// src/ui/report.rs
use eframe::egui;

use super::widgets::{metric_card, trigger_button};
use crate::api::Report;
use crate::input::Command;
use crate::workflow::ReportController;

pub fn show_report_view(
    ui: &mut egui::Ui,
    report: &ReportController,
    email_draft: &mut String,
    commands: &mut Vec<Command>,
) {
    ui.heading("Sales Report");
    ui.add_space(8.0);

    if trigger_button(ui, "📊 Generate Report", report.trigger_enabled()) {
        commands.push(Command::GenerateReport);
    }

    let Some(data) = report.report() else {
        ui.add_space(8.0);
        ui.label("Upload a dataset, then generate a report to see the summary here.");
        return;
    };

    ui.add_space(16.0);
    show_report(ui, data);

    ui.add_space(16.0);
    ui.separator();
    show_actions(ui, report, email_draft, commands);
}

fn show_report(ui: &mut egui::Ui, data: &Report) {
    ui.heading(&data.report.title);
    if !data.report.summary.is_empty() {
        ui.label(&data.report.summary);
    }
    ui.add_space(8.0);

    ui.horizontal_wrapped(|ui| {
        metric_card(ui, "Total Revenue", data.report.total_revenue.as_str());
        metric_card(ui, "Top Product", data.report.top_product.as_str());
        metric_card(ui, "Data Quality", data.report.data_quality.as_str());
        metric_card(ui, "Issues Found", data.cleaning.issues_found().to_string());
    });

    ui.add_space(8.0);
    ui.columns(2, |columns| {
        bullet_list(&mut columns[0], "💡 Key Insights", &data.insights);
        bullet_list(&mut columns[1], "🎯 Recommendations", &data.personalized);
    });
}

fn bullet_list(ui: &mut egui::Ui, heading: &str, items: &[String]) {
    ui.group(|ui| {
        ui.strong(heading);
        if items.is_empty() {
            ui.weak("Nothing to show.");
        }
        for item in items {
            ui.label(format!("• {}", item));
        }
    });
}

fn show_actions(
    ui: &mut egui::Ui,
    report: &ReportController,
    email_draft: &mut String,
    commands: &mut Vec<Command>,
) {
    ui.horizontal(|ui| {
        if ui.button("📄 Export PDF").clicked() {
            commands.push(Command::ExportPdf);
        }

        ui.separator();

        let input = ui.add(
            egui::TextEdit::singleline(email_draft)
                .hint_text("you@example.com")
                .desired_width(220.0),
        );
        let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(report.email_enabled(), egui::Button::new("✉ Email Report"))
            .clicked();
        if report.email_enabled() && (clicked || submitted) {
            commands.push(Command::EmailReport);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{sample_report, MockApi};
    use crate::ui::tests::render;
    use crate::state::notifications::Notifications;
    use crate::workflow::testing::{backend, settle};

    #[test]
    fn test_empty_view_renders() {
        let report = ReportController::default();
        let mut draft = String::new();
        let mut commands = Vec::new();
        render(|ui| show_report_view(ui, &report, &mut draft, &mut commands));
        assert!(commands.is_empty());
    }

    #[tokio::test]
    async fn test_report_view_renders_with_data() {
        let (backend, _) = backend(MockApi {
            report: Some(Ok(sample_report())),
            ..Default::default()
        });
        let mut report = ReportController::default();
        let mut notes = Notifications::default();
        report.generate(&backend);
        settle(|| {
            report.poll(&mut notes);
            !report.is_busy()
        })
        .await;

        let mut draft = "ana@shop.io".to_string();
        let mut commands = Vec::new();
        render(|ui| show_report_view(ui, &report, &mut draft, &mut commands));
        assert!(commands.is_empty());
        assert_eq!(draft, "ana@shop.io");
    }
}
