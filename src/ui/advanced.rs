// src/ui/advanced.rs
use eframe::egui;

use super::charts::chart;
use super::widgets::{growth_color, score_badge, sparkline, trigger_button};
use crate::api::*;
use crate::input::Command;
use crate::workflow::advanced::{AdvancedAnalyticsController, DataSource};

const WEEK: usize = 7;

/// Trailing week of a daily series.
pub fn week_series(series: &[f64]) -> &[f64] {
    &series[series.len().saturating_sub(WEEK)..]
}

pub fn show_advanced_view(ui: &mut egui::Ui, advanced: &AdvancedAnalyticsController, commands: &mut Vec<Command>) {
    ui.heading("Advanced Analytics");
    ui.add_space(8.0);

    if trigger_button(ui, "🧠 Run Advanced Analytics", advanced.trigger_enabled()) {
        commands.push(Command::GenerateAdvanced);
    }

    let Some(analytics) = advanced.analytics() else {
        return;
    };

    if advanced.source() == Some(DataSource::Demo) {
        ui.add_space(4.0);
        ui.colored_label(
            egui::Color32::from_rgb(255, 193, 7),
            "⚠ Showing demo data. The analytics service could not be reached.",
        );
    }

    ui.add_space(16.0);
    egui::ScrollArea::vertical()
        .id_source("advanced_scroll")
        .show(ui, |ui| {
            ui.columns(2, |columns| {
                if let Some(health) = &analytics.data_health {
                    show_data_health(&mut columns[0], health);
                }
                if let Some(metrics) = &analytics.growth_metrics {
                    show_growth_metrics(&mut columns[1], metrics);
                }
            });

            if let Some(segmentation) = &analytics.customer_segmentation {
                show_segmentation(ui, segmentation);
            }
            if let Some(forecast) = &analytics.forecast {
                show_forecast(ui, forecast);
            }

            if advanced.delivery_available() {
                ui.add_space(8.0);
                show_delivery(ui, advanced, commands);
            }
        });
}

fn show_data_health(ui: &mut egui::Ui, health: &DataHealth) {
    ui.group(|ui| {
        ui.strong("Data Health");
        score_badge(ui, health.score);
        if let Some(comment) = &health.comment {
            ui.label(comment);
        }
        for issue in &health.issues {
            ui.label(format!("⚠ {}", issue));
        }
        if let Some(stats) = &health.stats {
            egui::Grid::new("health_stats").show(ui, |ui| {
                ui.label("Rows");
                ui.label(stats.total_rows.to_string());
                ui.end_row();
                ui.label("Columns");
                ui.label(stats.total_columns.to_string());
                ui.end_row();
                ui.label("Missing");
                ui.label(format!("{:.1}%", stats.missing_pct));
                ui.end_row();
                ui.label("Duplicates");
                ui.label(format!("{:.1}%", stats.duplicate_pct));
                ui.end_row();
                ui.label("Outliers");
                ui.label(format!("{:.1}%", stats.outlier_pct));
                ui.end_row();
            });
        }
    });
}

fn show_growth_metrics(ui: &mut egui::Ui, metrics: &GrowthMetrics) {
    ui.group(|ui| {
        ui.strong("Growth Metrics");
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Week over week");
                ui.colored_label(
                    growth_color(metrics.week_over_week),
                    format!("{:+.1}%", metrics.week_over_week),
                );
                sparkline(ui, week_series(&metrics.sparkline_series), growth_color(metrics.week_over_week));
            });
            ui.vertical(|ui| {
                ui.label("Month over month");
                ui.colored_label(
                    growth_color(metrics.month_over_month),
                    format!("{:+.1}%", metrics.month_over_month),
                );
                sparkline(ui, &metrics.sparkline_series, growth_color(metrics.month_over_month));
            });
        });
        if let Some(best) = metrics.best_streak_value {
            let date = metrics.best_streak_date.as_deref().unwrap_or("n/a");
            ui.label(format!("Best day: ${:.2} on {}", best, date));
        }
        if let Some(current) = metrics.current_revenue {
            ui.label(format!("Latest revenue: ${:.2}", current));
        }
    });
}

fn show_segmentation(ui: &mut egui::Ui, segmentation: &CustomerSegmentation) {
    ui.group(|ui| {
        ui.strong("Customer Segments");
        egui::Grid::new("segments_grid").striped(true).show(ui, |ui| {
            ui.strong("Segment");
            ui.strong("Customers");
            ui.strong("Avg revenue");
            ui.strong("Avg orders");
            ui.end_row();
            for segment in &segmentation.segments {
                ui.label(&segment.name);
                ui.label(segment.count.to_string());
                ui.label(format!("${:.2}", segment.avg_revenue));
                ui.label(format!("{:.1}", segment.avg_frequency));
                ui.end_row();
            }
        });

        if !segmentation.sample_customers.is_empty() {
            ui.add_space(8.0);
            ui.label("Sample customers");
            egui::Grid::new("sample_customers_grid").striped(true).show(ui, |ui| {
                for customer in &segmentation.sample_customers {
                    ui.label(&customer.customer);
                    ui.label(format!("${:.2}", customer.total_revenue));
                    ui.label(format!("{} orders", customer.frequency));
                    ui.weak(customer.segment_name.as_deref().unwrap_or_default());
                    ui.end_row();
                }
            });
        }
        chart(ui, "segmentation_chart", segmentation.chart.as_ref());
    });
}

fn show_forecast(ui: &mut egui::Ui, forecast: &Forecast) {
    ui.group(|ui| {
        ui.strong("Forecast");
        ui.label(&forecast.summary);
        if let Some(rate) = forecast.growth_rate {
            ui.colored_label(growth_color(rate), format!("Expected growth: {:+.1}%", rate));
        }
        chart(ui, "forecast_chart", forecast.chart.as_ref());
    });
}

fn show_delivery(ui: &mut egui::Ui, advanced: &AdvancedAnalyticsController, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        ui.label("Share this report:");
        for (icon, channel) in [("✉", DeliveryChannel::Email), ("💬", DeliveryChannel::ChatChannel)] {
            let label = format!("{} {}", icon, channel.label());
            if ui
                .add_enabled(advanced.delivery_enabled(), egui::Button::new(label))
                .clicked()
            {
                commands.push(Command::SendReport(channel));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::state::notifications::Notifications;
    use crate::ui::tests::render;
    use crate::workflow::testing::{backend, settle};

    #[test]
    fn test_week_series_takes_trailing_points() {
        let series: Vec<f64> = (1..=14).map(f64::from).collect();
        assert_eq!(week_series(&series), &[8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(week_series(&[1.0, 2.0]), &[1.0, 2.0]);
        assert!(week_series(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_demo_fallback_renders_with_delivery() {
        let (backend, _) = backend(MockApi::default());
        let mut advanced = AdvancedAnalyticsController::default();
        let mut notes = Notifications::default();
        advanced.generate(&backend);
        settle(|| {
            advanced.poll(&mut notes);
            !advanced.is_busy()
        })
        .await;

        assert_eq!(advanced.analytics().unwrap().data_health.as_ref().unwrap().score, 87.0);
        assert!(advanced.delivery_available());

        let mut commands = Vec::new();
        render(|ui| show_advanced_view(ui, &advanced, &mut commands));
        assert!(commands.is_empty());
    }
}
