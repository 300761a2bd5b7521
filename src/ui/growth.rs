// src/ui/growth.rs
use eframe::egui;

use super::charts::chart;
use super::widgets::{growth_color, score_badge, trigger_button};
use crate::api::*;
use crate::file::RecommendationSnapshot;
use crate::input::Command;
use crate::workflow::GrowthInsightsController;

pub const NO_MISSED_OPPORTUNITIES: &str = "No missed opportunities detected";

pub fn rank_badge(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "🏅",
    }
}

/// Rows of the missed-opportunities list, or the placeholder row when there
/// is nothing to list.
pub fn missed_opportunity_lines(missed: &MissedOpportunities) -> Vec<String> {
    if missed.opportunities.is_empty() {
        return vec![NO_MISSED_OPPORTUNITIES.to_string()];
    }

    missed
        .opportunities
        .iter()
        .map(|o| {
            let mut line = o.product.clone();
            if let Some(sales) = o.missed_sales {
                line.push_str(&format!(": {} missed sales", sales));
            }
            if let Some(revenue) = o.potential_revenue {
                line.push_str(&format!(" (${:.2} potential)", revenue));
            }
            line
        })
        .collect()
}

/// External pages for researching a product, with the product URL-encoded.
pub fn research_links(product: &str) -> Vec<(&'static str, String)> {
    let query: String = url::form_urlencoded::byte_serialize(product.as_bytes()).collect();
    vec![
        (
            "📈 Google Trends",
            format!("https://trends.google.com/trends/explore?q={}", query),
        ),
        ("🛒 Amazon", format!("https://www.amazon.com/s?k={}", query)),
        (
            "🔍 Market Analysis",
            format!("https://www.google.com/search?q={}+market+analysis", query),
        ),
    ]
}

/// Plain-text rendition of the recommendation cards, as kept in a snapshot.
pub fn recommendations_markup(recommendations: &[Recommendation]) -> String {
    recommendations
        .iter()
        .map(|r| {
            let icon = r.icon.as_deref().unwrap_or("💡");
            format!("{} {} [{:?} impact]\n{}", icon, r.title, r.impact, r.body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn impact_color(impact: Impact) -> egui::Color32 {
    match impact {
        Impact::High => egui::Color32::from_rgb(220, 53, 69),
        Impact::Medium => egui::Color32::from_rgb(255, 193, 7),
        Impact::Low => egui::Color32::from_rgb(23, 162, 184),
    }
}

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::High => egui::Color32::from_rgb(220, 53, 69),
        Severity::Medium => egui::Color32::from_rgb(255, 193, 7),
        Severity::Low => egui::Color32::GRAY,
    }
}

fn stage_label(stage: LifecycleStage) -> &'static str {
    match stage {
        LifecycleStage::Launch => "🚀 Launch",
        LifecycleStage::Growth => "📈 Growth",
        LifecycleStage::Mature => "🏛 Mature",
        LifecycleStage::Decline => "📉 Decline",
    }
}

pub fn show_growth_view(ui: &mut egui::Ui, growth: &GrowthInsightsController, commands: &mut Vec<Command>) {
    ui.heading("Growth Insights");
    ui.add_space(8.0);

    if trigger_button(ui, "🚀 Generate Growth Insights", growth.trigger_enabled()) {
        commands.push(Command::GenerateGrowth);
    }

    let Some(insights) = growth.insights() else {
        ui.add_space(8.0);
        ui.label("Generate insights to see predictions, rankings and recommendations.");
        return;
    };

    ui.add_space(16.0);
    egui::ScrollArea::vertical()
        .id_source("growth_scroll")
        .show(ui, |ui| {
            ui.columns(2, |columns| {
                if let Some(prediction) = &insights.revenue_prediction {
                    show_revenue_prediction(&mut columns[0], prediction);
                }
                if let Some(quality) = &insights.data_quality {
                    show_data_quality(&mut columns[1], quality);
                }
            });

            if let Some(top) = &insights.top_products {
                show_top_products(ui, top);
            }
            if let Some(times) = &insights.best_times {
                show_best_times(ui, times);
            }
            if let Some(missed) = &insights.missed_opportunities {
                show_missed_opportunities(ui, missed);
            }
            if let Some(lifecycle) = &insights.product_lifecycle {
                show_lifecycle(ui, lifecycle);
            }
            if let Some(seasonality) = &insights.seasonality {
                show_seasonality(ui, seasonality);
            }
            if let Some(anomalies) = &insights.anomalies {
                show_anomalies(ui, anomalies, commands);
            }
            if let Some(recommendations) = &insights.recommendations {
                show_recommendations(ui, recommendations, commands);
            }
        });
}

fn show_revenue_prediction(ui: &mut egui::Ui, prediction: &RevenuePrediction) {
    ui.group(|ui| {
        ui.strong("Revenue Prediction");
        ui.colored_label(
            growth_color(prediction.growth_rate),
            egui::RichText::new(format!("{:+.1}% growth", prediction.growth_rate)).size(20.0),
        );
        if let Some(next) = prediction.next_month_revenue {
            ui.label(format!("Next month: ${:.2}", next));
        }
        if let Some(accuracy) = &prediction.prediction_accuracy {
            ui.weak(format!("Confidence: {}", accuracy));
        }
        chart(ui, "revenue_prediction_chart", prediction.chart.as_ref());
    });
}

fn show_data_quality(ui: &mut egui::Ui, quality: &DataQuality) {
    ui.group(|ui| {
        ui.strong("Data Quality");
        score_badge(ui, quality.quality_score);
        let counts = [
            ("Rows", quality.total_rows),
            ("Missing values", quality.missing_values),
            ("Duplicates", quality.duplicates),
            ("Zero prices", quality.zero_prices),
            ("Negative quantities", quality.negative_quantities),
        ];
        for (label, count) in counts {
            if let Some(count) = count {
                ui.label(format!("{}: {}", label, count));
            }
        }
    });
}

/// The service reports seasonality strength as a ratio.
pub fn strength_label(strength: f64) -> String {
    format!("{:.0}%", strength * 100.0)
}

fn show_top_products(ui: &mut egui::Ui, top: &TopProducts) {
    ui.group(|ui| {
        ui.strong("Top Products");
        for (i, product) in top.products.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(rank_badge(i + 1));
                ui.label(&product.product);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.strong(format!("${:.2}", product.revenue));
                });
            });
        }
        chart(ui, "top_products_chart", top.chart.as_ref());
    });
}

fn show_best_times(ui: &mut egui::Ui, times: &BestTimes) {
    ui.group(|ui| {
        ui.strong("Best Selling Times");
        if let Some(day) = &times.best_day {
            ui.label(format!("Best day: {}", day));
        }
        if let Some(hour) = &times.best_hour {
            ui.label(format!("Best hour: {}", hour));
        }
        if let Some(recommendation) = &times.recommendation {
            ui.label(format!("💡 {}", recommendation));
        }
        chart(ui, "best_times_chart", times.chart.as_ref());
    });
}

fn show_missed_opportunities(ui: &mut egui::Ui, missed: &MissedOpportunities) {
    ui.group(|ui| {
        ui.strong("Missed Opportunities");
        for line in missed_opportunity_lines(missed) {
            ui.label(line);
        }
        if let Some(total) = missed.total_missed_revenue.filter(|_| !missed.opportunities.is_empty()) {
            ui.colored_label(egui::Color32::from_rgb(220, 53, 69), format!("Total missed: ${:.2}", total));
        }
    });
}

fn show_lifecycle(ui: &mut egui::Ui, lifecycle: &[LifecycleEntry]) {
    ui.group(|ui| {
        ui.strong("Product Lifecycle");
        egui::Grid::new("lifecycle_grid").striped(true).show(ui, |ui| {
            for entry in lifecycle {
                ui.label(&entry.product);
                ui.label(stage_label(entry.stage));
                ui.weak(entry.confidence.as_deref().unwrap_or_default());
                match entry.total_revenue {
                    Some(revenue) => ui.label(format!("${:.2}", revenue)),
                    None => ui.label(""),
                };
                ui.end_row();
            }
        });
    });
}

fn show_seasonality(ui: &mut egui::Ui, seasonality: &Seasonality) {
    ui.group(|ui| {
        ui.strong("Seasonality");
        if let Some(peak) = &seasonality.peak_day {
            ui.label(format!("Peak day: {}", peak));
        }
        if let Some(low) = &seasonality.low_day {
            ui.label(format!("Slowest day: {}", low));
        }
        if let Some(strength) = seasonality.seasonality_strength {
            ui.label(format!("Strength: {}", strength_label(strength)));
        }
        chart(ui, "seasonality_chart", seasonality.chart.as_ref());
    });
}

fn show_anomalies(ui: &mut egui::Ui, anomalies: &[Anomaly], commands: &mut Vec<Command>) {
    ui.group(|ui| {
        ui.strong("Anomalies");
        if anomalies.is_empty() {
            ui.weak("No unusual sales patterns.");
        }
        for anomaly in anomalies {
            ui.horizontal(|ui| {
                let arrow = match anomaly.kind {
                    AnomalyKind::Spike => "⬆",
                    AnomalyKind::Drop => "⬇",
                };
                ui.colored_label(severity_color(anomaly.severity), arrow);
                ui.label(&anomaly.product);
                ui.label(format!("${:.2}", anomaly.value));
                if let Some(deviation) = anomaly.deviation_percent {
                    ui.weak(format!("{:+.0}%", deviation));
                }
                if let Some(range) = &anomaly.expected_range {
                    ui.weak(format!("expected {}", range));
                }
                if ui.small_button("🔎 Investigate").clicked() {
                    commands.push(Command::InvestigateAnomaly {
                        product: anomaly.product.clone(),
                    });
                }
            });
        }
    });
}

fn show_recommendations(ui: &mut egui::Ui, recommendations: &[Recommendation], commands: &mut Vec<Command>) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.strong("Recommendations");
            if ui.small_button("💾 Save").clicked() {
                commands.push(Command::SaveRecommendations);
            }
            if ui.small_button("📂 Recall saved").clicked() {
                commands.push(Command::RecallRecommendations);
            }
        });

        for recommendation in recommendations {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(recommendation.icon.as_deref().unwrap_or("💡"));
                    ui.strong(&recommendation.title);
                    ui.colored_label(
                        impact_color(recommendation.impact),
                        format!("{:?} impact", recommendation.impact),
                    );
                });
                ui.label(&recommendation.body);
            });
        }
    });
}

pub fn show_investigation(ctx: &egui::Context, product: &str, commands: &mut Vec<Command>) {
    let mut open = true;
    egui::Window::new(format!("Investigate: {}", product))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Research this product further:");
            for (label, link) in research_links(product) {
                ui.hyperlink_to(label, link);
            }
        });
    if !open {
        commands.push(Command::CloseModal);
    }
}

pub fn show_saved_recommendations(
    ctx: &egui::Context,
    snapshot: &RecommendationSnapshot,
    commands: &mut Vec<Command>,
) {
    let mut open = true;
    egui::Window::new("Saved Recommendations")
        .open(&mut open)
        .collapsible(false)
        .show(ctx, |ui| {
            let saved_at = snapshot.saved_at.with_timezone(&chrono::Local);
            ui.weak(format!("Saved {}", saved_at.format("%Y-%m-%d %H:%M")));
            ui.separator();
            egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                ui.label(&snapshot.markup);
            });
        });
    if !open {
        commands.push(Command::CloseModal);
    }
}
