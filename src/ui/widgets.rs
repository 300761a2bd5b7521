// src/ui/widgets.rs
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Good,
    Warning,
    Poor,
}

impl QualityTier {
    /// 80 and 60 belong to the higher tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            QualityTier::Good
        } else if score >= 60.0 {
            QualityTier::Warning
        } else {
            QualityTier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Good => "Good",
            QualityTier::Warning => "Needs attention",
            QualityTier::Poor => "Poor",
        }
    }

    pub fn color(&self) -> egui::Color32 {
        match self {
            QualityTier::Good => egui::Color32::from_rgb(40, 167, 69),
            QualityTier::Warning => egui::Color32::from_rgb(255, 193, 7),
            QualityTier::Poor => egui::Color32::from_rgb(220, 53, 69),
        }
    }
}

/// Large colored score with its tier underneath.
pub fn score_badge(ui: &mut egui::Ui, score: f64) {
    let tier = QualityTier::from_score(score);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!("{:.0}", score))
                .size(36.0)
                .strong()
                .color(tier.color()),
        );
        ui.colored_label(tier.color(), tier.label());
    });
}

/// One summary card: a caption over a prominent value.
pub fn metric_card(ui: &mut egui::Ui, caption: &str, value: impl Into<egui::RichText>) {
    ui.group(|ui| {
        ui.set_min_width(140.0);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(caption).small().weak());
            ui.strong(value);
        });
    });
}

/// Primary action of a panel. Disabled while its request runs, with a spinner
/// next to it.
pub fn trigger_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    ui.horizontal(|ui| {
        let clicked = ui
            .add_enabled(enabled, egui::Button::new(egui::RichText::new(label).strong()))
            .clicked();
        if !enabled {
            ui.spinner();
        }
        clicked
    })
    .inner
}

pub fn growth_color(percent: f64) -> egui::Color32 {
    if percent >= 0.0 {
        egui::Color32::from_rgb(40, 167, 69)
    } else {
        egui::Color32::from_rgb(220, 53, 69)
    }
}

/// Maps a series onto `rect`, scaled to the series' own min and max.
/// A flat series sits on the horizontal mid-line.
pub fn sparkline_points(series: &[f64], rect: egui::Rect) -> Vec<egui::Pos2> {
    if series.is_empty() {
        return Vec::new();
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let step = if series.len() > 1 {
        rect.width() / (series.len() - 1) as f32
    } else {
        0.0
    };

    series
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = rect.left() + step * i as f32;
            let y = if span > 0.0 {
                rect.bottom() - ((value - min) / span) as f32 * rect.height()
            } else {
                rect.center().y
            };
            egui::pos2(x, y)
        })
        .collect()
}

pub fn sparkline(ui: &mut egui::Ui, series: &[f64], color: egui::Color32) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(160.0, 36.0), egui::Sense::hover());
    let points = sparkline_points(series, rect.shrink(2.0));
    if points.len() > 1 {
        ui.painter()
            .add(egui::Shape::line(points, egui::Stroke::new(1.5, color)));
    }
    response
}
