// src/ui/charts.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use serde_json::Value;

use crate::api::ChartSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub kind: TraceKind,
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
    /// Category names when the x axis was not numeric.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub traces: Vec<Trace>,
}

impl Figure {
    /// Reads the subset of a serialized Plotly figure we can draw. `None` when
    /// nothing drawable is in it.
    pub fn parse(spec: &ChartSpec) -> Option<Self> {
        let figure: Value = match serde_json::from_str(&spec.0) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Skipping unreadable chart: {}", e);
                return None;
            }
        };

        let traces: Vec<Trace> = figure
            .get("data")?
            .as_array()?
            .iter()
            .filter_map(parse_trace)
            .collect();
        if traces.is_empty() {
            return None;
        }

        let title = figure.pointer("/layout/title/text").or_else(|| figure.pointer("/layout/title"));
        Some(Self {
            title: title.and_then(Value::as_str).map(str::to_string),
            traces,
        })
    }
}

fn parse_trace(trace: &Value) -> Option<Trace> {
    let kind = match trace.get("type").and_then(Value::as_str).unwrap_or("scatter") {
        "scatter" | "scattergl" => TraceKind::Line,
        "bar" | "pie" => TraceKind::Bar,
        _ => return None,
    };

    // Pie slices are drawn as bars
    let (xs, ys) = match (trace.get("labels"), trace.get("values")) {
        (Some(labels), Some(values)) => (labels, values),
        _ => (trace.get("x")?, trace.get("y")?),
    };
    let ys: Vec<f64> = ys.as_array()?.iter().map(Value::as_f64).collect::<Option<_>>()?;
    let xs = xs.as_array()?;
    if xs.len() != ys.len() || ys.is_empty() {
        return None;
    }

    let numeric: Option<Vec<f64>> = xs.iter().map(Value::as_f64).collect();
    let (points, categories) = match numeric {
        Some(xs) => (xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect(), Vec::new()),
        None => (
            ys.iter().enumerate().map(|(i, y)| [i as f64, *y]).collect(),
            xs.iter().map(category_name).collect(),
        ),
    };

    Some(Trace {
        kind,
        name: trace.get("name").and_then(Value::as_str).map(str::to_string),
        points,
        categories,
    })
}

fn category_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Draws a chart field. Anything that cannot be read draws nothing.
pub fn chart(ui: &mut egui::Ui, id: &str, spec: Option<&ChartSpec>) {
    let Some(figure) = spec.and_then(Figure::parse) else {
        return;
    };

    if let Some(title) = &figure.title {
        ui.label(egui::RichText::new(title).strong());
    }

    let mut plot = Plot::new(id)
        .height(200.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false);
    if figure.traces.len() > 1 {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for (i, trace) in figure.traces.iter().enumerate() {
            let name = trace.name.clone().unwrap_or_else(|| format!("Series {}", i + 1));
            match trace.kind {
                TraceKind::Line => {
                    plot_ui.line(Line::new(PlotPoints::from(trace.points.clone())).name(name).width(2.0));
                }
                TraceKind::Bar => {
                    // Category names show up on hover
                    let bars = trace
                        .points
                        .iter()
                        .enumerate()
                        .map(|(j, [x, y])| {
                            let bar = Bar::new(*x, *y).width(0.6);
                            match trace.categories.get(j) {
                                Some(category) => bar.name(category),
                                None => bar,
                            }
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(name));
                }
            }
        }
    });
}
