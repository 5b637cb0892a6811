use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use nfhs_dashboard::state::AppState;

/// Category label for an integer x position, blank between categories.
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Region-wise comparison (bar chart)
// ---------------------------------------------------------------------------

pub fn comparison_chart(ui: &mut Ui, state: &AppState) {
    let (Some(indicator), Some(selection)) = (&state.indicator, &state.selection) else {
        return;
    };
    ui.heading("Region-wise Comparison");
    ui.label(format!(
        "{indicator} - {} ({})",
        selection.survey, selection.area
    ));

    let points = state.comparison_series();
    if points.is_empty() {
        ui.label("No values to compare for this survey and area.");
        return;
    }

    let labels: Vec<String> = points.iter().map(|p| p.label.to_string()).collect();
    let bars: Vec<Bar> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new(i as f64, p.value)
                .name(p.label.to_string())
                .fill(state.region_colors.color_for(&p.label))
                .width(0.7)
        })
        .collect();

    Plot::new("comparison_plot")
        .height(500.0)
        .y_axis_label(indicator.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Survey trend (line chart with markers)
// ---------------------------------------------------------------------------

pub fn trend_chart(ui: &mut Ui, state: &AppState) {
    let (Some(indicator), Some(selection)) = (&state.indicator, &state.selection) else {
        return;
    };
    ui.heading("Survey Trend Comparison");
    ui.label(format!("{indicator} Trend - {}", selection.region));

    let points = state.trend_series();
    if points.is_empty() {
        ui.label("No survey values for this region and area.");
        return;
    }

    let labels: Vec<String> = points.iter().map(|p| p.label.to_string()).collect();
    let coords: Vec<[f64; 2]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.value])
        .collect();

    let line_color = Color32::from_rgb(99, 110, 250);

    Plot::new("trend_plot")
        .height(400.0)
        .y_axis_label(indicator.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            let line_points: PlotPoints = coords.iter().copied().collect();
            let marker_points: PlotPoints = coords.iter().copied().collect();
            plot_ui.line(
                Line::new(line_points)
                    .name(indicator)
                    .color(line_color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(marker_points).color(line_color).radius(4.0));
        });
}
