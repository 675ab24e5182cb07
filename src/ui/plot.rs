use eframe::egui::{self, Color32, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use doe_viewer::data::projection::{Projection, RenderMode};
use doe_viewer::data::request::SeasonalityMode;

use crate::color::{parse_hex, DepthScale, MARKER};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series tab
// ---------------------------------------------------------------------------

/// Line plot of the numeric series against sample index, plus the paste box.
pub fn series_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Values (comma, space or newline separated):");
        if ui.button("Apply").clicked() {
            if let Err(e) = state.apply_pasted_series() {
                state.report_error(&e);
            }
        }
    });
    ui.add(
        egui::TextEdit::multiline(&mut state.paste_buffer)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    comparison_input(ui, state);
    request_settings(ui, state);
    ui.separator();

    let Some(series) = &state.series else {
        placeholder(ui, "Open or paste a numeric series  (File → Open series…)");
        return;
    };

    let points: PlotPoints = series
        .values()
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    Plot::new("series_plot")
        .x_axis_label("Sample")
        .y_axis_label("Value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(MARKER).width(1.5));
        });
}

/// Second group for effect-size requests.
fn comparison_input(ui: &mut Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Comparison group")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Group B values:");
                if ui.button("Apply").clicked() {
                    if let Err(e) = state.apply_pasted_comparison() {
                        state.report_error(&e);
                    }
                }
            });
            ui.add(
                egui::TextEdit::multiline(&mut state.comparison_buffer)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
        });
}

fn request_settings(ui: &mut Ui, state: &mut AppState) {
    let settings = &mut state.settings;
    egui::CollapsingHeader::new("Request settings")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Confidence level");
                ui.add(
                    egui::DragValue::new(&mut settings.confidence_level)
                        .range(0.5..=0.999)
                        .speed(0.005),
                );
                ui.label("Prior mean");
                ui.add(egui::DragValue::new(&mut settings.prior_mean).speed(0.1));
                ui.label("Prior std");
                ui.add(
                    egui::DragValue::new(&mut settings.prior_std)
                        .range(0.001..=f64::MAX)
                        .speed(0.05),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("ARIMA p/d/q");
                ui.add(egui::DragValue::new(&mut settings.arima.p).range(0..=5));
                ui.add(egui::DragValue::new(&mut settings.arima.d).range(0..=2));
                ui.add(egui::DragValue::new(&mut settings.arima.q).range(0..=5));
                ui.label("steps");
                ui.add(egui::DragValue::new(&mut settings.arima.forecast_steps).range(1..=100));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Prophet periods");
                ui.add(egui::DragValue::new(&mut settings.forecast_periods).range(1..=365));
                ui.radio_value(&mut settings.seasonality, SeasonalityMode::Additive, "additive");
                ui.radio_value(
                    &mut settings.seasonality,
                    SeasonalityMode::Multiplicative,
                    "multiplicative",
                );
            });
        });
}

// ---------------------------------------------------------------------------
// Design tab
// ---------------------------------------------------------------------------

/// Scatter of the design matrix over the first declared variables.
pub fn design_view(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_some() && ui.button("Use table rows as design matrix").clicked() {
        state.matrix_from_table();
    }

    let Some(projection) = state.projection() else {
        placeholder(ui, "No data to visualize");
        return;
    };

    let color = state
        .design
        .variables
        .iter()
        .find(|v| Some(v.name.as_str()) == projection.axis_name(0))
        .and_then(|v| v.color.as_deref())
        .and_then(parse_hex)
        .unwrap_or(MARKER);

    if projection.mode == RenderMode::Scatter3d {
        ui.label(format!(
            "3D design: colour encodes {}",
            projection.axis_name(2).unwrap_or_default()
        ));
    }
    category_legend(ui, &projection);

    Plot::new("design_plot")
        .x_axis_label(projection.axis_name(0).unwrap_or_default().to_string())
        .y_axis_label(projection.axis_name(1).unwrap_or_default().to_string())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| match projection.mode {
            RenderMode::Scatter2d => {
                let points: PlotPoints = projection.points_2d().into_iter().collect();
                plot_ui.points(marker(Points::new(points), color));
            }
            RenderMode::Scatter3d => {
                let pts = projection.points_3d();
                let scale = DepthScale::new(pts.iter().map(|p| p[2]));
                for [x, y, z] in pts {
                    let single: PlotPoints = std::iter::once([x, y]).collect();
                    plot_ui.points(marker(Points::new(single), scale.color_for(z)));
                }
            }
        });
}

fn marker(points: Points, color: Color32) -> Points {
    points
        .shape(MarkerShape::Circle)
        .radius(4.0)
        .filled(true)
        .color(color)
}

/// Categorical axes are drawn at their ordinals; list the labels.
fn category_legend(ui: &mut Ui, projection: &Projection) {
    for (idx, name) in projection.axis_names().iter().enumerate() {
        let labels = projection.categories(idx);
        if labels.is_empty() {
            continue;
        }
        let mapping: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| format!("{i} = {l}"))
            .collect();
        ui.label(format!("{name}: {}", mapping.join(", ")));
    }
}

pub fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}
