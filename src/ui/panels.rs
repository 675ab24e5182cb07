use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use doe_viewer::data::model::VariableKind;
use doe_viewer::data::request::Strategy;

use crate::color::{parse_hex, to_hex, MARKER};
use crate::state::{AppState, RequestKind};

// ---------------------------------------------------------------------------
// Left side panel – variable editor
// ---------------------------------------------------------------------------

/// Render the left panel: design settings and declared variables.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Design");
    ui.separator();

    egui::Grid::new("design_settings")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Strategy");
            egui::ComboBox::from_id_salt("strategy")
                .selected_text(state.design.strategy.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for s in Strategy::ALL {
                        ui.selectable_value(&mut state.design.strategy, s, s.label());
                    }
                });
            ui.end_row();

            ui.label("Samples");
            ui.add(DragValue::new(&mut state.design.num_samples).range(1..=10_000));
            ui.end_row();
        });

    ui.add_space(6.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Variables");
        if ui.small_button("+ Add").clicked() {
            state.add_variable();
        }
    });
    ui.separator();

    let mut remove = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for idx in 0..state.design.variables.len() {
                ui.push_id(idx, |ui: &mut Ui| {
                    if variable_editor(ui, state, idx) {
                        remove = Some(idx);
                    }
                });
                ui.separator();
            }
        });

    if let Some(idx) = remove {
        state.remove_variable(idx);
    }
}

/// One variable's widgets. Returns `true` when the user asked to delete it.
fn variable_editor(ui: &mut Ui, state: &mut AppState, idx: usize) -> bool {
    let mut delete = false;
    let mut levels_changed = false;

    {
        let var = &mut state.design.variables[idx];

        ui.horizontal(|ui: &mut Ui| {
            let mut color = var.color.as_deref().and_then(parse_hex).unwrap_or(MARKER);
            if ui.color_edit_button_srgba(&mut color).changed() {
                var.color = Some(to_hex(color));
            }
            ui.add(egui::TextEdit::singleline(&mut var.name).hint_text("name"));
            if ui.small_button("🗑").on_hover_text("Remove variable").clicked() {
                delete = true;
            }
        });

        egui::ComboBox::from_id_salt("kind")
            .selected_text(var.kind.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for k in VariableKind::ALL {
                    ui.selectable_value(&mut var.kind, k, k.to_string());
                }
            });

        match var.kind {
            VariableKind::Continuous => {
                ui.horizontal(|ui: &mut Ui| {
                    let mut lo = var.min.unwrap_or(0.0);
                    let mut hi = var.max.unwrap_or(1.0);
                    ui.label("min");
                    if ui.add(DragValue::new(&mut lo).speed(0.1)).changed() || var.min.is_none() {
                        var.min = Some(lo);
                    }
                    ui.label("max");
                    if ui.add(DragValue::new(&mut hi).speed(0.1)).changed() || var.max.is_none() {
                        var.max = Some(hi);
                    }
                });
            }
            VariableKind::Categorical | VariableKind::Discrete => {
                let buffer = &mut state.level_buffers[idx];
                levels_changed = ui
                    .add(egui::TextEdit::singleline(buffer).hint_text("levels, comma separated"))
                    .changed();
            }
        }
    }

    if levels_changed {
        state.sync_levels(idx);
    }

    if let Err(e) = state.design.variables[idx].validate() {
        ui.label(RichText::new(e.to_string()).color(Color32::YELLOW).small());
    }

    delete
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open series…").clicked() {
                ui.close_menu();
                if let Some(path) = pick_file("Open numeric series", &["txt", "csv", "xlsx", "xls"]) {
                    run(state, |s| s.load_series(&path));
                }
            }
            if ui.button("Open comparison series…").clicked() {
                ui.close_menu();
                if let Some(path) = pick_file("Open comparison series", &["txt", "csv", "xlsx", "xls"]) {
                    run(state, |s| s.load_comparison(&path));
                }
            }
            if ui.button("Open table…").clicked() {
                ui.close_menu();
                if let Some(path) = pick_file("Open table", &["csv", "xlsx", "xls", "ods"]) {
                    run(state, |s| s.load_table(&path));
                }
            }
            if ui.button("Open design matrix…").clicked() {
                ui.close_menu();
                if let Some(path) = pick_file("Open design matrix", &["json", "csv", "xlsx", "xls"]) {
                    run(state, |s| s.load_matrix(&path));
                }
            }
            ui.separator();
            ui.menu_button("Save request…", |ui: &mut Ui| {
                for kind in RequestKind::ALL {
                    if ui.button(kind.label()).clicked() {
                        ui.close_menu();
                        run(state, |s| save_request(s, kind));
                    }
                }
            });
        });

        ui.separator();
        summary_label(ui, state);

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn summary_label(ui: &mut Ui, state: &AppState) {
    let mut parts = Vec::new();
    if let (Some(series), Some(src)) = (&state.series, &state.sources.series) {
        parts.push(format!("{} values ({src})", series.len()));
    }
    if let (Some(series), Some(src)) = (&state.comparison, &state.sources.comparison) {
        parts.push(format!("{} comparison values ({src})", series.len()));
    }
    if let (Some(table), Some(src)) = (&state.table, &state.sources.table) {
        parts.push(format!("{} rows × {} columns ({src})", table.len(), table.headers.len()));
    }
    if !state.matrix.is_empty() {
        parts.push(format!("{} design runs", state.matrix.len()));
    }
    if !parts.is_empty() {
        ui.label(parts.join("  ·  "));
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn pick_file(title: &str, extensions: &[&str]) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", extensions)
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Open `path` as a table at start-up.
pub fn open_startup_file(state: &mut AppState, path: &Path) {
    run(state, |s| s.load_table(path));
}

fn save_request(state: &AppState, kind: RequestKind) -> Result<()> {
    let json = state.request_json(kind)?;
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save request body")
        .set_file_name(kind.file_name())
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return Ok(());
    };
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} to {}", kind.label(), path.display());
    Ok(())
}

/// Run a fallible UI action, surfacing failures in the status line.
fn run(state: &mut AppState, action: impl FnOnce(&mut AppState) -> Result<()>) {
    if let Err(e) = action(state) {
        state.report_error(&e);
    }
}
