use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::plot::placeholder;

// ---------------------------------------------------------------------------
// Table tab
// ---------------------------------------------------------------------------

/// Render the uploaded table with its SPC target and factor selectors.
pub fn table_view(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = &state.table else {
        placeholder(ui, "Open a table to view it  (File → Open table…)");
        return;
    };

    let current = state.target_column.clone().unwrap_or_default();
    let factor = state.factor_column.clone();
    let mut picked = None;
    let mut picked_factor = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Target variable");
        egui::ComboBox::from_id_salt("target_column")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for h in &table.headers {
                    if ui.selectable_label(current == *h, h).clicked() {
                        picked = Some(h.clone());
                    }
                }
            });

        ui.label("Factor");
        egui::ComboBox::from_id_salt("factor_column")
            .selected_text(factor.as_deref().unwrap_or("(none)"))
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(factor.is_none(), "(none)").clicked() {
                    picked_factor = Some(None);
                }
                for h in &table.headers {
                    if ui.selectable_label(factor.as_deref() == Some(h), h).clicked() {
                        picked_factor = Some(Some(h.clone()));
                    }
                }
            });
    });
    ui.separator();

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(40.0))
            .columns(Column::auto().at_least(80.0), table.headers.len())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for h in &table.headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.len(), |mut row| {
                    let idx = row.index();
                    let record = &table.rows[idx];
                    row.col(|ui: &mut Ui| {
                        ui.label((idx + 1).to_string());
                    });
                    for h in &table.headers {
                        row.col(|ui: &mut Ui| {
                            // A missing key renders like an empty cell.
                            ui.label(record.get(h).map(|v| v.to_string()).unwrap_or_default());
                        });
                    }
                });
            });
    });

    if let Some(col) = picked {
        state.target_column = Some(col);
    }
    if let Some(col) = picked_factor {
        state.factor_column = col;
    }
}
