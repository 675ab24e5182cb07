use eframe::egui::{self, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DoeViewerApp {
    pub state: AppState,
}

impl eframe::App for DoeViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: variables ----
        egui::SidePanel::left("variable_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(&mut self.state.tab, Tab::Series, "Series");
                ui.selectable_value(&mut self.state.tab, Tab::Table, "Table");
                ui.selectable_value(&mut self.state.tab, Tab::Design, "Design");
            });
            ui.separator();

            match self.state.tab {
                Tab::Series => plot::series_view(ui, &mut self.state),
                Tab::Table => table::table_view(ui, &mut self.state),
                Tab::Design => plot::design_view(ui, &mut self.state),
            }
        });
    }
}
