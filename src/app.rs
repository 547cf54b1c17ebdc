use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::ClassifiedPlanet;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExoHabApp {
    pub state: AppState,
}

impl ExoHabApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ExoHabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: policy and chart controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the report page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| report_page(ui, &self.state));
        });
    }
}

/// Title, bio, tables and charts, top to bottom.
fn report_page(ui: &mut Ui, state: &AppState) {
    ui.heading(egui::RichText::new("Exoplanet Habitability Analysis").size(28.0));
    ui.label("This app explores exoplanets with criteria potentially indicative of habitability.");

    ui.add_space(8.0);
    ui.heading("About Me");
    ui.label(state.about());

    ui.add_space(8.0);
    ui.heading("Exoplanet Data Preview");
    table::record_table(ui, "raw_preview", state.output.raw.head(state.preview_rows));

    ui.add_space(8.0);
    ui.heading("Cleaned Data Preview");
    table::record_table(ui, "cleaned_preview", state.output.cleaned.head(state.preview_rows));

    ui.add_space(8.0);
    ui.heading("Potentially Habitable Exoplanets");
    ui.label(state.policy().description());
    let habitable: Vec<&ClassifiedPlanet> = state.habitable().collect();
    table::classified_table(ui, "habitable_table", &habitable);

    ui.add_space(8.0);
    ui.heading("Visualizations");

    ui.strong("Orbital period distribution");
    plot::period_histogram(ui, state);

    ui.strong("Planet radius vs mass");
    plot::radius_mass_scatter(ui, state);

    ui.strong("Host star temperature distribution");
    plot::teff_histogram(ui, state);

    ui.strong("Distance from star vs stellar temperature");
    plot::distance_teff_scatter(ui, state);
}
