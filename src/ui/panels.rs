use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::classify::HabitabilityPolicy;
use crate::data::loader;
use crate::data::model::ClassifiedPlanet;
use crate::pipeline;
use crate::state::{AppState, MAX_BINS, MIN_BINS};

// ---------------------------------------------------------------------------
// Left side panel – classification controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Classification");
    ui.separator();

    ui.strong("Policy");
    let mut policy = state.policy();
    egui::ComboBox::from_id_salt("policy")
        .selected_text(policy.label())
        .show_ui(ui, |ui: &mut Ui| {
            for p in HabitabilityPolicy::ALL {
                ui.selectable_value(&mut policy, p, p.label());
            }
        });
    ui.label(RichText::new(policy.description()).small());
    state.set_policy(policy);

    ui.separator();

    let mut bins = state.histogram_bins;
    if ui
        .add(egui::Slider::new(&mut bins, MIN_BINS..=MAX_BINS).text("Histogram bins"))
        .changed()
    {
        state.set_histogram_bins(bins);
    }

    ui.separator();

    ui.strong("Records");
    egui::Grid::new("record_counts")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Raw");
            ui.label(state.output.raw.len().to_string());
            ui.end_row();
            ui.label("Cleaned");
            ui.label(state.output.cleaned.len().to_string());
            ui.end_row();
            ui.label("Habitable");
            ui.label(state.habitable_count().to_string());
            ui.end_row();
        });

    let flagged = state.flagged_count();
    if flagged > 0 {
        ui.label(
            RichText::new(format!("{flagged} records with non-positive inputs were flagged"))
                .color(Color32::YELLOW),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open snapshot…").clicked() {
                open_snapshot_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export habitable…").clicked() {
                export_habitable_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.source_label.is_empty() {
            ui.label(format!(
                "{}: {} records, {} habitable ({})",
                state.source_label,
                state.output.raw.len(),
                state.habitable_count(),
                state.policy()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_snapshot_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog snapshot")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match pipeline::rebuild_from_snapshot(&path, state.policy()) {
        Ok(output) => {
            log::info!(
                "Loaded snapshot {} ({} cleaned records)",
                path.display(),
                output.cleaned.len()
            );
            state.set_output(output, path.display().to_string());
        }
        Err(e) => {
            log::error!("Failed to load snapshot: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_habitable_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export habitable planets")
        .set_file_name("habitable_exoplanets.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    let planets: Vec<ClassifiedPlanet> = state.habitable().cloned().collect();
    if let Err(e) = loader::write_classified_csv(&path, &planets) {
        log::error!("Failed to export: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
