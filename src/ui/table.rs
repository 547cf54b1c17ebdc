use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CATALOG_COLUMNS, ClassifiedPlanet, PlanetRecord};

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 280.0;

/// Cell text for an optional measurement.
pub fn format_value(v: Option<f64>) -> String {
    match v {
        Some(x) if x.abs() >= 1000.0 => format!("{x:.0}"),
        Some(x) => format!("{x:.3}"),
        None => "NaN".to_string(),
    }
}

fn record_cells(rec: &PlanetRecord) -> [String; 6] {
    [
        format_value(rec.orbital_period),
        format_value(rec.radius),
        format_value(rec.mass),
        format_value(rec.stellar_mass),
        format_value(rec.stellar_radius),
        format_value(rec.stellar_teff),
    ]
}

/// Catalog rows with their native column names as headers.
pub fn record_table(ui: &mut Ui, id: &str, records: &[PlanetRecord]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(70.0), CATALOG_COLUMNS.len() - 1)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .header(20.0, |mut header| {
                for title in CATALOG_COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let rec = &records[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.name.as_str());
                    });
                    for cell in record_cells(rec) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Classified rows: catalog columns plus the computed distance.
pub fn classified_table(ui: &mut Ui, id: &str, planets: &[&ClassifiedPlanet]) {
    if planets.is_empty() {
        ui.label("No planets match the selected criteria.");
        return;
    }
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(70.0), CATALOG_COLUMNS.len())
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .header(20.0, |mut header| {
                for title in CATALOG_COLUMNS.iter().copied().chain(["distance_au"]) {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, planets.len(), |mut row| {
                    let planet = planets[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(planet.record.name.as_str());
                    });
                    for cell in record_cells(&planet.record) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                    row.col(|ui: &mut Ui| {
                        ui.label(format_value(planet.distance_au));
                    });
                });
            });
    });
}
