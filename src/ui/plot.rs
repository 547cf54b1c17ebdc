use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::charts::{Histogram, habitable_radius_mass};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

fn histogram_chart(
    ui: &mut Ui,
    id: &str,
    hist: &Histogram,
    name: &str,
    x_label: &str,
    color: Color32,
) {
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            if !hist.is_empty() {
                plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
            }
        });
}

/// Orbital periods of habitable planets.
pub fn period_histogram(ui: &mut Ui, state: &AppState) {
    histogram_chart(
        ui,
        "period_histogram",
        &state.period_histogram(),
        "Orbital period",
        "Orbital period (days)",
        state.colors.period,
    );
}

/// Host star temperatures of habitable planets.
pub fn teff_histogram(ui: &mut Ui, state: &AppState) {
    histogram_chart(
        ui,
        "teff_histogram",
        &state.teff_histogram(),
        "Stellar temperature",
        "Stellar effective temperature (K)",
        state.colors.teff,
    );
}

// ---------------------------------------------------------------------------
// Scatter plots
// ---------------------------------------------------------------------------

/// Radius vs mass of habitable planets.
pub fn radius_mass_scatter(ui: &mut Ui, state: &AppState) {
    let points = habitable_radius_mass(&state.output.classified);

    Plot::new("radius_mass_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Planet radius (Earth radii)")
        .y_axis_label("Planet mass (Earth masses)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("Habitable")
                    .color(state.colors.habitable)
                    .radius(3.0),
            );
        });
}

/// Distance vs stellar temperature, log-scaled distance axis, both series.
pub fn distance_teff_scatter(ui: &mut Ui, state: &AppState) {
    let series = state.distance_series();

    Plot::new("distance_teff_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Distance from star (AU, log scale)")
        .y_axis_label("Stellar effective temperature (K)")
        .x_axis_formatter(|mark, _range| format_log_tick(mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{:.3} AU\n{:.0} K", 10f64.powf(value.x), value.y)
            }
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(series.other)
                    .name("Non-habitable")
                    .color(state.colors.other)
                    .radius(2.0),
            );
            plot_ui.points(
                Points::new(series.habitable)
                    .name("Habitable")
                    .color(state.colors.habitable)
                    .radius(3.5),
            );
        });
}

/// Tick label for an axis holding `log10` values.
pub fn format_log_tick(exponent: f64) -> String {
    let value = 10f64.powf(exponent);
    if (0.01..10_000.0).contains(&value) {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{value:.0e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_ticks_show_linear_values() {
        assert_eq!(format_log_tick(0.0), "1");
        assert_eq!(format_log_tick(1.0), "10");
        assert_eq!(format_log_tick(-1.0), "0.1");
        assert_eq!(format_log_tick(5.0), "1e5");
    }
}
