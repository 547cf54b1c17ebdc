use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// One colour per chart role, drawn from a single palette so the dashboard
/// stays consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub habitable: Color32,
    pub other: Color32,
    pub period: Color32,
    pub teff: Color32,
}

impl Default for ChartColors {
    fn default() -> Self {
        // Hue 120 puts the habitable series on green.
        let colors = generate_palette(4, 120.0);
        Self {
            habitable: colors[0],
            period: colors[1],
            teff: colors[2],
            other: Color32::GRAY,
        }
    }
}
