use crate::data::model::ClassifiedPlanet;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins over `[min, max]` of the finite input values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Every finite value lands in exactly one bin; the maximum goes into the
    /// last bin. No values → no bins.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max - min <= f64::EPSILON * max.abs().max(1.0) {
            return Self {
                bins: vec![HistogramBin {
                    start: min - 0.5,
                    end: min + 0.5,
                    count: values.len(),
                }],
            };
        }

        let n = bins.max(1);
        let width = (max - min) / n as f64;
        let mut out: Vec<HistogramBin> = (0..n)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();
        for v in values {
            let idx = (((v - min) / width).floor() as usize).min(n - 1);
            out[idx].count += 1;
        }
        Self { bins: out }
    }

    /// Sum of all bin counts.
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Series extracted from classified planets
// ---------------------------------------------------------------------------

fn habitable(planets: &[ClassifiedPlanet]) -> impl Iterator<Item = &ClassifiedPlanet> {
    planets.iter().filter(|p| p.habitable)
}

/// Orbital periods of habitable planets.
pub fn habitable_periods(planets: &[ClassifiedPlanet]) -> Vec<f64> {
    habitable(planets)
        .filter_map(|p| p.record.orbital_period)
        .collect()
}

/// Stellar temperatures of habitable planets.
pub fn habitable_teffs(planets: &[ClassifiedPlanet]) -> Vec<f64> {
    habitable(planets)
        .filter_map(|p| p.record.stellar_teff)
        .collect()
}

/// `[radius, mass]` points of habitable planets.
pub fn habitable_radius_mass(planets: &[ClassifiedPlanet]) -> Vec<[f64; 2]> {
    habitable(planets)
        .filter_map(|p| Some([p.record.radius?, p.record.mass?]))
        .collect()
}

/// Points for the distance vs temperature chart, x already in `log10(AU)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTeffSeries {
    pub habitable: Vec<[f64; 2]>,
    pub other: Vec<[f64; 2]>,
}

/// Split planets into habitable and non-habitable series. Rows without a
/// positive distance or a temperature have no place on a log axis and are
/// left out.
pub fn distance_teff_series(planets: &[ClassifiedPlanet]) -> DistanceTeffSeries {
    let mut series = DistanceTeffSeries::default();
    for p in planets {
        let (Some(d), Some(t)) = (p.distance_au, p.record.stellar_teff) else {
            continue;
        };
        if d <= 0.0 {
            continue;
        }
        let point = [d.log10(), t];
        if p.habitable {
            series.habitable.push(point);
        } else {
            series.other.push(point);
        }
    }
    series
}
