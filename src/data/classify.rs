use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{
    COL_MASSE, COL_ORBPER, COL_RADE, COL_ST_MASS, COL_ST_RAD, COL_ST_TEFF, Catalog,
    ClassifiedPlanet, PlanetRecord,
};

/// Effective temperature of the Sun in Kelvin.
pub const SOLAR_TEFF: f64 = 5778.0;

const FLUX_INNER_FACTOR: f64 = 0.75;
const FLUX_OUTER_FACTOR: f64 = 1.75;

/// Upper bound on planet radius (Earth radii), shared by both policies.
pub const MAX_RADIUS: f64 = 1.6;
/// Upper bound on planet mass (Earth masses), shared by both policies.
pub const MAX_MASS: f64 = 5.0;

pub const PERIOD_RANGE: (f64, f64) = (100.0, 500.0);
pub const TEFF_RANGE: (f64, f64) = (2400.0, 7600.0);

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// The two habitability rules. They disagree with each other and are
/// applied one at a time, never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitabilityPolicy {
    /// Distance inside the temperature-scaled flux band, plus size limits.
    #[default]
    FluxZone,
    /// Fixed ranges on period and stellar temperature, plus size limits.
    Threshold,
}

impl HabitabilityPolicy {
    pub const ALL: [HabitabilityPolicy; 2] =
        [HabitabilityPolicy::FluxZone, HabitabilityPolicy::Threshold];

    pub fn label(self) -> &'static str {
        match self {
            HabitabilityPolicy::FluxZone => "Flux zone",
            HabitabilityPolicy::Threshold => "Thresholds",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HabitabilityPolicy::FluxZone => {
                "0.75·(T/5778)² ≤ (P²·M★)^⅓ ≤ 1.75·(T/5778)², radius ≤ 1.6 R⊕, mass ≤ 5 M⊕"
            }
            HabitabilityPolicy::Threshold => {
                "100 ≤ P ≤ 500 d, radius ≤ 1.6 R⊕, mass ≤ 5 M⊕, 2400 ≤ T ≤ 7600 K"
            }
        }
    }
}

impl fmt::Display for HabitabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A physically meaningless input found while classifying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{column} must be positive, got {value}")]
    NonPositive { column: &'static str, value: f64 },
    #[error("{column} must be finite, got {value}")]
    NonFinite { column: &'static str, value: f64 },
}

fn validate(record: &PlanetRecord) -> Result<(), ValidationIssue> {
    let checks = [
        (COL_ORBPER, record.orbital_period),
        (COL_RADE, record.radius),
        (COL_MASSE, record.mass),
        (COL_ST_TEFF, record.stellar_teff),
        (COL_ST_MASS, record.stellar_mass),
        (COL_ST_RAD, record.stellar_radius),
    ];
    for (column, value) in checks {
        let Some(value) = value else {
            continue;
        };
        if !value.is_finite() {
            return Err(ValidationIssue::NonFinite { column, value });
        }
        if value <= 0.0 {
            return Err(ValidationIssue::NonPositive { column, value });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Inner and outer flux bounds for a star of the given temperature.
pub fn flux_bounds(teff: f64) -> (f64, f64) {
    let scale = (teff / SOLAR_TEFF).powi(2);
    (FLUX_INNER_FACTOR * scale, FLUX_OUTER_FACTOR * scale)
}

/// `(period² · stellar_mass)^(1/3)`, with period in days and stellar mass in
/// solar masses taken as-is. The result is labelled AU but the units are
/// not normalised.
pub fn distance_au(orbital_period: f64, stellar_mass: f64) -> f64 {
    (orbital_period.powi(2) * stellar_mass).cbrt()
}

fn within(value: f64, (lo, hi): (f64, f64)) -> bool {
    lo <= value && value <= hi
}

fn size_ok(record: &PlanetRecord) -> bool {
    matches!(record.radius, Some(r) if r <= MAX_RADIUS)
        && matches!(record.mass, Some(m) if m <= MAX_MASS)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify one record under `policy`. Pure: the result depends only on the
/// record's fields.
pub fn classify_record(record: &PlanetRecord, policy: HabitabilityPolicy) -> ClassifiedPlanet {
    if let Err(issue) = validate(record) {
        return ClassifiedPlanet {
            record: record.clone(),
            distance_au: None,
            habitable: false,
            issue: Some(issue),
        };
    }

    let distance = match (record.orbital_period, record.stellar_mass) {
        (Some(p), Some(m)) => Some(distance_au(p, m)),
        _ => None,
    };

    let habitable = match policy {
        HabitabilityPolicy::FluxZone => match (distance, record.stellar_teff) {
            (Some(d), Some(t)) => within(d, flux_bounds(t)) && size_ok(record),
            _ => false,
        },
        HabitabilityPolicy::Threshold => {
            matches!(record.orbital_period, Some(p) if within(p, PERIOD_RANGE))
                && size_ok(record)
                && matches!(record.stellar_teff, Some(t) if within(t, TEFF_RANGE))
        }
    };

    ClassifiedPlanet {
        record: record.clone(),
        distance_au: distance,
        habitable,
        issue: None,
    }
}

/// Classify every record, preserving order.
pub fn classify(catalog: &Catalog, policy: HabitabilityPolicy) -> Vec<ClassifiedPlanet> {
    let classified: Vec<ClassifiedPlanet> = catalog
        .iter()
        .map(|rec| classify_record(rec, policy))
        .collect();

    for planet in &classified {
        if let Some(issue) = &planet.issue {
            log::warn!("Flagged '{}': {issue}", planet.record.name);
        }
    }
    log::info!(
        "{policy}: {} of {} records habitable",
        classified.iter().filter(|p| p.habitable).count(),
        classified.len()
    );
    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(period: f64, radius: f64, mass: f64, star_mass: f64, teff: f64) -> PlanetRecord {
        PlanetRecord {
            name: "test".to_string(),
            orbital_period: Some(period),
            radius: Some(radius),
            mass: Some(mass),
            stellar_mass: Some(star_mass),
            stellar_radius: Some(1.0),
            stellar_teff: Some(teff),
        }
    }

    #[test]
    fn distance_for_200_day_orbit_around_solar_mass_star() {
        let d = distance_au(200.0, 1.0);
        assert!((d - 34.2).abs() < 0.01, "got {d}");
    }

    #[test]
    fn flux_bounds_at_solar_temperature() {
        let (inner, outer) = flux_bounds(SOLAR_TEFF);
        assert!((inner - 0.75).abs() < 1e-12);
        assert!((outer - 1.75).abs() < 1e-12);
    }

    #[test]
    fn long_period_planet_falls_outside_flux_zone() {
        let rec = planet(200.0, 1.0, 1.0, 1.0, SOLAR_TEFF);
        let c = classify_record(&rec, HabitabilityPolicy::FluxZone);
        assert!(!c.habitable);
        assert!((c.distance_au.unwrap() - 34.2).abs() < 0.01);
    }

    #[test]
    fn short_period_planet_inside_flux_zone() {
        // P = 1 day, M = 1 gives distance 1.0, between 0.75 and 1.75.
        let rec = planet(1.0, 1.0, 1.0, 1.0, SOLAR_TEFF);
        assert!(classify_record(&rec, HabitabilityPolicy::FluxZone).habitable);
    }

    #[test]
    fn threshold_policy_example() {
        let rec = planet(300.0, 1.2, 2.0, 1.0, 5000.0);
        assert!(classify_record(&rec, HabitabilityPolicy::Threshold).habitable);
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        let threshold = |rec: PlanetRecord| {
            classify_record(&rec, HabitabilityPolicy::Threshold).habitable
        };
        assert!(threshold(planet(100.0, 1.0, 1.0, 1.0, 2400.0)));
        assert!(threshold(planet(500.0, 1.0, 5.0, 1.0, 7600.0)));
        assert!(!threshold(planet(500.1, 1.0, 1.0, 1.0, 5000.0)));
        assert!(!threshold(planet(300.0, 1.0, 1.0, 1.0, 7600.5)));
    }

    #[test]
    fn radius_boundary_is_inclusive_for_both_policies() {
        for policy in HabitabilityPolicy::ALL {
            let (period, teff) = match policy {
                HabitabilityPolicy::FluxZone => (1.0, SOLAR_TEFF),
                HabitabilityPolicy::Threshold => (300.0, 5000.0),
            };
            let at = classify_record(&planet(period, 1.6, 1.0, 1.0, teff), policy);
            let above = classify_record(&planet(period, 1.600_000_1, 1.0, 1.0, teff), policy);
            assert!(at.habitable, "{policy}: 1.6 should be included");
            assert!(!above.habitable, "{policy}: 1.6000001 should be excluded");
        }
    }

    #[test]
    fn policies_can_disagree() {
        let rec = planet(300.0, 1.2, 2.0, 1.0, 5000.0);
        assert!(classify_record(&rec, HabitabilityPolicy::Threshold).habitable);
        assert!(!classify_record(&rec, HabitabilityPolicy::FluxZone).habitable);
    }

    #[test]
    fn classification_is_deterministic() {
        let rec = planet(12.3, 1.1, 0.9, 0.8, 4100.0);
        let a = classify_record(&rec, HabitabilityPolicy::FluxZone);
        let b = classify_record(&rec, HabitabilityPolicy::FluxZone);
        assert_eq!(a, b);
    }

    #[test]
    fn non_positive_inputs_are_flagged_not_propagated() {
        let rec = planet(0.0, 1.0, 1.0, 1.0, SOLAR_TEFF);
        let c = classify_record(&rec, HabitabilityPolicy::FluxZone);
        assert!(!c.habitable);
        assert_eq!(c.distance_au, None);
        assert_eq!(
            c.issue,
            Some(ValidationIssue::NonPositive { column: COL_ORBPER, value: 0.0 })
        );

        let rec = planet(300.0, 1.0, 1.0, -1.0, 5000.0);
        let c = classify_record(&rec, HabitabilityPolicy::Threshold);
        assert!(!c.habitable);
        assert!(matches!(
            c.issue,
            Some(ValidationIssue::NonPositive { column: COL_ST_MASS, .. })
        ));
    }

    #[test]
    fn every_validated_column_is_flagged_when_non_positive() {
        let cases = [
            (planet(300.0, 0.0, 1.0, 1.0, 5000.0), COL_RADE),
            (planet(300.0, 1.0, -2.0, 1.0, 5000.0), COL_MASSE),
            (planet(300.0, 1.0, 1.0, 1.0, 0.0), COL_ST_TEFF),
            (planet(-5.0, 1.0, 1.0, 1.0, 5000.0), COL_ORBPER),
        ];
        for (rec, expected) in cases {
            for policy in HabitabilityPolicy::ALL {
                let c = classify_record(&rec, policy);
                assert!(!c.habitable, "{expected} under {policy}");
                assert_eq!(c.distance_au, None);
                let flagged = matches!(
                    c.issue,
                    Some(ValidationIssue::NonPositive { column, .. }) if column == expected
                );
                assert!(flagged, "{expected}: got {:?}", c.issue);
            }
        }
    }

    #[test]
    fn infinite_inputs_are_flagged() {
        let rec = planet(f64::INFINITY, 1.0, 1.0, 1.0, 5000.0);
        let c = classify_record(&rec, HabitabilityPolicy::Threshold);
        assert!(!c.habitable);
        assert_eq!(c.distance_au, None);
        assert!(matches!(
            c.issue,
            Some(ValidationIssue::NonFinite { column: COL_ORBPER, .. })
        ));

        let rec = planet(300.0, 1.0, 1.0, 1.0, f64::NEG_INFINITY);
        let c = classify_record(&rec, HabitabilityPolicy::FluxZone);
        assert!(matches!(
            c.issue,
            Some(ValidationIssue::NonFinite { column: COL_ST_TEFF, .. })
        ));
    }

    #[test]
    fn flagged_rows_keep_their_place() {
        let mut ok = planet(300.0, 1.2, 2.0, 1.0, 5000.0);
        ok.name = "ok".into();
        let mut bad = planet(300.0, 1.2, 0.0, 1.0, 5000.0);
        bad.name = "bad".into();
        let mut also_ok = planet(400.0, 1.0, 1.0, 1.0, 6000.0);
        also_ok.name = "also ok".into();

        let out = classify(&Catalog::new(vec![ok, bad, also_ok]), HabitabilityPolicy::Threshold);
        let names: Vec<&str> = out.iter().map(|p| p.record.name.as_str()).collect();
        assert_eq!(names, ["ok", "bad", "also ok"]);
        let flags: Vec<bool> = out.iter().map(|p| p.issue.is_some()).collect();
        assert_eq!(flags, [false, true, false]);
        let habitable: Vec<bool> = out.iter().map(|p| p.habitable).collect();
        assert_eq!(habitable, [true, false, true]);
    }

    #[test]
    fn missing_stellar_mass_only_affects_flux_zone() {
        let mut rec = planet(300.0, 1.2, 2.0, 1.0, 5000.0);
        rec.stellar_mass = None;
        let flux = classify_record(&rec, HabitabilityPolicy::FluxZone);
        assert_eq!(flux.distance_au, None);
        assert!(!flux.habitable);
        assert!(classify_record(&rec, HabitabilityPolicy::Threshold).habitable);
    }

    #[test]
    fn classify_preserves_order() {
        let mut a = planet(1.0, 1.0, 1.0, 1.0, SOLAR_TEFF);
        a.name = "a".into();
        let mut b = planet(200.0, 1.0, 1.0, 1.0, SOLAR_TEFF);
        b.name = "b".into();
        let out = classify(&Catalog::new(vec![a, b]), HabitabilityPolicy::FluxZone);
        let names: Vec<&str> = out.iter().map(|p| p.record.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(out[0].habitable);
        assert!(!out[1].habitable);
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: HabitabilityPolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"threshold\"").unwrap();
        assert_eq!(w.policy, HabitabilityPolicy::Threshold);
    }
}
