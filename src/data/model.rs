use serde::{Deserialize, Serialize};

use super::classify::ValidationIssue;

/// Native catalog column names, in projection order.
pub const COL_NAME: &str = "pl_name";
pub const COL_ORBPER: &str = "pl_orbper";
pub const COL_RADE: &str = "pl_rade";
pub const COL_MASSE: &str = "pl_masse";
pub const COL_ST_MASS: &str = "st_mass";
pub const COL_ST_RAD: &str = "st_rad";
pub const COL_ST_TEFF: &str = "st_teff";

pub const CATALOG_COLUMNS: [&str; 7] = [
    COL_NAME,
    COL_ORBPER,
    COL_RADE,
    COL_MASSE,
    COL_ST_MASS,
    COL_ST_RAD,
    COL_ST_TEFF,
];

// ---------------------------------------------------------------------------
// PlanetRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog row. Numeric attributes are `None` when the catalog
/// has no value for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    #[serde(rename = "pl_name")]
    pub name: String,
    /// Orbital period in days.
    #[serde(rename = "pl_orbper")]
    pub orbital_period: Option<f64>,
    /// Planet radius in Earth radii.
    #[serde(rename = "pl_rade")]
    pub radius: Option<f64>,
    /// Planet mass in Earth masses.
    #[serde(rename = "pl_masse")]
    pub mass: Option<f64>,
    /// Host star mass in solar masses.
    #[serde(rename = "st_mass")]
    pub stellar_mass: Option<f64>,
    /// Host star radius in solar radii.
    #[serde(rename = "st_rad")]
    pub stellar_radius: Option<f64>,
    /// Host star effective temperature in Kelvin.
    #[serde(rename = "st_teff")]
    pub stellar_teff: Option<f64>,
}

impl PlanetRecord {
    /// Record with only a name; every measurement missing.
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orbital_period: None,
            radius: None,
            mass: None,
            stellar_mass: None,
            stellar_radius: None,
            stellar_teff: None,
        }
    }

    /// Turn NaN into a missing value. Infinities are kept so the classifier
    /// can flag them.
    pub fn normalized(self) -> Self {
        let present = |v: Option<f64>| v.filter(|x| !x.is_nan());
        Self {
            name: self.name,
            orbital_period: present(self.orbital_period),
            radius: present(self.radius),
            mass: present(self.mass),
            stellar_mass: present(self.stellar_mass),
            stellar_radius: present(self.stellar_radius),
            stellar_teff: present(self.stellar_teff),
        }
    }

    /// Look up a numeric attribute by its native column name.
    pub fn value(&self, column: &str) -> Option<f64> {
        match column {
            COL_ORBPER => self.orbital_period,
            COL_RADE => self.radius,
            COL_MASSE => self.mass,
            COL_ST_MASS => self.stellar_mass,
            COL_ST_RAD => self.stellar_radius,
            COL_ST_TEFF => self.stellar_teff,
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – an ordered collection of records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub records: Vec<PlanetRecord>,
}

impl Catalog {
    pub fn new(records: Vec<PlanetRecord>) -> Self {
        Self {
            records: records.into_iter().map(PlanetRecord::normalized).collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records (fewer if the catalog is shorter).
    pub fn head(&self, n: usize) -> &[PlanetRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanetRecord> {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// ClassifiedPlanet – a record annotated by the classifier
// ---------------------------------------------------------------------------

/// A cleaned record plus the attributes derived by classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPlanet {
    pub record: PlanetRecord,
    /// Orbital distance in AU; absent when it cannot be computed.
    pub distance_au: Option<f64>,
    pub habitable: bool,
    /// Set when the record carried physically meaningless inputs.
    pub issue: Option<ValidationIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_new_maps_nan_to_missing_and_keeps_infinity() {
        let mut rec = PlanetRecord::named("K2-18 b");
        rec.orbital_period = Some(f64::NAN);
        rec.radius = Some(2.6);
        rec.stellar_teff = Some(f64::INFINITY);
        let catalog = Catalog::new(vec![rec]);
        let rec = &catalog.records[0];
        assert_eq!(rec.orbital_period, None);
        assert_eq!(rec.radius, Some(2.6));
        assert_eq!(rec.stellar_teff, Some(f64::INFINITY));
    }

    #[test]
    fn head_is_bounded_by_len() {
        let catalog = Catalog::new(vec![PlanetRecord::named("a"), PlanetRecord::named("b")]);
        assert_eq!(catalog.head(5).len(), 2);
        assert_eq!(catalog.head(1)[0].name, "a");
        assert!(Catalog::default().head(3).is_empty());
    }

    #[test]
    fn value_maps_native_column_names() {
        let mut rec = PlanetRecord::named("x");
        rec.mass = Some(3.0);
        assert_eq!(rec.value(COL_MASSE), Some(3.0));
        assert_eq!(rec.value(COL_NAME), None);
    }
}
