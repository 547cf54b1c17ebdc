use super::model::{COL_MASSE, COL_ORBPER, COL_RADE, COL_ST_TEFF, Catalog, PlanetRecord};

// ---------------------------------------------------------------------------
// Cleaner: drop rows missing any required measurement
// ---------------------------------------------------------------------------

/// Columns that must be present for a record to survive cleaning.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_ORBPER, COL_RADE, COL_MASSE, COL_ST_TEFF];

/// Whether every required column has a value.
pub fn is_complete(record: &PlanetRecord) -> bool {
    REQUIRED_COLUMNS
        .iter()
        .all(|col| record.value(col).is_some())
}

/// Return the records that have all [`REQUIRED_COLUMNS`].
///
/// * Order is preserved.
/// * Values are copied untouched (filter, not transform).
/// * Running it on its own output returns the same catalog.
pub fn drop_incomplete(catalog: &Catalog) -> Catalog {
    let records: Vec<PlanetRecord> = catalog
        .iter()
        .filter(|rec| is_complete(rec))
        .cloned()
        .collect();

    let dropped = catalog.len() - records.len();
    if dropped > 0 {
        log::info!(
            "Dropped {dropped} of {} records missing one of {REQUIRED_COLUMNS:?}",
            catalog.len()
        );
    }
    Catalog { records }
}
