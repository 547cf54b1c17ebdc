use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::model::{
    CATALOG_COLUMNS, COL_MASSE, COL_NAME, COL_ORBPER, COL_RADE, COL_ST_MASS, COL_ST_RAD,
    COL_ST_TEFF, Catalog, ClassifiedPlanet, PlanetRecord,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog snapshot from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with native column names (what [`write_csv`] produces)
/// * `.json`    – `[{ "pl_name": "...", "pl_orbper": 12.3, ... }, ...]`
/// * `.parquet` – one column per native name (e.g. `df.to_parquet()`)
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} records from {}", catalog.len(), path.display());
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array, the shape returned by the archive's
/// `format=json` output. Every object must carry every catalog column;
/// `null` marks a missing value.
pub fn parse_json_records(text: &str) -> Result<Catalog> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if let Some(col) = CATALOG_COLUMNS.iter().find(|col| !obj.contains_key(**col)) {
            bail!("JSON row {i} missing '{col}' column");
        }
    }

    let records: Vec<PlanetRecord> =
        serde_json::from_value(root).context("parsing JSON catalog records")?;
    Ok(Catalog::new(records))
}

fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Catalog> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Read catalog rows from any CSV source. Columns are found by header name,
/// so extra columns and reordering are tolerated.
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Catalog> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let index_of = |col: &str| {
        headers
            .iter()
            .position(|h| h == col)
            .with_context(|| format!("CSV missing '{col}' column"))
    };
    let name_idx = index_of(COL_NAME)?;
    let idx = [
        index_of(COL_ORBPER)?,
        index_of(COL_RADE)?,
        index_of(COL_MASSE)?,
        index_of(COL_ST_MASS)?,
        index_of(COL_ST_RAD)?,
        index_of(COL_ST_TEFF)?,
    ];

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let num = |i: usize| -> Result<Option<f64>> {
            parse_cell(row.get(i).unwrap_or(""))
                .with_context(|| format!("CSV row {row_no}, column '{}'", headers[i]))
        };
        records.push(PlanetRecord {
            name: row.get(name_idx).unwrap_or("").to_string(),
            orbital_period: num(idx[0])?,
            radius: num(idx[1])?,
            mass: num(idx[2])?,
            stellar_mass: num(idx[3])?,
            stellar_radius: num(idx[4])?,
            stellar_teff: num(idx[5])?,
        });
    }

    Ok(Catalog::new(records))
}

/// Empty cells and `nan` are missing values; anything else must be a number.
fn parse_cell(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let v = s
        .parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))?;
    Ok(Some(v))
}

/// Write a full-replacement snapshot with the native column names.
pub fn write_csv(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut writer = create_writer(path)?;
    if catalog.is_empty() {
        writer.write_record(CATALOG_COLUMNS)?;
    }
    for rec in catalog.iter() {
        writer
            .serialize(rec)
            .with_context(|| format!("writing record '{}'", rec.name))?;
    }
    writer.flush().context("flushing CSV")?;
    log::info!("Wrote {} records to {}", catalog.len(), path.display());
    Ok(())
}

#[derive(Serialize)]
struct ClassifiedRow<'a> {
    pl_name: &'a str,
    pl_orbper: Option<f64>,
    pl_rade: Option<f64>,
    pl_masse: Option<f64>,
    st_mass: Option<f64>,
    st_rad: Option<f64>,
    st_teff: Option<f64>,
    distance_au: Option<f64>,
    habitable: bool,
}

/// Export classified rows: the catalog columns plus `distance_au` and
/// `habitable`.
pub fn write_classified_csv(path: &Path, planets: &[ClassifiedPlanet]) -> Result<()> {
    let mut writer = create_writer(path)?;
    for p in planets {
        let r = &p.record;
        writer.serialize(ClassifiedRow {
            pl_name: &r.name,
            pl_orbper: r.orbital_period,
            pl_rade: r.radius,
            pl_masse: r.mass,
            st_mass: r.stellar_mass,
            st_rad: r.stellar_radius,
            st_teff: r.stellar_teff,
            distance_au: p.distance_au,
            habitable: p.habitable,
        })?;
    }
    writer.flush().context("flushing CSV")?;
    log::info!("Exported {} classified records to {}", planets.len(), path.display());
    Ok(())
}

fn create_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per native catalog name.
///
/// Numeric columns may be Float64, Float32, Int64 or Int32; nulls are
/// missing values. Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let names = column_by_name(&batch, COL_NAME)?;
        let numeric = [
            column_by_name(&batch, COL_ORBPER)?,
            column_by_name(&batch, COL_RADE)?,
            column_by_name(&batch, COL_MASSE)?,
            column_by_name(&batch, COL_ST_MASS)?,
            column_by_name(&batch, COL_ST_RAD)?,
            column_by_name(&batch, COL_ST_TEFF)?,
        ];

        for row in 0..batch.num_rows() {
            let num = |i: usize| {
                extract_f64(numeric[i], row)
                    .with_context(|| format!("Row {row}: column {}", CATALOG_COLUMNS[i + 1]))
            };
            records.push(PlanetRecord {
                name: extract_string(names, row)?,
                orbital_period: num(0)?,
                radius: num(1)?,
                mass: num(2)?,
                stellar_mass: num(3)?,
                stellar_radius: num(4)?,
                stellar_teff: num(5)?,
            });
        }
    }

    Ok(Catalog::new(records))
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string name column, got {other:?}"),
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| parse_cell(a.value(row)))
            .transpose()?
            .flatten(),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value)
}
