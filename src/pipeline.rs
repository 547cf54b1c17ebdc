use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::data::classify::{HabitabilityPolicy, classify};
use crate::data::fetch::{CatalogSource, SnapshotSource, TapArchive};
use crate::data::filter::drop_incomplete;
use crate::data::loader;
use crate::data::model::{Catalog, ClassifiedPlanet};

// ---------------------------------------------------------------------------
// fetch → persist raw → clean → persist cleaned → classify
// ---------------------------------------------------------------------------

/// Everything one run produces, handed to the dashboard as-is.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub raw: Catalog,
    pub cleaned: Catalog,
    pub classified: Vec<ClassifiedPlanet>,
    pub policy: HabitabilityPolicy,
}

/// Pick the catalog source described by the config.
pub fn source_from_config(config: &Config) -> Box<dyn CatalogSource> {
    let catalog = &config.catalog;
    if catalog.offline {
        Box::new(SnapshotSource {
            path: config.output.raw_csv.clone(),
        })
    } else {
        Box::new(TapArchive::new(
            catalog.endpoint.clone(),
            catalog.table.clone(),
            catalog.columns.clone(),
            catalog.timeout(),
            catalog.max_response_bytes,
        ))
    }
}

/// Run every stage once. The first failure aborts the run.
pub fn run(source: &dyn CatalogSource, config: &Config) -> Result<PipelineOutput> {
    log::info!("Fetching catalog from {}", source.describe());
    let raw = source
        .fetch()
        .with_context(|| format!("fetching catalog from {}", source.describe()))?;

    if source.is_remote() {
        loader::write_csv(&config.output.raw_csv, &raw).context("persisting raw snapshot")?;
    }

    let cleaned = drop_incomplete(&raw);
    loader::write_csv(&config.output.cleaned_csv, &cleaned)
        .context("persisting cleaned snapshot")?;
    log::info!(
        "Data cleaning complete: {} of {} records kept, saved as {}",
        cleaned.len(),
        raw.len(),
        config.output.cleaned_csv.display()
    );

    let classified = classify(&cleaned, config.policy);
    Ok(PipelineOutput {
        raw,
        cleaned,
        classified,
        policy: config.policy,
    })
}

/// Clean and classify a snapshot picked interactively. Nothing is written.
pub fn rebuild_from_snapshot(path: &Path, policy: HabitabilityPolicy) -> Result<PipelineOutput> {
    let raw = loader::load_file(path)?;
    let cleaned = drop_incomplete(&raw);
    let classified = classify(&cleaned, policy);
    Ok(PipelineOutput {
        raw,
        cleaned,
        classified,
        policy,
    })
}
