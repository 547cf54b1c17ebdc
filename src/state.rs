use crate::charts::{
    DistanceTeffSeries, Histogram, distance_teff_series, habitable_periods, habitable_teffs,
};
use crate::color::ChartColors;
use crate::config::DisplayConfig;
use crate::data::classify::{HabitabilityPolicy, classify};
use crate::data::model::ClassifiedPlanet;
use crate::pipeline::PipelineOutput;

pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 100;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Raw, cleaned and classified tables from the last run.
    pub output: PipelineOutput,

    /// Indices into `output.classified` of habitable planets (cached).
    pub habitable_indices: Vec<usize>,

    /// Bin count shared by both histograms.
    pub histogram_bins: usize,

    pub preview_rows: usize,
    pub author: String,
    pub bio: String,

    pub colors: ChartColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Where the data came from, for the top bar.
    pub source_label: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PipelineOutput::default(), &DisplayConfig::default(), String::new())
    }
}

impl AppState {
    pub fn new(output: PipelineOutput, display: &DisplayConfig, source_label: String) -> Self {
        let mut state = Self {
            output,
            habitable_indices: Vec::new(),
            histogram_bins: display.histogram_bins.clamp(MIN_BINS, MAX_BINS),
            preview_rows: display.preview_rows,
            author: display.author.clone(),
            bio: display.bio.clone(),
            colors: ChartColors::default(),
            status_message: None,
            source_label,
        };
        state.reindex();
        state
    }

    /// Replace the tables, e.g. after opening another snapshot.
    pub fn set_output(&mut self, output: PipelineOutput, source_label: String) {
        self.output = output;
        self.source_label = source_label;
        self.status_message = None;
        self.reindex();
    }

    pub fn policy(&self) -> HabitabilityPolicy {
        self.output.policy
    }

    /// Switch policy and reclassify the cleaned table.
    pub fn set_policy(&mut self, policy: HabitabilityPolicy) {
        if policy == self.output.policy {
            return;
        }
        self.output.classified = classify(&self.output.cleaned, policy);
        self.output.policy = policy;
        self.reindex();
    }

    pub fn set_histogram_bins(&mut self, bins: usize) {
        self.histogram_bins = bins.clamp(MIN_BINS, MAX_BINS);
    }

    fn reindex(&mut self) {
        self.habitable_indices = self
            .output
            .classified
            .iter()
            .enumerate()
            .filter(|(_, p)| p.habitable)
            .map(|(i, _)| i)
            .collect();
    }

    /// Habitable planets in catalog order.
    pub fn habitable(&self) -> impl Iterator<Item = &ClassifiedPlanet> {
        self.habitable_indices
            .iter()
            .map(|&i| &self.output.classified[i])
    }

    pub fn habitable_count(&self) -> usize {
        self.habitable_indices.len()
    }

    /// Records flagged by validation.
    pub fn flagged_count(&self) -> usize {
        self.output
            .classified
            .iter()
            .filter(|p| p.issue.is_some())
            .count()
    }

    /// The "About Me" paragraph.
    pub fn about(&self) -> String {
        format!("I am {}, {}", self.author, self.bio)
    }

    pub fn period_histogram(&self) -> Histogram {
        Histogram::from_values(&habitable_periods(&self.output.classified), self.histogram_bins)
    }

    pub fn teff_histogram(&self) -> Histogram {
        Histogram::from_values(&habitable_teffs(&self.output.classified), self.histogram_bins)
    }

    pub fn distance_series(&self) -> DistanceTeffSeries {
        distance_teff_series(&self.output.classified)
    }
}
