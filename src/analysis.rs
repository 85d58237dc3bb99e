//! # Crossing-rate analysis facade
//!
//! Wires the pieces of one evaluation run together: gate geometry from the
//! configuration, the historical stage through the interpolating provider, the
//! synthetic stage through the worker pool, and the final artifact assembly.
//!
//! ## Stage model
//! -----------------
//! Each stage returns an immutable result that is threaded into the next; no
//! state accumulates on the facade beyond the fixed grid. The historical stage
//! completes before the ensemble stage starts — the worker pool only exists
//! inside the ensemble stage, so the inter-stage barrier is structural.
//!
//! ## Error policy
//! -----------------
//! An unreadable historical source is fatal: comparing the ensemble against a
//! silently empty historical set would be misleading. Ensemble failures abort
//! the run after the distribution barrier (see [`crate::distributor`]). Either
//! way, no partial artifact is written.

use std::collections::BTreeMap;

use camino::Utf8Path;
use tracing::{error, info};

use crate::config::AnalysisConfig;
use crate::distributor::{discover_members, run_ensemble};
use crate::grid::GateGrid;
use crate::histogram::{find_crossings, CrossingHistograms};
use crate::loncross_errors::LoncrossError;
use crate::output::{assemble, CrossingGridFile};
use crate::statistics::{summarize, EnsembleSummary};
use crate::tracks::interpolate::load_tracks_interpolated;

/// One configured longitude-crossing evaluation.
#[derive(Debug, Clone)]
pub struct CrossingAnalysis {
    config: AnalysisConfig,
    grid: GateGrid,
}

impl CrossingAnalysis {
    /// Validate the configuration and derive the gate geometry.
    pub fn new(config: AnalysisConfig) -> Result<Self, LoncrossError> {
        config.validate()?;
        let grid = GateGrid::new(&config.region, &config.grid_space);
        Ok(CrossingAnalysis { config, grid })
    }

    /// The fixed gate/bin geometry of this run.
    #[inline]
    pub fn grid(&self) -> &GateGrid {
        &self.grid
    }

    /// Historical stage: resample the input track set at the configured
    /// timestep and compute its crossing histograms.
    ///
    /// An unreadable input file aborts the run.
    pub fn historic(&self, input_file: &Utf8Path) -> Result<CrossingHistograms, LoncrossError> {
        info!("processing historical tracks for longitude crossings");
        let tracks =
            load_tracks_interpolated(input_file, self.config.timestep).map_err(|e| {
                error!("cannot load historical track file {input_file}: {e}");
                e
            })?;
        Ok(find_crossings(&tracks, &self.grid))
    }

    /// Synthetic stage: discover the ensemble members under `track_dir`,
    /// distribute them across `workers`, and reduce the stack.
    pub fn synthetic(
        &self,
        track_dir: &Utf8Path,
        workers: usize,
    ) -> Result<EnsembleSummary, LoncrossError> {
        info!("processing synthetic rates of longitude crossing");
        let members = discover_members(track_dir, &self.config.track_file_prefix)?;
        let stack = run_ensemble(&members, workers, &self.grid)?;
        summarize(&stack)
    }

    /// Run the full evaluation and assemble the output artifact.
    pub fn run(
        &self,
        input_file: &Utf8Path,
        track_dir: &Utf8Path,
        workers: usize,
    ) -> Result<CrossingGridFile, LoncrossError> {
        let historic = self.historic(input_file)?;
        let summary = self.synthetic(track_dir, workers)?;
        Ok(assemble(
            &self.grid,
            self.global_attributes(),
            &historic,
            &summary,
        ))
    }

    /// Global attributes recorded on the output artifact.
    fn global_attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            "history".to_string(),
            "Longitude crossing rates for synthetic track ensemble".to_string(),
        );
        attributes.insert(
            "version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        attributes.insert(
            "region".to_string(),
            format!(
                "lon [{}, {}], lat [{}, {}]",
                self.config.region.x_min,
                self.config.region.x_max,
                self.config.region.y_min,
                self.config.region.y_max
            ),
        );
        attributes.insert(
            "grid_space".to_string(),
            format!("({}, {})", self.config.grid_space.x, self.config.grid_space.y),
        );
        attributes
    }
}
