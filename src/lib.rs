//! # loncross — longitude-crossing rates for cyclone track ensembles
//!
//! Computes the rate at which tropical-cyclone tracks cross fixed reference
//! lines of longitude ("gates"), split by crossing direction, and compares one
//! historical track set against a large ensemble of synthetic track sets.
//!
//! ## Pipeline
//! -----------------
//! 1. [`grid`] – derive the gate longitudes and latitude bin edges from the
//!    configured region.
//! 2. [`geometry`] – segment–gate intersection and direction classification.
//! 3. [`histogram`] – per-gate, latitude-binned crossing histograms
//!    (total / eastward / westward) for one track set.
//! 4. [`distributor`] – fan the ensemble members out to a worker pool, one
//!    histogram triple per member.
//! 5. [`statistics`] – mean and 5th/95th percentile band across the members.
//! 6. [`output`] – the named-dimension / named-field artifact for persistence
//!    and plotting.
//!
//! [`analysis::CrossingAnalysis`] wires the stages into one run.
//!
//! ## Quick-Start
//! -----------------
//! ```rust,no_run
//! use camino::Utf8Path;
//! use loncross::{AnalysisConfig, CrossingAnalysis, GridSpace, Region};
//!
//! # fn run() -> Result<(), loncross::LoncrossError> {
//! let config = AnalysisConfig {
//!     region: Region { x_min: 90.0, x_max: 180.0, y_min: -30.0, y_max: -5.0 },
//!     grid_space: GridSpace { x: 1.0, y: 1.0 },
//!     timestep: 1.0,
//!     track_file_prefix: "tracks".to_string(),
//! };
//!
//! let analysis = CrossingAnalysis::new(config)?;
//! let output = analysis.run(
//!     Utf8Path::new("input/historic.csv"),
//!     Utf8Path::new("output/tracks"),
//!     8,
//! )?;
//! output.write_json(Utf8Path::new("output/process/lon_crossings.json"))?;
//! # Ok(()) }
//! ```

pub mod analysis;
pub mod config;
pub mod constants;
pub mod distributor;
pub mod geometry;
pub mod grid;
pub mod histogram;
pub mod loncross_errors;
pub mod output;
pub mod statistics;
pub mod tracks;

pub use analysis::CrossingAnalysis;
pub use config::{AnalysisConfig, GridSpace, Region};
pub use grid::{Gate, GateGrid};
pub use histogram::CrossingHistograms;
pub use loncross_errors::LoncrossError;
pub use output::CrossingGridFile;
pub use statistics::EnsembleSummary;
