//! # Output artifact assembly
//!
//! Packs one run's results into the named-dimension / named-field layout the
//! downstream persistence and plotting tools consume: two dimensions (latitude
//! bin centers, gate longitudes) and twelve 2-D fields — historical
//! total/east-west/west-east plus mean/upper/lower for the synthetic ensemble —
//! each carrying descriptive metadata.
//!
//! Field naming keeps the generator suite's convention: `_ew` marks
//! east-to-west crossings (westward motion), `_we` west-to-east (eastward).
//!
//! Writing anything richer than the JSON archival form (e.g. netCDF) is the
//! consumer's concern.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;

use camino::Utf8Path;
use nalgebra::DMatrix;
use serde::Serialize;
use tracing::debug;

use crate::grid::GateGrid;
use crate::histogram::CrossingHistograms;
use crate::statistics::EnsembleSummary;

/// Units shared by every crossing-rate field.
pub const CROSSING_UNITS: &str = "number of crossings per year";

/// One named coordinate axis of the output grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDimension {
    pub name: String,
    pub long_name: String,
    pub units: String,
    pub axis: String,
    pub values: Vec<f64>,
}

/// One named 2-D field (latitude bin × gate) with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridField {
    pub name: String,
    pub long_name: String,
    pub units: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<u32>,
    pub values: DMatrix<f64>,
}

/// The complete output artifact of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossingGridFile {
    pub attributes: BTreeMap<String, String>,
    pub dimensions: Vec<GridDimension>,
    pub fields: Vec<GridField>,
}

fn field(
    name: &str,
    long_name: &str,
    percentile: Option<u32>,
    values: &DMatrix<f64>,
) -> GridField {
    GridField {
        name: name.to_string(),
        long_name: long_name.to_string(),
        units: CROSSING_UNITS.to_string(),
        percentile,
        values: values.clone(),
    }
}

/// Expand one histogram triple into its three named fields.
///
/// `prefix`/`infix` build the generator suite's names: `hist`, `hist_ew`,
/// `hist_we`, `syn_mean`, `syn_mean_ew`, … with `_ew` fed by the westward
/// matrix and `_we` by the eastward one.
fn direction_fields(
    base: &str,
    long_base: &str,
    percentile: Option<u32>,
    histograms: &CrossingHistograms,
) -> [GridField; 3] {
    [
        field(base, long_base, percentile, &histograms.total),
        field(
            &format!("{base}_ew"),
            &format!("{long_base} - east-west crossings"),
            percentile,
            &histograms.westward,
        ),
        field(
            &format!("{base}_we"),
            &format!("{long_base} - west-east crossings"),
            percentile,
            &histograms.eastward,
        ),
    ]
}

/// Assemble the full output artifact from one run's results.
pub fn assemble(
    grid: &GateGrid,
    attributes: BTreeMap<String, String>,
    historic: &CrossingHistograms,
    summary: &EnsembleSummary,
) -> CrossingGridFile {
    let dimensions = vec![
        GridDimension {
            name: "lat".to_string(),
            long_name: "Latitude".to_string(),
            units: "degrees_north".to_string(),
            axis: "Y".to_string(),
            values: grid.bin_centers(),
        },
        GridDimension {
            name: "lon".to_string(),
            long_name: "Longitude".to_string(),
            units: "degrees_east".to_string(),
            axis: "X".to_string(),
            values: grid.gate_lons().to_vec(),
        },
    ];

    let mut fields = Vec::with_capacity(12);
    fields.extend(direction_fields(
        "hist",
        "Historical longitudinal crossing rate",
        None,
        historic,
    ));
    fields.extend(direction_fields(
        "syn_mean",
        "Mean synthetic longitudinal crossing rate",
        None,
        &summary.mean,
    ));
    fields.extend(direction_fields(
        "syn_upper",
        "Upper percentile synthetic longitudinal crossing rate",
        Some(95),
        &summary.upper,
    ));
    fields.extend(direction_fields(
        "syn_lower",
        "Lower percentile synthetic longitudinal crossing rate",
        Some(5),
        &summary.lower,
    ));

    CrossingGridFile {
        attributes,
        dimensions,
        fields,
    }
}

impl CrossingGridFile {
    /// Borrow a field by name.
    pub fn field(&self, name: &str) -> Option<&GridField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Write the artifact as JSON for archival and further processing.
    pub fn write_json(&self, path: &Utf8Path) -> Result<(), crate::LoncrossError> {
        debug!("saving longitude crossing data to {path}");
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}
