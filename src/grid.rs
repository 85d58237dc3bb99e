//! # Crossing gates and latitude bins
//!
//! Derives the fixed geometry of one evaluation run from a [`Region`] and its
//! base [`GridSpace`]: the set of reference longitudes ("gates") every track is
//! tested against, and the shared latitude bin edges the crossing latitudes are
//! histogrammed into.
//!
//! ## Overview
//! -----------------
//! * Base ranges are generated with numpy-style `arange` semantics (half-open,
//!   `ceil((stop-start)/step)` points) with a small upper-bound tolerance.
//! * Gates sit every [`GATE_SPACING`] degrees over the base longitude range;
//!   the half-step [`GATE_TOL`] tolerance keeps the maximum longitude included.
//! * Latitude bin edges sit every [`LAT_BIN_WIDTH`] degrees under the same rule.
//!
//! The grid is built once per run and is immutable thereafter; every worker
//! shares it read-only.

use crate::config::{GridSpace, Region};
use crate::constants::{Degree, GATE_SPACING, GATE_TOL, LAT_BIN_WIDTH, RANGE_TOL};

/// numpy-style `arange`: `start, start+step, …` strictly below `stop`.
pub(crate) fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// One vertical reference line of constant longitude.
///
/// The gate spans the full latitude extent of the bin edges, oriented top to
/// bottom: a positive side value (see [`side_of`](crate::geometry::side_of))
/// means a point lies **east** of the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    pub lon: Degree,
    pub lat_top: Degree,
    pub lat_bottom: Degree,
}

/// Fixed gate/bin geometry of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GateGrid {
    gate_lons: Vec<Degree>,
    lat_bin_edges: Vec<Degree>,
}

impl GateGrid {
    /// Derive the gate longitudes and latitude bin edges for a region.
    ///
    /// Arguments
    /// -----------------
    /// * `region` – analysis bounds (validated upstream; `max > min` per axis).
    /// * `spacing` – base grid spacing generating the underlying ranges.
    ///
    /// Deterministic for finite, well-ordered bounds; no error conditions.
    pub fn new(region: &Region, spacing: &GridSpace) -> Self {
        let lon_range = arange(region.x_min, region.x_max + RANGE_TOL, spacing.x);
        let lat_range = arange(region.y_min, region.y_max + RANGE_TOL, spacing.y);

        let lon_max = *lon_range.last().expect("non-empty longitude range");
        let lat_max = *lat_range.last().expect("non-empty latitude range");

        GateGrid {
            gate_lons: arange(lon_range[0], lon_max + GATE_TOL, GATE_SPACING),
            lat_bin_edges: arange(lat_range[0], lat_max + GATE_TOL, LAT_BIN_WIDTH),
        }
    }

    /// Reference longitudes, ascending.
    #[inline]
    pub fn gate_lons(&self) -> &[Degree] {
        &self.gate_lons
    }

    /// Latitude bin edges shared by all gates, ascending.
    #[inline]
    pub fn lat_bin_edges(&self) -> &[Degree] {
        &self.lat_bin_edges
    }

    #[inline]
    pub fn n_gates(&self) -> usize {
        self.gate_lons.len()
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.lat_bin_edges.len().saturating_sub(1)
    }

    /// The `i`-th gate as a latitude-spanning vertical line.
    pub fn gate(&self, i: usize) -> Gate {
        Gate {
            lon: self.gate_lons[i],
            lat_top: *self.lat_bin_edges.last().expect("non-empty bin edges"),
            lat_bottom: self.lat_bin_edges[0],
        }
    }

    /// Iterate all gates in ascending longitude order.
    pub fn gates(&self) -> impl Iterator<Item = Gate> + '_ {
        (0..self.n_gates()).map(|i| self.gate(i))
    }

    /// Mid-points of the latitude bins, used as the output latitude dimension.
    pub fn bin_centers(&self) -> Vec<Degree> {
        self.lat_bin_edges
            .windows(2)
            .map(|w| 0.5 * (w[0] + w[1]))
            .collect()
    }
}
