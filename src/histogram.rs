//! # Crossing histograms
//!
//! Consumes the crossing events of one track set and produces the three
//! latitude-binned matrices the comparison works on: total crossings,
//! eastward crossings, and westward crossings, one column per gate.
//!
//! ## Normalization
//! -----------------
//! Each gate column is normalized to unit mass: a gate with at least one
//! crossing gets a column summing to 1, a gate with none stays all zero.
//! Binning follows the usual right-open convention with a right-inclusive
//! last bin, so a crossing exactly on the top edge is still counted.
//!
//! Iteration order over tracks and segments does not affect the result; only
//! the set of crossings matters.

use itertools::Itertools;
use nalgebra::DMatrix;
use tracing::debug;

use crate::constants::Degree;
use crate::geometry::{detect_crossing, Direction, Segment};
use crate::grid::GateGrid;
use crate::tracks::Track;

/// The (latitude-bin × gate) histogram triple for one track set.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingHistograms {
    pub total: DMatrix<f64>,
    pub eastward: DMatrix<f64>,
    pub westward: DMatrix<f64>,
}

impl CrossingHistograms {
    /// All-zero triple for a grid's shape.
    pub fn zeros(n_bins: usize, n_gates: usize) -> Self {
        CrossingHistograms {
            total: DMatrix::zeros(n_bins, n_gates),
            eastward: DMatrix::zeros(n_bins, n_gates),
            westward: DMatrix::zeros(n_bins, n_gates),
        }
    }

    /// (rows, columns) = (bin count, gate count).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.total.shape()
    }
}

/// Bin index for a latitude against ascending edges; `None` outside the span.
/// The last bin is right-inclusive.
fn bin_index(lat: Degree, edges: &[Degree]) -> Option<usize> {
    let first = *edges.first()?;
    let last = *edges.last()?;
    if lat < first || lat > last {
        return None;
    }
    let idx = edges.partition_point(|e| *e <= lat);
    Some(idx.saturating_sub(1).min(edges.len() - 2))
}

/// Write one gate's normalized column; an empty latitude list leaves it zero.
fn bin_column(matrix: &mut DMatrix<f64>, gate_idx: usize, lats: &[Degree], edges: &[Degree]) {
    if lats.is_empty() {
        return;
    }

    let mut counts = vec![0usize; edges.len() - 1];
    for &lat in lats {
        if let Some(i) = bin_index(lat, edges) {
            counts[i] += 1;
        }
    }

    let total: usize = counts.iter().sum();
    if total == 0 {
        return;
    }
    for (i, count) in counts.iter().enumerate() {
        matrix[(i, gate_idx)] = *count as f64 / total as f64;
    }
}

/// Compute the crossing histograms of a track set against a gate grid.
///
/// For each gate, every consecutive-point segment of every track is tested;
/// intersection latitudes are collected into the gate's total list and into
/// the eastward/westward list per the direction classification, then binned.
///
/// An empty track collection is a valid input and yields all-zero matrices.
pub fn find_crossings(tracks: &[Track], grid: &GateGrid) -> CrossingHistograms {
    debug!("processing {} tracks", tracks.len());
    let edges = grid.lat_bin_edges();
    let mut histograms = CrossingHistograms::zeros(grid.n_bins(), grid.n_gates());

    for (n, gate) in grid.gates().enumerate() {
        let mut lats: Vec<Degree> = Vec::new();
        let mut east: Vec<Degree> = Vec::new();
        let mut west: Vec<Degree> = Vec::new();

        for track in tracks {
            for (a, b) in track.points.iter().tuple_windows() {
                let segment = Segment {
                    start: a.position(),
                    end: b.position(),
                };
                if let Some(event) = detect_crossing(&segment, &gate) {
                    lats.push(event.lat);
                    match event.direction {
                        Some(Direction::Eastward) => east.push(event.lat),
                        Some(Direction::Westward) => west.push(event.lat),
                        None => {}
                    }
                }
            }
        }

        bin_column(&mut histograms.total, n, &lats, edges);
        bin_column(&mut histograms.eastward, n, &east, edges);
        bin_column(&mut histograms.westward, n, &west, edges);
    }

    histograms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridSpace, Region};
    use crate::tracks::TrackPoint;
    use approx::assert_relative_eq;

    fn grid() -> GateGrid {
        let region = Region {
            x_min: 90.0,
            x_max: 150.0,
            y_min: -30.0,
            y_max: -6.0,
        };
        GateGrid::new(&region, &GridSpace { x: 1.0, y: 1.0 })
    }

    fn track(points: &[(f64, f64)]) -> Track {
        Track::new(
            1,
            points
                .iter()
                .enumerate()
                .map(|(i, &(lon, lat))| TrackPoint {
                    longitude: lon,
                    latitude: lat,
                    time_elapsed: i as f64,
                    central_pressure: 100_000.0,
                })
                .collect(),
        )
    }

    fn column_sum(m: &DMatrix<f64>, col: usize) -> f64 {
        m.column(col).iter().sum()
    }

    #[test]
    fn single_clean_crossing_per_gate() {
        let grid = grid();
        let tracks = vec![track(&[(95.0, -15.0), (145.0, -15.0)])];
        let h = find_crossings(&tracks, &grid);

        // Gates 100..140 (indices 1..=5) are crossed once each, eastward.
        for gate_idx in 1..=5 {
            assert_relative_eq!(column_sum(&h.total, gate_idx), 1.0);
            assert_relative_eq!(column_sum(&h.eastward, gate_idx), 1.0);
            assert_relative_eq!(column_sum(&h.westward, gate_idx), 0.0);
        }
        // Gates 90 and 150 are not reached.
        assert_relative_eq!(column_sum(&h.total, 0), 0.0);
        assert_relative_eq!(column_sum(&h.total, 6), 0.0);

        // All mass sits in the -16..-14 bin (index 7 of edges -30..-6).
        assert_relative_eq!(h.total[(7, 3)], 1.0);
    }

    #[test]
    fn track_west_of_all_gates_yields_zero_histograms() {
        let grid = grid();
        let tracks = vec![track(&[(70.0, -15.0), (80.0, -12.0), (85.0, -18.0)])];
        let h = find_crossings(&tracks, &grid);
        assert_relative_eq!(h.total.sum(), 0.0);
        assert_relative_eq!(h.eastward.sum(), 0.0);
        assert_relative_eq!(h.westward.sum(), 0.0);
    }

    #[test]
    fn empty_track_set_is_not_an_error() {
        let grid = grid();
        let h = find_crossings(&[], &grid);
        assert_eq!(h.shape(), (grid.n_bins(), grid.n_gates()));
        assert_relative_eq!(h.total.sum(), 0.0);
    }

    #[test]
    fn directional_mass_never_exceeds_total() {
        let grid = grid();
        // Zig-zag across gate 110 twice east, once west.
        let tracks = vec![track(&[
            (105.0, -10.0),
            (115.0, -12.0),
            (108.0, -14.0),
            (118.0, -16.0),
        ])];
        let h = find_crossings(&tracks, &grid);

        let gate_idx = 2; // 110 E
        // Total holds three crossings, eastward two, westward one.
        assert_relative_eq!(column_sum(&h.total, gate_idx), 1.0);
        assert_relative_eq!(column_sum(&h.eastward, gate_idx), 1.0);
        assert_relative_eq!(column_sum(&h.westward, gate_idx), 1.0);
        for bin in 0..grid.n_bins() {
            let east_west =
                h.eastward[(bin, gate_idx)] * 2.0 / 3.0 + h.westward[(bin, gate_idx)] / 3.0;
            assert!(east_west <= h.total[(bin, gate_idx)] + 1e-12);
        }
    }

    #[test]
    fn columns_with_crossings_sum_to_one() {
        let grid = grid();
        let tracks = vec![
            track(&[(95.0, -15.0), (125.0, -9.0)]),
            track(&[(135.0, -25.0), (95.0, -20.0)]),
        ];
        let h = find_crossings(&tracks, &grid);

        for gate_idx in 0..grid.n_gates() {
            let sum = column_sum(&h.total, gate_idx);
            assert!(
                (sum - 1.0).abs() < 1e-12 || sum.abs() < 1e-12,
                "gate {gate_idx} column sums to {sum}"
            );
        }
    }

    #[test]
    fn bin_index_edges() {
        let edges = [-30.0, -28.0, -26.0];
        assert_eq!(bin_index(-30.0, &edges), Some(0));
        assert_eq!(bin_index(-29.0, &edges), Some(0));
        assert_eq!(bin_index(-28.0, &edges), Some(1)); // interior edge goes right
        assert_eq!(bin_index(-26.0, &edges), Some(1)); // top edge is inclusive
        assert_eq!(bin_index(-25.9, &edges), None);
        assert_eq!(bin_index(-30.1, &edges), None);
    }
}
