//! # Constants and type definitions for loncross
//!
//! This module centralizes the **grid constants**, **numerical tolerances**, and **common type
//! definitions** used throughout the `loncross` library.
//!
//! ## Overview
//!
//! - Gate and latitude-bin spacings shared by every analysis run
//! - Range-generation tolerances matching the evaluation grids
//! - Unit conversions applied by the track readers
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the gate grid, the crossing
//! detector, and the ensemble statistics.

// -------------------------------------------------------------------------------------------------
// Grid constants
// -------------------------------------------------------------------------------------------------

/// Longitude spacing between consecutive crossing gates, degrees
pub const GATE_SPACING: Degree = 10.0;

/// Latitude width of one histogram bin, degrees
pub const LAT_BIN_WIDTH: Degree = 2.0;

/// Upper-bound tolerance when generating the base longitude/latitude ranges
pub const RANGE_TOL: Degree = 0.1;

/// Upper-bound tolerance when generating gate longitudes and latitude bin edges,
/// so the maximum of the base range is always included.
pub const GATE_TOL: Degree = 0.5;

// -------------------------------------------------------------------------------------------------
// Numerical tolerances and unit conversions
// -------------------------------------------------------------------------------------------------

/// Determinant magnitude below which two segments are treated as parallel
pub const INTERSECT_EPS: f64 = 1e-12;

/// Kilometres per hour → metres per second
pub const KPH_TO_MPS: f64 = 1000.0 / 3600.0;

/// Hectopascal → Pascal
pub const HPA_TO_PA: f64 = 100.0;

/// Upper percentile of the ensemble variability band
pub const UPPER_PERCENTILE: f64 = 95.0;

/// Lower percentile of the ensemble variability band
pub const LOWER_PERCENTILE: f64 = 5.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Elapsed time in hours
pub type Hour = f64;
/// Pressure in Pascal
pub type Pascal = f64;
/// Speed in metres per second
pub type Mps = f64;
/// Angle in radians
pub type Radian = f64;

/// Identifier of one cyclone track within a track file (dense, starting at 1)
pub type TrackId = u32;
