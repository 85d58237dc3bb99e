//! # Analysis configuration
//!
//! Region bounds, base grid spacings, and the handful of run parameters consumed
//! by the crossing evaluation. Loading from a concrete on-disk format is the
//! caller's concern; everything here derives [`serde::Deserialize`] so any
//! self-describing format plugs in.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hour};
use crate::loncross_errors::LoncrossError;

/// Geographic bounds of the analysis region, degrees.
///
/// Precondition (checked by [`AnalysisConfig::validate`]): `x_max > x_min` and
/// `y_max > y_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_min: Degree,
    pub x_max: Degree,
    pub y_min: Degree,
    pub y_max: Degree,
}

/// Base grid spacing of the analysis region, degrees per cell on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpace {
    pub x: Degree,
    pub y: Degree,
}

/// Full configuration of one crossing-rate evaluation.
///
/// Fields
/// -----------------
/// * `region` – analysis bounds, degrees.
/// * `grid_space` – base grid spacing; gates and latitude bins are derived from
///   the range this spacing generates, not from the spacing itself.
/// * `timestep` – resampling step for the historical track set, hours.
/// * `track_file_prefix` – file-name prefix selecting ensemble members inside
///   the track directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub region: Region,
    pub grid_space: GridSpace,
    #[serde(default = "default_timestep")]
    pub timestep: Hour,
    #[serde(default = "default_track_file_prefix")]
    pub track_file_prefix: String,
}

fn default_timestep() -> Hour {
    1.0
}

fn default_track_file_prefix() -> String {
    "tracks".to_string()
}

impl AnalysisConfig {
    /// Check the well-ordering preconditions the grid derivation relies on.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` when bounds are ordered and spacings are strictly positive.
    /// * `Err(LoncrossError::InvalidRegion)` otherwise, naming the offending pair.
    pub fn validate(&self) -> Result<(), LoncrossError> {
        if !(self.region.x_max > self.region.x_min) {
            return Err(LoncrossError::InvalidRegion(format!(
                "x_max ({}) must exceed x_min ({})",
                self.region.x_max, self.region.x_min
            )));
        }
        if !(self.region.y_max > self.region.y_min) {
            return Err(LoncrossError::InvalidRegion(format!(
                "y_max ({}) must exceed y_min ({})",
                self.region.y_max, self.region.y_min
            )));
        }
        if !(self.grid_space.x > 0.0) || !(self.grid_space.y > 0.0) {
            return Err(LoncrossError::InvalidRegion(format!(
                "grid spacing must be positive, got ({}, {})",
                self.grid_space.x, self.grid_space.y
            )));
        }
        if !(self.timestep > 0.0) {
            return Err(LoncrossError::InvalidRegion(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            region: Region {
                x_min: 90.0,
                x_max: 180.0,
                y_min: -30.0,
                y_max: -5.0,
            },
            grid_space: GridSpace { x: 1.0, y: 1.0 },
            timestep: 1.0,
            track_file_prefix: "tracks".to_string(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut c = config();
        c.region.x_max = c.region.x_min;
        assert!(matches!(
            c.validate(),
            Err(LoncrossError::InvalidRegion(_))
        ));
    }

    #[test]
    fn non_positive_spacing_rejected() {
        let mut c = config();
        c.grid_space.y = 0.0;
        assert!(matches!(
            c.validate(),
            Err(LoncrossError::InvalidRegion(_))
        ));
    }

    #[test]
    fn defaults_fill_in_on_deserialize() {
        let json = r#"{
            "region": {"x_min": 90.0, "x_max": 180.0, "y_min": -30.0, "y_max": -5.0},
            "grid_space": {"x": 1.0, "y": 1.0}
        }"#;
        let c: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.timestep, 1.0);
        assert_eq!(c.track_file_prefix, "tracks");
    }
}
