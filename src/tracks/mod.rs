//! # Tracks: ingestion and resampling
//!
//! Container types for tropical-cyclone tracks and the two providers the
//! evaluation consumes them through:
//!
//! * [`csv_reader`] – raw-record reader for the generator's track CSV files,
//!   segmenting multi-track files by their per-record cyclone identifier.
//! * [`interpolate`] – fixed-timestep linear resampling, used for the
//!   historical track set so its sampling matches the synthetic sets.
//!
//! Data Model
//! -----------------
//! * [`TrackPoint`] – one time sample: position in degrees, elapsed hours, and
//!   auxiliary attributes (central pressure) the crossing core never reads.
//! * [`Track`] – an ordered, time-indexed sequence of points for one cyclone.
//!
//! Tracks are read-only inputs: the crossing evaluation never mutates them.

pub mod csv_reader;
pub mod interpolate;

use crate::constants::{Degree, Hour, Pascal, TrackId};
use crate::geometry::Point;

/// One time sample of a cyclone track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub longitude: Degree,
    pub latitude: Degree,
    /// Hours since the first record of the parent file.
    pub time_elapsed: Hour,
    /// Auxiliary attribute, unused by the crossing core.
    pub central_pressure: Pascal,
}

impl TrackPoint {
    /// Planar position of this sample.
    #[inline]
    pub fn position(&self) -> Point {
        Point {
            lon: self.longitude,
            lat: self.latitude,
        }
    }
}

/// An ordered, time-indexed sequence of points for one cyclone.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(id: TrackId, points: Vec<TrackPoint>) -> Self {
        Track { id, points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
