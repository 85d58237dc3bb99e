//! # Track CSV reader
//!
//! Raw-record reader for the track files written by the synthetic-track
//! generator (and for historical best-track files in the same layout).
//!
//! ## File format
//! -----------------
//! Comma-separated, `%`-prefixed comment lines, ten columns per record:
//!
//! ```text
//! CycloneNumber, Datetime, TimeElapsed, Longitude, Latitude, Speed,
//! Bearing, CentralPressure, EnvPressure, rMax
//! ```
//!
//! Units on disk: hours for `TimeElapsed`, degrees for positions and bearing,
//! kph for `Speed`, hPa for the pressures, km for `rMax`. Speed, bearing and
//! the pressures are converted on ingest (kph→m/s, compass bearing→math angle
//! in radians, hPa→Pa); empty numeric fields parse as zero.
//!
//! ## Error policy
//! -----------------
//! A file that cannot be **opened** surfaces `LoncrossError::Io`. A file that
//! opens but contains an unparsable record is treated as an **empty track
//! collection** (logged, not an error): absence of crossings is a valid
//! all-zero result downstream, and a corrupt ensemble member must not abort
//! the historical stage it never belonged to.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fs::File;

use ahash::RandomState;
use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::constants::{Degree, Hour, Mps, Pascal, Radian, TrackId, HPA_TO_PA, KPH_TO_MPS};
use crate::loncross_errors::LoncrossError;
use crate::tracks::{Track, TrackPoint};

/// One parsed line of a track file, all ten columns, units converted.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub cyclone_number: TrackId,
    pub datetime: String,
    pub time_elapsed: Hour,
    pub longitude: Degree,
    pub latitude: Degree,
    pub speed: Mps,
    /// Math-convention angle (radians), converted from the compass bearing.
    pub bearing: Radian,
    pub central_pressure: Pascal,
    pub env_pressure: Pascal,
    pub rmax: f64,
}

/// Compass bearing (clockwise from north) → math angle (anticlockwise from east).
#[inline]
fn bearing_to_theta(bearing: Radian) -> Radian {
    PI / 2.0 - bearing
}

fn parse_field(record: &StringRecord, idx: usize, line: u64) -> Result<f64, LoncrossError> {
    let raw = record.get(idx).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| LoncrossError::InvalidTrackRecord {
            line,
            reason: format!("column {idx} is not numeric: {raw:?}"),
        })
}

/// Parse one CSV record into a [`TrackRecord`].
fn parse_record(record: &StringRecord, line: u64) -> Result<TrackRecord, LoncrossError> {
    if record.len() != 10 {
        return Err(LoncrossError::InvalidTrackRecord {
            line,
            reason: format!("expected 10 columns, found {}", record.len()),
        });
    }

    Ok(TrackRecord {
        cyclone_number: parse_field(record, 0, line)? as TrackId,
        datetime: record.get(1).unwrap_or("").trim().to_string(),
        time_elapsed: parse_field(record, 2, line)?,
        longitude: parse_field(record, 3, line)?,
        latitude: parse_field(record, 4, line)?,
        speed: parse_field(record, 5, line)? * KPH_TO_MPS,
        bearing: bearing_to_theta(parse_field(record, 6, line)?.to_radians()),
        central_pressure: parse_field(record, 7, line)? * HPA_TO_PA,
        env_pressure: parse_field(record, 8, line)? * HPA_TO_PA,
        rmax: parse_field(record, 9, line)?,
    })
}

/// Read every record of a track file.
///
/// Return
/// ----------
/// * `Ok(records)` – all records, in file order. An unparsable record demotes
///   the **whole file** to an empty collection (see module docs).
/// * `Err(LoncrossError::Io)` – the file could not be opened or read.
pub fn read_track_records(path: &Utf8Path) -> Result<Vec<TrackRecord>, LoncrossError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'%'))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let line = i as u64 + 1;
        let parsed = result
            .map_err(LoncrossError::from)
            .and_then(|r| parse_record(&r, line));
        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("discarding track file {path}: {e}");
                return Ok(Vec::new());
            }
        }
    }
    Ok(records)
}

/// Group records into per-cyclone tracks.
///
/// Identifiers are assumed dense positive integers starting at 1; the maximum
/// identifier observed bounds the grouping, and identifiers with no records
/// are skipped. Point order within a track follows file order.
pub fn group_tracks(records: Vec<TrackRecord>) -> Vec<Track> {
    let mut by_id: HashMap<TrackId, Vec<TrackPoint>, RandomState> = HashMap::default();
    let mut max_id = 0;
    for record in records {
        max_id = max_id.max(record.cyclone_number);
        by_id
            .entry(record.cyclone_number)
            .or_default()
            .push(TrackPoint {
                longitude: record.longitude,
                latitude: record.latitude,
                time_elapsed: record.time_elapsed,
                central_pressure: record.central_pressure,
            });
    }

    let mut tracks = Vec::new();
    for id in 1..=max_id {
        if let Some(points) = by_id.remove(&id) {
            tracks.push(Track::new(id, points));
        }
    }
    tracks
}

/// Read a track file and return its per-cyclone [`Track`]s.
///
/// This is the raw-record provider used for ensemble members: no resampling,
/// grouping by the per-record cyclone identifier.
pub fn load_tracks(path: &Utf8Path) -> Result<Vec<Track>, LoncrossError> {
    let records = read_track_records(path)?;
    let tracks = group_tracks(records);
    debug!("loaded {} tracks from {path}", tracks.len());
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    const LINE: &[&str] = &[
        "1",
        "2010-01-15 06:00:00",
        "6.0",
        "112.5",
        "-11.2",
        "18.0",
        "90.0",
        "985.0",
        "1005.0",
        "32.5",
    ];

    #[test]
    fn parses_and_converts_units() {
        let r = parse_record(&record(LINE), 1).unwrap();
        assert_eq!(r.cyclone_number, 1);
        assert_relative_eq!(r.time_elapsed, 6.0);
        assert_relative_eq!(r.longitude, 112.5);
        assert_relative_eq!(r.latitude, -11.2);
        assert_relative_eq!(r.speed, 5.0);
        assert_relative_eq!(r.bearing, 0.0); // due east
        assert_relative_eq!(r.central_pressure, 98_500.0);
        assert_relative_eq!(r.env_pressure, 100_500.0);
    }

    #[test]
    fn empty_numeric_fields_parse_as_zero() {
        let mut fields = LINE.to_vec();
        fields[5] = "";
        fields[7] = "";
        let r = parse_record(&record(&fields), 1).unwrap();
        assert_relative_eq!(r.speed, 0.0);
        assert_relative_eq!(r.central_pressure, 0.0);
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let mut fields = LINE.to_vec();
        fields[3] = "east";
        assert!(matches!(
            parse_record(&record(&fields), 7),
            Err(LoncrossError::InvalidTrackRecord { line: 7, .. })
        ));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        assert!(parse_record(&record(&["1", "2"]), 1).is_err());
    }

    #[test]
    fn grouping_follows_dense_identifiers() {
        let mut records = Vec::new();
        for (id, lon) in [(1, 100.0), (1, 101.0), (3, 120.0), (2, 110.0)] {
            let mut fields = LINE.to_vec();
            let id_s = id.to_string();
            let lon_s = lon.to_string();
            fields[0] = &id_s;
            fields[3] = &lon_s;
            records.push(parse_record(&record(&fields), 1).unwrap());
        }

        let tracks = group_tracks(records);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].id, 1);
        assert_eq!(tracks[0].len(), 2);
        assert_eq!(tracks[1].id, 2);
        assert_relative_eq!(tracks[2].points[0].longitude, 120.0);
    }

    #[test]
    fn no_records_means_no_tracks() {
        assert!(group_tracks(Vec::new()).is_empty());
    }
}
