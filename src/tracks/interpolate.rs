//! # Fixed-timestep track resampling
//!
//! Linear resampling of a track onto a uniform time grid, used by the
//! historical path so its segment lengths match the synthetic generator's
//! output cadence. Positions and pressure interpolate linearly between the
//! bracketing samples; samples are assumed time-ordered (the readers preserve
//! file order and generator files are written in time order).

use camino::Utf8Path;
use tracing::debug;

use crate::constants::Hour;
use crate::loncross_errors::LoncrossError;
use crate::tracks::csv_reader::load_tracks;
use crate::tracks::{Track, TrackPoint};

#[inline]
fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + frac * (b - a)
}

/// Resample one track at a fixed `timestep` (hours) over its elapsed-time span.
///
/// The first sample is always kept; subsequent samples sit at
/// `t0 + k·timestep` up to the last original sample time. Tracks with fewer
/// than two points pass through unchanged.
pub fn resample_track(track: &Track, timestep: Hour) -> Track {
    if track.points.len() < 2 {
        return track.clone();
    }

    let t0 = track.points[0].time_elapsed;
    let t_end = track.points[track.points.len() - 1].time_elapsed;
    let steps = ((t_end - t0) / timestep).floor() as usize;

    let mut points = Vec::with_capacity(steps + 1);
    let mut upper = 1;
    for k in 0..=steps {
        let t = t0 + k as Hour * timestep;
        while upper < track.points.len() - 1 && track.points[upper].time_elapsed < t {
            upper += 1;
        }
        let (a, b) = (&track.points[upper - 1], &track.points[upper]);
        let span = b.time_elapsed - a.time_elapsed;
        let frac = if span > 0.0 {
            ((t - a.time_elapsed) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        points.push(TrackPoint {
            longitude: lerp(a.longitude, b.longitude, frac),
            latitude: lerp(a.latitude, b.latitude, frac),
            time_elapsed: t,
            central_pressure: lerp(a.central_pressure, b.central_pressure, frac),
        });
    }

    Track::new(track.id, points)
}

/// The interpolating provider: read a track file and resample every track.
///
/// Used for the historical stage; an unreadable file is fatal there, so the
/// I/O error propagates untouched.
pub fn load_tracks_interpolated(
    path: &Utf8Path,
    timestep: Hour,
) -> Result<Vec<Track>, LoncrossError> {
    let tracks = load_tracks(path)?;
    debug!("resampling {} tracks at {timestep} h", tracks.len());
    Ok(tracks
        .iter()
        .map(|track| resample_track(track, timestep))
        .collect())
}
