//! # Segment–gate crossing detection
//!
//! Planar line-segment geometry for the crossing evaluation: the proper
//! segment–segment intersection test, the half-plane side predicate, and the
//! directional classification of a crossing.
//!
//! ## Overview
//! -----------------
//! * [`segment_intersection`] solves the 2×2 system for the two segment
//!   parameterizations and reports a point only when both parameters fall in
//!   `[0, 1]` (inclusive) and the determinant is non-zero beyond
//!   [`INTERSECT_EPS`]. Parallel and collinear pairs report no intersection.
//! * [`side_of`] is the cross-product sign test relative to a gate's
//!   top→bottom line; positive means **east** of the gate.
//! * [`detect_crossing`] combines both into a [`CrossingEvent`], classifying
//!   the motion as eastward (toward increasing longitude) or westward.
//!
//! All functions are pure and never fail on finite coordinates; degenerate
//! geometry (zero-length segments, segments lying along a gate) simply yields
//! no intersection.

use nalgebra::{Matrix2, Vector2};

use crate::constants::{Degree, INTERSECT_EPS};
use crate::grid::Gate;

/// A planar coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lon: Degree,
    pub lat: Degree,
}

/// One step of a trajectory between two consecutive time samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Direction of motion across a gate.
///
/// `Eastward` is motion toward increasing longitude (the track starts west of
/// the gate and ends on or east of it); `Westward` is the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Eastward,
    Westward,
}

/// One crossing of a gate by a track segment.
///
/// `direction` is `None` for the degenerate tie where both segment endpoints
/// evaluate to side 0 (the segment lies along the gate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    pub lat: Degree,
    pub direction: Option<Direction>,
}

/// Proper segment–segment intersection.
///
/// Solves `a.start + t·da = b.start + u·db` for `(t, u)` and accepts the
/// solution only when both parameters lie within `[0, 1]` inclusive.
///
/// Return
/// ----------
/// * `Some(point)` – the intersection point inside both segments' extents.
/// * `None` – no intersection, or the segments are parallel/collinear
///   (determinant within [`INTERSECT_EPS`] of zero).
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<Point> {
    let da = Vector2::new(a.end.lon - a.start.lon, a.end.lat - a.start.lat);
    let db = Vector2::new(b.end.lon - b.start.lon, b.end.lat - b.start.lat);

    let m = Matrix2::new(da.x, -db.x, da.y, -db.y);
    if m.determinant().abs() <= INTERSECT_EPS {
        return None;
    }

    let rhs = Vector2::new(b.start.lon - a.start.lon, b.start.lat - a.start.lat);
    let params = m.try_inverse()? * rhs;
    let (t, u) = (params.x, params.y);

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(Point {
        lon: a.start.lon + t * da.x,
        lat: a.start.lat + t * da.y,
    })
}

/// Signed side of `p` relative to the line through `gate`, oriented top→bottom.
///
/// With that orientation the sign reduces to
/// `(lat_top − lat_bottom) · (p.lon − gate.lon)`: positive east of the gate,
/// negative west, zero on the line.
#[inline]
pub fn side_of(gate: &Gate, p: &Point) -> f64 {
    let a = Point {
        lon: gate.lon,
        lat: gate.lat_top,
    };
    let b = Point {
        lon: gate.lon,
        lat: gate.lat_bottom,
    };
    (b.lon - a.lon) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lon - a.lon)
}

/// Classify a crossing from the side values of the segment endpoints.
///
/// The non-strict/strict pairing is deliberate: a segment with one endpoint
/// exactly on the gate still gets exactly one direction, and the first match
/// wins. Both sides exactly zero (segment along the gate) yields `None`.
fn classify(start_side: f64, end_side: f64) -> Option<Direction> {
    if (start_side < 0.0 && end_side >= 0.0) || (start_side <= 0.0 && end_side > 0.0) {
        Some(Direction::Eastward)
    } else if (start_side > 0.0 && end_side <= 0.0) || (start_side >= 0.0 && end_side < 0.0) {
        Some(Direction::Westward)
    } else {
        None
    }
}

/// Test one track segment against one gate.
///
/// Return
/// ----------
/// * `Some(CrossingEvent)` – the segment crosses the gate; `lat` is the
///   intersection latitude and `direction` the classified motion.
/// * `None` – no crossing (including parallel/collinear/degenerate geometry).
pub fn detect_crossing(segment: &Segment, gate: &Gate) -> Option<CrossingEvent> {
    let gate_segment = Segment {
        start: Point {
            lon: gate.lon,
            lat: gate.lat_top,
        },
        end: Point {
            lon: gate.lon,
            lat: gate.lat_bottom,
        },
    };

    let hit = segment_intersection(segment, &gate_segment)?;
    let direction = classify(side_of(gate, &segment.start), side_of(gate, &segment.end));

    Some(CrossingEvent {
        lat: hit.lat,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gate(lon: Degree) -> Gate {
        Gate {
            lon,
            lat_top: -6.0,
            lat_bottom: -30.0,
        }
    }

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment {
            start: Point { lon: x0, lat: y0 },
            end: Point { lon: x1, lat: y1 },
        }
    }

    #[test]
    fn clean_crossing_reports_intersection_latitude() {
        let event = detect_crossing(&seg(105.0, -12.0, 115.0, -16.0), &gate(110.0)).unwrap();
        assert_relative_eq!(event.lat, -14.0);
        assert_eq!(event.direction, Some(Direction::Eastward));
    }

    #[test]
    fn westward_motion_classified() {
        let event = detect_crossing(&seg(115.0, -14.0, 105.0, -14.0), &gate(110.0)).unwrap();
        assert_eq!(event.direction, Some(Direction::Westward));
    }

    #[test]
    fn segment_short_of_gate_does_not_cross() {
        assert!(detect_crossing(&seg(100.0, -14.0, 109.0, -14.0), &gate(110.0)).is_none());
    }

    #[test]
    fn segment_outside_gate_latitude_extent_does_not_cross() {
        // Crosses the infinite line of the gate, but north of its latitude span.
        assert!(detect_crossing(&seg(105.0, -2.0, 115.0, -2.0), &gate(110.0)).is_none());
    }

    #[test]
    fn parallel_segment_reports_no_intersection() {
        assert!(detect_crossing(&seg(110.0, -20.0, 110.0, -10.0), &gate(110.0)).is_none());
        assert!(detect_crossing(&seg(105.0, -20.0, 105.0, -10.0), &gate(110.0)).is_none());
    }

    #[test]
    fn zero_length_segment_reports_no_intersection() {
        assert!(detect_crossing(&seg(110.0, -14.0, 110.0, -14.0), &gate(110.0)).is_none());
    }

    #[test]
    fn endpoint_exactly_on_gate_still_counts_once() {
        // End on the gate: start west, end side exactly zero -> eastward.
        let event = detect_crossing(&seg(105.0, -14.0, 110.0, -14.0), &gate(110.0)).unwrap();
        assert_eq!(event.direction, Some(Direction::Eastward));

        // Start on the gate moving east: start side zero, end east -> eastward.
        let event = detect_crossing(&seg(110.0, -14.0, 115.0, -14.0), &gate(110.0)).unwrap();
        assert_eq!(event.direction, Some(Direction::Eastward));

        // Start on the gate moving west: start side zero, end west -> westward.
        let event = detect_crossing(&seg(110.0, -14.0, 105.0, -14.0), &gate(110.0)).unwrap();
        assert_eq!(event.direction, Some(Direction::Westward));

        // End on the gate arriving from the east -> westward.
        let event = detect_crossing(&seg(115.0, -14.0, 110.0, -14.0), &gate(110.0)).unwrap();
        assert_eq!(event.direction, Some(Direction::Westward));
    }

    #[test]
    fn side_sign_convention_positive_east() {
        let g = gate(110.0);
        assert!(side_of(&g, &Point { lon: 115.0, lat: -14.0 }) > 0.0);
        assert!(side_of(&g, &Point { lon: 105.0, lat: -14.0 }) < 0.0);
        assert_relative_eq!(side_of(&g, &Point { lon: 110.0, lat: -14.0 }), 0.0);
    }

    #[test]
    fn classify_ties_never_double_count() {
        // Every sign combination yields at most one direction.
        let sides = [-1.0, 0.0, 1.0];
        for &s in &sides {
            for &e in &sides {
                let east = (s < 0.0 && e >= 0.0) || (s <= 0.0 && e > 0.0);
                let west = (s > 0.0 && e <= 0.0) || (s >= 0.0 && e < 0.0);
                match classify(s, e) {
                    Some(Direction::Eastward) => assert!(east),
                    Some(Direction::Westward) => assert!(west && !east),
                    None => assert!(!east && !west),
                }
            }
        }
        // The fully degenerate tie gets no direction at all.
        assert_eq!(classify(0.0, 0.0), None);
    }

    #[test]
    fn endpoint_touching_intersection_is_inclusive() {
        // Parameter t = 1.0 exactly: the shared endpoint counts.
        let hit = segment_intersection(
            &seg(105.0, -14.0, 110.0, -14.0),
            &seg(110.0, -6.0, 110.0, -30.0),
        );
        assert!(hit.is_some());
        assert_relative_eq!(hit.unwrap().lon, 110.0);
    }
}
