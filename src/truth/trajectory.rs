use chrono::{DateTime, Duration, Utc};

use super::error::TruthError;
use super::types::{GroundTruth, ReferenceSample, Waypoint};

pub const DEFAULT_STEP: Duration = Duration::seconds(1);

/// Builds the ground-truth path for `[start, end]`.
///
/// Timestamps run from `start` in increments of `step` for as long as they do
/// not pass `end`. Coordinates are not tied to elapsed time: waypoint `i` sits
/// at index position `i`, and the path is resampled at one evenly spaced index
/// position per timestamp across `[0, N-1]`.
pub fn interpolate(
    waypoints: &[Waypoint],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
) -> Result<GroundTruth, TruthError> {
    if waypoints.len() < 2 {
        return Err(TruthError::InsufficientWaypoints(waypoints.len()));
    }
    if step <= Duration::zero() {
        return Err(TruthError::NonPositiveStep(step));
    }

    let timestamps = build_timestamps(start, end, step);
    let samples = index_positions(waypoints.len(), timestamps.len())
        .zip(timestamps)
        .map(|(position, timestamp)| {
            let point = point_at(waypoints, position);
            ReferenceSample {
                timestamp,
                latitude: point.latitude,
                longitude: point.longitude,
            }
        })
        .collect();

    Ok(GroundTruth::from_sorted(samples))
}

fn build_timestamps(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Vec<DateTime<Utc>> {
    let mut cursor = start;
    let mut timestamps = Vec::new();

    while cursor <= end {
        timestamps.push(cursor);
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }

    timestamps
}

/// `count` evenly spaced positions over `[0, waypoints - 1]`, endpoints exact.
fn index_positions(waypoints: usize, count: usize) -> impl Iterator<Item = f64> {
    let last = (waypoints - 1) as f64;
    let spacing = if count > 1 {
        last / (count - 1) as f64
    } else {
        0.0
    };

    (0..count).map(move |j| {
        if count > 1 && j == count - 1 {
            last
        } else {
            j as f64 * spacing
        }
    })
}

fn point_at(waypoints: &[Waypoint], position: f64) -> Waypoint {
    let last = waypoints.len() - 1;
    let lower = position.floor() as usize;
    if lower >= last {
        return waypoints[last];
    }

    let t = position - lower as f64;
    let (a, b) = (waypoints[lower], waypoints[lower + 1]);
    if t == 0.0 {
        return a;
    }

    Waypoint::new(
        lerp(a.latitude, b.latitude, t),
        lerp(a.longitude, b.longitude, t),
    )
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
