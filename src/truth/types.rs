use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A point on the intended path. Only the order of waypoints carries timing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSample {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Interpolated ground-truth path, ordered by strictly increasing timestamp.
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    samples: Vec<ReferenceSample>,
}

impl GroundTruth {
    /// Callers guarantee `samples` is sorted by strictly increasing timestamp.
    pub(super) fn from_sorted(samples: Vec<ReferenceSample>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self { samples }
    }

    pub fn samples(&self) -> &[ReferenceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
