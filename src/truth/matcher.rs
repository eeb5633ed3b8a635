use chrono::{DateTime, Utc};

use super::error::TruthError;
use super::types::{GroundTruth, ReferenceSample};

impl GroundTruth {
    /// Returns the reference sample closest in time to `timestamp`.
    ///
    /// When two samples are equally close, the earlier one wins.
    pub fn nearest(&self, timestamp: DateTime<Utc>) -> Result<&ReferenceSample, TruthError> {
        let samples = self.samples();
        if samples.is_empty() {
            return Err(TruthError::EmptyReference);
        }

        // First sample at or after `timestamp`; the answer is it or its predecessor.
        let after = samples.partition_point(|s| s.timestamp < timestamp);
        if after == 0 {
            return Ok(&samples[0]);
        }
        if after == samples.len() {
            return Ok(&samples[after - 1]);
        }

        let before = &samples[after - 1];
        let at_or_after = &samples[after];
        if timestamp - before.timestamp <= at_or_after.timestamp - timestamp {
            Ok(before)
        } else {
            Ok(at_or_after)
        }
    }
}
