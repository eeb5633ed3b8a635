mod distance;
mod error;
mod loader;

use crate::truth::{GroundTruth, TruthError};

use distance::distance;
pub use error::LoadError;
#[cfg(test)]
pub use loader::parse_samples;
pub use loader::{load_samples, MeasuredSample};

/// Error in meters for every measured sample, in input order.
pub fn compute_errors(
    measured: &[MeasuredSample],
    reference: &GroundTruth,
) -> Result<Vec<f64>, TruthError> {
    if reference.is_empty() {
        return Err(TruthError::EmptyReference);
    }
    let samples = reference.samples();
    let (first, last) = (samples[0].timestamp, samples[samples.len() - 1].timestamp);

    measured
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            if sample.timestamp < first || sample.timestamp > last {
                log::warn!(
                    "Sample {} at {} lies outside the reference window",
                    index,
                    sample.timestamp
                );
            }
            let matched = reference.nearest(sample.timestamp)?;
            let error = distance(
                (sample.latitude, sample.longitude),
                (matched.latitude, matched.longitude),
            );
            log::debug!(
                "Sample {} at {} matched {}: {:.3} m",
                index,
                sample.timestamp,
                matched.timestamp,
                error
            );
            Ok(error)
        })
        .collect()
}
