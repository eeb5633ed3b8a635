use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TruthError {
    #[error("at least 2 waypoints are required to interpolate a path, got {0}")]
    InsufficientWaypoints(usize),
    #[error("sampling step must be positive, got {0}")]
    NonPositiveStep(Duration),
    #[error("reference trajectory is empty, nothing to match against")]
    EmptyReference,
}
