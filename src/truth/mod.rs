mod error;
mod matcher;
mod trajectory;
mod types;

pub use error::TruthError;
pub use trajectory::{interpolate, DEFAULT_STEP};
pub use types::{GroundTruth, ReferenceSample, Waypoint};
