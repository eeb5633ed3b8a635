mod chart;
mod console;
mod error;
mod stats;

pub use chart::write_chart;
pub use console::{print_json, print_summary};
pub use error::ReportError;
pub use stats::{summarize, Summary};
