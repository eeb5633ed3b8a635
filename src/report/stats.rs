use serde::Serialize;

use super::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdfPoint {
    pub error_m: f64,
    pub probability: f64,
}

/// Distribution of position errors, in meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// 25th to 75th percentile.
    pub ci50: Interval,
    /// 2.5th to 97.5th percentile.
    pub ci95: Interval,
    pub sorted_errors: Vec<f64>,
    pub cdf: Vec<CdfPoint>,
}

pub fn summarize(errors: &[f64]) -> Result<Summary, ReportError> {
    if errors.is_empty() {
        return Err(ReportError::EmptyErrorSet);
    }

    let mut sorted = errors.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let cdf = sorted
        .iter()
        .enumerate()
        .map(|(i, &error_m)| CdfPoint {
            error_m,
            probability: (i + 1) as f64 / n as f64,
        })
        .collect();

    Ok(Summary {
        count: n,
        mean,
        median: percentile(&sorted, 50.0),
        min: sorted[0],
        max: sorted[n - 1],
        ci50: Interval {
            low: percentile(&sorted, 25.0),
            high: percentile(&sorted, 75.0),
        },
        ci95: Interval {
            low: percentile(&sorted, 2.5),
            high: percentile(&sorted, 97.5),
        },
        sorted_errors: sorted,
        cdf,
    })
}

/// Percentile `p` (0..=100) of ascending `sorted`, interpolating linearly
/// between the two closest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
