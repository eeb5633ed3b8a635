use chrono::Duration;
use thiserror::Error;

use crate::config::{ConfigError, SiteConfig};
use crate::evaluate::{compute_errors, load_samples, LoadError, MeasuredSample};
use crate::report::{summarize, ReportError, Summary};
use crate::truth::{interpolate, TruthError, Waypoint};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("loading samples: {0}")]
    Load(#[from] LoadError),
    #[error("ground truth: {0}")]
    Truth(TruthError),
    #[error("matching samples: {0}")]
    Matching(TruthError),
    #[error("reporting: {0}")]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    /// One entry per measured sample, in input order.
    pub errors: Vec<f64>,
    pub summary: Summary,
    pub reference_len: usize,
}

/// Scores `samples` against the path through `waypoints`, sampled every `step`
/// across the time span the samples cover.
pub fn evaluate(
    waypoints: &[Waypoint],
    samples: &[MeasuredSample],
    step: Duration,
) -> Result<Evaluation, PipelineError> {
    let (start, end) = match (
        samples.iter().map(|s| s.timestamp).min(),
        samples.iter().map(|s| s.timestamp).max(),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ReportError::EmptyErrorSet.into()),
    };

    let reference = interpolate(waypoints, start, end, step).map_err(PipelineError::Truth)?;
    log::info!(
        "Interpolated {} reference samples from {} waypoints over {} .. {}",
        reference.len(),
        waypoints.len(),
        start,
        end
    );

    let errors = compute_errors(samples, &reference).map_err(PipelineError::Matching)?;
    let summary = summarize(&errors)?;

    Ok(Evaluation {
        errors,
        summary,
        reference_len: reference.len(),
    })
}

pub fn run_site(site: &SiteConfig) -> Result<Evaluation, PipelineError> {
    log::info!("Evaluating site {} ({})", site.name, site.title);
    let step = site.step()?;
    let samples = load_samples(&site.input)?;
    evaluate(&site.waypoints, &samples, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::parse_samples;
    use crate::truth::DEFAULT_STEP;
    use chrono::{DateTime, TimeZone, Utc};
    use std::path::PathBuf;
    use tempdir::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 10, 0, 0).unwrap()
    }

    fn indoor_waypoints() -> Vec<Waypoint> {
        [
            (51.44513, 7.2613),
            (51.44522, 7.26122),
            (51.44522, 7.26113),
            (51.44521, 7.26103),
            (51.44518, 7.26086),
            (51.44515, 7.26073),
        ]
        .into_iter()
        .map(Waypoint::from)
        .collect()
    }

    #[test]
    fn endpoints_on_the_path_have_zero_error() {
        let waypoints = [Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 1.0)];
        let samples = [
            MeasuredSample {
                timestamp: t0(),
                latitude: 0.0,
                longitude: 0.0,
            },
            MeasuredSample {
                timestamp: t0() + DEFAULT_STEP,
                latitude: 0.0,
                longitude: 1.0,
            },
        ];

        let evaluation = evaluate(&waypoints, &samples, DEFAULT_STEP).unwrap();

        assert_eq!(evaluation.errors, vec![0.0, 0.0]);
        assert_eq!(evaluation.reference_len, 2);
        assert_eq!(evaluation.summary.mean, 0.0);
        assert_eq!(evaluation.summary.median, 0.0);
    }

    #[test]
    fn window_comes_from_unordered_samples() {
        let json = r#"[
            {"timestamp": "2024-05-14T10:00:05Z", "latitude": 51.44515, "longitude": 7.26073},
            {"timestamp": "2024-05-14T10:00:00Z", "latitude": 51.44513, "longitude": 7.2613},
            {"timestamp": "2024-05-14T10:00:02Z", "latitude": 51.44522, "longitude": 7.26113}
        ]"#;
        let samples = parse_samples(json).unwrap();

        let evaluation = evaluate(&indoor_waypoints(), &samples, DEFAULT_STEP).unwrap();

        // Six seconds of path for six waypoints puts each waypoint on a tick.
        assert_eq!(evaluation.reference_len, 6);
        assert_eq!(evaluation.errors, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn offset_samples_produce_positive_errors() {
        let json = r#"[
            {"timestamp": "2024-05-14T10:00:00Z", "latitude": 51.44523, "longitude": 7.2613},
            {"timestamp": "2024-05-14T10:00:05Z", "latitude": 51.44515, "longitude": 7.26073}
        ]"#;
        let samples = parse_samples(json).unwrap();

        let evaluation = evaluate(&indoor_waypoints(), &samples, DEFAULT_STEP).unwrap();

        // 0.0001 degrees of latitude is about 11 m.
        assert!(evaluation.errors[0] > 11.0 && evaluation.errors[0] < 11.3);
        assert_eq!(evaluation.errors[1], 0.0);
        assert_eq!(evaluation.summary.max, evaluation.errors[0]);
    }

    #[test]
    fn latest_representable_timestamp_evaluates() {
        let json = r#"[{"timestamp": 8210266876799999, "latitude": 51.44513, "longitude": 7.2613}]"#;
        let samples = parse_samples(json).unwrap();

        let evaluation = evaluate(&indoor_waypoints(), &samples, DEFAULT_STEP).unwrap();

        assert_eq!(evaluation.reference_len, 1);
        assert_eq!(evaluation.errors, vec![0.0]);
    }

    #[test]
    fn single_waypoint_aborts_in_ground_truth_stage() {
        let samples = [MeasuredSample {
            timestamp: t0(),
            latitude: 0.0,
            longitude: 0.0,
        }];
        let err = evaluate(&[Waypoint::new(0.0, 0.0)], &samples, DEFAULT_STEP).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Truth(TruthError::InsufficientWaypoints(1))
        ));
        assert!(err.to_string().starts_with("ground truth:"));
    }

    #[test]
    fn no_samples_has_nothing_to_summarize() {
        let err = evaluate(&indoor_waypoints(), &[], DEFAULT_STEP).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Report(ReportError::EmptyErrorSet)
        ));
    }

    #[test]
    fn runs_a_configured_site() {
        let dir = TempDir::new("track-accuracy").unwrap();
        let input = dir.path().join("walk.json");
        std::fs::write(
            &input,
            r#"[
                {"timestamp": "2024-05-14 10:00:00", "latitude": 0.0, "longitude": 0.0},
                {"timestamp": "2024-05-14 10:00:10", "latitude": 0.0, "longitude": 1.0}
            ]"#,
        )
        .unwrap();
        let site = SiteConfig {
            name: "test".into(),
            title: "test walk".into(),
            input,
            frequency: "1s".into(),
            chart: None,
            waypoints: vec![Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 1.0)],
        };

        let evaluation = run_site(&site).unwrap();
        assert_eq!(evaluation.reference_len, 11);
        assert_eq!(evaluation.errors, vec![0.0, 0.0]);
    }

    #[test]
    fn bad_record_aborts_in_loading_stage() {
        let dir = TempDir::new("track-accuracy").unwrap();
        let input = dir.path().join("walk.json");
        std::fs::write(&input, r#"[{"timestamp": "soon", "latitude": 0.0, "longitude": 0.0}]"#)
            .unwrap();
        let site = SiteConfig {
            name: "test".into(),
            title: "test walk".into(),
            input,
            frequency: "1s".into(),
            chart: Some(PathBuf::from("unused.html")),
            waypoints: vec![Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 1.0)],
        };

        let err = run_site(&site).unwrap_err();
        assert_eq!(
            err.to_string(),
            "loading samples: record 0: malformed timestamp \"soon\""
        );
    }
}
