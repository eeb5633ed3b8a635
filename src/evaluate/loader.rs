use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::error::LoadError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// A position fix recorded by the application under test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredSample {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawSample {
    timestamp: Option<serde_json::Value>,
    latitude: f64,
    longitude: f64,
}

pub fn load_samples(path: &Path) -> Result<Vec<MeasuredSample>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let samples = parse_samples(&content)?;
    log::info!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parses a JSON array of `{timestamp, latitude, longitude}` records.
/// Additional fields on a record are ignored.
pub fn parse_samples(json: &str) -> Result<Vec<MeasuredSample>, LoadError> {
    let root: serde_json::Value = serde_json::from_str(json)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::InputFormat("expected an array of samples".into()))?;
    if records.is_empty() {
        return Err(LoadError::InputFormat("no samples".into()));
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: &serde_json::Value) -> Result<MeasuredSample, LoadError> {
    let raw: RawSample =
        serde_json::from_value(record.clone()).map_err(|e| LoadError::Record {
            index,
            message: e.to_string(),
        })?;

    let value = raw.timestamp.ok_or_else(|| LoadError::Record {
        index,
        message: "missing field `timestamp`".into(),
    })?;
    let timestamp = parse_timestamp(&value).ok_or_else(|| LoadError::MalformedTimestamp {
        index,
        value: value.to_string(),
    })?;

    Ok(MeasuredSample {
        timestamp,
        latitude: raw.latitude,
        longitude: raw.longitude,
    })
}

/// Accepts RFC 3339, ISO 8601 with a `+HHMM` offset, naive date-times (read
/// as UTC), and integer epochs.
///
/// Integers are epoch milliseconds, as Android's `System.currentTimeMillis`
/// writes them. pandas reads bare integers as nanoseconds, so exports that
/// store nanosecond epochs must be converted before loading here.
fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        serde_json::Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(s, format).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
}
