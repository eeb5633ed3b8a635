use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::truth::Waypoint;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("site {site}: {message}")]
    Site { site: String, message: String },
    #[error("duplicate site name: {0}")]
    DuplicateSite(String),
    #[error("no sites configured")]
    NoSites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sites: Vec<SiteConfig>,
}

/// One evaluation setup: a walked route and the recording made along it.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub title: String,
    pub input: PathBuf,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    pub chart: Option<PathBuf>,
    pub waypoints: Vec<Waypoint>,
}

fn default_frequency() -> String {
    "1s".to_string()
}

impl SiteConfig {
    pub fn step(&self) -> Result<chrono::Duration, ConfigError> {
        let err = |message: String| ConfigError::Site {
            site: self.name.clone(),
            message,
        };
        let step = humantime::parse_duration(self.frequency.trim())
            .map_err(|e| err(format!("invalid frequency '{}': {}", self.frequency, e)))?;
        if step.is_zero() {
            return Err(err("frequency must be greater than zero".into()));
        }
        chrono::Duration::from_std(step).map_err(|e| err(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.waypoints.len() < 2 {
            return Err(ConfigError::Site {
                site: self.name.clone(),
                message: format!("at least 2 waypoints required, got {}", self.waypoints.len()),
            });
        }
        self.step().map(|_| ())
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;

        // Relative data paths are resolved against the config file location.
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for site in &mut config.sites {
            site.input = base.join(&site.input);
            site.chart = site.chart.as_ref().map(|chart| base.join(chart));
        }
        Ok(config)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn find_site(&self, name: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.name == name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        let mut seen = HashSet::new();
        for site in &self.sites {
            if !seen.insert(site.name.as_str()) {
                return Err(ConfigError::DuplicateSite(site.name.clone()));
            }
            site.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    const SITES: &str = r#"
sites:
  - name: indoor-low
    title: low indoor
    input: data/inlow.json
    chart: reports/indoor-low.html
    waypoints:
      - [51.44513, 7.2613]
      - [51.44522, 7.26122]
  - name: outdoor-high
    title: high accuracy outdoor
    input: data/outhigh_2.json
    frequency: 500ms
    waypoints:
      - [51.44545, 7.26042]
      - [51.44538, 7.26013]
      - [51.44532, 7.25991]
"#;

    #[test]
    fn parses_sites() {
        let config = Config::from_str(SITES).unwrap();
        assert_eq!(config.sites.len(), 2);

        let indoor = config.find_site("indoor-low").unwrap();
        assert_eq!(indoor.title, "low indoor");
        assert_eq!(indoor.step().unwrap(), chrono::Duration::seconds(1));
        assert_eq!(indoor.waypoints[1], Waypoint::new(51.44522, 7.26122));
        assert_eq!(indoor.chart, Some(PathBuf::from("reports/indoor-low.html")));

        let outdoor = config.find_site("outdoor-high").unwrap();
        assert_eq!(outdoor.step().unwrap(), chrono::Duration::milliseconds(500));
        assert_eq!(outdoor.chart, None);
        assert!(config.find_site("basement").is_none());
    }

    #[test]
    fn rejects_single_waypoint() {
        let yaml = "sites:\n  - name: a\n    title: a\n    input: a.json\n    waypoints: [[1.0, 2.0]]\n";
        assert!(matches!(
            Config::from_str(yaml).unwrap_err(),
            ConfigError::Site { .. }
        ));
    }

    #[test]
    fn rejects_bad_frequency() {
        for frequency in ["0s", "often"] {
            let yaml = format!(
                "sites:\n  - name: a\n    title: a\n    input: a.json\n    frequency: {frequency}\n    waypoints: [[1.0, 2.0], [1.0, 3.0]]\n"
            );
            assert!(
                matches!(Config::from_str(&yaml).unwrap_err(), ConfigError::Site { .. }),
                "{frequency}"
            );
        }
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let site = "  - name: a\n    title: a\n    input: a.json\n    waypoints: [[1.0, 2.0], [1.0, 3.0]]\n";
        let yaml = format!("sites:\n{site}{site}");
        assert!(matches!(
            Config::from_str(&yaml).unwrap_err(),
            ConfigError::DuplicateSite(name) if name == "a"
        ));
        assert!(matches!(
            Config::from_str("sites: []").unwrap_err(),
            ConfigError::NoSites
        ));
    }

    #[test]
    fn resolves_paths_relative_to_config_file() {
        let dir = TempDir::new("track-accuracy").unwrap();
        let path = dir.path().join("sites.yaml");
        std::fs::write(&path, SITES).unwrap();

        let config = Config::from_file(&path).unwrap();
        let indoor = config.find_site("indoor-low").unwrap();
        assert_eq!(indoor.input, dir.path().join("data/inlow.json"));
        assert_eq!(indoor.chart, Some(dir.path().join("reports/indoor-low.html")));
    }
}
