use crate::comparison::{Comparison, InvalidTolerance};
use crate::errors::{codes, Diagnostic};
use crate::verify::{TraceVerifier, DEFAULT_EXPECTED_TRACES};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

const SAMPLE_CONFIG: &str = "\
version: 1
suite: spore
checks:
  - name: test_tracing_node
    time_step: 3
    expected_traces: 5
    comparison:
      mode: exact
";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unsupported config version {found} (supported: {supported})")]
    Version { found: u32, supported: u32 },
    #[error("config has no checks")]
    Empty,
    #[error("check '{check}': {source}")]
    Tolerance {
        check: String,
        #[source]
        source: InvalidTolerance,
    },
}

impl ConfigError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            ConfigError::Io { .. } => codes::E_PATH_NOT_FOUND,
            ConfigError::Version { .. } => codes::E_CFG_VERSION,
            ConfigError::Parse(_) | ConfigError::Empty | ConfigError::Tolerance { .. } => {
                codes::E_CFG_PARSE
            }
        };
        Diagnostic::new(code, self.to_string()).with_source("config")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SporeConfig {
    pub version: u32,
    #[serde(default = "default_suite")]
    pub suite: String,
    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSpec {
    pub name: String,
    /// Number of leading time steps to verify. Unset means the whole
    /// recorded window.
    #[serde(default)]
    pub time_step: Option<usize>,
    #[serde(default = "default_expected_traces")]
    pub expected_traces: usize,
    #[serde(default)]
    pub comparison: Comparison,
}

impl CheckSpec {
    pub fn verifier(&self) -> TraceVerifier {
        TraceVerifier::new(self.expected_traces).with_comparison(self.comparison)
    }
}

fn default_suite() -> String {
    "spore".into()
}

fn default_expected_traces() -> usize {
    DEFAULT_EXPECTED_TRACES
}

pub fn parse_config(raw: &str) -> Result<SporeConfig, ConfigError> {
    let cfg: SporeConfig = serde_yaml::from_str(raw)?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError::Version {
            found: cfg.version,
            supported: SUPPORTED_CONFIG_VERSION,
        });
    }
    if cfg.checks.is_empty() {
        return Err(ConfigError::Empty);
    }
    for check in &cfg.checks {
        check
            .comparison
            .validate()
            .map_err(|source| ConfigError::Tolerance {
                check: check.name.clone(),
                source,
            })?;
    }
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<SporeConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let cfg = parse_config(&raw)?;
    tracing::debug!(path = %path.display(), checks = cfg.checks.len(), "loaded config");
    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, SAMPLE_CONFIG).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let cfg = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.suite, "spore");
        assert_eq!(cfg.checks.len(), 1);
        let check = &cfg.checks[0];
        assert_eq!(check.name, "test_tracing_node");
        assert_eq!(check.time_step, Some(3));
        assert_eq!(check.verifier(), TraceVerifier::default());
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let cfg = parse_config("version: 1\nchecks:\n  - name: a\n").unwrap();
        assert_eq!(cfg.suite, "spore");
        assert_eq!(cfg.checks[0].time_step, None);
        assert_eq!(cfg.checks[0].expected_traces, 5);
        assert_eq!(cfg.checks[0].comparison, Comparison::Exact);
    }

    #[test]
    fn rejects_unknown_version() {
        let err = parse_config("version: 2\nchecks:\n  - name: a\n").unwrap_err();
        assert!(matches!(err, ConfigError::Version { found: 2, supported: 1 }));
        assert_eq!(err.to_diagnostic().code, codes::E_CFG_VERSION);
    }

    #[test]
    fn rejects_empty_checks() {
        let err = parse_config("version: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
    }

    #[test]
    fn roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spore.yaml");
        write_sample_config(&path).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.checks[0].expected_traces, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/spore.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/spore.yaml"));
        assert_eq!(err.to_diagnostic().code, codes::E_PATH_NOT_FOUND);
    }

    #[test]
    fn rejects_negative_tolerance() {
        let err = parse_config(
            "version: 1\nchecks:\n  - name: loose\n    comparison: { mode: absolute, tolerance: -1.0 }\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Tolerance { ref check, source: InvalidTolerance(t) }
                if check == "loose" && t == -1.0
        ));
        assert_eq!(err.to_diagnostic().code, codes::E_CFG_PARSE);
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn rejects_nan_tolerance() {
        let err = parse_config(
            "version: 1\nchecks:\n  - name: a\n    comparison: { mode: absolute, tolerance: .nan }\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Tolerance { .. }));
    }

    #[test]
    fn zero_tolerance_is_accepted() {
        let cfg = parse_config(
            "version: 1\nchecks:\n  - name: a\n    comparison: { mode: absolute, tolerance: 0.0 }\n",
        )
        .unwrap();
        assert_eq!(cfg.checks[0].comparison, Comparison::Absolute { tolerance: 0.0 });
    }
}
