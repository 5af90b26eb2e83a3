use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ListEvalError, Result};

/// Ranking metric selected for an evaluation pass.
///
/// The five methods share the same extraction and tie-breaking pipeline and
/// differ only in how the ranked list is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Method {
    /// Mean Reciprocal Rank
    #[serde(rename = "MRR")]
    Mrr,
    /// Precision at the configured cutoff k
    #[serde(rename = "P@k")]
    PrecisionAtK,
    /// Normalized Discounted Cumulative Gain at k
    #[serde(rename = "nDCG@k")]
    NdcgAtK,
    /// Mean Average Precision
    #[serde(rename = "MAP")]
    Map,
    /// Precision at R, where R is the number of relevant items in the list
    #[serde(rename = "P@R")]
    PrecisionAtR,
}

impl Method {
    /// Canonical display name, matching the accepted configuration strings.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Mrr => "MRR",
            Method::PrecisionAtK => "P@k",
            Method::NdcgAtK => "nDCG@k",
            Method::Map => "MAP",
            Method::PrecisionAtR => "P@R",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ListEvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MRR" => Ok(Method::Mrr),
            "P@k" => Ok(Method::PrecisionAtK),
            "nDCG@k" => Ok(Method::NdcgAtK),
            "MAP" => Ok(Method::Map),
            "P@R" => Ok(Method::PrecisionAtR),
            other => Err(ListEvalError::Config(format!(
                "method must be MRR, P@k, nDCG@k, MAP or P@R, got: {}",
                other
            ))),
        }
    }
}

/// Evaluation configuration
///
/// Immutable once constructed. `method` has no default and must be set;
/// the remaining fields default to the smallest useful values (k=1, col=0,
/// batch_size=1).
#[derive(Debug, Clone, Deserialize)]
pub struct EvalConfig {
    /// Which metric to compute.
    pub method: Method,
    /// Cutoff rank for P@k and nDCG@k.
    #[serde(default = "default_k")]
    pub k: usize,
    /// Which score column to read per item.
    #[serde(default)]
    pub col: usize,
    /// Number of independent lists packed into one batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_k() -> usize {
    1
}

fn default_batch_size() -> usize {
    1
}

impl EvalConfig {
    /// Create a configuration for `method` with default k, col and batch_size.
    pub fn new(method: Method) -> Self {
        EvalConfig {
            method,
            k: default_k(),
            col: 0,
            batch_size: default_batch_size(),
        }
    }

    /// Set the cutoff rank for P@k / nDCG@k.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the score column to read.
    pub fn with_col(mut self, col: usize) -> Self {
        self.col = col;
        self
    }

    /// Set the number of lists per batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in LISTEVAL_CONFIG environment variable
    /// 2. ./listeval.toml in current directory
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("LISTEVAL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("listeval.toml"));

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from an explicit TOML file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path).map_err(|e| {
            ListEvalError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: EvalConfig = toml::from_str(&config_str)
            .map_err(|e| ListEvalError::Parse(format!("Invalid config TOML: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ListEvalError::Config(
                "k must be greater than 0".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(ListEvalError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_method_parse_roundtrip() {
        for name in ["MRR", "P@k", "nDCG@k", "MAP", "P@R"] {
            let method: Method = name.parse().unwrap();
            assert_eq!(method.name(), name);
        }
    }

    #[test]
    fn test_method_parse_unknown() {
        let err = "nDCG".parse::<Method>().unwrap_err();
        assert!(matches!(err, ListEvalError::Config(_)));
        assert!(err.to_string().contains("nDCG"));
    }

    #[test]
    fn test_config_defaults() {
        let config = EvalConfig::new(Method::Mrr);
        assert_eq!(config.k, 1);
        assert_eq!(config.col, 0);
        assert_eq!(config.batch_size, 1);
    }

    #[test]
    fn test_config_builder() {
        let config = EvalConfig::new(Method::NdcgAtK)
            .with_k(10)
            .with_col(2)
            .with_batch_size(4);
        assert_eq!(config.k, 10);
        assert_eq!(config.col, 2);
        assert_eq!(config.batch_size, 4);
    }

    #[test]
    fn test_config_validate_zero_k() {
        let config = EvalConfig::new(Method::PrecisionAtK).with_k(0);
        assert!(matches!(
            config.validate(),
            Err(ListEvalError::Config(_))
        ));
    }

    #[test]
    fn test_config_validate_zero_batch_size() {
        let config = EvalConfig::new(Method::Mrr).with_batch_size(0);
        assert!(matches!(
            config.validate(),
            Err(ListEvalError::Config(_))
        ));
    }

    #[test]
    fn test_config_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("listeval.toml");
        fs::write(
            &config_path,
            "method = \"nDCG@k\"\nk = 5\nbatch_size = 2\n",
        )
        .unwrap();

        let config = EvalConfig::load_from(&config_path).unwrap();
        assert_eq!(config.method, Method::NdcgAtK);
        assert_eq!(config.k, 5);
        assert_eq!(config.col, 0);
        assert_eq!(config.batch_size, 2);
    }

    #[test]
    fn test_config_load_missing_method() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("listeval.toml");
        fs::write(&config_path, "k = 5\n").unwrap();

        let err = EvalConfig::load_from(&config_path).unwrap_err();
        assert!(matches!(err, ListEvalError::Parse(_)));
    }

    #[test]
    fn test_config_load_invalid_path() {
        let err = EvalConfig::load_from(Path::new("nonexistent.toml")).unwrap_err();
        assert!(matches!(err, ListEvalError::Config(_)));
    }
}
