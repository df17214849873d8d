//! Application configuration.
//!
//! Maps `config.toml` onto strongly-typed sections:
//!
//! ```toml
//! [engine]
//! population_size = 1000
//! expected_cluster_count = 3
//! policy = "quota"
//!
//! [dataset]
//! path = "data/iris.data"
//! training_set_size = 100
//! balance_signs = true
//!
//! [run]
//! seed = 42
//! log_filter = "info"
//! ```
//!
//! Missing keys fall back to the `Default` impls.

use serde::{Deserialize, Serialize};
use shrinkmap_core::EngineSettings;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Samples used for training; the remainder is held out for evaluation.
    pub training_set_size: usize,
    /// Center every feature on its mean before projection.
    pub balance_signs: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/iris.data"),
            training_set_size: 100,
            balance_signs: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Fixed seed for a reproducible run; entropy when absent.
    pub seed: Option<u64>,
    /// Default tracing filter, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineSettings,
    pub dataset: DatasetConfig,
    pub run: RunConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Engine rules are delegated to [`EngineSettings::validate`]; the split
    /// size is only checked for being positive here because the dataset
    /// length is unknown until it is loaded.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.engine.validate()?;
        anyhow::ensure!(
            self.dataset.training_set_size > 0,
            "Training set size must be positive"
        );
        anyhow::ensure!(
            !self.dataset.path.as_os_str().is_empty(),
            "Dataset path must not be empty"
        );
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, writing the default configuration there if it is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)?;
            return Self::from_toml(&content)
                .map_err(|e| e.context(format!("invalid configuration in {}", path.display())));
        }

        let default = Self::default();
        match toml::to_string(&default) {
            Ok(text) => {
                if let Err(e) = fs::write(path, text) {
                    tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
                } else {
                    tracing::info!(path = %path.display(), "Wrote default configuration");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Could not serialize default config"),
        }
        Ok(default)
    }

    /// Hash of every setting that influences the clustering result.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.engine).as_bytes());
        hasher.update(self.dataset.training_set_size.to_le_bytes());
        hasher.update([u8::from(self.dataset.balance_signs)]);
        hasher.update(format!("{:?}", self.run.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrinkmap_core::PolicyKind;

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_engine_settings() {
        let config = AppConfig {
            engine: EngineSettings {
                expected_cluster_count: 5000,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_training_set() {
        let config = AppConfig {
            dataset: DatasetConfig {
                training_set_size: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AppConfig::from_toml(
            r#"
            [engine]
            population_size = 50
            policy = "merge"

            [run]
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.population_size, 50);
        assert_eq!(config.engine.policy, PolicyKind::Merge);
        assert_eq!(config.engine.expected_cluster_count, 3);
        assert_eq!(config.run.seed, Some(7));
        assert_eq!(config.dataset, DatasetConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let err = AppConfig::from_toml("[engine]\nkill_minimum = 0\n").unwrap_err();
        assert!(err.to_string().contains("Kill minimum"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_fingerprint_consistency() {
        let a = AppConfig::default();
        let b = AppConfig::default();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut c = AppConfig::default();
        c.engine.learning_rate = 0.25;
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
