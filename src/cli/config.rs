//! Configuration management for MediChain
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.medichain/config.toml

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classifier::{TrainerConfig, TreeParams};
use crate::dataset::{DatasetPaths, DEFAULT_LABEL_COLUMN};
use crate::errors::{MediError, Result};
use crate::labels::LabelNormalizer;
use crate::pipeline::PipelineSettings;
use crate::reference::MatchPolicy;

/// Complete configuration for MediChain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub training: TrainingConfig,
    pub labels: LabelsConfig,
    pub matching: MatchingConfig,
    pub logging: LoggingConfig,
}

/// Dataset locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the three CSV files under their standard names
    pub dir: String,
    /// Per-file overrides
    pub symptoms: Option<String>,
    pub drugs: Option<String>,
    pub precautions: Option<String>,
    /// Condition column of the training table
    pub label_column: String,
}

/// Split and tree growth settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub test_ratio: f64,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

/// Extra label aliases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub aliases: BTreeMap<String, String>,
}

/// Reference join settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub policy: MatchPolicy,
}

/// Log filter used when RUST_LOG is unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "dataset".to_string(),
            symptoms: None,
            drugs: None,
            precautions: None,
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let trainer = TrainerConfig::default();
        Self {
            test_ratio: trainer.test_ratio,
            seed: trainer.seed,
            max_depth: trainer.tree.max_depth,
            min_samples_split: trainer.tree.min_samples_split,
            min_samples_leaf: trainer.tree.min_samples_leaf,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "medichain=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MediError::ConfigurationError(format!("Failed to read config: {}", e))
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            MediError::ConfigurationError(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".medichain").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data.label_column.trim().is_empty() {
            return Err(MediError::ConfigurationError(
                "label_column must not be empty".to_string(),
            ));
        }

        self.trainer_config().validate()?;
        LabelNormalizer::with_aliases(self.labels.aliases.clone())?;

        Ok(())
    }

    /// Write the defaults to `path`, or the standard location when None
    ///
    /// An existing file is left untouched.
    pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
        let path = path.or_else(Self::default_path).ok_or_else(|| {
            MediError::ConfigurationError("no home directory for the config file".to_string())
        })?;
        if path.exists() {
            return Err(MediError::ConfigurationError(format!(
                "{} already exists",
                path.display()
            )));
        }

        Config::default().save(&path)?;
        Ok(path)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MediError::ConfigurationError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents).map_err(|e| {
            MediError::ConfigurationError(format!("Failed to write config: {}", e))
        })?;

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            MediError::ConfigurationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Dataset locations; `data_dir` overrides the configured directory
    pub fn dataset_paths(&self, data_dir: Option<&Path>) -> DatasetPaths {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::expand_path(&self.data.dir),
        };

        let mut paths = DatasetPaths::in_dir(dir);
        if let Some(symptoms) = &self.data.symptoms {
            paths.symptoms = Self::expand_path(symptoms);
        }
        if let Some(drugs) = &self.data.drugs {
            paths.drugs = Self::expand_path(drugs);
        }
        if let Some(precautions) = &self.data.precautions {
            paths.precautions = Self::expand_path(precautions);
        }
        paths
    }

    pub fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig {
            test_ratio: self.training.test_ratio,
            seed: self.training.seed,
            tree: TreeParams {
                max_depth: self.training.max_depth,
                min_samples_split: self.training.min_samples_split,
                min_samples_leaf: self.training.min_samples_leaf,
            },
        }
    }

    /// Settings for `MediChain::build`
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            trainer: self.trainer_config(),
            label_aliases: self.labels.aliases.clone(),
            match_policy: self.matching.policy,
        }
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.label_column, "TYPE");
        assert_eq!(config.training.test_ratio, 0.2);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.matching.policy, MatchPolicy::Substring);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_ratio() {
        let mut config = Config::default();
        config.training.test_ratio = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_min_samples() {
        let mut config = Config::default();
        config.training.min_samples_split = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_aliases() {
        let mut config = Config::default();
        config
            .labels
            .aliases
            .insert("INFLUENZA".to_string(), "COLD".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [training]
            seed = 7
            max_depth = 5

            [matching]
            policy = "exact"

            [labels.aliases]
            STREP = "Strep Throat"
            "#,
        )
        .unwrap();
        assert_eq!(config.training.seed, 7);
        assert_eq!(config.training.test_ratio, 0.2);
        assert_eq!(config.trainer_config().tree.max_depth, Some(5));
        assert_eq!(config.matching.policy, MatchPolicy::Exact);
        assert_eq!(config.labels.aliases["STREP"], "Strep Throat");
        assert_eq!(config.data.dir, "dataset");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.data.drugs = Some("/srv/drugs.csv".to_string());
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_dataset_paths_overrides() {
        let mut config = Config::default();
        config.data.drugs = Some("/srv/drugs.csv".to_string());

        let paths = config.dataset_paths(Some(Path::new("/data")));
        assert_eq!(paths.symptoms, PathBuf::from("/data/symptoms_dataset.csv"));
        assert_eq!(paths.drugs, PathBuf::from("/srv/drugs.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data]\nlabel_column = \"condition\"\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.data.label_column, "condition");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.training.seed = 99;
        config.save(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap().training.seed, 99);
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".medichain").join("config.toml");

        let written = Config::init(Some(path.clone())).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());

        assert!(matches!(
            Config::init(Some(path)),
            Err(MediError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.medichain");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let expanded = Config::expand_path("/absolute/path");
        assert_eq!(expanded.to_string_lossy(), "/absolute/path");
    }
}
