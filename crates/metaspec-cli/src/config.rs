//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//!
//! Command-line flags are applied on top by the handlers.

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names tried in each configuration directory
const CONFIG_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "toml"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputSection,

    /// Logging settings
    pub logging: LoggingSection,

    /// Check settings
    pub check: CheckSection,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,

    /// Show per-stage and per-field progress while checking
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directives, used when no `-v` flag is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Check configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSection {
    /// Where bug reports are written
    pub bug_report: PathBuf,

    /// Treat warnings as failures
    pub strict: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
            progress: true,
        }
    }
}

impl Default for CheckSection {
    fn default() -> Self {
        Self {
            bug_report: PathBuf::from("bug.log"),
            strict: false,
        }
    }
}

/// Configuration file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(Error::config(format!(
                "Unsupported configuration file '{}'. Expected .yaml, .yml, .json or .toml",
                path.display()
            ))),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config = match format {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from a specific file or default locations
    ///
    /// Also returns the file that was used, if any.
    pub fn load_with_source(file: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match file {
            Some(path) => Ok((Self::from_file(path)?, Some(path.to_path_buf()))),
            None => Ok(Self::load_from(&Self::default_config_paths())),
        }
    }

    /// Load the first readable file among `paths`, reporting which one
    fn load_from(paths: &[PathBuf]) -> (Self, Option<PathBuf>) {
        for path in paths {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return (config, Some(path.clone())),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        (Self::default(), None)
    }

    /// Default configuration file paths, in lookup order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = CONFIG_EXTENSIONS
            .iter()
            .map(|ext| PathBuf::from(format!(".metaspec.{}", ext)))
            .collect();

        if let Some(config_dir) = dirs::config_dir() {
            let metaspec_dir = config_dir.join("metaspec");
            paths.extend(
                CONFIG_EXTENSIONS
                    .iter()
                    .map(|ext| metaspec_dir.join(format!("config.{}", ext))),
            );
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.extend(
                CONFIG_EXTENSIONS
                    .iter()
                    .map(|ext| home_dir.join(format!(".metaspec.{}", ext))),
            );
        }

        paths
    }

    /// Save configuration to a file, in the format matching its extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputFormat::Human);
        assert!(config.output.color);
        assert!(config.output.progress);
        assert_eq!(config.check.bug_report, PathBuf::from("bug.log"));
        assert!(!config.check.strict);
        assert_eq!(config.logging, LoggingSection::default());
    }

    #[test]
    fn test_partial_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "output:\n  format: json-pretty\ncheck:\n  strict: true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(config.output.color);
        assert!(config.check.strict);
        assert_eq!(config.check.bug_report, PathBuf::from("bug.log"));
    }

    #[test]
    fn test_toml_and_json() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("config.toml");
        std::fs::write(
            &toml_path,
            "[logging]\nlevel = \"debug\"\nformat = \"json\"\n\n[check]\nbug_report = \"reports/bug.log\"\n",
        )
        .unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format, Some(LogFormat::Json));
        assert_eq!(config.check.bug_report, PathBuf::from("reports/bug.log"));

        let json_path = dir.path().join("config.json");
        std::fs::write(&json_path, r#"{"output": {"progress": false}}"#).unwrap();
        let config = Config::from_file(&json_path).unwrap();
        assert!(!config.output.progress);
    }

    #[test]
    fn test_save_round_trips_each_format() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.format = OutputFormat::Yaml;
        config.logging.level = Some("info".to_string());

        for name in ["nested/config.toml", "config.yaml", "config.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::from_file(Path::new("config.ini")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_skips_missing_and_broken() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join(".metaspec.yaml");
        let good = dir.path().join(".metaspec.json");
        std::fs::write(&broken, "output: [").unwrap();
        std::fs::write(&good, r#"{"check": {"strict": true}}"#).unwrap();

        let paths = vec![dir.path().join("absent.toml"), broken, good.clone()];
        let (config, source) = Config::load_from(&paths);
        assert!(config.check.strict);
        assert_eq!(source, Some(good));

        let (config, source) = Config::load_from(&[dir.path().join("absent.toml")]);
        assert_eq!(config, Config::default());
        assert_eq!(source, None);
    }

    #[test]
    fn test_default_paths_start_in_current_dir() {
        let paths = Config::default_config_paths();
        assert_eq!(paths[0], PathBuf::from(".metaspec.yaml"));
        assert_eq!(paths[3], PathBuf::from(".metaspec.toml"));
    }
}
