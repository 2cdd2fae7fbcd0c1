//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::tree::TreeValue;
use std::path::Path;
use tracing::debug;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| LoaderError::unsupported_format(path.to_path_buf()))?;

        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Parser turning document text into a [`TreeValue`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document file, detecting the format from its extension
    ///
    /// Files with an unknown extension are sniffed: JSON first, then YAML.
    pub fn parse_file(&self, path: &Path) -> LoaderResult<TreeValue> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read document");

        match Format::from_path(path) {
            Ok(format) => self.parse_content(&content, format, path),
            Err(_) => self
                .parse_with_fallback(&content, path)
                .map(|(tree, _)| tree),
        }
    }

    /// Parse document content with an explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<TreeValue> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<TreeValue> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        TreeValue::try_from(yaml_value)
            .map_err(|e| LoaderError::malformed_tree(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<TreeValue> {
        serde_json::from_str::<serde_json::Value>(content)
            .map(TreeValue::from)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Try each format in turn, JSON first as the stricter one
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(TreeValue, Format)> {
        if let Ok(tree) = self.parse_json(content, path) {
            return Ok((tree, Format::Json));
        }

        match self.parse_yaml(content, path) {
            Ok(tree) => Ok((tree, Format::Yaml)),
            Err(e) if e.is_structural() => Err(e),
            Err(_) => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }
}
