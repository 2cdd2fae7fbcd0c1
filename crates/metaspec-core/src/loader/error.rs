//! Error types for document loading
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::tree::TreeError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading and decoding a document
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Decoded document has no tree representation
    #[error("Malformed document '{path}': {source}")]
    MalformedTree { path: PathBuf, source: TreeError },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a malformed tree error
    pub fn malformed_tree(path: PathBuf, error: TreeError) -> Self {
        Self::MalformedTree {
            path,
            source: error,
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::IoError { path, .. } => path,
            Self::YamlParseError { path, .. } => path,
            Self::JsonParseError { path, .. } => path,
            Self::UnsupportedFormat { path } => path,
            Self::MalformedTree { path, .. } => path,
        }
    }

    /// Whether the document decoded but could not become a tree
    ///
    /// This is an internal fault rather than a problem with the file's
    /// syntax.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::MalformedTree { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("demo.yml");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), &path);
        assert!(!io_err.is_structural());

        let tree_err = LoaderError::malformed_tree(
            path.clone(),
            TreeError::NonScalarKey {
                path: ".outer".to_string(),
            },
        );
        assert!(tree_err.is_structural());
        assert!(tree_err.to_string().contains("mapping key at .outer is not a scalar"));
    }
}
