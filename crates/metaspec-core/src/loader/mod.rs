//! Document loading
//!
//! Reads YAML and JSON files into [`TreeValue`](crate::tree::TreeValue)s.
//! The checking engine never touches storage; everything it needs comes
//! through this module.
//!
//! # Example Usage
//!
//! ```no_run
//! use metaspec_core::loader::DocumentLoader;
//! use std::path::Path;
//!
//! let loader = DocumentLoader::new();
//! let data = loader.load(Path::new("demo.yml"))?;
//! let spec = loader.load(Path::new("spec.yml"))?;
//! let report = metaspec_core::check(&data, &spec)?;
//! println!("{} issue(s)", report.issues.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};

use crate::tree::TreeValue;
use std::path::Path;
use tracing::instrument;

/// Loads documents from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLoader {
    parser: DocumentParser,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document, failing if the file does not exist or cannot be decoded
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> LoaderResult<TreeValue> {
        self.parser.parse_file(path)
    }

    /// Load a document from text with an explicit format
    pub fn load_str(&self, content: &str, format: Format, origin: &Path) -> LoaderResult<TreeValue> {
        self.parser.parse_content(content, format, origin)
    }
}
