//! Shared utilities for command handlers

use crate::error::{ErrorContext, Result};
use crate::logging;
use crate::output::OutputWriter;
use metaspec_core::{DocumentLoader, TreeValue};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Load a YAML or JSON document, showing a spinner while it loads
pub fn load_document(
    loader: &DocumentLoader,
    path: &Path,
    output: &OutputWriter,
) -> Result<TreeValue> {
    let spinner = output.spinner(&format!("Loading {}", path.display()));
    let result = loader.load(path);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let tree = result?;
    debug!(path = %path.display(), kind = tree.kind_name(), "Loaded document");
    Ok(tree)
}

/// Whether two paths name the same file, compared after resolving them
///
/// A path that cannot be resolved is compared as given.
pub fn same_file(a: &Path, b: &Path) -> bool {
    let resolve = |path: &Path| std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    resolve(a) == resolve(b)
}

/// Details written when a check faults
#[derive(Debug, Serialize)]
pub struct BugReport {
    pub run_id: String,
    pub version: String,
    pub spec: String,
    pub faults: Vec<FaultEntry>,
}

/// One faulted data document
#[derive(Debug, Serialize)]
pub struct FaultEntry {
    pub data: String,
    pub message: String,
}

impl BugReport {
    pub fn new(spec: &Path) -> Self {
        Self {
            run_id: logging::current_run_id().to_string(),
            version: metaspec_core::VERSION.to_string(),
            spec: spec.display().to_string(),
            faults: Vec::new(),
        }
    }

    pub fn push(&mut self, data: &str, message: &str) {
        self.faults.push(FaultEntry {
            data: data.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Write a bug report as YAML
pub fn write_bug_report(path: &Path, report: &BugReport) -> Result<()> {
    let content = serde_yaml::to_string(report)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write bug report to {}", path.display()))
}

/// Write a bug report, logging instead of failing when it cannot be written
///
/// Returns whether the report was written.
pub fn try_write_bug_report(path: &Path, report: &BugReport) -> bool {
    match write_bug_report(path, report) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not write bug report");
            false
        }
    }
}
