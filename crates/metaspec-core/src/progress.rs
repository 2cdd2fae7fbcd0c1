//! Progress reporting hooks
//!
//! Binding and checking call into a [`Progress`] sink as they go. Calls are
//! synchronous and purely informational: a sink never influences control
//! flow or results.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::path::Path;
use std::fmt;

/// Pipeline stage completed while binding a document pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Both trees enumerated
    Traversed,
    /// Spec-only paths filtered out
    PathsFiltered,
    /// Signature table built from the spec
    SignaturesBuilt,
    /// Data paths bound to spec paths
    Bound,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Traversed => write!(f, "Traversed objects"),
            Stage::PathsFiltered => write!(f, "Found paths"),
            Stage::SignaturesBuilt => write!(f, "Created data signatures"),
            Stage::Bound => write!(f, "Bound data to specs"),
        }
    }
}

/// Receiver of progress notifications
pub trait Progress {
    /// A document pair is about to be checked
    fn document_started(&mut self, _name: &str) {}

    /// A binding stage finished
    fn stage_completed(&mut self, _stage: Stage) {}

    /// A bound field was checked against its constraints
    fn field_checked(&mut self, _path: &Path, _passed: bool) {}
}

/// Progress sink that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Progress sink that records notifications, mostly useful in tests
#[derive(Debug, Default, Clone)]
pub struct RecordedProgress {
    pub documents: Vec<String>,
    pub stages: Vec<Stage>,
    pub fields: Vec<(String, bool)>,
}

impl Progress for RecordedProgress {
    fn document_started(&mut self, name: &str) {
        self.documents.push(name.to_string());
    }

    fn stage_completed(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn field_checked(&mut self, path: &Path, passed: bool) {
        self.fields.push((path.render(), passed));
    }
}
