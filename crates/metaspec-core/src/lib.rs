//! Metaspec Core - checking metadata documents against a spec document
//!
//! A spec document mirrors the shape of the metadata it describes. Every leaf
//! field of the spec is a mapping with a `doc` string and a `constraints`
//! list; fields whose value is a list of records describe the record shape
//! under a `content` key. This crate binds each data field to the spec field
//! describing it and reports:
//!
//! - **Extra metadata**: data fields no spec field describes (warning)
//! - **Missing required**: required spec fields with no data (error)
//! - **Field violations**: bound values failing their constraints (error)
//!
//! Inconsistencies in the spec itself or in the binding are [`Fault`]s, kept
//! apart from data issues.
//!
//! ## Quick Start
//!
//! ```rust
//! use metaspec_core::{check, Issue, TreeValue};
//! use serde_json::json;
//!
//! let spec = TreeValue::from(json!({
//!     "name": {"doc": "Project name", "constraints": ["String", "non-empty"]},
//!     "license": {"doc": "SPDX identifier", "constraints": ["String", "non-empty"]}
//! }));
//! let data = TreeValue::from(json!({"name": "demo", "homepage": "x"}));
//!
//! let report = check(&data, &spec).unwrap();
//! assert_eq!(
//!     report.issues,
//!     vec![
//!         Issue::ExtraMetadata { paths: vec![".homepage".to_string()] },
//!         Issue::MissingRequired { paths: vec![".license".to_string()] },
//!     ]
//! );
//! ```
//!
//! ## Constraints
//!
//! - `String`: value is a string
//! - `Array`: value is a sequence
//! - `non-empty`: value is a non-empty string or sequence; marks the field required
//! - `absolute-path`: value is a string holding an absolute filesystem path
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

pub mod binder;
pub mod check;
pub mod constraints;
pub mod error;
pub mod loader;
pub mod path;
pub mod progress;
pub mod report;
pub mod spec;
pub mod tree;

// Re-export commonly used types for convenience
pub use binder::{bind, BindingSummary, Bindings, BoundPair};
pub use check::{check, check_all, Checker, DocumentPair, PairOutcome};
pub use constraints::{evaluate, Constraint, Violation};
pub use error::{Fault, Result, TreeKind};
pub use loader::{DocumentLoader, Format, LoaderError, LoaderResult};
pub use path::{Path, Segment};
pub use progress::{NoProgress, Progress, RecordedProgress, Stage};
pub use report::{CheckOutcome, CheckReport, Issue, Severity};
pub use spec::SpecNode;
pub use tree::{Number, Scalar, TreeError, TreeValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_outcome_from_check() {
        let spec = TreeValue::from(serde_json::json!({
            "name": {"constraints": ["String"]}
        }));
        let data = TreeValue::from(serde_json::json!({"name": 3}));

        let outcome = CheckOutcome::from(check(&data, &spec));
        assert!(outcome.ok);
        assert!(!outcome.buggy);
        assert!(outcome.has_errors());
    }
}
