//! Fault types for the metaspec core
//!
//! A fault means the spec document, or the binding built from it, is
//! inconsistent. Faults are distinct from data issues: issues are collected
//! into a [`CheckReport`](crate::report::CheckReport) and never abort a check,
//! while a fault aborts the check of the current document pair.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use thiserror::Error;

/// Which of the two documents a fault refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// The data document being checked
    Data,
    /// The spec document describing the data
    Spec,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Data => write!(f, "data"),
            TreeKind::Spec => write!(f, "spec"),
        }
    }
}

/// Internal inconsistency found while binding or checking
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Two spec fields normalize to the same data signature
    #[error(
        "spec paths {first} and {second} both map to the data signature '{signature}'"
    )]
    DuplicateSignature {
        signature: String,
        first: String,
        second: String,
    },

    /// A bound path does not resolve in its tree
    #[error("cannot find {path} in the {tree} file")]
    PathNotFound { path: String, tree: TreeKind },

    /// A spec node that takes part in binding has no `constraints` field
    #[error("{path} has no defined constraints")]
    MissingConstraints { path: String },

    /// A `constraints` field that is not a list of constraint names
    #[error("constraints of {path} are malformed: {reason}")]
    MalformedConstraints { path: String, reason: String },

    /// A constraint name the engine does not know
    #[error("unknown constraint \"{name}\" at {path}. Avoid modifying the spec file")]
    UnknownConstraint { name: String, path: String },
}

/// Convenience type alias for results that may fault
pub type Result<T> = std::result::Result<T, Fault>;

impl Fault {
    /// Create a duplicate signature fault
    pub fn duplicate_signature(signature: String, first: String, second: String) -> Self {
        Self::DuplicateSignature {
            signature,
            first,
            second,
        }
    }

    /// Create a fault for a path that vanished from its tree
    pub fn path_not_found(path: String, tree: TreeKind) -> Self {
        Self::PathNotFound { path, tree }
    }

    /// Create a missing constraints fault
    pub fn missing_constraints(path: String) -> Self {
        Self::MissingConstraints { path }
    }

    /// Create a malformed constraints fault
    pub fn malformed_constraints(path: String, reason: impl Into<String>) -> Self {
        Self::MalformedConstraints {
            path,
            reason: reason.into(),
        }
    }

    /// Create an unknown constraint fault
    pub fn unknown_constraint(name: String, path: String) -> Self {
        Self::UnknownConstraint { name, path }
    }

    /// The rendered path the fault was raised at
    pub fn path(&self) -> &str {
        match self {
            Self::DuplicateSignature { second, .. } => second,
            Self::PathNotFound { path, .. } => path,
            Self::MissingConstraints { path } => path,
            Self::MalformedConstraints { path, .. } => path,
            Self::UnknownConstraint { path, .. } => path,
        }
    }
}
