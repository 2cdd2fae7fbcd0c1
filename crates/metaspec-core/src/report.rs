//! Issue taxonomy and report assembly
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::constraints::Violation;
use crate::error::Fault;
use crate::path::Path;
use serde::Serialize;
use std::fmt;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, but does not fail the check
    Warning,
    /// Fails the check
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A data problem found while checking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Issue {
    /// Data fields the spec does not recognize
    ExtraMetadata { paths: Vec<String> },
    /// Required fields absent from the data
    MissingRequired { paths: Vec<String> },
    /// A bound field whose value fails one or more constraints
    FieldViolation {
        path: String,
        value: String,
        violations: Vec<Violation>,
    },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ExtraMetadata { .. } => Severity::Warning,
            Issue::MissingRequired { .. } | Issue::FieldViolation { .. } => Severity::Error,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    /// One-line summary of the issue kind
    pub fn summary(&self) -> &'static str {
        match self {
            Issue::ExtraMetadata { .. } => "Some of your metadata won't be used",
            Issue::MissingRequired { .. } => "Required metadata is missing",
            Issue::FieldViolation { .. } => "Invalid value",
        }
    }
}

/// Result of checking one bound field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    /// Data path of the field
    pub path: Path,
    /// Human-inspectable rendering of the field value
    pub value: String,
    pub violations: Vec<Violation>,
}

impl FieldCheck {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Aggregate findings into an ordered issue list
///
/// `missing_required` holds the logical data paths of unbound spec fields
/// that require a value. Extra-metadata and missing-required issues come
/// first, then one field-violation issue per failing field in the order the
/// fields were checked.
pub fn assemble(
    unbound_data: &[Path],
    missing_required: &[Path],
    fields: &[FieldCheck],
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !unbound_data.is_empty() {
        issues.push(Issue::ExtraMetadata {
            paths: unbound_data.iter().map(Path::render).collect(),
        });
    }

    if !missing_required.is_empty() {
        issues.push(Issue::MissingRequired {
            paths: missing_required.iter().map(Path::render).collect(),
        });
    }

    issues.extend(
        fields
            .iter()
            .filter(|field| !field.passed())
            .map(|field| Issue::FieldViolation {
                path: field.path.render(),
                value: field.value.clone(),
                violations: field.violations.clone(),
            }),
    );

    issues
}

/// Issues found while checking one document pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub issues: Vec<Issue>,
    /// Number of bound fields checked against constraints
    pub fields_checked: usize,
}

impl CheckReport {
    pub fn new(issues: Vec<Issue>, fields_checked: usize) -> Self {
        Self {
            issues,
            fields_checked,
        }
    }

    /// No issues at all
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// At least one error-severity issue
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_warning())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_warning())
    }
}

/// Serializable outcome of a check, fault or not
///
/// `ok` is false only when the check could not complete; `buggy` marks a
/// fault in the spec or the binding, as opposed to a problem with the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub ok: bool,
    pub buggy: bool,
    pub issues: Vec<Issue>,
    pub message: String,
}

impl CheckOutcome {
    /// Outcome for a check that could not run for reasons outside the core
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            buggy: false,
            issues: Vec::new(),
            message: message.into(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.ok || self.issues.iter().any(|issue| !issue.is_warning())
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(Issue::is_warning)
    }
}

impl From<CheckReport> for CheckOutcome {
    fn from(report: CheckReport) -> Self {
        Self {
            ok: true,
            buggy: false,
            issues: report.issues,
            message: String::new(),
        }
    }
}

impl From<Fault> for CheckOutcome {
    fn from(fault: Fault) -> Self {
        Self {
            ok: false,
            buggy: true,
            issues: Vec::new(),
            message: fault.to_string(),
        }
    }
}

impl From<crate::Result<CheckReport>> for CheckOutcome {
    fn from(result: crate::Result<CheckReport>) -> Self {
        match result {
            Ok(report) => report.into(),
            Err(fault) => fault.into(),
        }
    }
}
