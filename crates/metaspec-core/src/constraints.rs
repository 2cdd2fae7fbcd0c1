//! Constraint evaluation for bound fields
//!
//! A spec attaches a flat list of constraint names to a field. Every
//! constraint in the list is evaluated independently and the violations
//! accumulate; nothing short-circuits. A name the engine does not recognize
//! is a fault in the spec, never a data violation.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::error::{Fault, Result};
use crate::path::Path;
use crate::tree::{Scalar, TreeValue};
use serde::{Serialize, Serializer};
use std::fmt;

/// A named rule a spec attaches to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `String`: the value is a textual scalar
    String,
    /// `Array`: the value is a sequence
    Array,
    /// `non-empty`: the value is not "", [], {} or null
    NonEmpty,
    /// `absolute-path`: the value is an absolute filesystem path
    AbsolutePath,
}

impl Constraint {
    /// Every constraint the engine knows
    pub const ALL: [Constraint; 4] = [
        Constraint::String,
        Constraint::Array,
        Constraint::NonEmpty,
        Constraint::AbsolutePath,
    ];

    /// Name used in spec documents
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::String => "String",
            Constraint::Array => "Array",
            Constraint::NonEmpty => "non-empty",
            Constraint::AbsolutePath => "absolute-path",
        }
    }

    /// Look up a constraint by its spec name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|constraint| constraint.name() == name)
    }

    /// Parse a list of names, faulting on the first unknown one
    pub fn parse_all<S: AsRef<str>>(names: &[S], path: &Path) -> Result<Vec<Self>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Self::from_name(name)
                    .ok_or_else(|| Fault::unknown_constraint(name.to_string(), path.render()))
            })
            .collect()
    }

    /// Message reported when the constraint does not hold
    pub fn message(&self) -> &'static str {
        match self {
            Constraint::String => "Must be a string",
            Constraint::Array => "Must be an array",
            Constraint::NonEmpty => "Can't be empty (e.g. \"\", [], {})",
            Constraint::AbsolutePath => "Must be an absolute file path",
        }
    }

    /// Check the constraint against a value
    pub fn is_satisfied_by(&self, value: &TreeValue) -> bool {
        match self {
            Constraint::String => value.is_string(),
            Constraint::Array => value.is_sequence(),
            Constraint::NonEmpty => is_non_empty(value),
            Constraint::AbsolutePath => is_absolute_path(value),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A failed constraint on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The constraint that did not hold
    pub constraint: Constraint,
    /// Human-readable description
    pub message: String,
}

impl Violation {
    pub fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            message: constraint.message().to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Evaluate parsed constraints against a value
///
/// Returns one violation per failed constraint, in list order.
pub fn evaluate(value: &TreeValue, constraints: &[Constraint]) -> Vec<Violation> {
    constraints
        .iter()
        .filter(|constraint| !constraint.is_satisfied_by(value))
        .map(|constraint| Violation::new(*constraint))
        .collect()
}

/// Evaluate constraint names against the value at `path`
///
/// All names are parsed before the value is inspected, so an unknown name
/// faults regardless of where it appears in the list.
pub fn evaluate_names<S: AsRef<str>>(
    value: &TreeValue,
    names: &[S],
    path: &Path,
) -> Result<Vec<Violation>> {
    let constraints = Constraint::parse_all(names, path)?;
    Ok(evaluate(value, &constraints))
}

fn is_non_empty(value: &TreeValue) -> bool {
    match value {
        TreeValue::Scalar(Scalar::String(s)) => !s.is_empty(),
        TreeValue::Scalar(Scalar::Null) => false,
        // Numbers and booleans have no notion of emptiness
        TreeValue::Scalar(Scalar::Number(_) | Scalar::Bool(_)) => true,
        TreeValue::Sequence(items) => !items.is_empty(),
        TreeValue::Mapping(map) => !map.is_empty(),
    }
}

fn is_absolute_path(value: &TreeValue) -> bool {
    value
        .as_str()
        .map(|s| std::path::Path::new(s).is_absolute())
        .unwrap_or(false)
}
