//! Checking a data document against a spec document
//!
//! [`Checker`] runs the whole pipeline for one document pair: bind, decide
//! which unbound spec fields are required, evaluate constraints on every bound
//! field, and assemble the issues. Any lookup failure along the way is a
//! fault and aborts the pair; data problems never abort.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::binder::{bind_with_progress, Bindings};
use crate::constraints::evaluate;
use crate::error::{Fault, Result, TreeKind};
use crate::path::Path;
use crate::progress::{NoProgress, Progress};
use crate::report::{assemble, CheckReport, FieldCheck};
use crate::spec::SpecNode;
use crate::tree::TreeValue;
use tracing::{info, instrument, warn};

/// Checks one data tree against one spec tree
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    data: &'a TreeValue,
    spec: &'a TreeValue,
}

impl<'a> Checker<'a> {
    pub fn new(data: &'a TreeValue, spec: &'a TreeValue) -> Self {
        Self { data, spec }
    }

    /// Bind the two trees without checking constraints
    pub fn bind(&self) -> Result<Bindings> {
        bind_with_progress(self.data, self.spec, &mut NoProgress)
    }

    /// Run the full check
    pub fn check(&self) -> Result<CheckReport> {
        self.check_with_progress(&mut NoProgress)
    }

    /// Run the full check, reporting stages and checked fields
    pub fn check_with_progress(&self, progress: &mut dyn Progress) -> Result<CheckReport> {
        let bindings = bind_with_progress(self.data, self.spec, progress)?;

        let missing_required = self.missing_required(&bindings)?;

        let mut fields = Vec::with_capacity(bindings.bound_count());
        for (data_path, spec_path) in bindings.bound() {
            let field = self.check_field(data_path, spec_path)?;
            progress.field_checked(data_path, field.passed());
            fields.push(field);
        }

        let issues = assemble(bindings.unbound_data(), &missing_required, &fields);
        Ok(CheckReport::new(issues, fields.len()))
    }

    /// Logical data paths of unbound spec fields that require a value
    fn missing_required(&self, bindings: &Bindings) -> Result<Vec<Path>> {
        let mut missing = Vec::new();
        for spec_path in bindings.unbound_spec() {
            if SpecNode::resolve(self.spec, spec_path)?.is_required()? {
                missing.push(spec_path.strip_content());
            }
        }
        Ok(missing)
    }

    fn check_field(&self, data_path: &Path, spec_path: &Path) -> Result<FieldCheck> {
        let value = self
            .data
            .lookup(data_path)
            .ok_or_else(|| Fault::path_not_found(data_path.render(), TreeKind::Data))?;
        let constraints = SpecNode::resolve(self.spec, spec_path)?.constraints()?;

        Ok(FieldCheck {
            path: data_path.clone(),
            value: value.inspect(),
            violations: evaluate(value, &constraints),
        })
    }
}

/// Check a data tree against a spec tree
pub fn check(data: &TreeValue, spec: &TreeValue) -> Result<CheckReport> {
    Checker::new(data, spec).check()
}

/// A named data document paired with the spec it should satisfy
#[derive(Debug, Clone, Copy)]
pub struct DocumentPair<'a> {
    pub name: &'a str,
    pub data: &'a TreeValue,
    pub spec: &'a TreeValue,
}

impl<'a> DocumentPair<'a> {
    pub fn new(name: &'a str, data: &'a TreeValue, spec: &'a TreeValue) -> Self {
        Self { name, data, spec }
    }
}

/// Result of checking one document pair
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub name: String,
    pub result: Result<CheckReport>,
}

impl PairOutcome {
    pub fn is_fault(&self) -> bool {
        self.result.is_err()
    }
}

/// Check several document pairs one after another
///
/// Each pair runs to completion on its own; a fault in one pair is recorded
/// in its outcome and the remaining pairs are still checked.
#[instrument(skip_all, fields(pairs = pairs.len()))]
pub fn check_all(pairs: &[DocumentPair<'_>], progress: &mut dyn Progress) -> Vec<PairOutcome> {
    pairs
        .iter()
        .map(|pair| {
            progress.document_started(pair.name);
            let result = Checker::new(pair.data, pair.spec).check_with_progress(progress);

            match &result {
                Ok(report) => info!(
                    document = pair.name,
                    fields = report.fields_checked,
                    issues = report.issues.len(),
                    "Checked document"
                ),
                Err(fault) => warn!(document = pair.name, %fault, "Check faulted"),
            }

            PairOutcome {
                name: pair.name.to_string(),
                result,
            }
        })
        .collect()
}
