//! Spec-side view of bound nodes
//!
//! Any mapping node of a spec document may carry a `constraints` list, a
//! `doc` text and a `content` wrapper. [`SpecNode`] resolves a spec path and
//! reads those reserved fields, turning every inconsistency into a fault.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::constraints::Constraint;
use crate::error::{Fault, Result, TreeKind};
use crate::path::{Path, CONSTRAINTS_KEY, DOC_KEY};
use crate::tree::TreeValue;

/// A spec node that takes part in binding
#[derive(Debug, Clone, Copy)]
pub struct SpecNode<'a> {
    path: &'a Path,
    node: &'a TreeValue,
}

impl<'a> SpecNode<'a> {
    /// Resolve `path` in the spec tree
    pub fn resolve(spec: &'a TreeValue, path: &'a Path) -> Result<Self> {
        let node = spec
            .lookup(path)
            .ok_or_else(|| Fault::path_not_found(path.render(), TreeKind::Spec))?;
        Ok(Self { path, node })
    }

    pub fn path(&self) -> &Path {
        self.path
    }

    pub fn value(&self) -> &'a TreeValue {
        self.node
    }

    /// Descriptive text attached to the node, if any
    pub fn doc(&self) -> Option<&'a str> {
        self.node.get(DOC_KEY).and_then(TreeValue::as_str)
    }

    /// Raw constraint names declared on the node
    pub fn constraint_names(&self) -> Result<Vec<&'a str>> {
        let field = self
            .node
            .get(CONSTRAINTS_KEY)
            .ok_or_else(|| Fault::missing_constraints(self.path.render()))?;

        let items = field.as_sequence().ok_or_else(|| {
            Fault::malformed_constraints(
                self.path.render(),
                format!("expected a list, found a {}", field.kind_name()),
            )
        })?;

        items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    Fault::malformed_constraints(
                        self.path.render(),
                        format!("expected constraint names, found a {}", item.kind_name()),
                    )
                })
            })
            .collect()
    }

    /// Parsed constraints declared on the node
    pub fn constraints(&self) -> Result<Vec<Constraint>> {
        let names = self.constraint_names()?;
        Constraint::parse_all(names.as_slice(), self.path)
    }

    /// Whether the spec requires a value for this node
    pub fn is_required(&self) -> Result<bool> {
        Ok(self.constraints()?.contains(&Constraint::NonEmpty))
    }
}
