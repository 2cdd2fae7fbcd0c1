//! Binding of data paths to spec paths
//!
//! The binder enumerates both trees, builds a signature table from the spec
//! and looks every data path up in it:
//!
//! 1. spec paths that are metadata (`doc`, `content`, `constraints`) are
//!    dropped
//! 2. each remaining spec path is mapped to the signature of its logical data
//!    path (`content` segments removed, indices collapsed)
//! 3. each data path binds to the spec path sharing its signature, or stays
//!    unbound
//! 4. spec paths that received no data path are unbound on the spec side
//!
//! Two spec paths with the same signature would be indistinguishable in the
//! data, so that case is a fault rather than an issue.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::error::{Fault, Result};
use crate::path::Path;
use crate::progress::{NoProgress, Progress, Stage};
use crate::tree::TreeValue;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Outcome of binding a data tree to a spec tree
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    /// Data path to spec path, in data enumeration order
    data_to_spec: IndexMap<Path, Path>,
    /// Spec path to every data path bound to it
    spec_to_data: IndexMap<Path, Vec<Path>>,
    unbound_data: Vec<Path>,
    unbound_spec: Vec<Path>,
    /// Signature to spec path, kept for diagnostics
    signatures: IndexMap<String, Path>,
}

impl Bindings {
    /// Bound pairs as `(data, spec)`, in data enumeration order
    pub fn bound(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.data_to_spec.iter()
    }

    pub fn bound_count(&self) -> usize {
        self.data_to_spec.len()
    }

    /// Data paths with no matching spec entry
    pub fn unbound_data(&self) -> &[Path] {
        &self.unbound_data
    }

    /// Retained spec paths with no matching data
    pub fn unbound_spec(&self) -> &[Path] {
        &self.unbound_spec
    }

    /// Signature table built from the spec
    pub fn signatures(&self) -> &IndexMap<String, Path> {
        &self.signatures
    }

    /// Spec path a data path is bound to
    pub fn spec_for(&self, data: &Path) -> Option<&Path> {
        self.data_to_spec.get(data)
    }

    /// Data paths bound to a spec path; empty when the spec path is unbound
    pub fn data_for(&self, spec: &Path) -> &[Path] {
        self.spec_to_data
            .get(spec)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Serializable, rendered view of the bindings
    pub fn summary(&self) -> BindingSummary {
        BindingSummary {
            bound: self
                .bound()
                .map(|(data, spec)| BoundPair {
                    data: data.render(),
                    spec: spec.render(),
                })
                .collect(),
            unbound_data: self.unbound_data.iter().map(Path::render).collect(),
            unbound_spec: self.unbound_spec.iter().map(Path::render).collect(),
        }
    }
}

/// One rendered binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundPair {
    pub data: String,
    pub spec: String,
}

/// Rendered view of [`Bindings`] for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingSummary {
    pub bound: Vec<BoundPair>,
    pub unbound_data: Vec<String>,
    pub unbound_spec: Vec<String>,
}

/// Bind every data path to a spec path
pub fn bind(data: &TreeValue, spec: &TreeValue) -> Result<Bindings> {
    bind_with_progress(data, spec, &mut NoProgress)
}

/// Bind every data path to a spec path, reporting each finished stage
pub fn bind_with_progress(
    data: &TreeValue,
    spec: &TreeValue,
    progress: &mut dyn Progress,
) -> Result<Bindings> {
    let data_paths = data.enumerate();
    let spec_paths = spec.enumerate();
    debug!(
        data_paths = data_paths.len(),
        spec_paths = spec_paths.len(),
        "Enumerated documents"
    );
    progress.stage_completed(Stage::Traversed);

    let spec_paths: Vec<Path> = spec_paths
        .into_iter()
        .filter(|path| !path.is_excluded_spec_path())
        .collect();
    progress.stage_completed(Stage::PathsFiltered);

    let signatures = build_signatures(&spec_paths)?;
    debug!(signatures = signatures.len(), "Built signature table");
    progress.stage_completed(Stage::SignaturesBuilt);

    let mut bindings = Bindings {
        signatures,
        ..Bindings::default()
    };

    for data_path in data_paths {
        match bindings.signatures.get(&data_path.signature()) {
            Some(spec_path) => {
                trace!(data = %data_path, spec = %spec_path, "Bound data path");
                bindings
                    .spec_to_data
                    .entry(spec_path.clone())
                    .or_default()
                    .push(data_path.clone());
                bindings.data_to_spec.insert(data_path, spec_path.clone());
            }
            None => {
                trace!(data = %data_path, "Data path has no spec entry");
                bindings.unbound_data.push(data_path);
            }
        }
    }

    bindings.unbound_spec = spec_paths
        .into_iter()
        .filter(|path| !bindings.spec_to_data.contains_key(path))
        .collect();

    debug!(
        bound = bindings.data_to_spec.len(),
        unbound_data = bindings.unbound_data.len(),
        unbound_spec = bindings.unbound_spec.len(),
        "Bound data to spec"
    );
    progress.stage_completed(Stage::Bound);

    Ok(bindings)
}

fn build_signatures(spec_paths: &[Path]) -> Result<IndexMap<String, Path>> {
    let mut signatures: IndexMap<String, Path> = IndexMap::with_capacity(spec_paths.len());

    for spec_path in spec_paths {
        let signature = spec_path.strip_content().signature();
        if let Some(existing) = signatures.get(&signature) {
            warn!(
                signature = %signature,
                first = %existing,
                second = %spec_path,
                "Spec paths share a data signature"
            );
            return Err(Fault::duplicate_signature(
                signature,
                existing.render(),
                spec_path.render(),
            ));
        }
        signatures.insert(signature, spec_path.clone());
    }

    Ok(signatures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::RecordedProgress;
    use serde_json::json;

    fn spec() -> TreeValue {
        TreeValue::from(json!({
            "name": {"doc": "Name", "constraints": ["String", "non-empty"]},
            "servers": {
                "constraints": ["Array"],
                "content": [
                    {
                        "constraints": [],
                        "host": {"constraints": ["absolute-path"]}
                    }
                ]
            },
            "license": {"constraints": ["String"]}
        }))
    }

    #[test]
    fn test_signature_table() {
        let bindings = bind(&TreeValue::from(json!({})), &spec()).unwrap();
        let table: Vec<(String, String)> = bindings
            .signatures()
            .iter()
            .map(|(signature, path)| (signature.clone(), path.render()))
            .collect();

        assert_eq!(
            table,
            vec![
                (".name".to_string(), ".name".to_string()),
                (".servers".to_string(), ".servers".to_string()),
                (".servers[0]".to_string(), ".servers.content[0]".to_string()),
                (
                    ".servers[0].host".to_string(),
                    ".servers.content[0].host".to_string()
                ),
                (".license".to_string(), ".license".to_string()),
            ]
        );
    }

    #[test]
    fn test_sequence_elements_share_one_spec_entry() {
        let data = TreeValue::from(json!({
            "name": "demo",
            "servers": [{"host": "/a"}, {"host": "rel"}, {"port": 80}]
        }));
        let bindings = bind(&data, &spec()).unwrap();

        let host = Path::root()
            .child("servers")
            .child("content")
            .child(0)
            .child("host");
        let bound: Vec<String> = bindings.data_for(&host).iter().map(Path::render).collect();
        assert_eq!(bound, vec![".servers[0].host", ".servers[1].host"]);

        let unbound: Vec<String> = bindings.unbound_data().iter().map(Path::render).collect();
        assert_eq!(unbound, vec![".servers[2].port"]);

        let unbound_spec: Vec<String> = bindings.unbound_spec().iter().map(Path::render).collect();
        assert_eq!(unbound_spec, vec![".license"]);
    }

    #[test]
    fn test_bindings_are_symmetric() {
        let data = TreeValue::from(json!({"name": "demo", "servers": [{"host": "/a"}]}));
        let bindings = bind(&data, &spec()).unwrap();

        for (data_path, spec_path) in bindings.bound() {
            assert!(bindings.data_for(spec_path).contains(data_path));
            assert_eq!(bindings.spec_for(data_path), Some(spec_path));
        }
        assert_eq!(bindings.bound_count(), 4);
    }

    #[test]
    fn test_duplicate_signature_faults() {
        let spec = TreeValue::from(json!({
            "a": {
                "constraints": [],
                "b": {"constraints": []},
                "content": {"b": {"constraints": []}}
            }
        }));

        let fault = bind(&TreeValue::from(json!({})), &spec).unwrap_err();
        assert_eq!(
            fault,
            Fault::duplicate_signature(
                ".a.b".to_string(),
                ".a.b".to_string(),
                ".a.content.b".to_string()
            )
        );
    }

    #[test]
    fn test_stages_reported_in_order() {
        let mut progress = RecordedProgress::default();
        bind_with_progress(&TreeValue::from(json!({"name": "x"})), &spec(), &mut progress).unwrap();
        assert_eq!(
            progress.stages,
            vec![
                Stage::Traversed,
                Stage::PathsFiltered,
                Stage::SignaturesBuilt,
                Stage::Bound
            ]
        );
    }

    #[test]
    fn test_summary() {
        let data = TreeValue::from(json!({"name": "demo", "extra": 1}));
        let summary = bind(&data, &spec()).unwrap().summary();
        assert_eq!(
            summary.bound,
            vec![BoundPair {
                data: ".name".to_string(),
                spec: ".name".to_string()
            }]
        );
        assert_eq!(summary.unbound_data, vec![".extra"]);
        assert_eq!(
            summary.unbound_spec,
            vec![
                ".servers",
                ".servers.content[0]",
                ".servers.content[0].host",
                ".license"
            ]
        );
    }
}
