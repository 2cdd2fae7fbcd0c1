//! Bindings command handler

use super::utils::load_document;
use crate::cli::BindingsArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{BindingsReport, OutputWriter};
use metaspec_core::{Checker, DocumentLoader};
use tracing::{info, instrument};

/// Handle the bindings command
#[instrument(skip_all, fields(data = %args.data.display(), spec = %args.spec.display()))]
pub fn handle_bindings(args: BindingsArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("bindings_command");

    let loader = DocumentLoader::new();
    let data = load_document(&loader, &args.data, output)?;
    let spec = load_document(&loader, &args.spec, output)?;

    let bindings = Checker::new(&data, &spec).bind()?;
    info!(
        bound = bindings.bound_count(),
        unbound_data = bindings.unbound_data().len(),
        unbound_spec = bindings.unbound_spec().len(),
        "Bound data to spec"
    );

    let report = BindingsReport {
        data: args.data.display().to_string(),
        spec: args.spec.display().to_string(),
        summary: bindings.summary(),
    };
    output.bindings(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_bindings_succeeds() {
        let dir = TempDir::new().unwrap();
        let args = BindingsArgs {
            data: write(&dir, "demo.json", r#"{"name": "demo", "extra": 1}"#),
            spec: write(&dir, "spec.yml", "name:\n  constraints: [String]\n"),
        };
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(std::io::sink()));

        assert!(handle_bindings(args, &mut output).is_ok());
    }

    #[test]
    fn test_duplicate_signature_is_fault() {
        let dir = TempDir::new().unwrap();
        let args = BindingsArgs {
            data: write(&dir, "demo.yml", "a:\n  b: 1\n"),
            spec: write(
                &dir,
                "spec.yml",
                "a:\n  constraints: []\n  b:\n    constraints: []\n  content:\n    b:\n      constraints: []\n",
            ),
        };
        let mut output = OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(std::io::sink()));

        assert!(matches!(handle_bindings(args, &mut output), Err(Error::Fault(_))));
    }
}
