//! Check command handler

use super::utils::{load_document, same_file, try_write_bug_report, BugReport};
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{ConsoleProgress, DocumentOutcome, OutputWriter};
use metaspec_core::{check_all, CheckOutcome, DocumentLoader, DocumentPair, TreeValue};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Handle the check command
#[instrument(skip_all, fields(spec = %args.spec.display(), documents = args.data.len()))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("check_command", &format!("spec: {}", args.spec.display()));

    if args.data.iter().any(|data| same_file(data, &args.spec)) {
        return Err(Error::invalid_args(format!(
            "{} is given both as data and as the spec",
            args.spec.display()
        )));
    }

    let strict = args.strict || config.check.strict;
    let show_progress = !args.no_progress && config.output.progress;
    let bug_report_path = args
        .bug_report
        .clone()
        .unwrap_or_else(|| config.check.bug_report.clone());

    let loader = DocumentLoader::new();
    output.info(&format!("Parsing spec {}", args.spec.display()))?;
    let spec = load_document(&loader, &args.spec, output)?;

    let names: Vec<String> = args.data.iter().map(|p| p.display().to_string()).collect();
    let mut documents: Vec<(&str, std::result::Result<TreeValue, Error>)> = Vec::new();
    for (name, path) in names.iter().zip(&args.data) {
        output.info(&format!("Parsing data {}", name))?;
        documents.push((name.as_str(), load_document(&loader, path, output)));
    }

    let pairs: Vec<DocumentPair<'_>> = documents
        .iter()
        .filter_map(|(name, tree)| tree.as_ref().ok().map(|data| DocumentPair::new(name, data, &spec)))
        .collect();

    let mut checked = {
        let mut progress = ConsoleProgress::new(output, show_progress);
        let checked = check_all(&pairs, &mut progress);
        progress.finish()?;
        checked.into_iter()
    };

    let mut bug_report = BugReport::new(&args.spec);
    let mut outcomes: Vec<DocumentOutcome> = Vec::with_capacity(documents.len());
    for (name, tree) in &documents {
        let outcome = match tree {
            Ok(_) => match checked.next() {
                Some(pair) => CheckOutcome::from(pair.result),
                None => CheckOutcome::failed("document was not checked"),
            },
            Err(e) => {
                warn!(document = *name, error = %e, "Could not load data document");
                let mut outcome = CheckOutcome::failed(e.to_string());
                outcome.buggy = e.is_bug();
                outcome
            }
        };

        if outcome.buggy {
            bug_report.push(name, &outcome.message);
        }
        outcomes.push(DocumentOutcome {
            file: name.to_string(),
            outcome,
            bug_report: None,
        });
    }

    if !bug_report.is_empty() {
        if try_write_bug_report(&bug_report_path, &bug_report) {
            attach_bug_report(&mut outcomes, &bug_report_path);
        } else {
            output.error(&format!(
                "Could not write bug report to {}",
                bug_report_path.display()
            ))?;
        }
    }

    if output.is_human() {
        for outcome in &outcomes {
            if outcomes.len() > 1 {
                output.section(&format!("Results for {}", outcome.file))?;
            }
            output.outcome(outcome)?;
        }
    } else {
        output.data(&outcomes)?;
    }

    let summary = Summary::of(&outcomes);
    info!(
        documents = outcomes.len(),
        faulted = summary.faulted,
        unloaded = summary.unloaded,
        errors = summary.errors,
        warnings = summary.warnings,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Check finished"
    );
    summary.into_result(strict, output)
}

fn attach_bug_report(outcomes: &mut [DocumentOutcome], path: &std::path::Path) {
    for outcome in outcomes.iter_mut().filter(|o| o.outcome.buggy) {
        outcome.bug_report = Some(PathBuf::from(path));
    }
}

/// Counts that decide the exit status of a check run
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    checked: usize,
    faulted: usize,
    unloaded: usize,
    errors: usize,
    warnings: usize,
}

impl Summary {
    fn of(outcomes: &[DocumentOutcome]) -> Self {
        let mut summary = Self::default();
        for DocumentOutcome { outcome, .. } in outcomes {
            if outcome.buggy {
                summary.faulted += 1;
            } else if !outcome.ok {
                summary.unloaded += 1;
            } else {
                summary.checked += 1;
            }
            for issue in &outcome.issues {
                if issue.is_warning() {
                    summary.warnings += 1;
                } else {
                    summary.errors += 1;
                }
            }
        }
        summary
    }

    fn into_result(self, strict: bool, output: &mut OutputWriter) -> Result<()> {
        if self.faulted > 0 {
            return Err(Error::Faulted {
                documents: self.faulted,
            });
        }
        if self.unloaded > 0 {
            return Err(Error::Unloaded {
                documents: self.unloaded,
            });
        }
        if self.errors > 0 || (strict && self.warnings > 0) {
            return Err(Error::CheckFailed {
                errors: self.errors,
                warnings: self.warnings,
            });
        }

        if self.warnings > 0 {
            output.warning(&format!(
                "Checked {} document(s) with {} warning(s)",
                self.checked, self.warnings
            ))?;
        } else {
            output.success(&format!("Checked {} document(s)", self.checked))?;
        }
        Ok(())
    }
}
