//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with support for check
//! outcomes, binding dumps and progress indicators.

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use metaspec_core::{BindingSummary, CheckOutcome, Issue, Path, Progress, Stage};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::trace;

/// Outcome of checking one data file, as rendered to the user
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    /// Data file as given on the command line
    pub file: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    /// Where the bug report for a faulted check was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bug_report: Option<PathBuf>,
}

/// Bindings between one data file and one spec file
#[derive(Debug, Clone, Serialize)]
pub struct BindingsReport {
    pub data: String,
    pub spec: String,
    #[serde(flatten)]
    pub summary: BindingSummary,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the outcome of checking one data file
    fn format_outcome(&self, outcome: &DocumentOutcome, use_color: bool) -> Result<String>;

    /// Format a bindings dump
    fn format_bindings(&self, report: &BindingsReport, use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_outcome(&self, outcome: &DocumentOutcome, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_outcome_human(outcome, use_color)),
            _ => self.format(outcome),
        }
    }

    fn format_bindings(&self, report: &BindingsReport, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_bindings_human(report, use_color)),
            _ => self.format(report),
        }
    }
}

/// Status markers used in human output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Success,
    Failure,
    Warning,
    Info,
}

impl Mark {
    fn render(self, use_color: bool) -> String {
        let symbol = match self {
            Mark::Success => "✔",
            Mark::Failure => "✖",
            Mark::Warning => "⚠",
            Mark::Info => "ℹ",
        };
        if !use_color {
            return symbol.to_string();
        }
        match self {
            Mark::Success => symbol.green().to_string(),
            Mark::Failure => symbol.red().to_string(),
            Mark::Warning => symbol.yellow().to_string(),
            Mark::Info => symbol.blue().to_string(),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        let mut output = Self::with_writer(format, use_color, quiet, Box::new(io::stdout()));
        output.show_progress = !quiet && io::stdout().is_terminal();
        output
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No spinners with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        let line = format!("{} {}", Mark::Info.render(self.use_color), message);
        self.writeln(&line)
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        let line = format!("{} {}", Mark::Success.render(self.use_color), message);
        self.writeln(&line)
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }
        let message = if self.use_color {
            message.yellow().to_string()
        } else {
            message.to_string()
        };
        let line = format!("{} {}", Mark::Warning.render(self.use_color), message);
        self.writeln(&line)
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }
        let message = if self.use_color {
            message.red().to_string()
        } else {
            message.to_string()
        };
        let line = format!("{} {}", Mark::Failure.render(self.use_color), message);
        self.writeln(&line)
    }

    /// Write an indented progress line
    pub fn step(&mut self, mark: Mark, label: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        let line = format!("  {} {}", mark.render(self.use_color), label);
        self.writeln(&line)
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.is_human() || self.format == OutputFormat::JsonPretty {
            self.writeln(&formatted)
        } else {
            // YAML already ends with a newline
            self.write(&formatted)?;
            if self.format == OutputFormat::Json {
                self.writeln("")?;
            }
            Ok(())
        }
    }

    /// Write the outcome of checking one data file (human format only)
    ///
    /// Machine formats collect outcomes and write them once with [`data`](Self::data).
    pub fn outcome(&mut self, outcome: &DocumentOutcome) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }
        let formatted = self.format.format_outcome(outcome, self.use_color)?;
        self.write(&formatted)
    }

    /// Write a bindings dump
    pub fn bindings(&mut self, report: &BindingsReport) -> Result<()> {
        let formatted = self.format.format_bindings(report, self.use_color)?;
        if self.is_human() {
            self.write(&formatted)
        } else {
            self.writeln(formatted.trim_end())
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress || !self.is_human() {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Progress sink printing one line per pipeline stage and checked field
///
/// [`Progress`] callbacks cannot fail, so the first write error is kept and
/// handed back by [`ConsoleProgress::finish`].
pub struct ConsoleProgress<'a> {
    output: &'a mut OutputWriter,
    enabled: bool,
    error: Option<Error>,
}

impl<'a> ConsoleProgress<'a> {
    pub fn new(output: &'a mut OutputWriter, enabled: bool) -> Self {
        Self {
            output,
            enabled,
            error: None,
        }
    }

    /// Return the first write error, if any
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn record(&mut self, result: Result<()>) {
        if let (Err(e), None) = (result, &self.error) {
            self.error = Some(e);
        }
    }
}

impl Progress for ConsoleProgress<'_> {
    fn document_started(&mut self, name: &str) {
        let result = self.output.section(&format!("Checking {}", name));
        self.record(result);
    }

    fn stage_completed(&mut self, stage: Stage) {
        if self.enabled {
            let result = self.output.step(Mark::Success, &stage.to_string());
            self.record(result);
        }
    }

    fn field_checked(&mut self, path: &Path, passed: bool) {
        if self.enabled {
            let mark = if passed { Mark::Success } else { Mark::Failure };
            let result = self.output.step(mark, &path.render());
            self.record(result);
        }
    }
}

/// Format the outcome of one data file for human reading
fn format_outcome_human(outcome: &DocumentOutcome, use_color: bool) -> String {
    let mut output = String::new();
    let result = &outcome.outcome;

    if !result.ok {
        output.push_str(&format!(
            "{} Unexpected error: {}\n",
            Mark::Failure.render(use_color),
            result.message
        ));
        if let Some(report) = &outcome.bug_report {
            output.push_str(&format!(
                "  This is likely a bug, so a report has been written to {}.\n",
                report.display()
            ));
        }
        return output;
    }

    if result.issues.is_empty() {
        output.push_str(&format!(
            "{} All checks successful\n",
            Mark::Success.render(use_color)
        ));
        return output;
    }

    output.push_str("\nDetails:\n\n");
    for issue in &result.issues {
        output.push_str(&format_issue_human(issue, &outcome.file, use_color));
    }

    output
}

/// Format a single issue, prefixing data paths with the data file name
fn format_issue_human(issue: &Issue, file: &str, use_color: bool) -> String {
    let mark = if issue.is_warning() {
        Mark::Warning
    } else {
        Mark::Failure
    };
    let mut output = format!("  {} {}\n", mark.render(use_color), issue.summary());

    match issue {
        Issue::ExtraMetadata { paths } | Issue::MissingRequired { paths } => {
            for path in paths {
                output.push_str(&format!("  - ({}){}\n", file, path));
            }
        }
        Issue::FieldViolation {
            path,
            value,
            violations,
        } => {
            output.push_str(&format!("  - ({}){} = {}\n", file, path, value));
            for violation in violations {
                output.push_str(&format!("      • {}\n", violation));
            }
        }
    }

    output
}

/// Format a bindings dump for human reading
fn format_bindings_human(report: &BindingsReport, use_color: bool) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    output.push_str("\nHow data maps to the spec:\n\n");
    for pair in &summary.bound {
        output.push_str(&format!(
            "    (data){} -> (spec){}\n",
            pair.data, pair.spec
        ));
    }

    if !summary.unbound_data.is_empty() {
        output.push_str(&format!(
            "\n{} Data fields without a spec entry ({}):\n",
            Mark::Warning.render(use_color),
            report.data
        ));
        for path in &summary.unbound_data {
            output.push_str(&format!("    {}\n", path));
        }
    }

    if !summary.unbound_spec.is_empty() {
        output.push_str(&format!(
            "\n{} Spec fields without data ({}):\n",
            Mark::Info.render(use_color),
            report.spec
        ));
        for path in &summary.unbound_spec {
            output.push_str(&format!("    {}\n", path));
        }
    }

    output
}
