//! Implementation of `pipedag check <file>`.
//!
//! Parses a pipeline JSON document (the same shape `POST /pipelines/parse`
//! accepts) and prints the report object to stdout.
//!
//! Exit codes: 0 = report printed (whether or not the pipeline is a DAG),
//! 2 = unreadable or unparseable input.
use std::io::Write;

use pipedag_core::{PipelineReport, PipelineRequest};
use tracing::{debug, info};

use crate::cli::PathOrStdin;
use crate::error::ServerError;
use crate::io::{read_input, source_label};

/// Runs the `check` command.
///
/// # Errors
///
/// Returns [`ServerError`] with exit code 2 if the input cannot be read or
/// parsed, and exit code 1 if stdout cannot be written.
pub fn run(file: &PathOrStdin, max_file_size: u64, pretty: bool) -> Result<(), ServerError> {
    let label = source_label(file);
    let content = read_input(file, max_file_size)?;
    let report = check_str(&content, &label)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, pretty).map_err(ServerError::Output)
}

/// Parses `content` as a pipeline and returns its report.
///
/// # Errors
///
/// Returns [`ServerError::ParseFailed`] with the line and column of the
/// first JSON error.
pub fn check_str(content: &str, label: &str) -> Result<PipelineReport, ServerError> {
    let request: PipelineRequest =
        serde_json::from_str(content).map_err(|e| ServerError::ParseFailed {
            input: label.to_owned(),
            detail: format!("line {}, column {}: {e}", e.line(), e.column()),
        })?;

    let analysis = request.analyze();
    if let Some(cycle) = &analysis.cycle {
        let path: Vec<&str> = cycle.iter().map(|id| &**id).collect();
        debug!(input = label, cycle = %path.join(" -> "), "cycle found");
    }
    info!(
        input = label,
        num_nodes = analysis.report.num_nodes,
        num_edges = analysis.report.num_edges,
        is_dag = analysis.report.is_dag,
        "checked pipeline"
    );
    Ok(analysis.report)
}

/// Writes the report as a single JSON object followed by a newline.
fn write_report<W: Write>(w: &mut W, report: &PipelineReport, pretty: bool) -> std::io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}
