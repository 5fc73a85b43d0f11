//! Check run orchestration.

use std::io::Write;

use bindcheck_core::{
    CheckError, CheckerKind, HeaderIndex, check_binding_arguments, check_structure_overrides,
};

use crate::config::CheckConfig;
use crate::report::CheckReport;
use crate::runlog::RunObserver;
use crate::structured_log::{ArtifactEntry, LogEntry, LogLevel};

/// Index the headers, run both checkers and aggregate their failures.
///
/// The summary is not written; see [`finish_run`].
pub fn run_checks<W: Write>(
    config: &CheckConfig,
    observer: &mut RunObserver<W>,
) -> Result<CheckReport, CheckError> {
    let artifacts = input_artifacts(config)?;
    observer.structured(
        LogEntry::new("", LogLevel::Info, "run_started")
            .with_artifacts(artifacts)
            .with_details(serde_json::json!({
                "source_dir": config.source_dir.display().to_string(),
                "export_marker": config.export_marker,
                "strict_coverage": config.strict_coverage,
            })),
    )?;

    let index = HeaderIndex::from_files(&config.headers, &config.export_marker)?;
    observer.structured(
        LogEntry::new("", LogLevel::Info, "headers_indexed").with_details(serde_json::json!({
            "functions": index.functions().len(),
            "functions_with_pointer_args":
                index.functions().iter().filter(|f| f.has_pointer_args()).count(),
            "structures": index.structures().len(),
        })),
    )?;

    observer.set_checker(CheckerKind::Arguments);
    let arguments = check_binding_arguments(
        &index,
        &config.source_dir,
        &config.argument_options(),
        observer,
    )?;

    observer.set_checker(CheckerKind::Structures);
    let structures = check_structure_overrides(&index, &config.build_script, observer)?;

    Ok(CheckReport::aggregate(arguments, structures))
}

/// Print the summary, record the verdict and flush both sinks.
pub fn finish_run<W: Write>(
    report: &CheckReport,
    observer: &mut RunObserver<W>,
) -> std::io::Result<()> {
    for line in report.render_summary().lines() {
        observer.console().line(line)?;
    }
    let level = if report.passed() {
        LogLevel::Info
    } else {
        LogLevel::Error
    };
    observer.structured(
        LogEntry::new("", level, "run_finished")
            .with_exit_code(i32::from(report.exit_status()))
            .with_details(serde_json::json!({ "failures": report.failures })),
    )?;
    observer.flush()
}

fn input_artifacts(config: &CheckConfig) -> Result<Vec<ArtifactEntry>, CheckError> {
    config
        .input_files()
        .into_iter()
        .map(|path| {
            let kind = if path == config.build_script {
                "build_script"
            } else {
                "header"
            };
            ArtifactEntry::from_file(path, kind).map_err(|source| CheckError::ReadInput {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}
