//! CLI entrypoint for bindcheck.

use std::path::PathBuf;
use std::process::ExitCode;

use bindcheck_core::HeaderIndex;
use bindcheck_harness::structured_log::LogEmitter;
use bindcheck_harness::{
    CheckConfig, ConfigOverrides, ConsoleLog, RunObserver, finish_run, run_checks,
};
use clap::{Args, Parser, Subcommand};

/// Consistency checks between a C interface header and its Rust bindings.
#[derive(Debug, Parser)]
#[command(name = "bindcheck")]
#[command(about = "Check that Rust bindings mirror the exported C header")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// JSON config file; relative paths inside resolve against its directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Interface header (repeatable, indexed in order).
    #[arg(long = "header")]
    headers: Vec<PathBuf>,
    /// Keyword that starts exported function declarations.
    #[arg(long)]
    export_marker: Option<String>,
}

impl InputArgs {
    fn load(&self) -> Result<CheckConfig, Box<dyn std::error::Error>> {
        Ok(match &self.config {
            Some(path) => CheckConfig::from_file(path)?,
            None => CheckConfig::default(),
        })
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the argument and struct override checks.
    Check {
        #[command(flatten)]
        inputs: InputArgs,
        /// Directory of binding sources.
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Build script carrying struct overrides.
        #[arg(long)]
        build_script: Option<PathBuf>,
        /// Extension of binding source files.
        #[arg(long)]
        extension: Option<String>,
        /// Fail on header functions that no binding file mentions.
        #[arg(long)]
        strict_coverage: bool,
        /// Mirror the run log as JSONL to this path.
        #[arg(long)]
        log_jsonl: Option<PathBuf>,
    },
    /// Print the functions and structs extracted from the headers as JSON.
    Inspect {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            inputs,
            source_dir,
            build_script,
            extension,
            strict_coverage,
            log_jsonl,
        } => {
            let config = inputs.load()?.with_overrides(ConfigOverrides {
                headers: inputs.headers,
                source_dir,
                build_script,
                export_marker: inputs.export_marker,
                extension,
                strict_coverage,
            });

            let jsonl = match &log_jsonl {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    let run_id = format!("bindcheck-{}", std::process::id());
                    Some(LogEmitter::to_file(path, &run_id)?)
                }
                None => None,
            };

            let mut observer = RunObserver::new(ConsoleLog::stdout(), jsonl);
            let report = run_checks(&config, &mut observer)?;
            finish_run(&report, &mut observer)?;
            Ok(report.exit_code())
        }
        Command::Inspect { inputs } => {
            let config = inputs.load()?.with_overrides(ConfigOverrides {
                headers: inputs.headers,
                export_marker: inputs.export_marker,
                ..ConfigOverrides::default()
            });
            let index = HeaderIndex::from_files(&config.headers, &config.export_marker)?;
            println!("{}", serde_json::to_string_pretty(&index)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
