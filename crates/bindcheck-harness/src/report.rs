//! Pass/fail aggregation for a check run.

use std::io::Write;
use std::process::ExitCode;

use bindcheck_core::{CheckFailure, CheckerKind};
use serde::{Deserialize, Serialize};

/// Banner printed ahead of the verdict.
pub const SUMMARY_BANNER: &str = "==================== Summary ====================";

/// Combined failures of one run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    /// Argument (and coverage) failures first, then structure failures.
    #[must_use]
    pub fn aggregate(arguments: Vec<CheckFailure>, structures: Vec<CheckFailure>) -> Self {
        let mut failures = arguments;
        failures.extend(structures);
        Self { failures }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures produced by one checker.
    pub fn by_checker(&self, checker: CheckerKind) -> impl Iterator<Item = &CheckFailure> {
        self.failures.iter().filter(move |f| f.checker == checker)
    }

    /// `0` when everything passed, `1` otherwise.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        u8::from(!self.passed())
    }

    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Write the summary banner and verdict.
    pub fn write_summary(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "{SUMMARY_BANNER}")?;
        if self.passed() {
            return writeln!(out, "All checks passed.");
        }
        writeln!(out, "There were {} failed checks:", self.failures.len())?;
        for failure in &self.failures {
            writeln!(out, "{failure}")?;
        }
        writeln!(out, "Failed")
    }

    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_summary(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}
