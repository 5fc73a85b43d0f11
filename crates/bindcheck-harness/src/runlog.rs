//! Human-readable run log, optionally mirrored to structured JSONL.

use std::io::Write;
use std::path::Path;

use bindcheck_core::{CheckObserver, CheckerKind};

use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// Writes the line-oriented run log (`== Checking ...`, `  ✔ arg: type`, ...).
pub struct ConsoleLog<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleLog<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one raw line.
    pub fn line(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleLog<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> CheckObserver for ConsoleLog<W> {
    fn file_started(&mut self, path: &Path) -> std::io::Result<()> {
        writeln!(self.writer, "== Checking {}", path.display())
    }

    fn function_found(&mut self, function: &str) -> std::io::Result<()> {
        writeln!(self.writer, "In {function}:")
    }

    fn argument_checked(&mut self, argument: &str, ty: &str, ok: bool) -> std::io::Result<()> {
        let mark = if ok { '✔' } else { '✖' };
        writeln!(self.writer, "  {mark} {argument}: {ty}")
    }

    fn failure_recorded(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{message}")
    }

    fn structure_passed(&mut self, script: &str, name: &str) -> std::io::Result<()> {
        writeln!(self.writer, "✔ Checked {script} struct {name}")
    }
}

/// Console run log plus an optional JSONL mirror of the same events.
pub struct RunObserver<W: Write> {
    console: ConsoleLog<W>,
    jsonl: Option<LogEmitter>,
    checker: Option<CheckerKind>,
    file: Option<String>,
    symbol: Option<String>,
}

impl<W: Write> RunObserver<W> {
    #[must_use]
    pub fn new(console: ConsoleLog<W>, jsonl: Option<LogEmitter>) -> Self {
        Self {
            console,
            jsonl,
            checker: None,
            file: None,
            symbol: None,
        }
    }

    /// Tag subsequent structured events with the checker that produced them.
    pub fn set_checker(&mut self, checker: CheckerKind) {
        self.checker = Some(checker);
        self.file = None;
        self.symbol = None;
    }

    pub fn console(&mut self) -> &mut ConsoleLog<W> {
        &mut self.console
    }

    /// Emit a structured entry if JSONL logging is enabled.
    pub fn structured(&mut self, entry: LogEntry) -> std::io::Result<()> {
        match self.jsonl.as_mut() {
            Some(emitter) => emitter.emit_entry(entry),
            None => Ok(()),
        }
    }

    fn contextual(&self, level: LogLevel, event: &str) -> LogEntry {
        let mut entry = LogEntry::new("", level, event);
        if let Some(checker) = self.checker {
            entry = entry.with_checker(checker);
        }
        if let Some(file) = &self.file {
            entry = entry.with_file(file.as_str());
        }
        if let Some(symbol) = &self.symbol {
            entry = entry.with_symbol(symbol.as_str());
        }
        entry
    }

    /// Flush both sinks.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.console.writer.flush()?;
        if let Some(emitter) = self.jsonl.as_mut() {
            emitter.flush()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn into_console(self) -> ConsoleLog<W> {
        self.console
    }
}

impl<W: Write> CheckObserver for RunObserver<W> {
    fn file_started(&mut self, path: &Path) -> std::io::Result<()> {
        self.console.file_started(path)?;
        self.file = Some(path.display().to_string());
        self.symbol = None;
        let entry = self.contextual(LogLevel::Debug, "file_started");
        self.structured(entry)
    }

    fn function_found(&mut self, function: &str) -> std::io::Result<()> {
        self.console.function_found(function)?;
        self.symbol = Some(function.to_string());
        let entry = self.contextual(LogLevel::Debug, "function_found");
        self.structured(entry)
    }

    fn argument_checked(&mut self, argument: &str, ty: &str, ok: bool) -> std::io::Result<()> {
        self.console.argument_checked(argument, ty, ok)?;
        let level = if ok { LogLevel::Info } else { LogLevel::Error };
        let entry = self
            .contextual(level, "argument_checked")
            .with_outcome(Outcome::from_ok(ok))
            .with_details(serde_json::json!({ "argument": argument, "type": ty }));
        self.structured(entry)
    }

    fn failure_recorded(&mut self, message: &str) -> std::io::Result<()> {
        self.console.failure_recorded(message)?;
        let entry = self
            .contextual(LogLevel::Error, "check_failed")
            .with_outcome(Outcome::Fail)
            .with_details(serde_json::json!({ "message": message }));
        self.structured(entry)
    }

    fn structure_passed(&mut self, script: &str, name: &str) -> std::io::Result<()> {
        self.console.structure_passed(script, name)?;
        let entry = self
            .contextual(LogLevel::Info, "structure_checked")
            .with_symbol(name)
            .with_outcome(Outcome::Pass);
        self.structured(entry)
    }
}
