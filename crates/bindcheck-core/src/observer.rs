//! Progress callbacks emitted while checkers scan.
//!
//! Observers only see what happened; they never influence the verdict.

use std::path::Path;

/// Receives run-log events from the checkers as the scan proceeds.
///
/// Every method defaults to a no-op so implementors pick the events they need.
pub trait CheckObserver {
    /// A binding source (or the build script) is about to be scanned.
    fn file_started(&mut self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }

    /// A header function was located in the current file.
    fn function_found(&mut self, _function: &str) -> std::io::Result<()> {
        Ok(())
    }

    /// A header pointer argument was compared against its binding type.
    fn argument_checked(&mut self, _argument: &str, _ty: &str, _ok: bool) -> std::io::Result<()> {
        Ok(())
    }

    /// A failure was recorded outside a per-argument mark.
    fn failure_recorded(&mut self, _message: &str) -> std::io::Result<()> {
        Ok(())
    }

    /// A build-script struct matched the header layout.
    fn structure_passed(&mut self, _script: &str, _name: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CheckObserver for NullObserver {}
