//! Check failure records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which checker produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckerKind {
    /// Pointer argument represented without a reference/pointer, or missing.
    Arguments,
    /// Header function with pointer arguments never found in any binding file.
    Coverage,
    /// Build-script struct unknown to the header or with a different field set.
    Structures,
}

impl CheckerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arguments => "arguments",
            Self::Coverage => "coverage",
            Self::Structures => "structures",
        }
    }
}

/// A single human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub checker: CheckerKind,
    pub message: String,
}

impl CheckFailure {
    #[must_use]
    pub fn new(checker: CheckerKind, message: impl Into<String>) -> Self {
        Self {
            checker,
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Render a set of names the way failure messages list them: `{a, b}`.
pub(crate) fn format_name_set<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    let joined = names
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{joined}}}")
}
