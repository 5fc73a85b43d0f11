//! Binding argument checks.
//!
//! A header parameter declared with `*` must stay a reference or raw pointer in
//! the Rust binding. Bindings are located by name only: the first identifier in
//! a source file that normalizes to the header function's name and opens a
//! parameter list is taken as that function's declaration.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{CheckError, read_input};
use crate::failure::{CheckFailure, CheckerKind, format_name_set};
use crate::header::{FunctionSignature, HeaderIndex};
use crate::normalize::normalize_name;
use crate::observer::CheckObserver;

/// Type prefixes that count as a reference/pointer representation.
pub const REFERENCE_PREFIXES: &[&str] = &[
    "&",
    "*",
    "Option<&",
    "Option<*",
    "Option<NonNull<",
    "NonNull<",
];

/// Knobs for [`check_binding_arguments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentCheckOptions {
    /// Extension (without the dot) of files to scan.
    pub extension: String,
    /// Report header functions that no scanned file binds.
    pub strict_coverage: bool,
}

impl Default for ArgumentCheckOptions {
    fn default() -> Self {
        Self {
            extension: String::from("rs"),
            strict_coverage: false,
        }
    }
}

/// Result of scanning one binding source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceScan {
    pub failures: Vec<CheckFailure>,
    /// Header functions located in this text, in header order.
    pub bound: Vec<String>,
}

/// Check every source file under `source_dir` against the header index.
///
/// Files are visited recursively in sorted path order. Unreadable files or
/// directories abort the run.
pub fn check_binding_arguments(
    index: &HeaderIndex,
    source_dir: &Path,
    options: &ArgumentCheckOptions,
    observer: &mut dyn CheckObserver,
) -> Result<Vec<CheckFailure>, CheckError> {
    let files = collect_source_files(source_dir, &options.extension)?;

    let mut failures = Vec::new();
    let mut bound: HashSet<String> = HashSet::new();
    for path in &files {
        let text = read_input(path)?;
        observer.file_started(path)?;
        let scan = check_source(index, &text, observer)?;
        failures.extend(scan.failures);
        bound.extend(scan.bound);
    }

    if options.strict_coverage {
        for function in index.functions().iter().filter(|f| f.has_pointer_args()) {
            if !bound.contains(&function.name) {
                let message = format!("{} is not bound in any source file", function.name);
                observer.failure_recorded(&message)?;
                failures.push(CheckFailure::new(CheckerKind::Coverage, message));
            }
        }
    }

    Ok(failures)
}

/// Check one binding source text against the header index.
pub fn check_source(
    index: &HeaderIndex,
    text: &str,
    observer: &mut dyn CheckObserver,
) -> std::io::Result<SourceScan> {
    let identifiers = scan_identifiers(text);
    let mut scan = SourceScan::default();

    for function in index.functions().iter().filter(|f| f.has_pointer_args()) {
        let key = normalize_name(&function.name);
        let Some(params) = identifiers
            .iter()
            .filter(|ident| ident.key == key)
            .find_map(|ident| parameter_list(text, ident.end))
        else {
            continue;
        };

        observer.function_found(&function.name)?;
        scan.bound.push(function.name.clone());
        check_parameters(function, params, observer, &mut scan.failures)?;
    }

    Ok(scan)
}

fn check_parameters(
    function: &FunctionSignature,
    params: &str,
    observer: &mut dyn CheckObserver,
    failures: &mut Vec<CheckFailure>,
) -> std::io::Result<()> {
    let collapsed = params.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut covered: BTreeSet<String> = BTreeSet::new();

    for param in split_top_level(&collapsed) {
        let (name, ty) = param.split_once(':').unwrap_or((param, ""));
        let name = name.trim();
        let name = normalize_name(name.strip_prefix("mut ").unwrap_or(name));
        let ty = ty.trim();

        if function.pointer_arg(&name).is_some() {
            let ok = REFERENCE_PREFIXES.iter().any(|p| ty.starts_with(p));
            observer.argument_checked(&name, ty, ok)?;
            if !ok {
                failures.push(CheckFailure::new(
                    CheckerKind::Arguments,
                    format!("✖ {}: {name}: {ty}", function.name),
                ));
            }
        }
        covered.insert(name);
    }

    let missing: BTreeSet<String> = function
        .pointer_arg_names()
        .into_iter()
        .filter(|arg| !covered.contains(*arg))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        let message = format!(
            "{} has missing args: {}",
            function.name,
            format_name_set(&missing)
        );
        observer.failure_recorded(&message)?;
        failures.push(CheckFailure::new(CheckerKind::Arguments, message));
    }
    Ok(())
}

#[derive(Debug)]
struct Identifier {
    key: String,
    end: usize,
}

fn scan_identifiers(text: &str) -> Vec<Identifier> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        let is_ident = c == '_' || c.is_ascii_alphanumeric();
        match (start, is_ident) {
            (None, true) if !c.is_ascii_digit() => start = Some(i),
            (Some(s), false) => {
                out.push(Identifier {
                    key: normalize_name(&text[s..i]),
                    end: i,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(Identifier {
            key: normalize_name(&text[s..]),
            end: text.len(),
        });
    }
    out
}

/// The text inside the parameter list opened right after an identifier.
///
/// Whitespace and a generic parameter list may sit between the name and `(`.
/// Returns `None` for plain mentions (paths, comments, `use` lines) and for an
/// unbalanced list.
fn parameter_list(text: &str, after_name: usize) -> Option<&str> {
    let rest = &text[after_name..];
    let trimmed = rest.trim_start();
    let mut open = after_name + (rest.len() - trimmed.len());

    if trimmed.starts_with('<') {
        let generics_end = matching_close(text, open, '<', '>')?;
        let tail = &text[generics_end + 1..];
        open = generics_end + 1 + (tail.len() - tail.trim_start().len());
    }
    if !text[open..].starts_with('(') {
        return None;
    }
    let close = matching_close(text, open, '(', ')')?;
    Some(&text[open + 1..close])
}

fn matching_close(text: &str, open: usize, opener: char, closer: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut prev = '\0';
    for (offset, c) in text[open..].char_indices() {
        if c == opener {
            depth += 1;
        } else if c == closer && !(closer == '>' && prev == '-') {
            depth -= 1;
            if depth == 0 {
                return Some(open + offset);
            }
        }
        prev = c;
    }
    None
}

/// Split a parameter list on commas that are not nested in `()`, `<>` or `[]`.
pub(crate) fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0isize;
    let mut start = 0;
    let mut prev = '\0';
    for (i, c) in params.char_indices() {
        match c {
            '(' | '<' | '[' => depth += 1,
            '>' if prev == '-' => {}
            ')' | '>' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    let tail = params[start..].trim();
    if !tail.is_empty() || !parts.is_empty() {
        parts.push(tail);
    }
    parts
}

fn collect_source_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, CheckError> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|source| CheckError::ReadDir {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| CheckError::ReadDir {
                    path: current.clone(),
                    source,
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some(extension) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
