//! Structure override checks.
//!
//! Build scripts re-declare some header structs by hand (`pub struct Name { pub field: T, ... }`).
//! Each such block must carry exactly the header's field set; order and types are not compared.

use std::collections::BTreeMap;
use std::path::Path;

use crate::binding::split_top_level;
use crate::error::{CheckError, read_input};
use crate::failure::{CheckFailure, CheckerKind, format_name_set};
use crate::header::HeaderIndex;
use crate::normalize::normalize_name;
use crate::observer::CheckObserver;

/// A `pub struct` block collected from a build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideBlock {
    pub name: String,
    /// Normalized field name mapped to the name as declared.
    pub fields: BTreeMap<String, String>,
}

/// Read `script` and compare every `pub struct` block against the header.
pub fn check_structure_overrides(
    index: &HeaderIndex,
    script: &Path,
    observer: &mut dyn CheckObserver,
) -> Result<Vec<CheckFailure>, CheckError> {
    let code = read_input(script)?;
    observer.file_started(script)?;

    let label = script
        .file_name()
        .map_or_else(|| script.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(check_override_text(index, &code, &label, observer)?)
}

/// Compare the `pub struct` blocks of `code` against the header.
///
/// `label` names the script in messages, e.g. `build.rs`.
pub fn check_override_text(
    index: &HeaderIndex,
    code: &str,
    label: &str,
    observer: &mut dyn CheckObserver,
) -> std::io::Result<Vec<CheckFailure>> {
    let mut failures = Vec::new();

    for block in collect_override_blocks(code) {
        let Some(layout) = index.structure(&block.name) else {
            let message = format!("✖ Unknown {label} struct {}", block.name);
            observer.failure_recorded(&message)?;
            failures.push(CheckFailure::new(CheckerKind::Structures, message));
            continue;
        };

        let reference = layout.field_keys();
        let mut mismatch: BTreeMap<&str, &str> = BTreeMap::new();
        for (key, declared) in &reference {
            if !block.fields.contains_key(key) {
                mismatch.insert(key.as_str(), declared.as_str());
            }
        }
        for (key, declared) in &block.fields {
            if !reference.contains_key(key) {
                mismatch.insert(key.as_str(), declared.as_str());
            }
        }

        if mismatch.is_empty() {
            observer.structure_passed(label, &block.name)?;
        } else {
            let names: Vec<String> = mismatch.values().map(|s| (*s).to_string()).collect();
            let message = format!(
                "✖ Key mismatch in {label} struct {}: {}",
                block.name,
                format_name_set(&names)
            );
            observer.failure_recorded(&message)?;
            failures.push(CheckFailure::new(CheckerKind::Structures, message));
        }
    }

    Ok(failures)
}

/// Collect every `pub struct` block with its `pub` field names.
///
/// Fields may share a line with the opening or closing brace, so
/// `pub struct A { pub x: u32, pub y: u32 }` is a complete block.
#[must_use]
pub fn collect_override_blocks(code: &str) -> Vec<OverrideBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<OverrideBlock> = None;

    for line in code.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();

        if let Some(rest) = line.strip_prefix("pub struct ") {
            let name = struct_name(rest);
            let brace = rest.find('{');
            if name.is_empty() || (brace.is_none() && rest.ends_with(';')) {
                // Unit and tuple structs carry no named fields to compare.
                open = None;
                continue;
            }
            let mut block = OverrideBlock {
                name: name.to_string(),
                fields: BTreeMap::new(),
            };
            // Without a brace the body opens on a later line.
            let body = brace.map_or("", |at| &rest[at + 1..]);
            match body.find('}') {
                Some(close) => {
                    collect_fields(&body[..close], &mut block.fields);
                    blocks.push(block);
                    open = None;
                }
                None => {
                    collect_fields(body, &mut block.fields);
                    open = Some(block);
                }
            }
            continue;
        }

        let Some(block) = open.as_mut() else {
            continue;
        };
        match line.find('}') {
            Some(close) => {
                collect_fields(&line[..close], &mut block.fields);
                blocks.extend(open.take());
            }
            None => collect_fields(line, &mut block.fields),
        }
    }

    blocks
}

/// Record the `pub` fields among comma-separated field declarations.
fn collect_fields(text: &str, fields: &mut BTreeMap<String, String>) {
    for entry in split_top_level(text) {
        let Some(field) = entry.strip_prefix("pub ") else {
            continue;
        };
        let declared = field.split(':').next().unwrap_or_default().trim();
        if !declared.is_empty() {
            fields.insert(normalize_name(declared), declared.to_string());
        }
    }
}

fn struct_name(rest: &str) -> &str {
    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, '{' | '<' | '(' | ';'))
        .unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::DEFAULT_EXPORT_MARKER;
    use crate::observer::NullObserver;

    const HEADER: &str = "\
typedef struct WGPUExtent3D {
    uint32_t width;
    uint32_t height;
} WGPUExtent3D;

typedef struct WGPUColor {
    union { double r; float rf; };
    double g;
} WGPUColor;

typedef struct WGPUBufferBinding {
    WGPUBuffer buffer;
    uint64_t offset;
    uint64_t bind_size;
} WGPUBufferBinding;
";

    fn check(script: &str) -> Vec<CheckFailure> {
        let index = HeaderIndex::from_text(HEADER, DEFAULT_EXPORT_MARKER);
        check_override_text(&index, script, "build.rs", &mut NullObserver).unwrap()
    }

    #[test]
    fn identical_field_set_passes_in_any_order() {
        let failures = check("pub struct WGPUExtent3D {\n    pub height: u32,\n    pub width: u32,\n}\n");
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn renamed_field_reports_both_sides() {
        let failures =
            check("pub struct WGPUExtent3D {\n    pub width: u32,\n    pub depth: u32,\n}\n");
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            "✖ Key mismatch in build.rs struct WGPUExtent3D: {depth, height}"
        );
    }

    #[test]
    fn added_field_is_named() {
        let failures = check(
            "pub struct WGPUExtent3D {\n    pub width: u32,\n    pub height: u32,\n    pub depth: u32,\n}\n",
        );
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.ends_with("{depth}"));
    }

    #[test]
    fn removed_field_is_named() {
        let failures = check("pub struct WGPUExtent3D {\n    pub width: u32,\n}\n");
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.ends_with("{height}"));
    }

    #[test]
    fn union_struct_is_unknown() {
        let failures = check("pub struct WGPUColor {\n    pub r: f64,\n    pub g: f64,\n}\n");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "✖ Unknown build.rs struct WGPUColor");
        assert_eq!(failures[0].checker, CheckerKind::Structures);
    }

    #[test]
    fn field_names_are_normalized() {
        let failures = check(
            "#[repr(C)]\npub struct WGPUBufferBinding {\n    pub buffer: Option<Id>,\n    pub offset: u64,\n    pub bindSize: u64,\n}\n",
        );
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn one_line_struct_fields_are_collected() {
        let blocks =
            collect_override_blocks("pub struct WGPUExtent3D { pub width: u32, pub depth: u32 }\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].fields.values().collect::<Vec<_>>(),
            ["depth", "width"]
        );
    }

    #[test]
    fn one_line_renamed_field_reports_both_sides() {
        let index = HeaderIndex::from_text(
            "typedef struct { uint32_t width; uint32_t height; } WGPUExtent3D;",
            DEFAULT_EXPORT_MARKER,
        );
        let failures = check_override_text(
            &index,
            "pub struct WGPUExtent3D { pub width: u32, pub depth: u32 }\n",
            "build.rs",
            &mut NullObserver,
        )
        .unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            "✖ Key mismatch in build.rs struct WGPUExtent3D: {depth, height}"
        );
    }

    #[test]
    fn fields_beside_braces_are_collected() {
        let blocks = collect_override_blocks(
            "pub struct Pair { pub first: Option<HashMap<u32, u8>>,\n    pub second: u8 }\npub struct Later\n{\n    pub x: u32,\n}\n",
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0].fields.keys().collect::<Vec<_>>(),
            ["first", "second"]
        );
        assert_eq!(blocks[1].name, "Later");
        assert_eq!(blocks[1].fields.keys().collect::<Vec<_>>(), ["x"]);
    }

    #[test]
    fn private_fields_and_attributes_are_ignored() {
        let blocks = collect_override_blocks(
            "pub struct A<'a> {\n    #[doc = \"x\"]\n    pub x: u32,\n    hidden: u8,\n}\npub struct Tuple(u32);\npub struct Empty {}\n",
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "A");
        assert_eq!(blocks[0].fields.keys().collect::<Vec<_>>(), ["x"]);
        assert_eq!(blocks[1].name, "Empty");
        assert!(blocks[1].fields.is_empty());
    }
}
