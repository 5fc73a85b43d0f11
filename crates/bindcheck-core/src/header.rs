//! Interface-definition header extraction.
//!
//! The header format is loose C: exported functions sit on lines that start
//! with an export marker, and plain structs use the `typedef struct { ... } Name;`
//! idiom with a single brace level. Anything richer (unions, nested structs)
//! is skipped rather than guessed at.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comments::strip_c_comments;
use crate::error::{CheckError, read_input};
use crate::normalize::normalize_name;

/// Marker used by the webgpu headers for exported entry points.
pub const DEFAULT_EXPORT_MARKER: &str = "WGPU_EXPORT";

const TYPEDEF_STRUCT: &str = "typedef struct";

/// A header parameter declared with a pointer marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerArg {
    /// Normalized argument name.
    pub name: String,
    /// Raw C parameter text, e.g. `WGPUBufferDescriptor const * descriptor`.
    pub c_param: String,
}

/// An exported function and its pointer-typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    /// Pointer parameters in declaration order. Empty when nothing needs checking.
    pub pointer_args: Vec<PointerArg>,
}

impl FunctionSignature {
    /// Whether the binding checker has anything to verify for this function.
    #[must_use]
    pub fn has_pointer_args(&self) -> bool {
        !self.pointer_args.is_empty()
    }

    /// Look up a pointer argument by normalized name.
    #[must_use]
    pub fn pointer_arg(&self, normalized: &str) -> Option<&PointerArg> {
        self.pointer_args.iter().find(|arg| arg.name == normalized)
    }

    /// Normalized names of all pointer arguments.
    #[must_use]
    pub fn pointer_arg_names(&self) -> BTreeSet<&str> {
        self.pointer_args.iter().map(|arg| arg.name.as_str()).collect()
    }
}

/// One field of a simple struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    /// Normalized field name used for comparison.
    pub name: String,
    /// Field name as written in the header.
    pub declared_name: String,
    /// Field type with `const` removed, e.g. `uint32_t` or `char*`.
    pub type_text: String,
}

/// Flat field layout of a `typedef struct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureLayout {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl StructureLayout {
    /// Normalized field name mapped to the name as declared.
    #[must_use]
    pub fn field_keys(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.declared_name.clone()))
            .collect()
    }
}

/// Reference facts recovered from one or more headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderIndex {
    functions: Vec<FunctionSignature>,
    structures: BTreeMap<String, StructureLayout>,
}

impl HeaderIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a single header text.
    #[must_use]
    pub fn from_text(text: &str, export_marker: &str) -> Self {
        let mut index = Self::new();
        index.add_header_text(text, export_marker);
        index
    }

    /// Read and index every header in order. Any unreadable header is fatal.
    pub fn from_files<P: AsRef<Path>>(
        paths: &[P],
        export_marker: &str,
    ) -> Result<Self, CheckError> {
        let mut index = Self::new();
        for path in paths {
            let text = read_input(path.as_ref())?;
            index.add_header_text(&text, export_marker);
        }
        Ok(index)
    }

    /// Merge the facts of another header. Later declarations replace earlier
    /// ones of the same name, keeping the original position.
    pub fn add_header_text(&mut self, text: &str, export_marker: &str) {
        let code = strip_c_comments(text);
        for function in extract_functions(&code, export_marker) {
            match self.functions.iter_mut().find(|f| f.name == function.name) {
                Some(existing) => *existing = function,
                None => self.functions.push(function),
            }
        }
        for layout in extract_structures(&code) {
            self.structures.insert(layout.name.clone(), layout);
        }
    }

    /// Exported functions in header declaration order.
    #[must_use]
    pub fn functions(&self) -> &[FunctionSignature] {
        &self.functions
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Simple structs keyed by name.
    #[must_use]
    pub fn structures(&self) -> &BTreeMap<String, StructureLayout> {
        &self.structures
    }

    #[must_use]
    pub fn structure(&self, name: &str) -> Option<&StructureLayout> {
        self.structures.get(name)
    }
}

/// Extract exported functions from comment-free header text.
#[must_use]
pub fn extract_functions(code: &str, export_marker: &str) -> Vec<FunctionSignature> {
    let mut functions = Vec::new();
    let mut lines = code.lines();

    while let Some(line) = lines.next() {
        if !line.starts_with(export_marker) {
            continue;
        }
        let mut decl = line.to_string();
        // Join continuation lines until the parameter list closes.
        while decl.contains('(') && paren_balance(&decl) > 0 {
            let Some(next) = lines.next() else { break };
            decl.push(' ');
            decl.push_str(next.trim());
        }
        if let Some(signature) = parse_declaration(&decl) {
            functions.push(signature);
        }
    }

    functions
}

fn paren_balance(text: &str) -> isize {
    text.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

fn parse_declaration(decl: &str) -> Option<FunctionSignature> {
    let (head, rest) = decl.split_once('(')?;
    let name = head.split_whitespace().last()?.trim_start_matches('*');
    if name.is_empty() {
        return None;
    }
    let params = rest.rfind(')').map_or(rest, |end| &rest[..end]);

    let pointer_args = params
        .split(',')
        .map(str::trim)
        .filter(|param| param.contains('*'))
        .filter_map(|param| {
            let arg = param.split_whitespace().last()?.trim_start_matches('*');
            (!arg.is_empty()).then(|| PointerArg {
                name: normalize_name(arg),
                c_param: param.to_string(),
            })
        })
        .collect();

    Some(FunctionSignature {
        name: name.to_string(),
        pointer_args,
    })
}

/// Extract simple `typedef struct` layouts from comment-free header text.
#[must_use]
pub fn extract_structures(code: &str) -> Vec<StructureLayout> {
    let mut layouts = Vec::new();
    let mut cursor = 0;

    while let Some(found) = code[cursor..].find(TYPEDEF_STRUCT) {
        let after_keyword = cursor + found + TYPEDEF_STRUCT.len();
        let rest = &code[after_keyword..];
        let Some(open_rel) = rest.find('{') else {
            break;
        };
        // `typedef struct FooImpl* Foo;` is an opaque handle, not a layout.
        if let Some(semi_rel) = rest.find(';')
            && semi_rel < open_rel
        {
            cursor = after_keyword + semi_rel + 1;
            continue;
        }

        let open = after_keyword + open_rel;
        let Some(close) = matching_brace(code, open) else {
            break;
        };
        let Some(term_rel) = code[close..].find(';') else {
            break;
        };
        let terminator = close + term_rel;
        cursor = terminator + 1;

        let body = &code[open + 1..close];
        if body.contains('{') {
            continue;
        }
        let Some(name) = code[close + 1..terminator].split_whitespace().next() else {
            continue;
        };

        layouts.push(StructureLayout {
            name: name.to_string(),
            fields: body.split(';').filter_map(parse_field).collect(),
        });
    }

    layouts
}

/// Index of the `}` closing the `{` at `open`, tracking nesting depth.
fn matching_brace(code: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in code[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_field(statement: &str) -> Option<StructField> {
    let mut tokens: Vec<&str> = statement.split_whitespace().collect();
    let last = tokens.pop()?;

    let stars = last.chars().take_while(|&c| c == '*').count();
    let mut declared = last.trim_matches('*');
    if let Some(bracket) = declared.find('[') {
        declared = &declared[..bracket];
    }

    let type_tokens: Vec<&str> = tokens.into_iter().filter(|t| *t != "const").collect();
    if declared.is_empty() || type_tokens.is_empty() {
        return None;
    }
    let mut type_text = type_tokens.join(" ");
    type_text.push_str(&"*".repeat(stars));

    Some(StructField {
        name: normalize_name(declared),
        declared_name: declared.to_string(),
        type_text,
    })
}
