//! C comment stripping.

/// Remove `// ...` and `/* ... */` comments from `code`.
///
/// A line comment keeps its terminating newline. An unterminated comment
/// truncates the output at the comment start; this never fails.
#[must_use]
pub fn strip_c_comments(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut pos = 0;

    loop {
        let line = code[pos..].find("//").map(|i| pos + i);
        let block = code[pos..].find("/*").map(|i| pos + i);

        let (start, terminator) = match (line, block) {
            (None, None) => {
                out.push_str(&code[pos..]);
                break;
            }
            (Some(l), Some(b)) if l < b => (l, "\n"),
            (Some(l), None) => (l, "\n"),
            (_, Some(b)) => (b, "*/"),
        };
        out.push_str(&code[pos..start]);

        let Some(end) = code[start + 2..].find(terminator).map(|i| start + 2 + i) else {
            break;
        };
        pos = if terminator == "\n" {
            end
        } else {
            end + terminator.len()
        };
    }

    out
}
