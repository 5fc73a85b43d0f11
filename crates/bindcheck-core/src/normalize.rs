//! Cross-language name normalization.

/// Normalize an argument, field or function name for cross-language matching.
///
/// Underscores are dropped and the remainder is lower-cased, so `bufferSize`,
/// `buffer_size` and `BUFFER_SIZE` all map to `buffersize`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_styles_collapse_to_one_key() {
        assert_eq!(normalize_name("bufferSize"), "buffersize");
        assert_eq!(normalize_name("buffer_size"), "buffersize");
        assert_eq!(normalize_name("BUFFER_SIZE"), "buffersize");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["wgpuDeviceCreateBuffer", "wgpu_device_create_buffer", "_x_", ""] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn function_names_match_across_conventions() {
        assert_eq!(
            normalize_name("wgpuDoThing"),
            normalize_name("wgpu_do_thing")
        );
    }
}
