//! Check run configuration.
//!
//! Defaults mirror the wgpu-native layout:
//! - headers: `ffi/webgpu-headers/webgpu.h`
//! - binding sources: `src/**/*.rs`
//! - struct overrides: `build.rs`
//! - export marker: `WGPU_EXPORT`
//!
//! A JSON config file may replace any of these; CLI flags win over the file.
//! Relative paths in a config file resolve against the file's directory.

use std::path::{Path, PathBuf};

use bindcheck_core::ArgumentCheckOptions;
use bindcheck_core::header::DEFAULT_EXPORT_MARKER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Inputs and knobs for one check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Interface-definition headers, indexed in order.
    pub headers: Vec<PathBuf>,
    /// Directory holding the binding sources.
    pub source_dir: PathBuf,
    /// Build/codegen script carrying struct overrides.
    pub build_script: PathBuf,
    /// Keyword that starts exported function declarations.
    pub export_marker: String,
    /// Extension of binding source files.
    pub extension: String,
    /// Fail on header functions that no binding file mentions.
    pub strict_coverage: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            headers: vec![PathBuf::from("ffi/webgpu-headers/webgpu.h")],
            source_dir: PathBuf::from("src"),
            build_script: PathBuf::from("build.rs"),
            export_marker: DEFAULT_EXPORT_MARKER.to_string(),
            extension: String::from("rs"),
            strict_coverage: false,
        }
    }
}

/// Values supplied on the command line. `None`/empty means "keep".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub headers: Vec<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub build_script: Option<PathBuf>,
    pub export_marker: Option<String>,
    pub extension: Option<String>,
    pub strict_coverage: bool,
}

impl CheckConfig {
    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file, resolving its relative paths against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.rebased(base))
    }

    /// Resolve every relative path against `base`.
    #[must_use]
    pub fn rebased(mut self, base: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.headers = self.headers.into_iter().map(rebase).collect();
        self.source_dir = rebase(self.source_dir);
        self.build_script = rebase(self.build_script);
        self
    }

    /// Apply command-line overrides on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if !overrides.headers.is_empty() {
            self.headers = overrides.headers;
        }
        if let Some(dir) = overrides.source_dir {
            self.source_dir = dir;
        }
        if let Some(script) = overrides.build_script {
            self.build_script = script;
        }
        if let Some(marker) = overrides.export_marker {
            self.export_marker = marker;
        }
        if let Some(ext) = overrides.extension {
            self.extension = ext.trim_start_matches('.').to_string();
        }
        self.strict_coverage |= overrides.strict_coverage;
        self
    }

    /// Options for the binding argument checker.
    #[must_use]
    pub fn argument_options(&self) -> ArgumentCheckOptions {
        ArgumentCheckOptions {
            extension: self.extension.clone(),
            strict_coverage: self.strict_coverage,
        }
    }

    /// Every file the run reads directly (headers, then the build script).
    #[must_use]
    pub fn input_files(&self) -> Vec<&Path> {
        self.headers
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.build_script.as_path()))
            .collect()
    }
}
