//! Generation options.

use std::path::{Path, PathBuf};

/// Package used when none is configured.
pub const DEFAULT_PACKAGE: &str = "io.wirebuilder.builders";

/// Imports every generated unit starts with.
pub const BASE_IMPORTS: [&str; 3] = [
    "java.io.ByteArrayOutputStream",
    "java.io.DataInput",
    "java.io.DataOutputStream",
];

/// Options controlling the preamble of every generated unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Package declared by each unit.
    pub package: String,
    /// Header file prepended to each unit, when it exists.
    pub copyright: Option<PathBuf>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            copyright: None,
        }
    }
}

impl GeneratorOptions {
    /// Creates options with the default package and no header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the header file.
    #[must_use]
    pub fn with_copyright(mut self, path: impl Into<PathBuf>) -> Self {
        self.copyright = Some(path.into());
        self
    }

    /// Reads the header lines, trimmed.
    ///
    /// A missing header file is not an error and yields no lines.
    ///
    /// # Errors
    /// Returns an IO error if the file exists but cannot be read.
    pub fn header_lines(&self) -> std::io::Result<Vec<String>> {
        match &self.copyright {
            Some(path) => read_header(path),
            None => Ok(Vec::new()),
        }
    }
}

fn read_header(path: &Path) -> std::io::Result<Vec<String>> {
    if !path.is_file() {
        tracing::debug!("header {} not found, skipping", path.display());
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(|line| line.trim().to_string()).collect())
}
