//! # wirebuilder codegen
//!
//! Java builder generation from wire-format schemas.
//!
//! This crate provides:
//! - Attribute classification and size resolution
//! - Lookup of attributes through inlined structs
//! - Builder class generation for byte types, structs and enums
//! - A lazy orchestrator yielding one source unit per type

pub mod classify;
pub mod error;
pub mod generator;
pub mod inline;
pub mod java;
pub mod naming;
pub mod options;
pub mod registry;

pub use classify::{AttributeKind, attribute_size, classify};
pub use error::CodegenError;
pub use generator::{FileGenerator, GeneratedUnit, should_generate_struct};
pub use options::{DEFAULT_PACKAGE, GeneratorOptions};
pub use registry::EnumRegistry;

/// Generates every unit of a schema file.
///
/// # Arguments
/// * `path` - Path to a YAML or JSON schema document
/// * `options` - Package and header settings
///
/// # Returns
/// The generated units in emission order.
///
/// # Errors
/// Returns `CodegenError` if loading or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: GeneratorOptions,
) -> Result<Vec<GeneratedUnit>, CodegenError> {
    let schema = wirebuilder_schema::load_file(path)?;
    FileGenerator::new(&schema, options).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("schema.yaml");
        std::fs::write(
            &path,
            "Height:\n  type: byte\n  size: 8\nColor:\n  type: enum\n  size: 1\n  values:\n    - name: red\n      value: 1\n",
        )
        .expect("write schema");

        let units = generate_from_file(&path, GeneratorOptions::default()).expect("generate");
        let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["HeightBuilder", "ColorBuilder"]);
    }

    #[test]
    fn test_generate_from_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = generate_from_file(&dir.path().join("nope.yaml"), GeneratorOptions::default());
        assert!(matches!(result, Err(CodegenError::Load(_))));
    }
}
