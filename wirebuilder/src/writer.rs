//! Writing generated units to disk.

use std::fs;
use std::path::{Path, PathBuf};
use wirebuilder_codegen::{CodegenError, GeneratedUnit};

/// Extension of generated source files.
pub const SOURCE_EXTENSION: &str = "java";

/// Writes each unit to `<output_dir>/<name>.java`.
#[derive(Debug, Clone)]
pub struct UnitWriter {
    output_dir: PathBuf,
}

impl UnitWriter {
    /// Creates a writer for `output_dir`. The directory is created on first write.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the file path a unit is written to.
    #[must_use]
    pub fn path_for(&self, unit: &GeneratedUnit) -> PathBuf {
        self.output_dir
            .join(&unit.name)
            .with_extension(SOURCE_EXTENSION)
    }

    /// Writes one unit, replacing any existing file.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory or file cannot be written.
    pub fn write(&self, unit: &GeneratedUnit) -> Result<PathBuf, CodegenError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(unit);
        fs::write(&path, unit.content())?;
        tracing::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Writes units until the first error.
    ///
    /// Files written before an error are left in place.
    ///
    /// # Errors
    /// Returns the first generation or IO error.
    pub fn write_all<I>(&self, units: I) -> Result<Vec<PathBuf>, CodegenError>
    where
        I: IntoIterator<Item = Result<GeneratedUnit, CodegenError>>,
    {
        let mut written = Vec::new();
        for unit in units {
            written.push(self.write(&unit?)?);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebuilder_codegen::{FileGenerator, GeneratorOptions};
    use wirebuilder_schema::{ByteTypeDef, EnumTypeDef, Schema, TypeDef};

    fn unit(name: &str, lines: &[&str]) -> GeneratedUnit {
        GeneratedUnit {
            name: name.to_string(),
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
        }
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let writer = UnitWriter::new(dir.path().join("out").join("java"));

        let path = writer
            .write(&unit("HeightBuilder", &["package p;", "", "class HeightBuilder {}"]))
            .expect("write");

        assert_eq!(path, writer.output_dir().join("HeightBuilder.java"));
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "package p;\n\nclass HeightBuilder {}\n");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let writer = UnitWriter::new(dir.path());

        writer.write(&unit("A", &["old"])).expect("first write");
        let path = writer.write(&unit("A", &["new"])).expect("second write");
        assert_eq!(fs::read_to_string(path).expect("read back"), "new\n");
    }

    #[test]
    fn test_write_all_from_generator() {
        let dir = tempfile::tempdir().expect("tempdir");
        let schema = Schema::from_types([
            ("Color", TypeDef::Enum(EnumTypeDef::new(1).with_value("red", 1))),
            ("Height", TypeDef::Byte(ByteTypeDef::new(8))),
        ]);
        let writer = UnitWriter::new(dir.path());

        let written = writer
            .write_all(FileGenerator::new(&schema, GeneratorOptions::default()))
            .expect("write all");

        let names: Vec<_> = written
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|n| n.to_str())
            .collect();
        assert_eq!(names, vec!["HeightBuilder.java", "ColorBuilder.java"]);
    }

    #[test]
    fn test_write_all_stops_at_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let schema = Schema::from_types([
            ("Height", TypeDef::Byte(ByteTypeDef::new(8))),
            ("Odd", TypeDef::Byte(ByteTypeDef::new(5))),
        ]);
        let writer = UnitWriter::new(dir.path());

        let result = writer.write_all(FileGenerator::new(&schema, GeneratorOptions::default()));
        assert!(matches!(result, Err(CodegenError::UnsupportedWidth { width: 5 })));
        assert!(dir.path().join("HeightBuilder.java").is_file());
    }
}
