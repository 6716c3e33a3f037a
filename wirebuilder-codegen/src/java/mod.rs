//! Java builder code generation.
//!
//! Each schema type becomes one builder class. The generators here only
//! produce the class body; the package, imports and optional header are
//! added by [`crate::generator::FileGenerator`].

pub mod define_type;
pub mod enums;
pub mod structs;

pub use define_type::DefineTypeGenerator;
pub use enums::EnumGenerator;
pub use structs::StructGenerator;

use crate::error::CodegenError;
use std::collections::BTreeSet;

/// Import needed by every stream constructor and `serialize` method.
pub const IO_EXCEPTION: &str = "java.io.IOException";

/// Import needed by classes holding opaque payloads.
pub const BYTE_BUFFER: &str = "java.nio.ByteBuffer";

/// Generator for one unit of source.
pub trait UnitGenerator {
    /// Produces the unit's source lines.
    ///
    /// # Errors
    /// Returns `CodegenError` if an attribute cannot be classified or resolved.
    fn generate(&mut self) -> Result<Vec<String>, CodegenError>;

    /// Returns fully qualified imports the unit needs beyond the base set.
    fn required_imports(&self) -> BTreeSet<String>;
}

/// Indents a line by `level` steps of four spaces.
pub(crate) fn indent(level: usize, line: impl AsRef<str>) -> String {
    format!("{}{}", "    ".repeat(level), line.as_ref())
}

/// Formats a one-line doc comment, if there is a comment.
#[must_use]
pub fn comment_line(comment: Option<&str>) -> Option<String> {
    comment
        .filter(|c| !c.is_empty())
        .map(|c| format!("/** {c} */"))
}

/// Formats a Java integer literal of the given primitive type.
pub(crate) fn java_literal(primitive: &str, value: i64) -> String {
    match primitive {
        "long" => format!("{value}L"),
        "int" => value.to_string(),
        other => format!("({other}) {value}"),
    }
}

/// Emission helpers shared by class generators.
pub(crate) struct ClassWriter {
    lines: Vec<String>,
}

impl ClassWriter {
    pub(crate) fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub(crate) fn line(&mut self, level: usize, line: impl AsRef<str>) {
        self.lines.push(indent(level, line));
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub(crate) fn extend(&mut self, level: usize, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.line(level, line);
        }
    }

    /// Opens a `try { ... } catch (IOException e)` block around `body`.
    fn try_io(&mut self, level: usize, opening: &str, body: Vec<String>) {
        self.line(level, opening);
        self.extend(level + 1, body);
        self.line(level, "} catch (IOException e) {");
        self.line(level + 1, "throw new RuntimeException(e);");
        self.line(level, "}");
    }

    pub(crate) fn stream_constructor(&mut self, class_name: &str, body: Vec<String>) {
        self.line(1, "/**");
        self.line(1, " * Constructor - Creates an object from stream.");
        self.line(1, " *");
        self.line(1, " * @param stream Byte stream to use to serialize the object.");
        self.line(1, " */");
        self.line(1, format!("protected {class_name}(final DataInput stream) {{"));
        self.try_io(2, "try {", body);
        self.line(1, "}");
        self.blank();
    }

    pub(crate) fn getter(&mut self, java_type: &str, getter: &str, field: &str, doc: &str) {
        self.line(1, "/**");
        self.line(1, format!(" * Gets {doc}."));
        self.line(1, " *");
        self.line(1, format!(" * @return {doc}."));
        self.line(1, " */");
        self.line(1, format!("public {java_type} {getter}() {{"));
        self.line(2, format!("return this.{field};"));
        self.line(1, "}");
        self.blank();
    }

    pub(crate) fn get_size(&mut self, body: Vec<String>) {
        self.line(1, "/**");
        self.line(1, " * Gets the size of the object.");
        self.line(1, " *");
        self.line(1, " * @return Size in bytes.");
        self.line(1, " */");
        self.line(1, "public int getSize() {");
        self.extend(2, body);
        self.line(1, "}");
        self.blank();
    }

    pub(crate) fn load_from_binary(&mut self, class_name: &str, body: Vec<String>) {
        self.line(1, "/**");
        self.line(1, " * Creates an instance of this class from a stream.");
        self.line(1, " *");
        self.line(1, " * @param stream Byte stream to use to serialize the object.");
        self.line(1, format!(" * @return Instance of {class_name}."));
        self.line(1, " */");
        self.line(
            1,
            format!("public static {class_name} loadFromBinary(final DataInput stream) {{"),
        );
        self.extend(2, body);
        self.line(1, "}");
        self.blank();
    }

    pub(crate) fn serialize(&mut self, body: Vec<String>) {
        self.line(1, "/**");
        self.line(1, " * Serializes an object to bytes.");
        self.line(1, " *");
        self.line(1, " * @return Serialized bytes.");
        self.line(1, " */");
        self.line(1, "public byte[] serialize() {");
        let mut wrapped = body;
        wrapped.push("return byteArrayStream.toByteArray();".to_string());
        self.try_io(
            2,
            "try (final ByteArrayOutputStream byteArrayStream = new ByteArrayOutputStream(); \
             final DataOutputStream dataOutputStream = new DataOutputStream(byteArrayStream)) {",
            wrapped,
        );
        self.line(1, "}");
    }

    pub(crate) fn finish(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_line() {
        assert_eq!(comment_line(Some("block height")), Some("/** block height */".to_string()));
        assert_eq!(comment_line(Some("")), None);
        assert_eq!(comment_line(None), None);
    }

    #[test]
    fn test_java_literal() {
        assert_eq!(java_literal("byte", 3), "(byte) 3");
        assert_eq!(java_literal("short", -2), "(short) -2");
        assert_eq!(java_literal("int", 16724), "16724");
        assert_eq!(java_literal("long", 1), "1L");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent(0, "x"), "x");
        assert_eq!(indent(2, "x"), "        x");
    }

    #[test]
    fn test_serialize_wraps_body() {
        let mut writer = ClassWriter::new();
        writer.serialize(vec!["dataOutputStream.writeByte(this.value);".to_string()]);
        let lines = writer.finish();

        assert_eq!(lines[5], "    public byte[] serialize() {");
        assert!(lines.iter().any(|l| l == "            dataOutputStream.writeByte(this.value);"));
        assert!(lines.iter().any(|l| l.trim() == "return byteArrayStream.toByteArray();"));
        assert_eq!(lines.last().map(String::as_str), Some("    }"));
    }
}
