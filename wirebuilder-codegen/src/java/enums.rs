//! Enum code generation.

use super::{ClassWriter, IO_EXCEPTION, UnitGenerator, comment_line, java_literal};
use crate::error::CodegenError;
use crate::naming::{Accessor, builtin_primitive_name, generated_class_name, to_upper_snake_case};
use std::collections::BTreeSet;
use wirebuilder_schema::{EnumTypeDef, EnumValue};

/// Generator for an enum builder.
///
/// Members start as the declared values. Struct constants may add more
/// before the enum is generated, which is why enum emission is deferred.
#[derive(Debug, Clone)]
pub struct EnumGenerator<'a> {
    name: &'a str,
    def: &'a EnumTypeDef,
    values: Vec<EnumValue>,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(name: &'a str, def: &'a EnumTypeDef) -> Self {
        Self {
            name,
            def,
            values: def.values.clone(),
        }
    }

    /// Returns the enum type name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the current members.
    #[must_use]
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// Returns the member holding `value`, if any.
    #[must_use]
    pub fn member_for(&self, value: i64) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == value)
    }

    /// Adds a member unless its emitted name is already taken.
    ///
    /// Returns true if the member was added.
    pub fn add_value(&mut self, value: EnumValue) -> bool {
        let emitted = to_upper_snake_case(&value.name);
        if self.values.iter().any(|v| to_upper_snake_case(&v.name) == emitted) {
            return false;
        }
        self.values.push(value);
        true
    }
}

impl UnitGenerator for EnumGenerator<'_> {
    fn generate(&mut self) -> Result<Vec<String>, CodegenError> {
        let class_name = generated_class_name(self.name);
        let size = self.def.size;
        let primitive = builtin_primitive_name(size)?;
        let accessor = Accessor::for_width(size)?;

        let mut writer = ClassWriter::new();
        if let Some(comment) = comment_line(self.def.comment.as_deref()) {
            writer.line(0, comment);
        }
        writer.line(0, format!("public enum {class_name} {{"));

        if self.values.is_empty() {
            writer.line(1, ";");
        }
        let last = self.values.len().saturating_sub(1);
        for (i, value) in self.values.iter().enumerate() {
            if let Some(comment) = comment_line(value.comment.as_deref()) {
                writer.line(1, comment);
            }
            let terminator = if i == last { ';' } else { ',' };
            writer.line(
                1,
                format!(
                    "{}({}){terminator}",
                    to_upper_snake_case(&value.name),
                    java_literal(primitive, value.value)
                ),
            );
        }
        writer.blank();

        writer.line(1, "/** Enum value. */");
        writer.line(1, format!("private final {primitive} value;"));
        writer.blank();

        writer.line(1, "/**");
        writer.line(1, " * Constructor.");
        writer.line(1, " *");
        writer.line(1, " * @param value Enum value.");
        writer.line(1, " */");
        writer.line(1, format!("{class_name}(final {primitive} value) {{"));
        writer.line(2, "this.value = value;");
        writer.line(1, "}");
        writer.blank();

        writer.line(1, "/**");
        writer.line(1, " * Gets enum value.");
        writer.line(1, " *");
        writer.line(1, " * @param value Raw value of the enum.");
        writer.line(1, " * @return Enum value.");
        writer.line(1, " */");
        writer.line(
            1,
            format!("public static {class_name} rawValueOf(final {primitive} value) {{"),
        );
        writer.line(2, format!("for ({class_name} current : {class_name}.values()) {{"));
        writer.line(3, "if (value == current.value) {");
        writer.line(4, "return current;");
        writer.line(3, "}");
        writer.line(2, "}");
        writer.line(
            2,
            format!(
                "throw new IllegalArgumentException(value + \" was not a backing value for {class_name}.\");"
            ),
        );
        writer.line(1, "}");
        writer.blank();

        writer.get_size(vec![format!("return {size};")]);
        writer.getter(primitive, "getValue", "value", "the value of the enum");

        let read = format!("stream.{}()", accessor.read);
        writer.load_from_binary(
            &class_name,
            vec![
                "try {".to_string(),
                format!("    final {primitive} streamValue = {};", accessor.reversed(&read)),
                "    return rawValueOf(streamValue);".to_string(),
                "} catch (IOException e) {".to_string(),
                "    throw new RuntimeException(e);".to_string(),
                "}".to_string(),
            ],
        );

        let write = format!(
            "dataOutputStream.{}({});",
            accessor.write,
            accessor.reversed("this.value")
        );
        writer.serialize(vec![write]);
        writer.line(0, "}");

        Ok(writer.finish())
    }

    fn required_imports(&self) -> BTreeSet<String> {
        BTreeSet::from([IO_EXCEPTION.to_string()])
    }
}
