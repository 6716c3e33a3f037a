//! Builder classes wrapping a single byte type.

use super::{BYTE_BUFFER, ClassWriter, IO_EXCEPTION, UnitGenerator, comment_line};
use crate::classify::MAX_BUILTIN_WIDTH;
use crate::error::CodegenError;
use crate::naming::{
    Accessor, BUFFER_TYPE, builtin_primitive_name, generated_class_name, getter_name,
    to_camel_case,
};
use std::collections::BTreeSet;
use wirebuilder_schema::{ByteTypeDef, Size};

/// Generator for a class wrapping one byte type value.
pub struct DefineTypeGenerator<'a> {
    name: &'a str,
    def: &'a ByteTypeDef,
}

impl<'a> DefineTypeGenerator<'a> {
    /// Creates a new define-type generator.
    #[must_use]
    pub fn new(name: &'a str, def: &'a ByteTypeDef) -> Self {
        Self { name, def }
    }

    fn is_buffer(&self) -> bool {
        self.def.size > MAX_BUILTIN_WIDTH
    }
}

impl UnitGenerator for DefineTypeGenerator<'_> {
    fn generate(&mut self) -> Result<Vec<String>, CodegenError> {
        let class_name = generated_class_name(self.name);
        let field = to_camel_case(self.name);
        let size = self.def.size;
        let accessor = Accessor::for_size(&Size::Fixed(size))?;
        let java_type = if self.is_buffer() {
            BUFFER_TYPE
        } else {
            builtin_primitive_name(size)?
        };
        let doc = self.def.comment.clone().unwrap_or_else(|| self.name.to_string());

        let mut writer = ClassWriter::new();
        if let Some(comment) = comment_line(self.def.comment.as_deref()) {
            writer.line(0, comment);
        }
        writer.line(0, format!("public final class {class_name} {{"));
        writer.line(1, format!("/** {doc}. */"));
        writer.line(1, format!("private final {java_type} {field};"));
        writer.blank();

        writer.line(1, "/**");
        writer.line(1, " * Constructor.");
        writer.line(1, " *");
        writer.line(1, format!(" * @param {field} {doc}."));
        writer.line(1, " */");
        writer.line(1, format!("public {class_name}(final {java_type} {field}) {{"));
        writer.line(2, format!("this.{field} = {field};"));
        writer.line(1, "}");
        writer.blank();

        let load = if accessor.is_bulk() {
            vec![
                format!("final byte[] {field}Bytes = new byte[{size}];"),
                format!("stream.{}({field}Bytes);", accessor.read),
                format!("this.{field} = ByteBuffer.wrap({field}Bytes);"),
            ]
        } else {
            let read = format!("stream.{}()", accessor.read);
            vec![format!("this.{field} = {};", accessor.reversed(&read))]
        };
        writer.stream_constructor(&class_name, load);

        writer.getter(java_type, &getter_name(&field), &field, &doc);
        writer.get_size(vec![format!("return {size};")]);
        writer.load_from_binary(&class_name, vec![format!("return new {class_name}(stream);")]);

        let write = if accessor.is_bulk() {
            format!(
                "dataOutputStream.{}(this.{field}.array(), 0, this.{field}.array().length);",
                accessor.write
            )
        } else {
            let value = format!("this.{}()", getter_name(&field));
            format!("dataOutputStream.{}({});", accessor.write, accessor.reversed(&value))
        };
        writer.serialize(vec![write]);
        writer.line(0, "}");

        Ok(writer.finish())
    }

    fn required_imports(&self) -> BTreeSet<String> {
        let mut imports = BTreeSet::from([IO_EXCEPTION.to_string()]);
        if self.is_buffer() {
            imports.insert(BYTE_BUFFER.to_string());
        }
        imports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(name: &str, def: &ByteTypeDef) -> Vec<String> {
        DefineTypeGenerator::new(name, def).generate().expect("generate")
    }

    #[test]
    fn test_generate_long_wrapper() {
        let mut def = ByteTypeDef::new(8);
        def.comment = Some("block height".to_string());
        let lines = generate("Height", &def);

        assert_eq!(lines[0], "/** block height */");
        assert_eq!(lines[1], "public final class HeightBuilder {");
        assert!(lines.contains(&"    private final long height;".to_string()));
        assert!(lines.iter().any(|l| l.trim() == "this.height = Long.reverseBytes(stream.readLong());"));
        assert!(lines.iter().any(|l| l.trim() == "return 8;"));
        assert!(lines.iter().any(|l| {
            l.trim() == "dataOutputStream.writeLong(Long.reverseBytes(this.getHeight()));"
        }));
        assert_eq!(lines.last().map(String::as_str), Some("}"));
    }

    #[test]
    fn test_generate_byte_wrapper_has_no_reversal() {
        let lines = generate("Flag", &ByteTypeDef::new(1));
        assert!(lines.iter().any(|l| l.trim() == "this.flag = stream.readByte();"));
        assert!(lines.iter().any(|l| l.trim() == "dataOutputStream.writeByte(this.getFlag());"));
    }

    #[test]
    fn test_generate_buffer_wrapper() {
        let def = ByteTypeDef::new(32);
        let generator = DefineTypeGenerator::new("Hash256", &def);
        assert!(generator.required_imports().contains(BYTE_BUFFER));

        let lines = generate("Hash256", &def);
        assert!(lines.contains(&"    private final ByteBuffer hash256;".to_string()));
        assert!(lines.iter().any(|l| l.trim() == "final byte[] hash256Bytes = new byte[32];"));
        assert!(lines.iter().any(|l| l.trim() == "stream.readFully(hash256Bytes);"));
        assert!(lines.iter().any(|l| {
            l.trim() == "dataOutputStream.write(this.hash256.array(), 0, this.hash256.array().length);"
        }));
    }

    #[test]
    fn test_unsupported_width() {
        let def = ByteTypeDef::new(3);
        let result = DefineTypeGenerator::new("Odd", &def).generate();
        assert!(matches!(result, Err(CodegenError::UnsupportedWidth { width: 3 })));
    }

    #[test]
    fn test_required_imports_without_buffer() {
        let def = ByteTypeDef::new(4);
        let imports = DefineTypeGenerator::new("Amount", &def).required_imports();
        assert_eq!(imports.into_iter().collect::<Vec<_>>(), vec![IO_EXCEPTION.to_string()]);
    }
}
