//! Generated type names and stream accessor selection.

use crate::classify::{AttributeKind, attribute_size, classify};
use crate::error::CodegenError;
use wirebuilder_schema::{Attribute, Schema, Size, TypeRef};

/// Suffix appended to every generated class.
pub const BUILDER_SUFFIX: &str = "Builder";

/// Container type for opaque byte payloads.
pub const BUFFER_TYPE: &str = "ByteBuffer";

/// Returns the generated class name for a schema type.
#[must_use]
pub fn generated_class_name(type_name: &str) -> String {
    format!("{type_name}{BUILDER_SUFFIX}")
}

/// Maps a byte width to its native integer primitive.
///
/// # Errors
/// Returns `CodegenError::UnsupportedWidth` for widths other than 1, 2, 4 and 8.
pub fn builtin_primitive_name(width: usize) -> Result<&'static str, CodegenError> {
    match width {
        1 => Ok("byte"),
        2 => Ok("short"),
        4 => Ok("int"),
        8 => Ok("long"),
        _ => Err(CodegenError::UnsupportedWidth { width }),
    }
}

/// Returns the generated type of an attribute.
///
/// # Errors
/// Propagates classification, size resolution and width mapping errors.
pub fn generated_type(schema: &Schema, attribute: &Attribute) -> Result<String, CodegenError> {
    let element_type = match &attribute.type_ref {
        TypeRef::Byte => TypeRef::Byte.as_str().to_string(),
        other => generated_class_name(other.as_str()),
    };

    match classify(attribute)? {
        AttributeKind::Simple => match attribute_size(schema, attribute)? {
            Size::Fixed(width) => Ok(builtin_primitive_name(width)?.to_string()),
            Size::Field(size) => Err(CodegenError::generation(format!(
                "simple field '{}' has runtime size '{size}'",
                attribute.name
            ))),
        },
        AttributeKind::Buffer => Ok(BUFFER_TYPE.to_string()),
        AttributeKind::Array if attribute.type_ref == TypeRef::Byte => {
            Ok("java.util.ArrayList<Byte>".to_string())
        }
        AttributeKind::Array => Ok(format!("java.util.ArrayList<{element_type}>")),
        AttributeKind::Custom => Ok(element_type),
    }
}

/// Stream operations for one attribute width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    /// `DataInput` read method.
    pub read: &'static str,
    /// `DataOutputStream` write method.
    pub write: &'static str,
    /// Byte order reversal template; `{0}` is the value expression.
    pub reverse: &'static str,
}

impl Accessor {
    /// Bulk accessor for wide or variable payloads.
    pub const BULK: Self = Self {
        read: "readFully",
        write: "write",
        reverse: "{0}",
    };

    /// Selects the accessor for a resolved size.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedWidth` for fixed widths up to 8
    /// that are not 1, 2, 4 or 8.
    pub fn for_size(size: &Size) -> Result<Self, CodegenError> {
        match *size {
            Size::Field(_) => Ok(Self::BULK),
            Size::Fixed(width) if width > 8 => Ok(Self::BULK),
            Size::Fixed(width) => Self::for_width(width),
        }
    }

    /// Selects the fixed-width accessor.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedWidth` for widths other than 1, 2, 4 and 8.
    pub fn for_width(width: usize) -> Result<Self, CodegenError> {
        let (read, write, reverse) = match width {
            1 => ("readByte", "writeByte", "{0}"),
            2 => ("readShort", "writeShort", "Short.reverseBytes({0})"),
            4 => ("readInt", "writeInt", "Integer.reverseBytes({0})"),
            8 => ("readLong", "writeLong", "Long.reverseBytes({0})"),
            _ => return Err(CodegenError::UnsupportedWidth { width }),
        };
        Ok(Self {
            read,
            write,
            reverse,
        })
    }

    /// Returns true if this accessor moves whole byte arrays.
    #[must_use]
    pub fn is_bulk(&self) -> bool {
        *self == Self::BULK
    }

    /// Wraps `expr` in the byte order reversal.
    #[must_use]
    pub fn reversed(&self, expr: &str) -> String {
        self.reverse.replace("{0}", expr)
    }
}

/// Converts a string to camelCase.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a string to UPPER_SNAKE_CASE.
#[must_use]
pub fn to_upper_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '-' || c == '_' {
            result.push('_');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            result.push('_');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        result.push(c.to_ascii_uppercase());
    }
    result
}

/// Returns the getter method name for a field.
#[must_use]
pub fn getter_name(field: &str) -> String {
    format!("get{}", to_pascal_case(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebuilder_schema::{ByteTypeDef, EnumTypeDef, TypeDef};

    fn schema() -> Schema {
        Schema::from_types([
            ("Height", TypeDef::Byte(ByteTypeDef::new(8))),
            ("Color", TypeDef::Enum(EnumTypeDef::new(1))),
        ])
    }

    #[test]
    fn test_generated_class_name() {
        assert_eq!(generated_class_name("Height"), "HeightBuilder");
        assert_eq!(generated_class_name("Height"), generated_class_name("Height"));
        assert_eq!(generated_class_name(""), "Builder");
    }

    #[test]
    fn test_builtin_primitive_name() {
        let names: Vec<_> = [1, 2, 4, 8]
            .into_iter()
            .map(|w| builtin_primitive_name(w).expect("supported width"))
            .collect();
        assert_eq!(names, vec!["byte", "short", "int", "long"]);

        for width in [0, 3, 5, 6, 7, 9, 16, 32] {
            assert!(matches!(
                builtin_primitive_name(width),
                Err(CodegenError::UnsupportedWidth { width: w }) if w == width
            ));
        }
    }

    #[test]
    fn test_generated_type() {
        let schema = schema();
        let ty = |a: Attribute| generated_type(&schema, &a).expect("generated type");

        assert_eq!(ty(Attribute::new("v", TypeRef::Byte).with_size(Size::Fixed(2))), "short");
        assert_eq!(ty(Attribute::new("h", TypeRef::Byte).with_size(Size::Fixed(32))), "ByteBuffer");
        assert_eq!(
            ty(Attribute::new("p", TypeRef::Byte).with_size(Size::Field("pSize".to_string()))),
            "ByteBuffer"
        );
        assert_eq!(
            ty(Attribute::new("hs", TypeRef::parse("Height"))
                .with_size(Size::Field("hsCount".to_string()))),
            "java.util.ArrayList<HeightBuilder>"
        );
        assert_eq!(
            ty(Attribute::new("bs", TypeRef::Byte).with_size(Size::Field("bsCount".to_string()))),
            "java.util.ArrayList<Byte>"
        );
        assert_eq!(ty(Attribute::new("x", TypeRef::parse("Height"))), "HeightBuilder");
        assert_eq!(ty(Attribute::new("c", TypeRef::parse("Color"))), "ColorBuilder");
    }

    #[test]
    fn test_generated_type_unsupported_width() {
        let attribute = Attribute::new("odd", TypeRef::Byte).with_size(Size::Fixed(3));
        assert!(matches!(
            generated_type(&schema(), &attribute),
            Err(CodegenError::UnsupportedWidth { width: 3 })
        ));
    }

    #[test]
    fn test_accessor_by_width() {
        let long = Accessor::for_size(&Size::Fixed(8)).expect("accessor");
        assert_eq!(long.read, "readLong");
        assert_eq!(long.write, "writeLong");
        assert_eq!(long.reversed("v"), "Long.reverseBytes(v)");

        let short = Accessor::for_width(2).expect("accessor");
        assert_eq!(short.reversed("v"), "Short.reverseBytes(v)");
        assert_eq!(Accessor::for_width(4).expect("accessor").read, "readInt");

        let byte = Accessor::for_width(1).expect("accessor");
        assert_eq!(byte.read, "readByte");
        assert_eq!(byte.reversed("v"), "v");
    }

    #[test]
    fn test_bulk_accessor() {
        for size in [Size::Fixed(9), Size::Fixed(64), Size::Field("dataSize".to_string())] {
            let accessor = Accessor::for_size(&size).expect("accessor");
            assert!(accessor.is_bulk());
            assert_eq!(accessor.read, "readFully");
            assert_eq!(accessor.write, "write");
            assert_eq!(accessor.reversed("v"), "v");
        }
        assert!(Accessor::for_size(&Size::Fixed(3)).is_err());
        assert!(!Accessor::for_width(8).expect("accessor").is_bulk());
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("payloadSize"), "PayloadSize");
        assert_eq!(to_camel_case("MosaicId"), "mosaicId");
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_upper_snake_case("TransferTransaction"), "TRANSFER_TRANSACTION");
        assert_eq!(to_upper_snake_case("mosaicId"), "MOSAIC_ID");
        assert_eq!(to_upper_snake_case("Hash256"), "HASH256");
        assert_eq!(to_upper_snake_case("ALREADY_UPPER"), "ALREADY_UPPER");
        assert_eq!(getter_name("payloadSize"), "getPayloadSize");
    }
}
