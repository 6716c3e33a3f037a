//! Attribute classification and size resolution.
//!
//! Every attribute in a struct layout falls into one of four shapes, and the
//! shape decides both the generated field type and how the field is read and
//! written.

use crate::error::CodegenError;
use wirebuilder_schema::{Attribute, Schema, Size, TypeRef};

/// Suffix of a field holding a byte length.
pub const SIZE_SUFFIX: &str = "Size";

/// Suffix of a field holding an element count.
pub const COUNT_SUFFIX: &str = "Count";

/// Widest byte type that still fits a native integer.
pub const MAX_BUILTIN_WIDTH: usize = 8;

/// Shape of a classified attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Fixed-width native integer.
    Simple,
    /// Opaque byte payload, either wide or length-prefixed.
    Buffer,
    /// Repeated element with a runtime count.
    Array,
    /// Reference to another generated builder.
    Custom,
}

/// Classifies an attribute.
///
/// # Errors
/// Returns `CodegenError::AmbiguousSizeSuffix` when a runtime size field
/// name ends in neither `Size` nor `Count`.
pub fn classify(attribute: &Attribute) -> Result<AttributeKind, CodegenError> {
    if matches!(attribute.type_ref, TypeRef::Struct | TypeRef::Enum) {
        return Ok(AttributeKind::Custom);
    }

    match &attribute.size {
        None => Ok(AttributeKind::Custom),
        Some(Size::Field(size)) => {
            if size.ends_with(SIZE_SUFFIX) {
                Ok(AttributeKind::Buffer)
            } else if size.ends_with(COUNT_SUFFIX) {
                Ok(AttributeKind::Array)
            } else {
                Err(CodegenError::AmbiguousSizeSuffix {
                    field: attribute.name.clone(),
                    size: size.clone(),
                })
            }
        }
        Some(Size::Fixed(width)) => {
            if is_builtin_type(&attribute.type_ref, *width) {
                Ok(AttributeKind::Simple)
            } else {
                Ok(AttributeKind::Buffer)
            }
        }
    }
}

/// Returns true if a `byte` literal of this width maps to a native integer.
#[must_use]
pub fn is_builtin_type(type_ref: &TypeRef, width: usize) -> bool {
    *type_ref == TypeRef::Byte && width <= MAX_BUILTIN_WIDTH
}

/// Resolves the size of an attribute.
///
/// An explicit size is returned unchanged. Otherwise literal-typed
/// attributes default to 1 and named types inherit the referenced type's
/// declared width, or 1 if it declares none.
///
/// # Errors
/// Returns `CodegenError::UnknownType` if the referenced type is not in the schema.
pub fn attribute_size(schema: &Schema, attribute: &Attribute) -> Result<Size, CodegenError> {
    if let Some(size) = &attribute.size {
        return Ok(size.clone());
    }

    match &attribute.type_ref {
        TypeRef::Byte | TypeRef::Enum | TypeRef::Struct => Ok(Size::Fixed(1)),
        TypeRef::Named(type_name) => {
            let type_def = schema
                .get(type_name)
                .ok_or_else(|| CodegenError::unknown_type(type_name, &attribute.name))?;
            Ok(Size::Fixed(type_def.declared_size().unwrap_or(1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebuilder_schema::{ByteTypeDef, EnumTypeDef, StructTypeDef, TypeDef};

    fn attr(type_name: &str, size: Option<Size>) -> Attribute {
        let mut attribute = Attribute::new("field", TypeRef::parse(type_name));
        attribute.size = size;
        attribute
    }

    fn fixed(n: usize) -> Option<Size> {
        Some(Size::Fixed(n))
    }

    fn field(name: &str) -> Option<Size> {
        Some(Size::Field(name.to_string()))
    }

    #[test]
    fn test_struct_and_enum_literals_are_custom() {
        for size in [None, fixed(1), fixed(64), field("dataSize"), field("odd")] {
            assert_eq!(classify(&attr("struct", size.clone())).ok(), Some(AttributeKind::Custom));
            assert_eq!(classify(&attr("enum", size)).ok(), Some(AttributeKind::Custom));
        }
    }

    #[test]
    fn test_missing_size_is_custom() {
        assert_eq!(classify(&attr("Height", None)).ok(), Some(AttributeKind::Custom));
        assert_eq!(classify(&attr("Mosaic", None)).ok(), Some(AttributeKind::Custom));
    }

    #[test]
    fn test_runtime_sizes() {
        assert_eq!(
            classify(&attr("byte", field("payloadSize"))).ok(),
            Some(AttributeKind::Buffer)
        );
        assert_eq!(
            classify(&attr("Mosaic", field("mosaicsCount"))).ok(),
            Some(AttributeKind::Array)
        );
    }

    #[test]
    fn test_ambiguous_suffix_is_error() {
        let err = classify(&attr("byte", field("payloadLength"))).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::AmbiguousSizeSuffix { ref size, .. } if size == "payloadLength"
        ));
    }

    #[test]
    fn test_fixed_sizes() {
        for width in 1..=8 {
            assert_eq!(classify(&attr("byte", fixed(width))).ok(), Some(AttributeKind::Simple));
        }
        assert_eq!(classify(&attr("byte", fixed(9))).ok(), Some(AttributeKind::Buffer));
        assert_eq!(classify(&attr("byte", fixed(32))).ok(), Some(AttributeKind::Buffer));
        // named types with an explicit width are opaque payloads
        assert_eq!(classify(&attr("Height", fixed(8))).ok(), Some(AttributeKind::Buffer));
    }

    #[test]
    fn test_attribute_size() {
        let schema = Schema::from_types([
            ("Height", TypeDef::Byte(ByteTypeDef::new(8))),
            ("Color", TypeDef::Enum(EnumTypeDef::new(2))),
            ("Point", TypeDef::Struct(StructTypeDef::default())),
        ]);

        let size = |a: &Attribute| attribute_size(&schema, a).ok();
        assert_eq!(size(&attr("Height", None)), fixed(8));
        assert_eq!(size(&attr("Color", None)), fixed(2));
        assert_eq!(size(&attr("Point", None)), fixed(1));
        assert_eq!(size(&attr("byte", None)), fixed(1));
        assert_eq!(size(&attr("enum", None)), fixed(1));
        assert_eq!(size(&attr("Height", fixed(4))), fixed(4));
        assert_eq!(size(&attr("Missing", field("itemsCount"))), field("itemsCount"));
    }

    #[test]
    fn test_attribute_size_unknown_type() {
        let err = attribute_size(&Schema::default(), &attr("Missing", None)).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnknownType { ref type_name, ref field }
                if type_name == "Missing" && field == "field"
        ));
    }
}
