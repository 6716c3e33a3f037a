//! Schema type definitions.
//!
//! This module contains the data structures representing a wire-format
//! schema: byte types, enums, structs and the attributes that make up a
//! struct layout.

use indexmap::IndexMap;

/// Complete wire-format schema.
///
/// Maps each type name to its definition. Iteration follows declaration
/// order, which is also the order generated units are emitted in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    types: IndexMap<String, TypeDef>,
}

impl Schema {
    /// Creates a schema from `(name, definition)` pairs in declaration order.
    ///
    /// A repeated name keeps its first position and takes the last definition.
    #[must_use]
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeDef)>,
        S: Into<String>,
    {
        Self {
            types: types
                .into_iter()
                .map(|(name, def)| (name.into(), def))
                .collect(),
        }
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Iterates over `(name, definition)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDef)> {
        self.types.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Returns the entry at `index` in declaration order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &TypeDef)> {
        self.types
            .get_index(index)
            .map(|(name, def)| (name.as_str(), def))
    }

    /// Iterates over type names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the schema has no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Type definition variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// Primitive-backed leaf type.
    Byte(ByteTypeDef),
    /// Named integer constants over a backing width.
    Enum(EnumTypeDef),
    /// Ordered sequence of attributes.
    Struct(StructTypeDef),
}

impl TypeDef {
    /// Returns the declared byte width, if the type declares one.
    ///
    /// Structs never declare a width; their size is the sum of their layout.
    #[must_use]
    pub const fn declared_size(&self) -> Option<usize> {
        match self {
            Self::Byte(b) => Some(b.size),
            Self::Enum(e) => Some(e.size),
            Self::Struct(_) => None,
        }
    }

    /// Returns the optional comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Byte(b) => b.comment.as_deref(),
            Self::Enum(e) => e.comment.as_deref(),
            Self::Struct(s) => s.comment.as_deref(),
        }
    }

    /// Returns the struct layout, or `None` for byte and enum types.
    #[must_use]
    pub fn layout(&self) -> Option<&[Attribute]> {
        match self {
            Self::Struct(s) => Some(&s.layout),
            _ => None,
        }
    }

    /// Returns true if this is a byte type.
    #[must_use]
    pub const fn is_byte(&self) -> bool {
        matches!(self, Self::Byte(_))
    }

    /// Returns true if this is an enum type.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Returns true if this is a struct type.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}

/// Byte type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteTypeDef {
    /// Width in bytes.
    pub size: usize,
    /// Signedness of the underlying integer.
    pub signedness: Signedness,
    /// Description.
    pub comment: Option<String>,
}

impl ByteTypeDef {
    /// Creates an unsigned byte type of the given width.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            signedness: Signedness::Unsigned,
            comment: None,
        }
    }
}

/// Integer signedness of a byte type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signedness {
    /// Signed two's complement.
    Signed,
    /// Unsigned (default).
    #[default]
    Unsigned,
}

impl Signedness {
    /// Parses signedness from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "signed" => Some(Self::Signed),
            "unsigned" => Some(Self::Unsigned),
            _ => None,
        }
    }
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTypeDef {
    /// Backing width in bytes.
    pub size: usize,
    /// Declared members.
    pub values: Vec<EnumValue>,
    /// Description.
    pub comment: Option<String>,
}

impl EnumTypeDef {
    /// Creates an empty enum with the given backing width.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            values: Vec::new(),
            comment: None,
        }
    }

    /// Adds a member.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push(EnumValue::new(name, value));
        self
    }
}

/// Enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Member name.
    pub name: String,
    /// Numeric value.
    pub value: i64,
    /// Description.
    pub comment: Option<String>,
}

impl EnumValue {
    /// Creates a new enum member.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            comment: None,
        }
    }
}

/// Struct type definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructTypeDef {
    /// Attributes in wire order.
    pub layout: Vec<Attribute>,
    /// Description.
    pub comment: Option<String>,
}

impl StructTypeDef {
    /// Creates a struct from its layout.
    #[must_use]
    pub fn new(layout: Vec<Attribute>) -> Self {
        Self {
            layout,
            comment: None,
        }
    }
}

/// One field within a struct layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Field name, unique within its struct.
    pub name: String,
    /// Referenced type.
    pub type_ref: TypeRef,
    /// Explicit size or count.
    pub size: Option<Size>,
    /// Inline or const modifier.
    pub disposition: Option<Disposition>,
    /// Constant value (const attributes only).
    pub value: Option<ConstValue>,
    /// Description.
    pub comment: Option<String>,
}

impl Attribute {
    /// Creates an attribute with no size, disposition or comment.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            size: None,
            disposition: None,
            value: None,
            comment: None,
        }
    }

    /// Sets the size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the disposition.
    #[must_use]
    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = Some(disposition);
        self
    }

    /// Sets the constant value.
    #[must_use]
    pub fn with_value(mut self, value: ConstValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns true if the attribute flattens its referenced struct.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.disposition == Some(Disposition::Inline)
    }

    /// Returns true if the attribute is a compile-time constant.
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.disposition == Some(Disposition::Const)
    }
}

/// Type referenced by an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// The `byte` literal marker.
    Byte,
    /// The `enum` literal marker.
    Enum,
    /// The `struct` literal marker.
    Struct,
    /// Another schema type, by name.
    Named(String),
}

impl TypeRef {
    /// Parses a type reference, mapping the literal markers to their variants.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "byte" => Self::Byte,
            "enum" => Self::Enum,
            "struct" => Self::Struct,
            other => Self::Named(other.to_string()),
        }
    }

    /// Returns the name as written in the schema.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Byte => "byte",
            Self::Enum => "enum",
            Self::Struct => "struct",
            Self::Named(name) => name,
        }
    }

    /// Returns the referenced schema type name, if any.
    #[must_use]
    pub fn named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// Size of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Size {
    /// Fixed width in bytes, or a fixed element count.
    Fixed(usize),
    /// Name of another attribute holding the size or count at runtime.
    Field(String),
}

/// Attribute modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Referenced struct's fields are flattened into the owner.
    Inline,
    /// Compile-time constant, not part of the wire layout.
    Const,
}

impl Disposition {
    /// Parses a disposition from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inline" => Some(Self::Inline),
            "const" => Some(Self::Const),
            _ => None,
        }
    }
}

/// Value of a const attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    /// Integer literal.
    Int(i64),
    /// Name of an enum member.
    Name(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_schema() -> Schema {
        Schema::from_types([
            ("Height", TypeDef::Byte(ByteTypeDef::new(8))),
            ("Color", TypeDef::Enum(EnumTypeDef::new(1).with_value("red", 1))),
            (
                "Point",
                TypeDef::Struct(StructTypeDef::new(vec![
                    Attribute::new("x", TypeRef::parse("Height")),
                    Attribute::new("c", TypeRef::parse("Color")),
                ])),
            ),
        ])
    }

    #[test]
    fn test_schema_lookup() {
        let schema = point_schema();

        assert!(schema.contains("Height"));
        assert!(!schema.contains("Width"));
        assert_eq!(schema.len(), 3);
        assert!(schema.get("Point").is_some_and(TypeDef::is_struct));
    }

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema = point_schema();
        let names: Vec<_> = schema.names().collect();
        assert_eq!(names, vec!["Height", "Color", "Point"]);
        assert_eq!(schema.get_index(1).map(|(n, _)| n), Some("Color"));
        assert!(schema.get_index(3).is_none());
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::default();
        assert!(schema.is_empty());
        assert_eq!(schema.iter().count(), 0);
    }

    #[test]
    fn test_declared_size() {
        let schema = point_schema();
        assert_eq!(schema.get("Height").and_then(TypeDef::declared_size), Some(8));
        assert_eq!(schema.get("Color").and_then(TypeDef::declared_size), Some(1));
        assert_eq!(schema.get("Point").and_then(TypeDef::declared_size), None);
    }

    #[test]
    fn test_type_ref_parse() {
        assert_eq!(TypeRef::parse("byte"), TypeRef::Byte);
        assert_eq!(TypeRef::parse("enum"), TypeRef::Enum);
        assert_eq!(TypeRef::parse("struct"), TypeRef::Struct);
        assert_eq!(TypeRef::parse("Hash256"), TypeRef::Named("Hash256".to_string()));
        assert_eq!(TypeRef::parse("Hash256").as_str(), "Hash256");
        assert_eq!(TypeRef::Byte.named(), None);
    }

    #[test]
    fn test_disposition_parse() {
        assert_eq!(Disposition::parse("inline"), Some(Disposition::Inline));
        assert_eq!(Disposition::parse("const"), Some(Disposition::Const));
        assert_eq!(Disposition::parse("reserved"), None);
    }

    #[test]
    fn test_attribute_flags() {
        let attr = Attribute::new("header", TypeRef::parse("Header"))
            .with_disposition(Disposition::Inline);
        assert!(attr.is_inline());
        assert!(!attr.is_const());
    }
}
