//! Struct builder code generation.

use super::{BYTE_BUFFER, ClassWriter, IO_EXCEPTION, UnitGenerator, comment_line, java_literal};
use crate::classify::{AttributeKind, attribute_size, classify};
use crate::error::CodegenError;
use crate::inline::{attribute_if_size, find_attribute};
use crate::naming::{
    Accessor, builtin_primitive_name, generated_class_name, generated_type, getter_name,
    to_camel_case, to_upper_snake_case,
};
use crate::registry::EnumRegistry;
use std::collections::{BTreeSet, HashSet};
use wirebuilder_schema::{Attribute, ConstValue, Schema, Size, StructTypeDef, TypeDef, TypeRef};

/// Generator for a struct builder.
pub struct StructGenerator<'a, 'r> {
    name: &'a str,
    schema: &'a Schema,
    def: &'a StructTypeDef,
    registry: &'r mut EnumRegistry<'a>,
}

/// How a wire field is carried by the generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// Held in a private field.
    Stored,
    /// Read into a local and written from the dependent field's length or count.
    SizeOf {
        dependent_kind: AttributeKind,
        dependent_index: usize,
    },
}

/// Resolved wire field.
#[derive(Debug)]
struct Field<'a> {
    attribute: &'a Attribute,
    kind: AttributeKind,
    size: Size,
    ident: String,
    java_type: String,
    role: Role,
}

impl Field<'_> {
    fn doc(&self) -> &str {
        self.attribute
            .comment
            .as_deref()
            .unwrap_or(&self.attribute.name)
    }

    /// Expression for a runtime size or count taken from a local.
    fn count_expr(&self) -> String {
        match &self.size {
            Size::Fixed(n) => n.to_string(),
            Size::Field(name) => to_camel_case(name),
        }
    }

    /// Byte literals with no explicit size are single bytes.
    fn is_single_byte(&self) -> bool {
        self.kind == AttributeKind::Custom && self.attribute.type_ref == TypeRef::Byte
    }

    fn fixed_width(&self) -> Result<usize, CodegenError> {
        match self.size {
            Size::Fixed(width) => Ok(width),
            Size::Field(_) => Err(CodegenError::generation(format!(
                "field '{}' has no fixed width",
                self.attribute.name
            ))),
        }
    }

    fn accessor(&self) -> Result<Accessor, CodegenError> {
        if self.is_single_byte() {
            Accessor::for_width(1)
        } else {
            Accessor::for_size(&self.size)
        }
    }

    fn element_type(&self) -> String {
        match &self.attribute.type_ref {
            TypeRef::Byte => "byte".to_string(),
            other => generated_class_name(other.as_str()),
        }
    }
}

impl<'a, 'r> StructGenerator<'a, 'r> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(
        name: &'a str,
        schema: &'a Schema,
        def: &'a StructTypeDef,
        registry: &'r mut EnumRegistry<'a>,
    ) -> Self {
        Self {
            name,
            schema,
            def,
            registry,
        }
    }

    /// Returns false for structs that are only ever used inline.
    ///
    /// Their fields are flattened into every owner, so a standalone builder
    /// would duplicate them.
    #[must_use]
    pub fn should_generate(schema: &Schema, name: &str) -> bool {
        let mut inline_refs = 0usize;
        let mut plain_refs = 0usize;

        for (_, type_def) in schema.iter() {
            let Some(layout) = type_def.layout() else {
                continue;
            };
            for attribute in layout {
                if attribute.type_ref.named() != Some(name) {
                    continue;
                }
                if attribute.is_inline() {
                    inline_refs += 1;
                } else {
                    plain_refs += 1;
                }
            }
        }

        inline_refs == 0 || plain_refs > 0
    }

    /// Returns the layout with inline structs expanded in place.
    fn flatten(&self) -> Result<Vec<&'a Attribute>, CodegenError> {
        let mut flat = Vec::new();
        let mut visiting = HashSet::from([self.name]);
        flatten_into(self.schema, &self.def.layout, &mut visiting, &mut flat)?;
        Ok(flat)
    }

    fn resolve_fields(&self, flat: &[&'a Attribute]) -> Result<Vec<Field<'a>>, CodegenError> {
        let wire: Vec<&'a Attribute> = flat.iter().copied().filter(|a| !a.is_const()).collect();
        let mut fields = Vec::with_capacity(wire.len());

        for (index, &attribute) in wire.iter().enumerate() {
            let kind = classify(attribute)?;
            let size = attribute_size(self.schema, attribute)?;

            if let Size::Field(size_name) = &size {
                self.check_size_reference(attribute, size_name, index, &wire)?;
            }

            fields.push(Field {
                attribute,
                kind,
                size,
                ident: to_camel_case(&attribute.name),
                java_type: generated_type(self.schema, attribute)?,
                role: Role::Stored,
            });
        }

        for index in 0..fields.len() {
            let attribute = fields[index].attribute;
            let name = &attribute.name;
            let Some(dependent) = attribute_if_size(name, &self.def.layout, self.schema)? else {
                continue;
            };
            let Some(dependent_index) = fields.iter().position(|f| f.attribute.name == dependent)
            else {
                continue;
            };
            if fields[index].kind != AttributeKind::Simple {
                return Err(CodegenError::generation(format!(
                    "size field '{}.{}' must be a native integer",
                    self.name, name
                )));
            }
            fields[index].role = Role::SizeOf {
                dependent_kind: fields[dependent_index].kind,
                dependent_index,
            };
        }

        Ok(fields)
    }

    /// A runtime size must name a field that is read before its dependent.
    fn check_size_reference(
        &self,
        attribute: &Attribute,
        size_name: &str,
        index: usize,
        wire: &[&'a Attribute],
    ) -> Result<(), CodegenError> {
        let unresolved = || CodegenError::UnresolvedSizeReference {
            owner: self.name.to_string(),
            field: attribute.name.clone(),
            size: size_name.to_string(),
        };

        let found = find_attribute(size_name, &self.def.layout, self.schema)?.ok_or_else(unresolved)?;
        let position = wire
            .iter()
            .position(|a| std::ptr::eq(*a, found.attribute))
            .ok_or_else(unresolved)?;
        if position > index {
            return Err(CodegenError::generation(format!(
                "size field '{size_name}' is declared after '{}.{}'",
                self.name, attribute.name
            )));
        }
        Ok(())
    }

    fn const_line(&mut self, attribute: &Attribute) -> Result<String, CodegenError> {
        let constant = to_upper_snake_case(&attribute.name);
        let value = attribute.value.as_ref().ok_or_else(|| {
            CodegenError::generation(format!(
                "const '{}.{}' has no value",
                self.name, attribute.name
            ))
        })?;

        let (java_type, expr) = match &attribute.type_ref {
            TypeRef::Byte => {
                let primitive = match attribute_size(self.schema, attribute)? {
                    Size::Fixed(width) => builtin_primitive_name(width)?,
                    Size::Field(_) => {
                        return Err(CodegenError::generation(format!(
                            "const '{}' needs a fixed width",
                            attribute.name
                        )));
                    }
                };
                let ConstValue::Int(v) = value else {
                    return Err(CodegenError::generation(format!(
                        "const '{}' of byte type needs an integer value",
                        attribute.name
                    )));
                };
                (primitive.to_string(), java_literal(primitive, *v))
            }
            TypeRef::Named(type_name) => {
                let class_name = generated_class_name(type_name);
                let type_def = self
                    .schema
                    .get(type_name)
                    .ok_or_else(|| CodegenError::unknown_type(type_name, &attribute.name))?;
                let expr = match (type_def, value) {
                    (TypeDef::Enum(_), ConstValue::Name(member)) => {
                        format!("{class_name}.{}", to_upper_snake_case(member))
                    }
                    (TypeDef::Enum(_), ConstValue::Int(v)) if self.registry.contains(type_name) => {
                        let candidates = [
                            to_upper_snake_case(self.name),
                            to_upper_snake_case(&format!("{}_{}", self.name, attribute.name)),
                        ];
                        let member = self
                            .registry
                            .member_for_value(type_name, *v, &candidates)
                            .ok_or_else(|| {
                                CodegenError::generation(format!(
                                    "no free member name in enum '{type_name}' for const '{}.{}'",
                                    self.name, attribute.name
                                ))
                            })?;
                        format!("{class_name}.{}", to_upper_snake_case(&member))
                    }
                    (TypeDef::Enum(def), ConstValue::Int(v)) => {
                        let primitive = builtin_primitive_name(def.size)?;
                        match def.values.iter().find(|m| m.value == *v) {
                            Some(m) => format!("{class_name}.{}", to_upper_snake_case(&m.name)),
                            None => {
                                format!("{class_name}.rawValueOf({})", java_literal(primitive, *v))
                            }
                        }
                    }
                    (TypeDef::Byte(def), ConstValue::Int(v)) => {
                        let primitive = builtin_primitive_name(def.size)?;
                        format!("new {class_name}({})", java_literal(primitive, *v))
                    }
                    _ => {
                        return Err(CodegenError::generation(format!(
                            "const '{}' has an unsupported type or value",
                            attribute.name
                        )));
                    }
                };
                (class_name, expr)
            }
            TypeRef::Enum | TypeRef::Struct => {
                return Err(CodegenError::generation(format!(
                    "const '{}' must name a concrete type",
                    attribute.name
                )));
            }
        };

        Ok(format!("public static final {java_type} {constant} = {expr};"))
    }

    fn load_lines(field: &Field<'_>) -> Result<Vec<String>, CodegenError> {
        let ident = &field.ident;
        let lines = match (field.role, field.kind) {
            (Role::SizeOf { .. }, _) => {
                let accessor = field.accessor()?;
                let primitive = builtin_primitive_name(field.fixed_width()?)?;
                let read = format!("stream.{}()", accessor.read);
                vec![format!("final {primitive} {ident} = {};", accessor.reversed(&read))]
            }
            (Role::Stored, AttributeKind::Simple) => {
                let accessor = field.accessor()?;
                let read = format!("stream.{}()", accessor.read);
                vec![format!("this.{ident} = {};", accessor.reversed(&read))]
            }
            (Role::Stored, AttributeKind::Buffer) => vec![
                format!("final byte[] {ident}Bytes = new byte[{}];", field.count_expr()),
                format!("stream.readFully({ident}Bytes);"),
                format!("this.{ident} = ByteBuffer.wrap({ident}Bytes);"),
            ],
            (Role::Stored, AttributeKind::Array) => {
                let count = field.count_expr();
                let element = match field.attribute.type_ref {
                    TypeRef::Byte => "stream.readByte()".to_string(),
                    _ => format!("{}.loadFromBinary(stream)", field.element_type()),
                };
                vec![
                    format!("this.{ident} = new java.util.ArrayList<>({count});"),
                    format!("for (int i = 0; i < {count}; i++) {{"),
                    format!("    this.{ident}.add({element});"),
                    "}".to_string(),
                ]
            }
            (Role::Stored, AttributeKind::Custom) if field.is_single_byte() => {
                vec![format!("this.{ident} = stream.readByte();")]
            }
            (Role::Stored, AttributeKind::Custom) => {
                vec![format!("this.{ident} = {}.loadFromBinary(stream);", field.java_type)]
            }
        };
        Ok(lines)
    }

    fn serialize_lines(field: &Field<'_>, fields: &[Field<'_>]) -> Result<Vec<String>, CodegenError> {
        let ident = &field.ident;
        let lines = match (field.role, field.kind) {
            (
                Role::SizeOf {
                    dependent_kind,
                    dependent_index,
                },
                _,
            ) => {
                let accessor = field.accessor()?;
                let primitive = builtin_primitive_name(field.fixed_width()?)?;
                let dependent = &fields[dependent_index].ident;
                let length = match dependent_kind {
                    AttributeKind::Array => format!("this.{dependent}.size()"),
                    _ => format!("this.{dependent}.array().length"),
                };
                let value = format!("({primitive}) {length}");
                vec![format!("dataOutputStream.{}({});", accessor.write, accessor.reversed(&value))]
            }
            (Role::Stored, AttributeKind::Simple) => {
                let accessor = field.accessor()?;
                let value = format!("this.{}()", getter_name(ident));
                vec![format!("dataOutputStream.{}({});", accessor.write, accessor.reversed(&value))]
            }
            (Role::Stored, AttributeKind::Buffer) => vec![format!(
                "dataOutputStream.write(this.{ident}.array(), 0, this.{ident}.array().length);"
            )],
            (Role::Stored, AttributeKind::Array) => {
                let body = match field.attribute.type_ref {
                    TypeRef::Byte => vec![format!("    dataOutputStream.writeByte(this.{ident}.get(i));")],
                    _ => vec![
                        format!("    final byte[] {ident}Bytes = this.{ident}.get(i).serialize();"),
                        format!("    dataOutputStream.write({ident}Bytes, 0, {ident}Bytes.length);"),
                    ],
                };
                let mut lines = vec![format!("for (int i = 0; i < this.{ident}.size(); i++) {{")];
                lines.extend(body);
                lines.push("}".to_string());
                lines
            }
            (Role::Stored, AttributeKind::Custom) if field.is_single_byte() => {
                vec![format!("dataOutputStream.writeByte(this.{}());", getter_name(ident))]
            }
            (Role::Stored, AttributeKind::Custom) => vec![
                format!("final byte[] {ident}Bytes = this.{ident}.serialize();"),
                format!("dataOutputStream.write({ident}Bytes, 0, {ident}Bytes.length);"),
            ],
        };
        Ok(lines)
    }

    fn size_lines(field: &Field<'_>) -> Result<Vec<String>, CodegenError> {
        let ident = &field.ident;
        let lines = match (field.role, field.kind) {
            (Role::SizeOf { .. }, _) | (Role::Stored, AttributeKind::Simple) => {
                vec![format!("size += {}; // {ident}", field.fixed_width()?)]
            }
            (Role::Stored, AttributeKind::Buffer) => match field.size {
                Size::Fixed(n) => vec![format!("size += {n}; // {ident}")],
                Size::Field(_) => vec![format!("size += this.{ident}.array().length;")],
            },
            (Role::Stored, AttributeKind::Array) => match field.attribute.type_ref {
                TypeRef::Byte => vec![format!("size += this.{ident}.size();")],
                _ => vec![
                    format!("for (final {} item : this.{ident}) {{", field.element_type()),
                    "    size += item.getSize();".to_string(),
                    "}".to_string(),
                ],
            },
            (Role::Stored, AttributeKind::Custom) if field.is_single_byte() => {
                vec![format!("size += 1; // {ident}")]
            }
            (Role::Stored, AttributeKind::Custom) => vec![format!("size += this.{ident}.getSize();")],
        };
        Ok(lines)
    }
}

fn flatten_into<'a>(
    schema: &'a Schema,
    layout: &'a [Attribute],
    visiting: &mut HashSet<&'a str>,
    flat: &mut Vec<&'a Attribute>,
) -> Result<(), CodegenError> {
    for attribute in layout {
        let inline_name = attribute.type_ref.named().filter(|_| attribute.is_inline());
        let Some(type_name) = inline_name else {
            flat.push(attribute);
            continue;
        };

        match schema.get(type_name) {
            None => return Err(CodegenError::unknown_type(type_name, &attribute.name)),
            Some(TypeDef::Struct(inner)) => {
                if !visiting.insert(type_name) {
                    tracing::warn!("cyclic inline reference to {} ignored", type_name);
                    continue;
                }
                flatten_into(schema, &inner.layout, visiting, flat)?;
                visiting.remove(type_name);
            }
            Some(_) => flat.push(attribute),
        }
    }
    Ok(())
}

impl UnitGenerator for StructGenerator<'_, '_> {
    fn generate(&mut self) -> Result<Vec<String>, CodegenError> {
        let class_name = generated_class_name(self.name);
        let flat = self.flatten()?;
        let fields = self.resolve_fields(&flat)?;
        let stored: Vec<&Field<'_>> = fields.iter().filter(|f| f.role == Role::Stored).collect();

        let mut writer = ClassWriter::new();
        if let Some(comment) = comment_line(self.def.comment.as_deref()) {
            writer.line(0, comment);
        }
        writer.line(0, format!("public final class {class_name} {{"));

        for attribute in flat.iter().filter(|a| a.is_const()) {
            let line = self.const_line(attribute)?;
            if let Some(comment) = comment_line(attribute.comment.as_deref()) {
                writer.line(1, comment);
            }
            writer.line(1, line);
        }
        for field in &stored {
            writer.line(1, format!("/** {}. */", field.doc()));
            writer.line(1, format!("private final {} {};", field.java_type, field.ident));
        }
        writer.blank();

        writer.line(1, "/**");
        writer.line(1, " * Constructor.");
        if !stored.is_empty() {
            writer.line(1, " *");
        }
        for field in &stored {
            writer.line(1, format!(" * @param {} {}.", field.ident, field.doc()));
        }
        writer.line(1, " */");
        let params: Vec<String> = stored
            .iter()
            .map(|f| format!("final {} {}", f.java_type, f.ident))
            .collect();
        writer.line(1, format!("public {class_name}({}) {{", params.join(", ")));
        for field in &stored {
            writer.line(2, format!("this.{0} = {0};", field.ident));
        }
        writer.line(1, "}");
        writer.blank();

        let mut load = Vec::new();
        for field in &fields {
            load.extend(Self::load_lines(field)?);
        }
        writer.stream_constructor(&class_name, load);

        for field in &stored {
            writer.getter(&field.java_type, &getter_name(&field.ident), &field.ident, field.doc());
        }

        let mut size = vec!["int size = 0;".to_string()];
        for field in &fields {
            size.extend(Self::size_lines(field)?);
        }
        size.push("return size;".to_string());
        writer.get_size(size);

        writer.load_from_binary(&class_name, vec![format!("return new {class_name}(stream);")]);

        let mut write = Vec::new();
        for field in &fields {
            write.extend(Self::serialize_lines(field, &fields)?);
        }
        writer.serialize(write);
        writer.line(0, "}");

        tracing::debug!(
            "generated {} with {} stored fields of {}",
            class_name,
            stored.len(),
            fields.len()
        );
        Ok(writer.finish())
    }

    fn required_imports(&self) -> BTreeSet<String> {
        let mut imports = BTreeSet::from([IO_EXCEPTION.to_string()]);
        let has_buffer = self.flatten().is_ok_and(|flat| {
            flat.iter()
                .filter(|a| !a.is_const())
                .any(|a| matches!(classify(a), Ok(AttributeKind::Buffer)))
        });
        if has_buffer {
            imports.insert(BYTE_BUFFER.to_string());
        }
        imports
    }
}
