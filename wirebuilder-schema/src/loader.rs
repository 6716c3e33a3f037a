//! Schema loader.
//!
//! Reads a schema mapping that has already been produced by the schema
//! parser (as a YAML or JSON document) and converts it into the typed
//! [`Schema`] model. String discriminators are resolved here, once, so the
//! rest of the pipeline only ever matches on closed enums.

use crate::error::LoadError;
use crate::types::{
    Attribute, ByteTypeDef, ConstValue, Disposition, EnumTypeDef, EnumValue, Schema, Signedness,
    Size, StructTypeDef, TypeDef, TypeRef,
};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Type definition as it appears in the document.
#[derive(Debug, Deserialize)]
struct RawTypeDef {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: Option<RawScalar>,
    #[serde(default)]
    signedness: Option<String>,
    #[serde(default)]
    layout: Option<Vec<RawAttribute>>,
    #[serde(default)]
    values: Vec<RawEnumValue>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAttribute {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    size: Option<RawScalar>,
    #[serde(default)]
    disposition: Option<String>,
    #[serde(default)]
    value: Option<RawScalar>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEnumValue {
    name: String,
    value: i64,
    #[serde(default)]
    comment: Option<String>,
}

/// Integer-or-name scalar used by `size` and `value`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Name(String),
}

/// Loads a schema from a YAML document.
///
/// # Errors
/// Returns `LoadError` if the document is malformed or describes an invalid type.
pub fn load_yaml(yaml: &str) -> Result<Schema, LoadError> {
    let raw: IndexMap<String, RawTypeDef> = serde_yaml::from_str(yaml)?;
    convert(raw)
}

/// Loads a schema from a JSON document.
///
/// # Errors
/// Returns `LoadError` if the document is malformed or describes an invalid type.
pub fn load_json(json: &str) -> Result<Schema, LoadError> {
    let raw: IndexMap<String, RawTypeDef> = serde_json::from_str(json)?;
    convert(raw)
}

/// Loads a schema from a file. `.json` files are read as JSON, anything
/// else as YAML.
///
/// # Errors
/// Returns `LoadError` if the file cannot be read or its content is invalid.
pub fn load_file(path: &Path) -> Result<Schema, LoadError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    tracing::debug!("loading schema from {}", path.display());
    if is_json {
        load_json(&content)
    } else {
        load_yaml(&content)
    }
}

fn convert(raw: IndexMap<String, RawTypeDef>) -> Result<Schema, LoadError> {
    let mut types = Vec::with_capacity(raw.len());
    for (name, def) in raw {
        let type_def = convert_type(&name, def)?;
        types.push((name, type_def));
    }

    tracing::debug!("loaded {} schema types", types.len());
    Ok(Schema::from_types(types))
}

fn convert_type(name: &str, raw: RawTypeDef) -> Result<TypeDef, LoadError> {
    let comment = raw.comment.filter(|c| !c.is_empty());

    match raw.kind.as_str() {
        "byte" => {
            let signedness = match raw.signedness.as_deref() {
                None => Signedness::default(),
                Some(s) => Signedness::parse(s)
                    .ok_or_else(|| LoadError::invalid_value(name, "signedness", s))?,
            };
            Ok(TypeDef::Byte(ByteTypeDef {
                size: required_width(name, raw.size)?,
                signedness,
                comment,
            }))
        }
        "enum" => {
            let values = raw
                .values
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    value: v.value,
                    comment: v.comment.filter(|c| !c.is_empty()),
                })
                .collect();
            Ok(TypeDef::Enum(EnumTypeDef {
                size: required_width(name, raw.size)?,
                values,
                comment,
            }))
        }
        "struct" => {
            let layout = raw
                .layout
                .ok_or_else(|| LoadError::missing_field(name, "layout"))?
                .into_iter()
                .map(|attr| convert_attribute(name, attr))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeDef::Struct(StructTypeDef { layout, comment }))
        }
        other => Err(LoadError::UnknownKind {
            type_name: name.to_string(),
            kind: other.to_string(),
        }),
    }
}

/// Byte and enum types must carry an integer width.
fn required_width(name: &str, size: Option<RawScalar>) -> Result<usize, LoadError> {
    match size {
        None => Err(LoadError::missing_field(name, "size")),
        Some(RawScalar::Int(n)) => {
            usize::try_from(n).map_err(|_| LoadError::invalid_size(name, n.to_string()))
        }
        Some(RawScalar::Name(s)) => Err(LoadError::invalid_size(name, s)),
    }
}

fn convert_attribute(owner: &str, raw: RawAttribute) -> Result<Attribute, LoadError> {
    let context = format!("{owner}.{}", raw.name);

    let size = match raw.size {
        None => None,
        Some(RawScalar::Int(n)) => Some(Size::Fixed(
            usize::try_from(n).map_err(|_| LoadError::invalid_size(&context, n.to_string()))?,
        )),
        Some(RawScalar::Name(s)) if s.is_empty() => {
            return Err(LoadError::invalid_size(&context, s));
        }
        Some(RawScalar::Name(s)) => Some(Size::Field(s)),
    };

    let disposition = match raw.disposition.as_deref() {
        None => None,
        Some(d) => Some(
            Disposition::parse(d).ok_or_else(|| LoadError::UnknownDisposition {
                attribute: context.clone(),
                disposition: d.to_string(),
            })?,
        ),
    };

    let value = raw.value.map(|v| match v {
        RawScalar::Int(n) => ConstValue::Int(n),
        RawScalar::Name(s) => ConstValue::Name(s),
    });

    Ok(Attribute {
        name: raw.name,
        type_ref: TypeRef::parse(&raw.type_name),
        size,
        disposition,
        value,
        comment: raw.comment.filter(|c| !c.is_empty()),
    })
}
