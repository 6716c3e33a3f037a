//! Field lookup across inlined structs.
//!
//! An attribute with `inline` disposition flattens the referenced struct's
//! fields into its owner. A runtime size such as `size: payloadSize` may
//! therefore name a field that only exists in an inlined struct, so lookups
//! search the owner's layout first and then descend into each inline
//! attribute in declaration order.

use crate::error::CodegenError;
use std::collections::HashSet;
use wirebuilder_schema::{Attribute, Schema, Size};

/// Attribute property compared against the search target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// The attribute's own name.
    Name,
    /// The attribute's runtime size field name.
    Size,
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineMatch<'a> {
    /// The matching attribute.
    pub attribute: &'a Attribute,
    /// Inline attributes crossed to reach it, outermost first. Empty when
    /// the match is in the searched layout itself.
    pub path: Vec<&'a Attribute>,
}

impl InlineMatch<'_> {
    /// Returns true if the match sits directly in the searched layout.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.path.is_empty()
    }
}

/// Finds the first attribute whose `property` equals `target`.
///
/// The search is depth-first in declaration order. A struct already on the
/// current inline chain is not entered again, so cyclic inline references
/// terminate.
///
/// # Errors
/// Returns `CodegenError::UnknownType` if an inline attribute names a type
/// missing from the schema.
pub fn find_attribute_with<'a>(
    schema: &'a Schema,
    layout: &'a [Attribute],
    property: Property,
    target: &str,
) -> Result<Option<InlineMatch<'a>>, CodegenError> {
    let mut visiting = HashSet::new();
    let mut path = Vec::new();
    search(schema, layout, property, target, &mut visiting, &mut path)
}

fn search<'a>(
    schema: &'a Schema,
    layout: &'a [Attribute],
    property: Property,
    target: &str,
    visiting: &mut HashSet<&'a str>,
    path: &mut Vec<&'a Attribute>,
) -> Result<Option<InlineMatch<'a>>, CodegenError> {
    for attribute in layout {
        if property_equals(attribute, property, target) {
            return Ok(Some(InlineMatch {
                attribute,
                path: path.clone(),
            }));
        }

        if !attribute.is_inline() {
            continue;
        }
        let Some(type_name) = attribute.type_ref.named() else {
            continue;
        };
        let type_def = schema
            .get(type_name)
            .ok_or_else(|| CodegenError::unknown_type(type_name, &attribute.name))?;
        let Some(nested) = type_def.layout() else {
            continue;
        };
        if !visiting.insert(type_name) {
            tracing::debug!("skipping cyclic inline reference to {}", type_name);
            continue;
        }

        path.push(attribute);
        let found = search(schema, nested, property, target, visiting, path)?;
        path.pop();
        visiting.remove(type_name);

        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(None)
}

fn property_equals(attribute: &Attribute, property: Property, target: &str) -> bool {
    match property {
        Property::Name => attribute.name == target,
        Property::Size => matches!(&attribute.size, Some(Size::Field(name)) if name == target),
    }
}

/// Returns the name of the attribute whose runtime size is held by `name`.
///
/// A `Some` result means `name` is a size or count field that is derived
/// from another attribute rather than stored.
///
/// # Errors
/// Returns `CodegenError::UnknownType` for inline references to missing types.
pub fn attribute_if_size<'a>(
    name: &str,
    layout: &'a [Attribute],
    schema: &'a Schema,
) -> Result<Option<&'a str>, CodegenError> {
    Ok(find_attribute_with(schema, layout, Property::Size, name)?
        .map(|found| found.attribute.name.as_str()))
}

/// Finds the attribute called `name`, looking through inlined structs.
///
/// # Errors
/// Returns `CodegenError::UnknownType` for inline references to missing types.
pub fn find_attribute<'a>(
    name: &str,
    layout: &'a [Attribute],
    schema: &'a Schema,
) -> Result<Option<InlineMatch<'a>>, CodegenError> {
    find_attribute_with(schema, layout, Property::Name, name)
}
