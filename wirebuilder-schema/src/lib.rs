//! # wirebuilder schema
//!
//! Wire-format schema model and loader.
//!
//! This crate provides:
//! - The read-only schema model (byte types, enums, structs, attributes)
//! - Loading of already-parsed schema documents from YAML or JSON

pub mod error;
pub mod loader;
pub mod types;

pub use error::LoadError;
pub use loader::{load_file, load_json, load_yaml};
pub use types::{
    Attribute, ByteTypeDef, ConstValue, Disposition, EnumTypeDef, EnumValue, Schema, Signedness,
    Size, StructTypeDef, TypeDef, TypeRef,
};
