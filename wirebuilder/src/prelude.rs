//! Prelude module for convenient imports.
//!
//! ```ignore
//! use wirebuilder::prelude::*;
//! ```

// Schema types
pub use wirebuilder_schema::{
    Attribute, LoadError, Schema, TypeDef, TypeRef, load_file, load_json, load_yaml,
};

// Generation
pub use wirebuilder_codegen::{
    CodegenError, FileGenerator, GeneratedUnit, GeneratorOptions, generate_from_file,
};

// Output
pub use crate::writer::UnitWriter;
