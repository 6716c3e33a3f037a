//! # wirebuilder
//!
//! Schema-driven generator of Java builder classes for binary wire formats.
//!
//! A schema declares byte types, enums and structs. Each becomes a builder
//! class able to read itself from a `DataInput` stream and serialize itself
//! back to little-endian bytes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wirebuilder::prelude::*;
//!
//! let schema = load_file(Path::new("schema.yaml"))?;
//! let writer = UnitWriter::new("generated");
//! for unit in FileGenerator::new(&schema, GeneratorOptions::default()) {
//!     writer.write(&unit?)?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema model and YAML/JSON loading
//! - [`codegen`] - Classification, resolution and unit generation
//! - [`writer`] - Writing generated units to disk

pub mod prelude;
pub mod writer;

/// Schema model and loading.
pub mod schema {
    pub use wirebuilder_schema::*;
}

/// Builder code generation.
pub mod codegen {
    pub use wirebuilder_codegen::*;
}
