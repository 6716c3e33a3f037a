//! Generation orchestrator.
//!
//! Walks the schema in declaration order and yields one source unit per
//! pull. Byte types and structs are emitted as they are reached. Enums are
//! parked in an [`EnumRegistry`] and emitted after the scan, so constants
//! declared by structs can still extend them.

use crate::error::CodegenError;
use crate::java::{DefineTypeGenerator, EnumGenerator, StructGenerator, UnitGenerator};
use crate::naming::generated_class_name;
use crate::options::{BASE_IMPORTS, GeneratorOptions};
use crate::registry::EnumRegistry;
use wirebuilder_schema::{Schema, TypeDef};

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Generated class name, e.g. `HeightBuilder`.
    pub name: String,
    /// Source lines, preamble included.
    pub lines: Vec<String>,
}

impl GeneratedUnit {
    /// Joins the lines into file content with a trailing newline.
    #[must_use]
    pub fn content(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning { next_index: usize },
    EmittingDeferred,
    Done,
}

/// Lazy generator over every unit of a schema.
pub struct FileGenerator<'a> {
    schema: &'a Schema,
    options: GeneratorOptions,
    registry: EnumRegistry<'a>,
    state: State,
}

/// Returns false for structs that are only referenced inline.
#[must_use]
pub fn should_generate_struct(schema: &Schema, name: &str) -> bool {
    StructGenerator::should_generate(schema, name)
}

impl<'a> FileGenerator<'a> {
    /// Creates a generator for `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema, options: GeneratorOptions) -> Self {
        Self {
            schema,
            options,
            registry: EnumRegistry::new(),
            state: State::Scanning { next_index: 0 },
        }
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Returns the number of enums waiting to be emitted.
    #[must_use]
    pub fn pending_enums(&self) -> usize {
        self.registry.len()
    }

    /// Advances the state machine until a unit is ready or the run ends.
    fn advance(&mut self) -> Result<Option<GeneratedUnit>, CodegenError> {
        loop {
            match self.state {
                State::Scanning { next_index } => {
                    let Some((name, type_def)) = self.schema.get_index(next_index) else {
                        tracing::debug!(
                            "scan finished, {} enums deferred",
                            self.registry.len()
                        );
                        self.state = State::EmittingDeferred;
                        continue;
                    };
                    self.state = State::Scanning {
                        next_index: next_index + 1,
                    };

                    match type_def {
                        TypeDef::Byte(def) => {
                            let mut generator = DefineTypeGenerator::new(name, def);
                            return self.unit(name, &mut generator).map(Some);
                        }
                        TypeDef::Enum(def) => {
                            tracing::debug!("deferring enum {}", name);
                            self.registry.register(EnumGenerator::new(name, def));
                        }
                        TypeDef::Struct(def) => {
                            if !should_generate_struct(self.schema, name) {
                                tracing::debug!("skipping inline-only struct {}", name);
                                continue;
                            }
                            let mut generator =
                                StructGenerator::new(name, self.schema, def, &mut self.registry);
                            let body = generator.generate()?;
                            let imports = generator.required_imports();
                            return self.assemble(name, body, imports).map(Some);
                        }
                    }
                }
                State::EmittingDeferred => {
                    let Some(mut generator) = self.registry.pop_front() else {
                        self.state = State::Done;
                        continue;
                    };
                    let name = generator.name();
                    return self.unit(name, &mut generator).map(Some);
                }
                State::Done => return Ok(None),
            }
        }
    }

    fn unit(
        &self,
        name: &str,
        generator: &mut impl UnitGenerator,
    ) -> Result<GeneratedUnit, CodegenError> {
        let body = generator.generate()?;
        self.assemble(name, body, generator.required_imports())
    }

    /// Prefixes a generated body with header, package and imports.
    fn assemble(
        &self,
        name: &str,
        body: Vec<String>,
        imports: std::collections::BTreeSet<String>,
    ) -> Result<GeneratedUnit, CodegenError> {
        let mut lines = self.options.header_lines()?;
        lines.push(format!("package {};", self.options.package));
        lines.push(String::new());
        lines.extend(BASE_IMPORTS.iter().map(|import| format!("import {import};")));
        lines.extend(
            imports
                .iter()
                .filter(|import| !BASE_IMPORTS.contains(&import.as_str()))
                .map(|import| format!("import {import};")),
        );
        lines.push(String::new());
        lines.extend(body);

        let class_name = generated_class_name(name);
        tracing::debug!("generated unit {} ({} lines)", class_name, lines.len());
        Ok(GeneratedUnit {
            name: class_name,
            lines,
        })
    }
}

impl Iterator for FileGenerator<'_> {
    type Item = Result<GeneratedUnit, CodegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(unit) => unit.map(Ok),
            Err(e) => {
                tracing::debug!("generation stopped: {}", e);
                self.state = State::Done;
                self.registry.clear();
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for FileGenerator<'_> {}
