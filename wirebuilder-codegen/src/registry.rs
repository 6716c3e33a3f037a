//! Pending enum registry.
//!
//! Enums are not generated when the scan reaches them. They are parked here
//! in declaration order and drained once every byte type and struct unit has
//! been produced. Until then struct constants may still add members to them.

use crate::java::EnumGenerator;
use indexmap::IndexMap;
use wirebuilder_schema::EnumValue;

/// Enum generators waiting to be emitted, in registration order.
///
/// Owned by a single generation run.
#[derive(Debug, Default)]
pub struct EnumRegistry<'a> {
    pending: IndexMap<String, EnumGenerator<'a>>,
}

impl<'a> EnumRegistry<'a> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enum generator. Registering a name again replaces the
    /// generator but keeps the original position.
    pub fn register(&mut self, generator: EnumGenerator<'a>) {
        self.pending.insert(generator.name().to_string(), generator);
    }

    /// Returns true if an enum with this name is pending.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }

    /// Returns the pending generator for an enum.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnumGenerator<'a>> {
        self.pending.get(name)
    }

    /// Resolves the member of `enum_name` holding `value`.
    ///
    /// An existing member is returned as is. Otherwise a member is added
    /// under the first of `candidates` whose emitted name is free.
    /// Returns `None` if the enum is not pending or every candidate is taken.
    pub fn member_for_value(
        &mut self,
        enum_name: &str,
        value: i64,
        candidates: &[String],
    ) -> Option<String> {
        let generator = self.pending.get_mut(enum_name)?;
        if let Some(existing) = generator.member_for(value) {
            return Some(existing.name.clone());
        }
        for candidate in candidates {
            if generator.add_value(EnumValue::new(candidate.as_str(), value)) {
                tracing::debug!("added member {} = {} to enum {}", candidate, value, enum_name);
                return Some(candidate.clone());
            }
        }
        None
    }

    /// Removes and returns the earliest registered generator.
    pub fn pop_front(&mut self) -> Option<EnumGenerator<'a>> {
        self.pending.shift_remove_index(0).map(|(_, generator)| generator)
    }

    /// Returns the number of pending enums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no enums are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops all pending enums.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
