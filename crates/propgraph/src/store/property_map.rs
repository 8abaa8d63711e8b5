//! Typed per-object value slots.

use crate::error::Result;
use crate::value::{PropertyValue, ValueType};
use std::collections::HashMap;

/// Values of one named property, keyed by vertex or edge index.
///
/// Slots that were never written read as the type's default value.
#[derive(Debug, Clone)]
pub struct PropertyMap {
    value_type: ValueType,
    values: HashMap<usize, PropertyValue>,
}

impl PropertyMap {
    /// Creates an empty map for values of `value_type`.
    #[must_use]
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            values: HashMap::new(),
        }
    }

    /// The declared value type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The explicitly written value for `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PropertyValue> {
        self.values.get(&index)
    }

    /// The value for `index`, falling back to the type default.
    #[must_use]
    pub fn get_or_default(&self, index: usize) -> PropertyValue {
        self.values
            .get(&index)
            .cloned()
            .unwrap_or_else(|| self.value_type.default_value())
    }

    /// Number of explicitly written slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no slot has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn set(&mut self, index: usize, value: PropertyValue) -> Result<()> {
        let value = self.value_type.coerce(value)?;
        self.values.insert(index, value);
        Ok(())
    }

    pub(crate) fn push(&mut self, index: usize, value: PropertyValue) -> Result<()> {
        let element = self.value_type.coerce_element(value)?;
        match self
            .values
            .entry(index)
            .or_insert_with(|| PropertyValue::List(Vec::new()))
        {
            PropertyValue::List(items) => items.push(element),
            // set() only ever stores coerced values, so a list slot holds lists
            other => *other = PropertyValue::List(vec![element]),
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) {
        self.values.remove(&index);
    }
}
