//! The constant table
//!
//! Bindings from identifier to value, filled in as declarations are evaluated. A table
//! belongs to a single compilation.

use std::collections::HashMap;

use tracing::trace;

use crate::cfgl::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantTable {
    bindings: HashMap<String, Value>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding. Returns the replaced value.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        trace!(%name, kind = value.type_name(), "declare constant");
        self.bindings.insert(name, value)
    }

    /// The value currently bound to `name`
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Declared names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
