//! Format registry for value serialization
//!
//! This module provides a pluggable registry system for document output formats.
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use std::collections::HashMap;

use thiserror::Error;

use crate::cfgl::value::Value;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error reported by the underlying serializer
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// The value has no representation in the target format
    #[error("Cannot represent {0}")]
    Unrepresentable(String),
}

/// Trait for document formatters
///
/// Implementors render a compiled [`Value`] tree as text.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "yaml", "treeviz")
    fn name(&self) -> &str;

    /// Serialize a document to this format
    fn serialize(&self, value: &Value) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of document formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a value using the specified format
    pub fn serialize(&self, value: &Value, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(value)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::YamlFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::SourceFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _value: &Value) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert!(!registry.has("nonexistent"));
        assert_eq!(registry.get("test").map(|f| f.name()), Some("test"));
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        let result = registry.serialize(&Value::Null, "test");
        assert_eq!(result, Ok("test output".to_string()));
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        let result = registry.serialize(&Value::Null, "nonexistent");
        assert_eq!(
            result,
            Err(FormatError::FormatNotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["cfgl", "json", "treeviz", "yaml"]
        );
    }

    #[test]
    fn test_format_error_display() {
        assert_eq!(
            FormatError::FormatNotFound("toml".into()).to_string(),
            "Format 'toml' not found"
        );
    }
}
