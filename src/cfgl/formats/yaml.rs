//! YAML output, the default document format

use super::registry::{FormatError, Formatter};
use crate::cfgl::value::Value;

/// Render a value as block-style YAML with keys in insertion order
pub fn to_yaml_str(value: &Value) -> Result<String, FormatError> {
    serde_yaml::to_string(value).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        to_yaml_str(value)
    }

    fn description(&self) -> &str {
        "Block-style YAML (default)"
    }
}
