//! Pretty-printed JSON output

use super::registry::{FormatError, Formatter};
use crate::cfgl::value::Value;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(value)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}
