//! Rendering values back into cfgl source
//!
//! The output is a single map or sequence literal that compiles back to the same value:
//!
//! ```text
//! {
//!   x: 5,
//!   a: (
//!     1,
//!     2.5
//!   )
//! }
//! ```
//!
//! Null, non-finite floats and keys that are not valid names have no literal form. A
//! document must be a map or a sequence, since scalars are not elements.

use super::registry::{FormatError, Formatter};
use crate::cfgl::value::Value;

const INDENT: &str = "  ";

fn is_name(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Render a document as cfgl source
pub fn to_source_str(value: &Value) -> Result<String, FormatError> {
    match value {
        Value::Map(_) | Value::Sequence(_) => {
            let mut out = String::new();
            write_value(&mut out, value, 0)?;
            out.push('\n');
            Ok(out)
        }
        other => Err(FormatError::Unrepresentable(format!(
            "a top-level {} as a cfgl document",
            other.type_name()
        ))),
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) -> Result<(), FormatError> {
    match value {
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Float(f) if f.is_finite() => out.push_str(&format!("{:?}", f)),
        Value::Float(f) => {
            return Err(FormatError::Unrepresentable(format!("the float {}", f)));
        }
        Value::Null => {
            return Err(FormatError::Unrepresentable("null".to_string()));
        }
        Value::Map(map) if map.is_empty() => out.push_str("{}"),
        Value::Map(map) => {
            out.push_str("{\n");
            for (i, (key, child)) in map.iter().enumerate() {
                if !is_name(key) {
                    return Err(FormatError::Unrepresentable(format!("the key '{}'", key)));
                }
                push_indent(out, depth + 1);
                out.push_str(key);
                out.push_str(": ");
                write_value(out, child, depth + 1)?;
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Sequence(items) if items.is_empty() => out.push_str("()"),
        Value::Sequence(items) => {
            out.push_str("(\n");
            for (i, child) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, child, depth + 1)?;
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(')');
        }
    }
    Ok(())
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Writes documents as cfgl source
pub struct SourceFormatter;

impl Formatter for SourceFormatter {
    fn name(&self) -> &str {
        "cfgl"
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        to_source_str(value)
    }

    fn description(&self) -> &str {
        "cfgl source that compiles back to the document"
    }
}
