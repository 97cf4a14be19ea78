//! Treeviz formatter for value trees and syntax trees

use super::registry::{FormatError, Formatter};
use crate::cfgl::ast::{Element, Node, Pair, Script};
use crate::cfgl::value::Value;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn push_line(
    result: &mut String,
    prefix: &str,
    is_last: bool,
    node_type: &str,
    label: &str,
) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {}: {}\n",
        prefix,
        connector,
        node_type,
        truncate(label, 30)
    ));
    format!("{}{}", prefix, if is_last { "  " } else { "│ " })
}

/// Render a value tree, one line per node
pub fn to_treeviz_str(value: &Value) -> String {
    let mut result = String::new();
    append_value(&mut result, "document", value, "", true);
    result
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "Integer",
        Value::Float(_) => "Float",
        Value::Map(_) => "Map",
        Value::Sequence(_) => "Sequence",
        Value::Null => "Null",
    }
}

fn append_value(result: &mut String, label: &str, value: &Value, prefix: &str, is_last: bool) {
    let label = match value {
        Value::Integer(i) => format!("{} = {}", label, i),
        Value::Float(f) => format!("{} = {:?}", label, f),
        Value::Null => label.to_string(),
        Value::Map(map) => format!("{} ({})", label, count(map.len(), "entry")),
        Value::Sequence(items) => format!("{} ({})", label, count(items.len(), "item")),
    };
    let new_prefix = push_line(result, prefix, is_last, value_type(value), &label);

    match value {
        Value::Map(map) => {
            for (i, (key, child)) in map.iter().enumerate() {
                append_value(result, key, child, &new_prefix, i == map.len() - 1);
            }
        }
        Value::Sequence(items) => {
            for (i, child) in items.iter().enumerate() {
                append_value(result, &format!("[{}]", i), child, &new_prefix, i == items.len() - 1);
            }
        }
        _ => {}
    }
}

/// Render a syntax tree, one line per element, pair and node
pub fn script_to_treeviz_str(script: &Script) -> String {
    let mut result = String::new();
    for (i, element) in script.elements.iter().enumerate() {
        let is_last = i == script.elements.len() - 1;
        append_element(&mut result, element, "", is_last);
    }
    result
}

fn append_element(result: &mut String, element: &Element, prefix: &str, is_last: bool) {
    let node_type = element.node_type();
    match element {
        Element::Declaration { name, value, .. } => {
            let new_prefix = push_line(result, prefix, is_last, node_type, name);
            append_node(result, value, &new_prefix, true);
        }
        Element::Map(pairs) => {
            let label = count(pairs.len(), "pair");
            let new_prefix = push_line(result, prefix, is_last, node_type, &label);
            append_pairs(result, pairs, &new_prefix);
        }
        Element::Sequence(items) => {
            let label = count(items.len(), "item");
            let new_prefix = push_line(result, prefix, is_last, node_type, &label);
            append_nodes(result, items, &new_prefix);
        }
    }
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let node_type = node.node_type();
    match node {
        Node::Number { value, .. } => {
            push_line(result, prefix, is_last, node_type, &value.to_string());
        }
        Node::ConstRef { name, .. } => {
            push_line(result, prefix, is_last, node_type, name);
        }
        Node::Map(pairs) => {
            let label = count(pairs.len(), "pair");
            let new_prefix = push_line(result, prefix, is_last, node_type, &label);
            append_pairs(result, pairs, &new_prefix);
        }
        Node::Sequence(items) => {
            let label = count(items.len(), "item");
            let new_prefix = push_line(result, prefix, is_last, node_type, &label);
            append_nodes(result, items, &new_prefix);
        }
    }
}

fn append_pairs(result: &mut String, pairs: &[Pair], prefix: &str) {
    for (i, pair) in pairs.iter().enumerate() {
        let is_last = i == pairs.len() - 1;
        let new_prefix = push_line(result, prefix, is_last, "Pair", &pair.key);
        append_node(result, &pair.value, &new_prefix, true);
    }
}

fn append_nodes(result: &mut String, nodes: &[Node], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        append_node(result, node, prefix, i == nodes.len() - 1);
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        Ok(to_treeviz_str(value))
    }

    fn description(&self) -> &str {
        "Tree visualization of the compiled document"
    }
}
