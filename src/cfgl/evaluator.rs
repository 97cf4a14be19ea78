//! Evaluation of the syntax tree into values
//!
//! The evaluator walks a [`Script`] strictly left to right. Declarations are bound in the
//! [`ConstantTable`] once their value has been evaluated, and constant references are
//! resolved by value at the point where they occur. A reference with no live binding
//! evaluates to [`Value::Null`] and records an undefined-constant fault; evaluation itself
//! never fails.
//!
//! Each top-level element produces one value:
//!
//! ```text
//! x = 5;        -> { x: 5 }
//! { a: §x§ }    -> { a: 5 }
//! ( 1, 2 )      -> [1, 2]
//! ```
//!
//! Folding those values into a document is the job of the assembler.

pub mod constants;

pub use constants::ConstantTable;

use tracing::{debug, warn};

use crate::cfgl::ast::{Element, Node, Pair, Script, SourceLocation};
use crate::cfgl::diagnostics::Fault;
use crate::cfgl::value::{Map, Value};

/// Output of evaluating a script
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// One value per top-level element, in source order
    pub elements: Vec<Value>,
    /// Bindings live at the end of the script
    pub constants: ConstantTable,
    /// Undefined-constant faults, in the order the references occur
    pub faults: Vec<Fault>,
}

/// Walks a syntax tree, owning the constant table for one compilation
pub struct Evaluator<'a> {
    location: SourceLocation<'a>,
    constants: ConstantTable,
    faults: Vec<Fault>,
}

impl<'a> Evaluator<'a> {
    /// `source` is the text the tree was parsed from; it is used to locate faults
    pub fn new(source: &'a str) -> Self {
        Self {
            location: SourceLocation::new(source),
            constants: ConstantTable::new(),
            faults: Vec::new(),
        }
    }

    pub fn evaluate(mut self, script: &Script) -> Evaluation {
        let elements: Vec<Value> = script
            .elements
            .iter()
            .map(|element| self.element(element))
            .collect();

        debug!(
            elements = elements.len(),
            declarations = script.declared_names().count(),
            constants = ?self.constants.names(),
            faults = self.faults.len(),
            "evaluated script"
        );

        Evaluation {
            elements,
            constants: self.constants,
            faults: self.faults,
        }
    }

    fn element(&mut self, element: &Element) -> Value {
        match element {
            Element::Declaration { name, value, .. } => {
                let value = self.node(value);
                if self.constants.declare(name.as_str(), value.clone()).is_some() {
                    debug!(%name, "constant redeclared");
                }
                Value::Map(Map::singleton(name.as_str(), value))
            }
            Element::Map(pairs) => Value::Map(self.pairs(pairs)),
            Element::Sequence(items) => Value::Sequence(self.nodes(items)),
        }
    }

    fn node(&mut self, node: &Node) -> Value {
        match node {
            Node::Number { value, .. } => Value::from(*value),
            Node::ConstRef { name, span } => match self.constants.resolve(name) {
                Some(value) => value.clone(),
                None => {
                    let fault =
                        Fault::undefined_constant(name.as_str(), span.clone(), &self.location);
                    warn!(%fault, "substituting null");
                    self.faults.push(fault);
                    Value::Null
                }
            },
            Node::Map(pairs) => Value::Map(self.pairs(pairs)),
            Node::Sequence(items) => Value::Sequence(self.nodes(items)),
        }
    }

    // Later duplicates overwrite earlier ones
    fn pairs(&mut self, pairs: &[Pair]) -> Map {
        let mut map = Map::new();
        for pair in pairs {
            let value = self.node(&pair.value);
            map.insert(pair.key.as_str(), value);
        }
        map
    }

    fn nodes(&mut self, items: &[Node]) -> Vec<Value> {
        items.iter().map(|item| self.node(item)).collect()
    }
}

/// Evaluate `script`, parsed from `source`, with a fresh constant table
pub fn evaluate(script: &Script, source: &str) -> Evaluation {
    Evaluator::new(source).evaluate(script)
}
