//! Syntax tree nodes

use std::ops::Range;

use crate::cfgl::lexer::tokens::Number;

/// A whole parsed document: one or more top-level elements in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub elements: Vec<Element>,
}

/// A top-level production
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// `name = value;`
    Declaration {
        name: String,
        span: Range<usize>,
        value: Node,
    },
    /// `{ key: value, ... }`
    Map(Vec<Pair>),
    /// `( value, ... )`
    Sequence(Vec<Node>),
}

/// A value position inside a declaration, map or sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number { value: Number, span: Range<usize> },
    ConstRef { name: String, span: Range<usize> },
    Map(Vec<Pair>),
    Sequence(Vec<Node>),
}

/// `key: value` inside a map literal
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: String,
    pub span: Range<usize>,
    pub value: Node,
}

impl Script {
    /// Names declared anywhere at the top level, in source order (repeats included)
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Declaration { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }
}

impl Element {
    pub fn node_type(&self) -> &'static str {
        match self {
            Element::Declaration { .. } => "Declaration",
            Element::Map(_) => "Map",
            Element::Sequence(_) => "Sequence",
        }
    }
}

impl Node {
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Number { .. } => "Number",
            Node::ConstRef { .. } => "ConstRef",
            Node::Map(_) => "Map",
            Node::Sequence(_) => "Sequence",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str) -> Node {
        Node::ConstRef {
            name: name.into(),
            span: 0..0,
        }
    }

    #[test]
    fn test_declared_names() {
        let script = Script {
            elements: vec![
                Element::Declaration {
                    name: "x".into(),
                    span: 0..1,
                    value: reference("y"),
                },
                Element::Sequence(vec![]),
                Element::Declaration {
                    name: "x".into(),
                    span: 0..1,
                    value: Node::Map(vec![]),
                },
            ],
        };
        assert_eq!(script.declared_names().collect::<Vec<_>>(), vec!["x", "x"]);
        assert_eq!(script.elements[1].node_type(), "Sequence");
    }
}
