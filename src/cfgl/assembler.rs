//! Document assembly: the merge policy for top-level elements
//!
//! The values of the top-level elements are folded right to left. Each step combines the
//! head value with the fold of everything after it:
//!
//! ```text
//! head     rest               result
//! Null     r                  r
//! h        Null               h
//! Map      merged Map         one Map, keys from the rest win on collision
//! h        assembled [..]     [h, ..]
//! h        r                  [h, r]
//! ```
//!
//! "assembled" means a sequence built by this fold. A sequence literal such as `(2, 3)` is an
//! ordinary value and is never spliced, so `{ a: 1 } ( 2, 3 )` yields `[{a: 1}, [2, 3]]`.
//! A single element passes through unchanged.

use std::collections::VecDeque;

use tracing::debug;

use crate::cfgl::value::{Map, Value};

/// Intermediate state of the fold
#[derive(Debug)]
enum Fold {
    /// Every element so far was a map (or null), merged into one
    Merged(Map),
    /// A sequence built from two or more elements
    Assembled(VecDeque<Value>),
    /// One non-map value, kept as is
    Single(Value),
}

impl Fold {
    fn start(value: Value) -> Self {
        match value {
            Value::Map(map) => Fold::Merged(map),
            other => Fold::Single(other),
        }
    }

    fn push_front(self, head: Value) -> Self {
        match (head, self) {
            (Value::Null, rest) => rest,
            (head, Fold::Single(Value::Null)) => Fold::start(head),
            (Value::Map(mut map), Fold::Merged(rest)) => {
                map.merge(rest);
                Fold::Merged(map)
            }
            (head, Fold::Assembled(mut items)) => {
                items.push_front(head);
                Fold::Assembled(items)
            }
            (head, Fold::Merged(rest)) => {
                Fold::Assembled(VecDeque::from([head, Value::Map(rest)]))
            }
            (head, Fold::Single(rest)) => Fold::Assembled(VecDeque::from([head, rest])),
        }
    }

    fn finish(self) -> Value {
        match self {
            Fold::Merged(map) => Value::Map(map),
            Fold::Assembled(items) => Value::Sequence(items.into()),
            Fold::Single(value) => value,
        }
    }
}

/// Fold element values into a document. Returns `None` when there are no elements.
pub fn assemble(elements: Vec<Value>) -> Option<Value> {
    let count = elements.len();
    let mut values = elements.into_iter().rev();
    let last = values.next()?;

    let document = values
        .fold(Fold::start(last), |rest, head| rest.push_front(head))
        .finish();

    debug!(elements = count, document = document.type_name(), "assembled document");
    Some(document)
}
