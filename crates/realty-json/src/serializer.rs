//! Serializer — converts a caller-built [`Node`] graph into compact JSON text.
//!
//! Outbound request bodies are assembled as `Node` graphs (maps, lists and
//! primitive leaves) rather than as parsed [`Value`] trees, so numbers and
//! booleans are emitted bare while text is quoted. Output never contains
//! inserted whitespace.
//!
//! # Example
//! ```
//! use realty_json::{stringify, Node};
//!
//! let body = Node::map([
//!     ("product_name", Node::from("EgrnRightList")),
//!     ("use_account_balance", Node::from(false)),
//!     ("price", Node::from(12.5)),
//! ]);
//! assert_eq!(
//!     stringify(&body),
//!     r#"{"product_name":"EgrnRightList","use_account_balance":false,"price":12.5}"#
//! );
//! ```

use crate::types::{Map, Value};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt::Display;

/// A node of an outbound object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Node>),
    Map(Map<Node>),
}

/// Locale-independent text of a numeric primitive.
///
/// Only constructible from Rust numeric types, so the text is always a valid
/// JSON number with a `.` decimal separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(String);

impl Number {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Node {
    /// Build a map node from key/value pairs. A repeated key keeps its last value.
    pub fn map<K, I>(pairs: I) -> Node
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Map(pairs.into_iter().collect())
    }

    pub fn list<I: IntoIterator<Item = Node>>(items: I) -> Node {
        Node::List(items.into_iter().collect())
    }

    /// Quote any displayable value as text.
    pub fn display(value: &impl Display) -> Node {
        Node::Text(value.to_string())
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Self {
                    Node::Number(Number(n.to_string()))
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                /// `NaN` and infinities have no JSON literal and become `null`.
                fn from(n: $ty) -> Self {
                    if n.is_finite() {
                        Node::Number(Number(n.to_string()))
                    } else {
                        Node::Null
                    }
                }
            }
        )*
    };
}

float_from!(f32, f64);

/// Emitted with its scale, so `250.00` stays `250.00`.
impl From<Decimal> for Node {
    fn from(n: Decimal) -> Self {
        Node::Number(Number(n.to_string()))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<NaiveDateTime> for Node {
    fn from(at: NaiveDateTime) -> Self {
        Node::Text(at.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl From<NaiveDate> for Node {
    fn from(day: NaiveDate) -> Self {
        Node::Text(day.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map<Node>> for Node {
    fn from(map: Map<Node>) -> Self {
        Node::Map(map)
    }
}

/// Re-emit a parsed tree. Every leaf of a tree is text, so scalars that were
/// bare numbers or booleans in the source come back quoted.
impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(object) => Node::Map(
                object
                    .iter()
                    .map(|(key, child)| (key, Node::from(child)))
                    .collect(),
            ),
            Value::Array(items) => Node::List(items.iter().map(Node::from).collect()),
            Value::Scalar(text) => Node::Text(text.clone()),
        }
    }
}

/// Serialize a graph to compact JSON text.
pub fn stringify(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Null => out.push_str("null"),
        Node::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Node::Number(n) => out.push_str(n.as_str()),
        Node::Text(text) => write_quoted(text, out),
        Node::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_node(item, out);
            }
            out.push(']');
        }
        Node::Map(map) => {
            out.push('{');
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_quoted(key, out);
                out.push(':');
                write_node(value, out);
            }
            out.push('}');
        }
    }
}

fn write_quoted(text: &str, out: &mut String) {
    out.push('"');
    escape_into(text, out);
    out.push('"');
}

/// Escape `text` for use inside a JSON string literal.
///
/// Only backslash, quote, `\n`, `\r`, `\t`, backspace and form feed are
/// escaped; everything else, non-ASCII included, is copied verbatim.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

/// Append the escaped form of `text` to `out`.
pub fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            _ => out.push(c),
        }
    }
}
