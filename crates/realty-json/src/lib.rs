//! # realty-json
//!
//! JSON document engine for the Realty Cloud cadastral data API.
//!
//! The engine turns response text into a loosely-typed value tree, pulls typed
//! fields out of that tree for response records, and serializes request
//! graphs back to compact JSON. Parsing is deliberately lenient: leaves are
//! kept as their literal text and only coerced when a record asks for a
//! specific type.
//!
//! ## Quick start
//!
//! ```rust
//! use realty_json::extract::{get_bool, get_decimal, get_text};
//! use realty_json::{parse, stringify, Node};
//! use rust_decimal::Decimal;
//!
//! let doc = parse(r#"{"Number":"77:01:0001001:1","Area":"54,3","active":true}"#).unwrap();
//! let object = doc.as_object().unwrap();
//! assert_eq!(get_text(object, "Number"), Some("77:01:0001001:1"));
//! assert_eq!(get_decimal(object, "Area"), Some(Decimal::new(543, 1)));
//! assert_eq!(get_bool(object, "active"), Some(true));
//!
//! let body = Node::map([("query", Node::from("Moscow, Tverskaya 1"))]);
//! assert_eq!(stringify(&body), r#"{"query":"Moscow, Tverskaya 1"}"#);
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — JSON text → [`Value`] tree
//! - [`serializer`] — [`Node`] graph → compact JSON text
//! - [`extract`] — typed field access and the record builder seam
//! - [`response`] — `{"data": ...}` response envelopes
//! - [`error`] — parse and response errors
//! - [`types`] — the value tree

pub mod error;
pub mod extract;
pub mod parser;
pub mod response;
pub mod serializer;
pub mod types;

pub use error::{JsonError, ResponseError};
pub use extract::FromObject;
pub use parser::{parse, parse_slice, parse_with, ParseOptions, DEFAULT_MAX_DEPTH};
pub use serializer::{escape, stringify, Node, Number};
pub use types::{Map, Object, Value};
