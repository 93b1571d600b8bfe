//! Parser — converts JSON text into a [`Value`] tree.
//!
//! A single forward pass with one cursor. At each value position the next
//! character picks the shape:
//!
//! - `{` / `[` / `"` → object, array, or quoted string
//! - `,` / `]` / `}` → end of a bare token (number, `true`, `null`, ...), which
//!   becomes a [`Value::Scalar`] holding its literal text
//! - whitespace → skipped
//! - anything else → appended to the bare token
//!
//! # Key design decisions
//!
//! - **No literal inference**: `42`, `true` and `null` are stored as text and
//!   only coerced on extraction.
//! - **Lenient object bodies**: characters between an object's tokens that are
//!   not `"`, `:` or `}` are skipped rather than rejected. Upstream responses
//!   occasionally carry stray characters there.
//! - **Bounded recursion**: containers nested deeper than
//!   [`ParseOptions::max_depth`] abort the parse.
//! - **Non-standard escapes**: only `\\ \" \n \r \t \b \f` are decoded. Any
//!   other escaped character (including `\u`) is kept as a backslash followed
//!   by that character.

use crate::error::{JsonError, Result};
use crate::types::{Object, Value};

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested objects/arrays. The top-level container is depth 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a JSON document with default options.
///
/// # Examples
///
/// ```
/// use realty_json::{parse, Value};
///
/// let value = parse(r#"{"a":"b","n":42}"#).unwrap();
/// let object = value.as_object().unwrap();
/// assert_eq!(object.get("n"), Some(&Value::Scalar("42".to_string())));
/// ```
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a JSON document with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
    let mut parser = Parser {
        src: text,
        pos: 0,
        max_depth: options.max_depth,
    };
    let result = parser.parse_value(0);
    if let Err(ref err) = result {
        tracing::debug!(error = %err, len = text.len(), "rejected JSON document");
    }
    result
}

/// Decode `bytes` as UTF-8 and parse them with default options.
pub fn parse_slice(bytes: &[u8]) -> Result<Value> {
    parse(std::str::from_utf8(bytes)?)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(JsonError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Dispatch on the next significant character. `depth` is the nesting
    /// level of the enclosing container (0 at the top).
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        let mut token = String::new();
        while let Some(c) = self.peek() {
            match c {
                '{' => {
                    self.bump(c);
                    return self.parse_object(depth + 1);
                }
                '[' => {
                    self.bump(c);
                    return self.parse_array(depth + 1);
                }
                '"' => {
                    self.bump(c);
                    return self.parse_string().map(Value::Scalar);
                }
                // Terminator is left for the enclosing container to consume.
                // Whitespace never reaches `token`, so it is already trimmed.
                ',' | ']' | '}' => return Ok(Value::Scalar(token)),
                c if c.is_whitespace() => self.bump(c),
                c => {
                    token.push(c);
                    self.bump(c);
                }
            }
        }
        Err(JsonError::UnexpectedEnd)
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        self.enter(depth)?;
        let mut object = Object::new();
        let mut key: Option<String> = None;

        while let Some(c) = self.peek() {
            self.bump(c);
            match c {
                // A second key before the colon replaces the first.
                '"' => key = Some(self.parse_string()?),
                ':' => {
                    let name = key
                        .take()
                        .filter(|k| !k.is_empty())
                        .ok_or(JsonError::MissingKey)?;
                    let value = self
                        .parse_value(depth)
                        .map_err(|err| unterminated(err, JsonError::UnterminatedObject))?;
                    object.insert(name, value);
                }
                '}' => return Ok(Value::Object(object)),
                _ => {}
            }
        }
        Err(JsonError::UnterminatedObject)
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        self.enter(depth)?;
        let mut items = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                ']' => {
                    self.bump(c);
                    return Ok(Value::Array(items));
                }
                ',' => self.bump(c),
                c if c.is_whitespace() => self.bump(c),
                // The dispatcher would stop on `}` without consuming it.
                '}' => {
                    return Err(JsonError::MismatchedClose {
                        expected: ']',
                        found: '}',
                    })
                }
                _ => {
                    let item = self
                        .parse_value(depth)
                        .map_err(|err| unterminated(err, JsonError::UnterminatedArray))?;
                    items.push(item);
                }
            }
        }
        Err(JsonError::UnterminatedArray)
    }

    /// Read the body of a quoted string; the opening quote is already consumed.
    fn parse_string(&mut self) -> Result<String> {
        let mut out = String::new();
        let mut escaped = false;

        while let Some(c) = self.peek() {
            self.bump(c);
            if escaped {
                match c {
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
                escaped = false;
            } else if c == '"' {
                return Ok(out);
            } else if c == '\\' {
                escaped = true;
            } else {
                out.push(c);
            }
        }
        Err(JsonError::UnterminatedString)
    }
}

/// Report running out of input inside a container as that container being
/// unterminated. Errors from deeper containers pass through unchanged.
fn unterminated(err: JsonError, container: JsonError) -> JsonError {
    match err {
        JsonError::UnexpectedEnd => container,
        other => other,
    }
}
