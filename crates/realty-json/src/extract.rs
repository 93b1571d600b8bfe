//! Typed field extraction from parsed objects.
//!
//! Response records decode themselves by pulling named fields out of an
//! [`Object`]. Every accessor returns `Option`: a missing key, a value of the
//! wrong shape and text that does not coerce to the requested type are all
//! reported as `None`. The specific reason is logged at `trace` level.
//!
//! Coercion is locale-independent: decimals are exact base-10
//! [`Decimal`] values using `.` as the separator (a `,` is accepted and
//! normalised first), booleans are the words `true`/`false`
//! in any ASCII case. Because the parser keeps `null` as the text `"null"`, a
//! JSON null fails every typed accessor just like an absent key.
//!
//! # Example
//! ```
//! use realty_json::extract::{get_decimal, get_object_array, get_text, FromObject};
//! use realty_json::{parse, Object};
//! use rust_decimal::Decimal;
//!
//! struct Item {
//!     id: String,
//!     price: Decimal,
//! }
//!
//! impl FromObject for Item {
//!     fn from_object(object: &Object) -> Option<Self> {
//!         Some(Item {
//!             id: get_text(object, "id")?.to_string(),
//!             price: get_decimal(object, "price")?,
//!         })
//!     }
//! }
//!
//! let doc = parse(r#"{"items":[{"id":"a","price":"12,5"},{"id":"b","price":3}]}"#).unwrap();
//! let items = get_object_array(doc.as_object().unwrap(), "items", Item::from_object).unwrap();
//! assert_eq!(items[0].price, Decimal::new(125, 1));
//! assert_eq!(items[1].id, "b");
//! ```

use crate::types::{Object, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A record type that can decode itself from an object node.
///
/// `Record::from_object` is the builder passed to [`get_object`] and
/// [`get_object_array`]; it is the only coupling between this engine and the
/// record types built on it.
pub trait FromObject: Sized {
    fn from_object(object: &Object) -> Option<Self>;
}

/// Why a lookup failed. Callers only ever see `None`; this goes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    Absent,
    ShapeMismatch(&'static str),
    Uncoercible(&'static str),
    ElementRejected(usize),
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Miss::Absent => f.write_str("key absent"),
            Miss::ShapeMismatch(expected) => write!(f, "expected {expected}"),
            Miss::Uncoercible(target) => write!(f, "text does not parse as {target}"),
            Miss::ElementRejected(index) => write!(f, "array element {index} rejected"),
        }
    }
}

fn miss<T>(key: &str, reason: Miss) -> Option<T> {
    tracing::trace!(key, %reason, "field extraction failed");
    None
}

/// Text of a scalar field.
pub fn get_text<'a>(object: &'a Object, key: &str) -> Option<&'a str> {
    match object.get(key) {
        Some(Value::Scalar(text)) => Some(text.as_str()),
        Some(_) => miss(key, Miss::ShapeMismatch("a scalar")),
        None => miss(key, Miss::Absent),
    }
}

fn coerce<T>(
    object: &Object,
    key: &str,
    target: &'static str,
    convert: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let text = get_text(object, key)?;
    match convert(text) {
        Some(value) => Some(value),
        None => miss(key, Miss::Uncoercible(target)),
    }
}

/// Decimal field. Accepts `,` as the decimal separator.
pub fn get_decimal(object: &Object, key: &str) -> Option<Decimal> {
    coerce(object, key, "a decimal", parse_decimal)
}

/// Integer field.
pub fn get_int(object: &Object, key: &str) -> Option<i64> {
    coerce(object, key, "an integer", parse_int)
}

/// Boolean field; `true` / `false` in any ASCII case.
pub fn get_bool(object: &Object, key: &str) -> Option<bool> {
    coerce(object, key, "a boolean", parse_bool)
}

/// Date-time field. Values carrying a UTC offset are converted to UTC.
pub fn get_date_time(object: &Object, key: &str) -> Option<NaiveDateTime> {
    coerce(object, key, "a date-time", parse_date_time)
}

/// Nested object decoded by `builder`.
pub fn get_object<T, F>(object: &Object, key: &str, builder: F) -> Option<T>
where
    F: FnOnce(&Object) -> Option<T>,
{
    match object.get(key) {
        Some(Value::Object(nested)) => builder(nested),
        Some(_) => miss(key, Miss::ShapeMismatch("an object")),
        None => miss(key, Miss::Absent),
    }
}

/// Array of objects, each decoded by `builder`.
///
/// All or nothing: if any element is not an object or is rejected by
/// `builder`, the whole call returns `None` and later elements are not
/// visited.
pub fn get_object_array<T, F>(object: &Object, key: &str, mut builder: F) -> Option<Vec<T>>
where
    F: FnMut(&Object) -> Option<T>,
{
    let items = match object.get(key) {
        Some(Value::Array(items)) => items,
        Some(_) => return miss(key, Miss::ShapeMismatch("an array")),
        None => return miss(key, Miss::Absent),
    };

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_object().and_then(&mut builder) {
            Some(value) => decoded.push(value),
            None => return miss(key, Miss::ElementRejected(index)),
        }
    }
    Some(decoded)
}

/// `[+|-]digits[.digits][(e|E)[+|-]digits]` with at least one mantissa digit,
/// after trimming and replacing `,` with `.`. Values outside the range of
/// [`Decimal`] fail rather than saturate.
fn parse_decimal(text: &str) -> Option<Decimal> {
    let normalized = text.trim().replace(',', ".");
    match normalized.strip_prefix('-') {
        Some(rest) => parse_unsigned_decimal(rest, true),
        None => parse_unsigned_decimal(
            normalized.strip_prefix('+').unwrap_or(&normalized),
            false,
        ),
    }
}

fn parse_unsigned_decimal(text: &str, negative: bool) -> Option<Decimal> {
    let bytes = text.as_bytes();
    let int_digits = count_digits(bytes);
    let mut i = int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    let int_part = match &text[..int_digits] {
        "" => "0",
        digits => digits,
    };
    let frac_start = int_digits + 1;
    let mut mantissa = String::with_capacity(text.len() + 2);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(int_part);
    if frac_digits > 0 {
        mantissa.push('.');
        mantissa.push_str(&text[frac_start..frac_start + frac_digits]);
    }

    if !matches!(bytes.get(i), Some(b'e' | b'E')) {
        if i != bytes.len() {
            return None;
        }
        return Decimal::from_str(&mantissa).ok();
    }
    i += 1;
    let exp_negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let exp_digits = count_digits(&bytes[i..]);
    if exp_digits == 0 || i + exp_digits != bytes.len() {
        return None;
    }
    let sign = if exp_negative { "-" } else { "" };
    Decimal::from_scientific(&format!("{mantissa}e{sign}{}", &text[i..])).ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(at) = DateTime::parse_from_str(text, format) {
            return Some(at.naive_utc());
        }
    }
    for format in LOCAL_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(text, format) {
            return Some(at);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}
