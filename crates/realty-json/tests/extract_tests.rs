use chrono::{NaiveDate, NaiveDateTime};
use realty_json::extract::{
    get_bool, get_date_time, get_decimal, get_int, get_object, get_object_array, get_text,
    FromObject,
};
use realty_json::{parse, Object};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Helper: parse a document that must be an object.
fn object(text: &str) -> Object {
    parse(text)
        .expect("fixture must parse")
        .as_object()
        .cloned()
        .expect("fixture must be an object")
}

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[derive(Debug, PartialEq)]
struct Item {
    id: String,
    price: Decimal,
}

impl FromObject for Item {
    fn from_object(object: &Object) -> Option<Self> {
        Some(Item {
            id: get_text(object, "id")?.to_string(),
            price: get_decimal(object, "price")?,
        })
    }
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn text_from_quoted_and_bare_values() {
    let obj = object(r#"{"a":"b","n":42}"#);
    assert_eq!(get_text(&obj, "a"), Some("b"));
    assert_eq!(get_text(&obj, "n"), Some("42"));
}

#[test]
fn text_absent_key_fails() {
    let obj = object(r#"{"a":"b"}"#);
    assert_eq!(get_text(&obj, "missing"), None);
}

#[test]
fn text_on_container_fails() {
    let obj = object(r#"{"o":{"x":"1"},"l":["1"]}"#);
    assert_eq!(get_text(&obj, "o"), None);
    assert_eq!(get_text(&obj, "l"), None);
}

#[test]
fn text_of_null_literal_is_the_word_null() {
    let obj = object(r#"{"z":null}"#);
    assert_eq!(get_text(&obj, "z"), Some("null"));
}

// ============================================================================
// Decimal
// ============================================================================

#[test]
fn decimal_with_comma_separator() {
    let obj = object(r#"{"v":"12,5"}"#);
    assert_eq!(get_decimal(&obj, "v"), Some(dec("12.5")));
}

#[test]
fn decimal_forms() {
    let obj = object(
        r#"{"a":12.5,"b":"-3","c":"+0.25","d":".5","e":"1e3","f":" 7,75 ","g":"5.","h":"2.5E-1"}"#,
    );
    assert_eq!(get_decimal(&obj, "a"), Some(dec("12.5")));
    assert_eq!(get_decimal(&obj, "b"), Some(dec("-3")));
    assert_eq!(get_decimal(&obj, "c"), Some(dec("0.25")));
    assert_eq!(get_decimal(&obj, "d"), Some(dec("0.5")));
    assert_eq!(get_decimal(&obj, "e"), Some(dec("1000")));
    assert_eq!(get_decimal(&obj, "f"), Some(dec("7.75")));
    assert_eq!(get_decimal(&obj, "g"), Some(dec("5")));
    assert_eq!(get_decimal(&obj, "h"), Some(dec("0.25")));
}

#[test]
fn decimal_keeps_every_digit_of_large_amounts() {
    let obj = object(r#"{"price":"12345678901234567,89","balance":"0.10","sum":0.2}"#);
    let price = get_decimal(&obj, "price").unwrap();
    assert_eq!(price.to_string(), "12345678901234567.89");

    // Base-10 arithmetic: 0.10 + 0.2 is exactly 0.3.
    let total = get_decimal(&obj, "balance").unwrap() + get_decimal(&obj, "sum").unwrap();
    assert_eq!(total, dec("0.3"));
}

#[test]
fn decimal_keeps_scale_of_source_text() {
    let obj = object(r#"{"v":"250,00"}"#);
    assert_eq!(get_decimal(&obj, "v").unwrap().to_string(), "250.00");
}

#[test]
fn decimal_rejects_out_of_range_values() {
    let obj = object(
        r#"{"big":"1e999","neg":"-1e400","wide":"99999999999999999999999999999999","huge_exp":"1e99999999999999999999"}"#,
    );
    for key in ["big", "neg", "wide", "huge_exp"] {
        assert_eq!(get_decimal(&obj, key), None, "key {key} should not coerce");
    }
}

#[test]
fn decimal_rejects_non_numbers() {
    let obj = object(
        r#"{"n":null,"w":"abc","e":"","i":"inf","nan":"NaN","two":"1.2.3","grp":"1,234.5","x":"1e"}"#,
    );
    for key in ["n", "w", "e", "i", "nan", "two", "grp", "x"] {
        assert_eq!(get_decimal(&obj, key), None, "key {key} should not coerce");
    }
}

// ============================================================================
// Integer
// ============================================================================

#[test]
fn int_values() {
    let obj = object(r#"{"a":42,"b":"-7","c":"+3","d":" 12 "}"#);
    assert_eq!(get_int(&obj, "a"), Some(42));
    assert_eq!(get_int(&obj, "b"), Some(-7));
    assert_eq!(get_int(&obj, "c"), Some(3));
    assert_eq!(get_int(&obj, "d"), Some(12));
}

#[test]
fn int_rejects_fractions_and_words() {
    let obj = object(r#"{"a":1.5,"b":"x","c":null,"d":"99999999999999999999"}"#);
    for key in ["a", "b", "c", "d"] {
        assert_eq!(get_int(&obj, key), None, "key {key} should not coerce");
    }
}

// ============================================================================
// Boolean
// ============================================================================

#[test]
fn bool_values_case_insensitive() {
    let obj = object(r#"{"a":true,"b":false,"c":"TRUE","d":"False"}"#);
    assert_eq!(get_bool(&obj, "a"), Some(true));
    assert_eq!(get_bool(&obj, "b"), Some(false));
    assert_eq!(get_bool(&obj, "c"), Some(true));
    assert_eq!(get_bool(&obj, "d"), Some(false));
}

#[test]
fn bool_of_null_fails() {
    let obj = object(r#"{"paid":null}"#);
    assert_eq!(get_bool(&obj, "paid"), None);
}

#[test]
fn bool_rejects_numbers() {
    let obj = object(r#"{"a":1,"b":"yes"}"#);
    assert_eq!(get_bool(&obj, "a"), None);
    assert_eq!(get_bool(&obj, "b"), None);
}

// ============================================================================
// Date-time
// ============================================================================

#[test]
fn date_time_iso_without_offset() {
    let obj = object(r#"{"a":"2023-01-05T10:30:00","b":"2023-01-05 10:30:00","c":"2023-01-05T10:30"}"#);
    assert_eq!(get_date_time(&obj, "a"), Some(at(2023, 1, 5, 10, 30, 0)));
    assert_eq!(get_date_time(&obj, "b"), Some(at(2023, 1, 5, 10, 30, 0)));
    assert_eq!(get_date_time(&obj, "c"), Some(at(2023, 1, 5, 10, 30, 0)));
}

#[test]
fn date_time_fractional_seconds() {
    let obj = object(r#"{"a":"2023-01-05T10:30:00.250"}"#);
    let expected = NaiveDate::from_ymd_opt(2023, 1, 5)
        .unwrap()
        .and_hms_milli_opt(10, 30, 0, 250)
        .unwrap();
    assert_eq!(get_date_time(&obj, "a"), Some(expected));
}

#[test]
fn date_time_with_offset_is_converted_to_utc() {
    let obj = object(r#"{"a":"2023-01-05T13:30:00+03:00","b":"2023-01-05T10:30:00Z"}"#);
    assert_eq!(get_date_time(&obj, "a"), Some(at(2023, 1, 5, 10, 30, 0)));
    assert_eq!(get_date_time(&obj, "b"), Some(at(2023, 1, 5, 10, 30, 0)));
}

#[test]
fn date_time_with_basic_offset() {
    let obj = object(
        r#"{"t":"2023-01-05T13:30:00+0300","space":"2023-01-05 13:30:00+0300","frac":"2023-01-05T13:30:00.5+0300"}"#,
    );
    assert_eq!(get_date_time(&obj, "t"), Some(at(2023, 1, 5, 10, 30, 0)));
    assert_eq!(get_date_time(&obj, "space"), Some(at(2023, 1, 5, 10, 30, 0)));
    let half = NaiveDate::from_ymd_opt(2023, 1, 5)
        .unwrap()
        .and_hms_milli_opt(10, 30, 0, 500)
        .unwrap();
    assert_eq!(get_date_time(&obj, "frac"), Some(half));
}

#[test]
fn date_time_date_only_is_midnight() {
    let obj = object(r#"{"a":"2023-01-05","b":"01/05/2023"}"#);
    assert_eq!(get_date_time(&obj, "a"), Some(at(2023, 1, 5, 0, 0, 0)));
    assert_eq!(get_date_time(&obj, "b"), Some(at(2023, 1, 5, 0, 0, 0)));
}

#[test]
fn date_time_invariant_month_first() {
    let obj = object(r#"{"a":"01/05/2023 10:30:00"}"#);
    assert_eq!(get_date_time(&obj, "a"), Some(at(2023, 1, 5, 10, 30, 0)));
}

#[test]
fn date_time_rejects_garbage() {
    let obj = object(r#"{"a":"yesterday","b":null,"c":"2023-13-40"}"#);
    for key in ["a", "b", "c"] {
        assert_eq!(get_date_time(&obj, key), None, "key {key} should not coerce");
    }
}

// ============================================================================
// Nested objects
// ============================================================================

#[test]
fn object_decoded_by_builder() {
    let obj = object(r#"{"item":{"id":"a","price":"12,5"}}"#);
    assert_eq!(
        get_object(&obj, "item", Item::from_object),
        Some(Item {
            id: "a".to_string(),
            price: dec("12.5")
        })
    );
}

#[test]
fn object_builder_failure_fails() {
    let obj = object(r#"{"item":{"id":"a"}}"#);
    assert_eq!(get_object(&obj, "item", Item::from_object), None);
}

#[test]
fn object_wrong_shape_fails_without_calling_builder() {
    let obj = object(r#"{"item":"flat","list":[{"id":"a","price":1}]}"#);
    let mut calls = 0;
    let mut counting = |o: &Object| {
        calls += 1;
        Item::from_object(o)
    };
    assert_eq!(get_object(&obj, "item", &mut counting), None);
    assert_eq!(get_object(&obj, "list", &mut counting), None);
    assert_eq!(get_object(&obj, "absent", &mut counting), None);
    assert_eq!(calls, 0);
}

#[test]
fn object_accepts_closure_builder() {
    let obj = object(r#"{"meta":{"a":"1","b":"2"}}"#);
    let count = get_object(&obj, "meta", |o: &Object| Some(o.len()));
    assert_eq!(count, Some(2));
}

// ============================================================================
// Object arrays
// ============================================================================

#[test]
fn object_array_decodes_every_element_in_order() {
    let obj = object(r#"{"items":[{"id":"a","price":1},{"id":"b","price":"2,5"},{"id":"c","price":3}]}"#);
    let items = get_object_array(&obj, "items", Item::from_object).unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(items[1].price, dec("2.5"));
}

#[test]
fn object_array_empty_is_success() {
    let obj = object(r#"{"items":[]}"#);
    assert_eq!(get_object_array(&obj, "items", Item::from_object), Some(vec![]));
}

#[test]
fn object_array_is_all_or_nothing() {
    let obj = object(
        r#"{"items":[{"id":"a","price":1},{"id":"b","price":"oops"},{"id":"c","price":3}]}"#,
    );
    assert_eq!(get_object_array(&obj, "items", Item::from_object), None);
}

#[test]
fn object_array_stops_at_first_failure() {
    let obj = object(
        r#"{"items":[{"id":"a","price":1},{"id":"b"},{"id":"c","price":3}]}"#,
    );
    let mut visited = Vec::new();
    let result = get_object_array(&obj, "items", |o: &Object| {
        visited.push(get_text(o, "id").map(str::to_string));
        Item::from_object(o)
    });
    assert_eq!(result, None);
    assert_eq!(visited, vec![Some("a".to_string()), Some("b".to_string())]);
}

#[test]
fn object_array_non_object_element_fails() {
    let obj = object(r#"{"items":[{"id":"a","price":1},"loose"]}"#);
    assert_eq!(get_object_array(&obj, "items", Item::from_object), None);
}

#[test]
fn object_array_wrong_shape_fails() {
    let obj = object(r#"{"items":{"id":"a","price":1},"flat":"x"}"#);
    assert_eq!(get_object_array(&obj, "items", Item::from_object), None);
    assert_eq!(get_object_array(&obj, "flat", Item::from_object), None);
    assert_eq!(get_object_array(&obj, "absent", Item::from_object), None);
}

#[test]
fn extraction_does_not_mutate_tree() {
    let obj = object(r#"{"items":[{"id":"a","price":1}],"v":"12,5"}"#);
    let before = obj.clone();
    let _ = get_decimal(&obj, "v");
    let _ = get_object_array(&obj, "items", Item::from_object);
    assert_eq!(obj, before);
}
