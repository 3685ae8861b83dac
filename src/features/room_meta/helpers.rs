use serde_json::{Number, Value};

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, PartialEq)]
pub enum CapacityLookup {
    Found(Number),
    Missing,
    Invalid(Value),
}

/// LibCal answers with either the item object or an array holding it first.
pub fn normalise_item(body: Value) -> Option<Value> {
    match body {
        Value::Array(items) => items.into_iter().next(),
        Value::Null => None,
        other => Some(other),
    }
}

pub fn lookup_capacity(item: Option<&Value>) -> CapacityLookup {
    match item.and_then(|item| item.get("capacity")) {
        None | Some(Value::Null) => CapacityLookup::Missing,
        Some(raw) => match to_number(raw) {
            Some(number) => CapacityLookup::Found(number),
            // Unconvertible values are dropped, never written as `null`.
            None => CapacityLookup::Invalid(raw.clone()),
        },
    }
}

fn to_number(raw: &Value) -> Option<Number> {
    match raw {
        Value::Number(number) if number.is_f64() => number.as_f64().and_then(from_f64),
        Value::Number(number) => Some(number.clone()),
        Value::String(text) => parse_numeric(text.trim()),
        Value::Bool(flag) => Some(Number::from(u8::from(*flag))),
        _ => None,
    }
}

fn parse_numeric(text: &str) -> Option<Number> {
    if text.is_empty() {
        return Some(Number::from(0));
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    text.parse::<f64>().ok().and_then(from_f64)
}

// Whole floats print without a fractional part, so `12.0` is written as `12`.
fn from_f64(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}
