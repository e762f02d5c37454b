//! Loosely-typed values passed through hook chains.

pub use serde_json::Value;

/// Truthiness of a chain value.
///
/// `Null`, `false`, numeric zero, `""`, `"0"`, and empty arrays or objects
/// are falsy. A falsy chain output triggers the fallback; a falsy mock is
/// ignored.
pub trait Truthy {
    /// Returns whether the value counts as a usable result.
    fn is_truthy(&self) -> bool;
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [
            Value::Null,
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(!value.is_truthy(), "{value} should be falsy");
        }
    }

    #[test]
    fn test_truthy_values() {
        for value in [
            json!(true),
            json!(-1),
            json!(0.5),
            json!("x"),
            json!("0.0"),
            json!([0]),
            json!({"a": null}),
        ] {
            assert!(value.is_truthy(), "{value} should be truthy");
        }
    }
}
