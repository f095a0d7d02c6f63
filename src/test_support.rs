//! Fixtures shared by unit tests

use plist::{Dictionary, Value};

/// Field map for one entry of a `Tracks` section
pub(crate) fn track_value(name: &str, kind: &str) -> Value {
    let mut fields = Dictionary::new();
    fields.insert("Name".to_string(), Value::from(name));
    fields.insert("Kind".to_string(), Value::from(kind));
    Value::Dictionary(fields)
}
