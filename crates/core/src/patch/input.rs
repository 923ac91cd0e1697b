//! Request bodies as seen by the validator.

use serde::Deserialize;
use serde_json::{Map, Value};

/// State of one field in a sparse body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldInput<'a> {
    /// Key not present: leave the column unchanged.
    Absent,
    Null,
    EmptyString,
    Value(&'a Value),
}

/// A decoded JSON object carrying any subset of a record's fields.
///
/// Deserializing anything other than a JSON object fails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SparseInput {
    body: Map<String, Value>,
}

impl SparseInput {
    /// Wrap a JSON value, or `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(body) => Some(Self { body }),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> FieldInput<'_> {
        match self.body.get(name) {
            None => FieldInput::Absent,
            Some(Value::Null) => FieldInput::Null,
            Some(Value::String(s)) if s.is_empty() => FieldInput::EmptyString,
            Some(value) => FieldInput::Value(value),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.body.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn distinguishes_the_four_states() {
        let input = SparseInput::from_value(json!({
            "nom": "Gala",
            "description": null,
            "date_debut": ""
        }))
        .expect("object");

        assert_eq!(input.get("nom"), FieldInput::Value(&json!("Gala")));
        assert_eq!(input.get("description"), FieldInput::Null);
        assert_eq!(input.get("date_debut"), FieldInput::EmptyString);
        assert_eq!(input.get("lieu"), FieldInput::Absent);
    }

    #[test]
    fn whitespace_is_not_empty() {
        let input = SparseInput::from_value(json!({ "nom": " " })).expect("object");
        assert_eq!(input.get("nom"), FieldInput::Value(&json!(" ")));
    }

    #[test]
    fn non_objects_are_refused() {
        assert!(SparseInput::from_value(json!([1, 2])).is_none());
        assert!(SparseInput::from_value(json!("nom")).is_none());
        assert!(serde_json::from_value::<SparseInput>(json!(null)).is_err());
    }

    #[test]
    fn deserializes_from_object() {
        let input: SparseInput = serde_json::from_str(r#"{"nom":"X","ID":7}"#).expect("object");
        let mut keys: Vec<&str> = input.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["ID", "nom"]);
    }
}
