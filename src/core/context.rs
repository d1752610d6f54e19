//! Context store - the flat substitution environment threaded through assembly
//!
//! A [`Context`] maps variable names to JSON values. It is only ever combined
//! through [`Context::merge`], which is right-biased and shallow: nested values
//! are replaced wholesale. Merging never touches the base context.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Canonical text form used for timestamps stored in a context
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator used when a list value is substituted into a template
pub const LIST_SEPARATOR: &str = ", ";

/// Flat key/value substitution environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    variables: BTreeMap<String, JsonValue>,
}

/// Read access to substitution values for the template renderer
pub trait Lookup {
    /// Resolve `name` to its substitution text, or `None` when unbound
    fn lookup(&self, name: &str) -> Option<String>;
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from `key=value` string pairs, later pairs winning
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let variables = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), JsonValue::String(v.into())))
            .collect();
        Self { variables }
    }

    /// Build a context from the fields of a JSON object
    pub fn from_json_object(object: Map<String, JsonValue>) -> Self {
        Self {
            variables: object.into_iter().collect(),
        }
    }

    /// Right-biased shallow merge; neither input is modified
    pub fn merge(&self, overlay: &Context) -> Context {
        let mut variables = self.variables.clone();
        for (key, value) in &overlay.variables {
            variables.insert(key.clone(), value.clone());
        }
        Context { variables }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) {
        self.variables.insert(key.into(), value);
    }

    /// Store a timestamp in canonical form, without sub-second precision
    pub fn insert_timestamp<Tz>(&mut self, key: impl Into<String>, timestamp: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.insert(
            key,
            JsonValue::String(timestamp.format(TIMESTAMP_FORMAT).to_string()),
        );
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.variables.iter()
    }

    /// Wrap this context so that absent keys resolve to the empty string
    pub fn as_substitution_source(&self) -> LenientLookup<'_> {
        LenientLookup { context: self }
    }

    /// Convert into a JSON object, e.g. for handing to an external procedure
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.variables
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl Lookup for Context {
    fn lookup(&self, name: &str) -> Option<String> {
        self.variables.get(name).map(stringify_value)
    }
}

/// Lookup view over a [`Context`] that never reports a variable as unbound
pub struct LenientLookup<'a> {
    context: &'a Context,
}

impl Lookup for LenientLookup<'_> {
    fn lookup(&self, name: &str) -> Option<String> {
        Some(self.context.lookup(name).unwrap_or_default())
    }
}

/// Canonical text form of a context value as it appears in rendered output
pub fn stringify_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        JsonValue::Object(_) => value.to_string(),
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ctx(value: JsonValue) -> Context {
        match value {
            JsonValue::Object(map) => Context::from_json_object(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_merge_is_right_biased() {
        let base = ctx(json!({"a": 1, "b": 2}));
        let overlay = ctx(json!({"b": 3, "c": 4}));

        let merged = base.merge(&overlay);

        assert_eq!(merged, ctx(json!({"a": 1, "b": 3, "c": 4})));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = ctx(json!({"a": "x"}));
        let overlay = ctx(json!({"a": "y"}));

        let _ = base.merge(&overlay);

        assert_eq!(base.get("a"), Some(&json!("x")));
        assert_eq!(overlay.get("a"), Some(&json!("y")));
    }

    #[test]
    fn test_merge_replaces_nested_values_wholesale() {
        let base = ctx(json!({"meta": {"author": "Ann", "year": 2020}}));
        let overlay = ctx(json!({"meta": {"year": 2024}}));

        let merged = base.merge(&overlay);

        assert_eq!(merged.get("meta"), Some(&json!({"year": 2024})));
    }

    #[test]
    fn test_from_pairs_later_pairs_win() {
        let context = Context::from_pairs([("name", "a"), ("name", "b"), ("lang", "en")]);
        assert_eq!(context.len(), 2);
        assert_eq!(context.get("name"), Some(&json!("b")));
    }

    #[test]
    fn test_lenient_lookup_defaults_to_empty() {
        let context = Context::new();
        assert_eq!(context.lookup("missing"), None);
        assert_eq!(
            context.as_substitution_source().lookup("missing"),
            Some(String::new())
        );
    }

    #[test]
    fn test_stringify_values() {
        assert_eq!(stringify_value(&json!(null)), "");
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&json!(3)), "3");
        assert_eq!(stringify_value(&json!(1.5)), "1.5");
        assert_eq!(stringify_value(&json!(["a", "b", 3])), "a, b, 3");
        assert_eq!(stringify_value(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_insert_timestamp_drops_sub_seconds() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(14, 5, 7, 250)
            .unwrap();
        let timestamp = Utc.from_utc_datetime(&naive);

        let mut context = Context::new();
        context.insert_timestamp("now", &timestamp);

        assert_eq!(context.get("now"), Some(&json!("2024-03-09 14:05:07")));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let context = Context::from_pairs([("title", "Demo")]);
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({"title": "Demo"}));
        assert_eq!(context.to_json(), json!({"title": "Demo"}));
    }
}
