//! Built-in procedure stamping the assembly time into the context

use chrono::Local;
use serde_json::Value as JsonValue;

use crate::core::{Context, Result};
use crate::generation::Procedure;

/// Adds `now` (local time, second precision) and prefixes an existing `status`
pub struct TimestampProcedure {
    key: String,
}

impl TimestampProcedure {
    pub fn new() -> Self {
        Self::with_key("now")
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for TimestampProcedure {
    fn default() -> Self {
        Self::new()
    }
}

impl Procedure for TimestampProcedure {
    fn process(&self, context: Context) -> Result<Context> {
        let mut context = context;
        context.insert_timestamp(self.key.clone(), &Local::now());

        let labelled = context
            .get("status")
            .and_then(JsonValue::as_str)
            .map(|status| format!("Status: {status}"));
        if let Some(labelled) = labelled {
            context.insert("status", JsonValue::String(labelled));
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;

    #[test]
    fn test_adds_second_precision_timestamp() {
        let context = TimestampProcedure::new().process(Context::new()).unwrap();

        let now = context.get("now").and_then(JsonValue::as_str).unwrap();
        assert!(NaiveDateTime::parse_from_str(now, TIMESTAMP_FORMAT).is_ok());
        assert!(!now.contains('.'));
    }

    #[test]
    fn test_labels_status() {
        let context = TimestampProcedure::new()
            .process(Context::from_pairs([("status", "draft")]))
            .unwrap();

        assert_eq!(context.get("status").unwrap(), "Status: draft");
    }

    #[test]
    fn test_custom_key() {
        let context = TimestampProcedure::with_key("built_at")
            .process(Context::new())
            .unwrap();

        assert!(context.contains_key("built_at"));
        assert!(!context.contains_key("now"));
    }
}
