//! Common types used throughout ctp-bulk
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// One bounded batch of results returned by a single page request.
/// Each item carries at least an `id` string usable as a cursor value.
pub type Page = Vec<JsonValue>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transport-level retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extract the `id` field of a result item, if present and a string.
pub fn item_id(item: &JsonValue) -> Option<&str> {
    item.get("id").and_then(JsonValue::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(backoff, BackoffType::Linear);

        let json = serde_json::to_string(&BackoffType::Exponential).unwrap();
        assert_eq!(json, "\"exponential\"");
    }

    #[test]
    fn test_item_id() {
        assert_eq!(item_id(&json!({"id": "abc", "version": 3})), Some("abc"));
        assert_eq!(item_id(&json!({"id": 42})), None);
        assert_eq!(item_id(&json!({"key": "abc"})), None);
    }
}
