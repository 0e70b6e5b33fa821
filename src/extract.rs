use serde_json::{Map, Value};

/// Field names that usually carry the message text, in priority order.
/// Shared between the JSON record heuristic and CSV header detection.
pub const FIELD_CANDIDATES: &[&str] = &["content", "message", "text", "body", "msg"];

/// A fallback string value must be longer than this to count as text.
const LONG_STRING_MIN: usize = 10;

type Strategy = fn(&Map<String, Value>) -> Option<String>;

/// Ordered extraction strategies over a generic record; first success wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("candidate-field", candidate_field),
    ("long-string-fallback", long_string_fallback),
];

/// Try to pull a usable text string out of an arbitrarily shaped record.
/// Records that yield nothing are skipped by callers, never an error.
pub fn extract_text(value: &Value) -> Option<String> {
    let record = value.as_object()?;
    for (name, strategy) in STRATEGIES {
        if let Some(text) = strategy(record) {
            tracing::debug!("extracted text via {name}");
            return Some(text);
        }
    }
    None
}

/// First candidate field name holding a string value, candidate order wins
/// over key order.
fn candidate_field(record: &Map<String, Value>) -> Option<String> {
    FIELD_CANDIDATES.iter().find_map(|candidate| {
        record.iter().find_map(|(key, value)| {
            if key.eq_ignore_ascii_case(candidate) {
                value.as_str().map(str::to_string)
            } else {
                None
            }
        })
    })
}

/// First property (insertion order) whose value is a string longer than
/// LONG_STRING_MIN characters.
fn long_string_fallback(record: &Map<String, Value>) -> Option<String> {
    record.values().find_map(|value| match value.as_str() {
        Some(s) if s.len() > LONG_STRING_MIN => Some(s.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_candidate_field() {
        let record = json!({"text": "hi there friend"});
        assert_eq!(extract_text(&record).as_deref(), Some("hi there friend"));
    }

    #[test]
    fn record_without_usable_field_yields_nothing() {
        assert_eq!(extract_text(&json!({"id": 5})), None);
    }

    #[test]
    fn candidate_order_beats_key_order() {
        // "body" appears first in the object but "content" wins the list.
        let record = json!({"body": "from body", "content": "from content"});
        assert_eq!(extract_text(&record).as_deref(), Some("from content"));
    }

    #[test]
    fn candidate_names_match_case_insensitively() {
        let record = json!({"Message": "mixed case key"});
        assert_eq!(extract_text(&record).as_deref(), Some("mixed case key"));
    }

    #[test]
    fn non_string_candidate_is_passed_over() {
        let record = json!({"content": 7, "msg": "still found"});
        assert_eq!(extract_text(&record).as_deref(), Some("still found"));
    }

    #[test]
    fn falls_back_to_first_long_string_property() {
        let record = json!({"id": 5, "note": "a long enough description"});
        assert_eq!(
            extract_text(&record).as_deref(),
            Some("a long enough description")
        );
    }

    #[test]
    fn short_fallback_strings_do_not_qualify() {
        assert_eq!(extract_text(&json!({"note": "short"})), None);
        // Boundary: exactly LONG_STRING_MIN characters is still too short.
        assert_eq!(extract_text(&json!({"note": "ten chars."})), None);
    }

    #[test]
    fn non_objects_yield_nothing() {
        assert_eq!(extract_text(&json!("just a string")), None);
        assert_eq!(extract_text(&json!(42)), None);
        assert_eq!(extract_text(&json!(null)), None);
    }
}
