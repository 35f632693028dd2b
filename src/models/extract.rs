//! Defensive readers over backend JSON
//!
//! The cricket endpoints forward third-party payloads whose shape varies
//! between providers and over time. Everything here reads a value without
//! failing: missing or mistyped fields come back as the caller's fallback.

use serde_json::Value;

/// Unwrap the common envelopes (`data`, `matchDetails`, `matchInfo`).
///
/// A body that arrived as a JSON-encoded string is decoded first.
pub fn envelope(value: &Value) -> Value {
    let value = decode_string(value);
    for key in ["data", "matchDetails", "matchInfo"] {
        if let Some(inner) = value.get(key).filter(|v| !v.is_null()) {
            return inner.clone();
        }
    }
    value
}

/// A string body that itself holds JSON is parsed; anything else is cloned
pub fn decode_string(value: &Value) -> Value {
    match value {
        Value::String(raw) => serde_json::from_str(raw).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    }
}

/// Follow a dotted path (`"matchInfo.team1.teamName"`, `"innings.0.runs"`)
pub fn path<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(value, |current, key| match current {
            Value::Array(items) => items.get(key.parse::<usize>().ok()?),
            other => other.get(key),
        })
        .filter(|v| !v.is_null())
}

/// Unwrap only a `data` envelope, decoding string bodies first
pub fn unwrap_data(value: &Value) -> Value {
    let value = decode_string(value);
    match value.get("data") {
        Some(inner) if !inner.is_null() => inner.clone(),
        _ => value,
    }
}

/// First path among `candidates` that holds an array.
///
/// Object maps are accepted too and read as their values, which some
/// providers use for player lists.
pub fn first_array(value: &Value, candidates: &[&str]) -> Vec<Value> {
    for candidate in candidates {
        match path(value, candidate) {
            Some(Value::Array(items)) => return items.clone(),
            Some(Value::Object(map)) if !map.is_empty() => {
                return map.values().cloned().collect();
            }
            _ => {}
        }
    }
    Vec::new()
}

/// The value itself when it is an array, otherwise the first candidate array
pub fn as_list(value: &Value, candidates: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => first_array(other, candidates),
    }
}

/// First non-empty text among `candidates`, numbers rendered as text
pub fn text(value: &Value, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|c| match path(value, c)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// [`text`] with a fallback
pub fn text_or(value: &Value, candidates: &[&str], fallback: &str) -> String {
    text(value, candidates).unwrap_or_else(|| fallback.to_string())
}

/// First numeric value among `candidates`; numeric strings count
pub fn number(value: &Value, candidates: &[&str]) -> Option<f64> {
    candidates.iter().find_map(|c| match path(value, c)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// [`number`] with a fallback
pub fn number_or(value: &Value, candidates: &[&str], fallback: f64) -> f64 {
    number(value, candidates).unwrap_or(fallback)
}

/// Truthy flag: `true`, `"true"`, or a non-zero number
pub fn flag(value: &Value, candidates: &[&str]) -> bool {
    candidates.iter().any(|c| match path(value, c) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

/// Case-insensitive substring search used by the list filters
pub fn matches_query(haystacks: &[&str], query: Option<&str>) -> bool {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        None => true,
        Some(q) => {
            let q = q.to_lowercase();
            haystacks.iter().any(|h| h.to_lowercase().contains(&q))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_prefers_data() {
        let body = json!({"data": {"id": 1}, "matchInfo": {"id": 2}});
        assert_eq!(envelope(&body), json!({"id": 1}));
    }

    #[test]
    fn test_envelope_skips_null_and_passes_through() {
        let body = json!({"data": null, "matchDetails": [1]});
        assert_eq!(envelope(&body), json!([1]));
        assert_eq!(envelope(&json!({"x": 1})), json!({"x": 1}));
    }

    #[test]
    fn test_envelope_decodes_string_body() {
        let body = Value::String(r#"{"data":{"ok":true}}"#.to_string());
        assert_eq!(envelope(&body), json!({"ok": true}));

        let plain = Value::String("not json".to_string());
        assert_eq!(envelope(&plain), plain);
    }

    #[test]
    fn test_first_array_order_and_maps() {
        let body = json!({"list": [1], "rank": [2], "players": {"a": 3}});
        assert_eq!(first_array(&body, &["rank", "list"]), vec![json!(2)]);
        assert_eq!(first_array(&body, &["players"]), vec![json!(3)]);
        assert!(first_array(&body, &["missing"]).is_empty());
    }

    #[test]
    fn test_text_fallbacks() {
        let body = json!({"name": "", "teamName": "India", "rank": 1});
        assert_eq!(text_or(&body, &["name", "teamName"], "Unknown"), "India");
        assert_eq!(text_or(&body, &["rank"], "-"), "1");
        assert_eq!(text_or(&body, &["nope"], "Unknown"), "Unknown");
    }

    #[test]
    fn test_nested_path() {
        let body = json!({"matchInfo": {"team1": {"teamName": "Australia"}}});
        assert_eq!(
            text(&body, &["matchInfo.team1.teamName"]).as_deref(),
            Some("Australia")
        );
        assert!(path(&body, "matchInfo.team2.teamName").is_none());
    }

    #[test]
    fn test_path_indexes_arrays() {
        let body = json!({"innings": [{"runs": 1}, {"runs": 2}]});
        assert_eq!(number(&body, &["innings.1.runs"]), Some(2.0));
        assert!(path(&body, "innings.x.runs").is_none());
    }

    #[test]
    fn test_unwrap_data_leaves_other_envelopes() {
        let body = json!({"matchDetails": [1]});
        assert_eq!(unwrap_data(&body), body);
        assert_eq!(unwrap_data(&json!({"data": [2]})), json!([2]));
    }

    #[test]
    fn test_number_accepts_strings() {
        let body = json!({"r": "187", "o": 19.4, "w": "x"});
        assert_eq!(number(&body, &["runs", "r"]), Some(187.0));
        assert_eq!(number_or(&body, &["o"], 0.0), 19.4);
        assert_eq!(number_or(&body, &["w"], 0.0), 0.0);
    }

    #[test]
    fn test_flag() {
        let body = json!({"isCaptain": "TRUE", "isKeeper": 0});
        assert!(flag(&body, &["isCaptain"]));
        assert!(!flag(&body, &["isKeeper"]));
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query(&["India"], None));
        assert!(matches_query(&["India"], Some("  ")));
        assert!(matches_query(&["New Zealand", "NZ"], Some("nz")));
        assert!(!matches_query(&["England"], Some("aus")));
    }
}
