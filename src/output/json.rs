//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the `{data, meta}` envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize)]
    struct Score {
        team: String,
        runs: i64,
    }

    #[test]
    fn test_json_output_carries_version() {
        let output = JsonOutput::new(vec!["live"]);
        assert_eq!(output.data, vec!["live"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_envelope() {
        let rows = vec![Score {
            team: "India".to_string(),
            runs: 187,
        }];

        let result = format_json(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["data"][0], json!({"team": "India", "runs": 187}));
        assert!(parsed["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_json_empty_vec() {
        let rows: Vec<Score> = vec![];
        assert!(format_json(&rows).unwrap().contains("\"data\": []"));
    }
}
