use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One outbound signal, in the collection library's `send(...)` call shape.
/// The three kinds the library recognises: page views, events, and social
/// interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Hit {
    PageView {
        url: String,
    },
    Event {
        category: String,
        action: String,
        label: Option<String>,
        value: Option<i64>,
    },
    Social {
        network: String,
        action: String,
        url: String,
        /// Optional structured payload, e.g. `{"page": "/products"}`.
        value: Option<serde_json::Value>,
    },
}

/// Second argument of the library's `create` call: either a single field
/// (the cookie domain) or a full field map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CreateParams {
    Field(String),
    Fields(HashMap<String, serde_json::Value>),
}

impl CreateParams {
    /// The library's documented default, `"auto"`.
    pub fn auto() -> Self {
        CreateParams::Field("auto".into())
    }
}

/// Lifecycle of the one-shot initialization gate. `Ready` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitState {
    Uninitialized,
    Pending,
    Ready,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_serde() {
        let hit = Hit::Event {
            category: "video".into(),
            action: "play".into(),
            label: Some("intro".into()),
            value: Some(1),
        };
        let json = serde_json::to_string(&hit).unwrap();
        assert!(json.contains("\"type\":\"event\""));
        let parsed: Hit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hit);
    }

    #[test]
    fn test_create_params_untagged() {
        let single: CreateParams = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(single, CreateParams::Field("none".into()));

        let map: CreateParams =
            serde_json::from_str(r#"{"cookieDomain": "example.com", "siteSpeedSampleRate": 10}"#)
                .unwrap();
        match map {
            CreateParams::Fields(fields) => {
                assert_eq!(fields["cookieDomain"], serde_json::json!("example.com"));
                assert_eq!(fields["siteSpeedSampleRate"], serde_json::json!(10));
            }
            other => panic!("expected field map, got {:?}", other),
        }
    }

    #[test]
    fn test_default_create_params() {
        assert_eq!(CreateParams::auto(), CreateParams::Field("auto".into()));
    }
}
