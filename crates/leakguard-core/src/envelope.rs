//! Response envelope normalization
//!
//! The backend speaks two wrapper conventions: the jeecg-style
//! `{success, code, message, result}` and the generic `{code, message, data}`.
//! Both are resolved here, once, into a single internal shape; nothing deeper
//! in the pipeline ever branches on the wire format again.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::business_code;

/// Tolerant wire-level envelope covering both server conventions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Internal envelope shape used throughout the pipeline
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Whether the server reported business success
    pub ok: bool,
    /// Business status code
    pub code: i64,
    /// Server message, or a generic fallback when absent
    pub message: String,
    /// The wrapped payload; `Value::Null` when the server sent none
    pub payload: Value,
}

impl RawEnvelope {
    /// Resolve the tolerant wire shape into the internal one
    ///
    /// Returns `None` when the body carries neither a success flag nor a
    /// code, i.e. it is not an envelope under either convention.
    pub fn normalize(self) -> Option<Envelope> {
        if self.success.is_none() && self.code.is_none() {
            return None;
        }

        let ok = match self.success {
            Some(flag) => flag,
            None => self.code == Some(business_code::SUCCESS),
        };
        let code = self
            .code
            .unwrap_or(if ok { business_code::SUCCESS } else { -1 });
        let message = self.message.unwrap_or_else(|| {
            if ok {
                "ok".to_string()
            } else {
                "request failed".to_string()
            }
        });
        // jeecg puts the payload in `result`; the generic convention in `data`
        let payload = self.result.or(self.data).unwrap_or(Value::Null);

        Some(Envelope {
            ok,
            code,
            message,
            payload,
        })
    }
}

/// Parse and normalize a response body in one step
pub fn normalize_body(body: Value) -> Option<Envelope> {
    serde_json::from_value::<RawEnvelope>(body)
        .ok()
        .and_then(RawEnvelope::normalize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_jeecg_convention() {
        let envelope = normalize_body(json!({
            "success": true,
            "code": 200,
            "message": "ok",
            "result": {"id": 1, "title": "Roof repair"},
            "timestamp": 1717000000000u64
        }))
        .unwrap();

        assert!(envelope.ok);
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.payload["title"], "Roof repair");
    }

    #[test]
    fn test_normalize_generic_convention() {
        let envelope = normalize_body(json!({
            "code": 200,
            "message": "ok",
            "data": [1, 2, 3]
        }))
        .unwrap();

        assert!(envelope.ok);
        assert_eq!(envelope.payload, json!([1, 2, 3]));
    }

    #[test]
    fn test_result_preferred_over_data() {
        let envelope = normalize_body(json!({
            "success": true,
            "result": "primary",
            "data": "secondary"
        }))
        .unwrap();

        assert_eq!(envelope.payload, json!("primary"));
    }

    #[test]
    fn test_failure_keeps_server_code_and_message() {
        let envelope = normalize_body(json!({
            "success": false,
            "code": 400,
            "message": "phone number is malformed"
        }))
        .unwrap();

        assert!(!envelope.ok);
        assert_eq!(envelope.code, 400);
        assert_eq!(envelope.message, "phone number is malformed");
        assert_eq!(envelope.payload, Value::Null);
    }

    #[test]
    fn test_success_flag_wins_over_code() {
        // some endpoints report success=false with code 200 on partial errors
        let envelope = normalize_body(json!({
            "success": false,
            "code": 200,
            "message": "partial failure"
        }))
        .unwrap();

        assert!(!envelope.ok);
    }

    #[test]
    fn test_unrecognized_shape_is_rejected() {
        assert!(normalize_body(json!({"unrelated": true})).is_none());
        assert!(normalize_body(json!("plain string")).is_none());
        assert!(normalize_body(json!([1, 2])).is_none());
    }
}
