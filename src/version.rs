//! API protocol generations
//!
//! The remote CRM service exposes two incompatible protocol generations that
//! share one logical shape: modules of records, page-numbered result sets,
//! and a coded error envelope. `ApiVersion` selects the concrete envelope
//! layout, the page-size limits, and the error-classification table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol generation of the remote CRM API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Legacy generation (nested `response` envelope, ticket-based wording)
    V1,
    /// Current generation (flat `data` envelope)
    #[default]
    V2,
}

impl ApiVersion {
    /// Page-size limits for this generation
    pub fn limits(self) -> PageLimits {
        // Both generations cap a page at 200 records; the ceiling is part of
        // the wire contract, not a client tunable.
        match self {
            ApiVersion::V1 | ApiVersion::V2 => PageLimits {
                max_per_page: 200,
                default_per_page: 200,
            },
        }
    }

    /// Response envelope layout for this generation
    pub fn layout(self) -> &'static ResponseLayout {
        match self {
            ApiVersion::V1 => &V1_LAYOUT,
            ApiVersion::V2 => &V2_LAYOUT,
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "v1"),
            ApiVersion::V2 => write!(f, "v2"),
        }
    }
}

/// Pagination limits enforced at query-build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Largest accepted `per_page` value
    pub max_per_page: u32,
    /// `per_page` applied when the caller sets none
    pub default_per_page: u32,
}

/// Dotted paths into a generation's response envelope
///
/// Only the fields pagination and classification need: where the record
/// array lives, where the server-reported total count lives (absent in
/// responses that do not report one), and where a failure envelope carries
/// its code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLayout {
    /// Path to the record array
    pub records_path: &'static str,
    /// Path to the server-reported total count, when the generation has one
    pub count_path: &'static str,
    /// Path to the error code in a failure envelope
    pub error_code_path: &'static str,
    /// Path to the error message in a failure envelope
    pub error_message_path: &'static str,
}

static V1_LAYOUT: ResponseLayout = ResponseLayout {
    records_path: "response.result.rows",
    count_path: "response.result.count",
    error_code_path: "response.error.code",
    error_message_path: "response.error.message",
};

static V2_LAYOUT: ResponseLayout = ResponseLayout {
    records_path: "data",
    count_path: "info.count",
    error_code_path: "code",
    error_message_path: "message",
};

impl ResponseLayout {
    /// Extract the error (code, message) pair from a failure envelope
    pub fn error_envelope(&self, body: &Value) -> Option<(String, String)> {
        let code = lookup_path(body, self.error_code_path)?;
        let code = match code {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let message = lookup_path(body, self.error_message_path)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some((code, message))
    }

    /// Extract the record array from a success envelope
    pub fn records<'a>(&self, body: &'a Value) -> Option<&'a Vec<Value>> {
        lookup_path(body, self.records_path).and_then(Value::as_array)
    }

    /// Extract the server-reported total count, when present
    pub fn total_count(&self, body: &Value) -> Option<u64> {
        lookup_path(body, self.count_path).and_then(Value::as_u64)
    }
}

/// Walk a dotted path through nested JSON objects
fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
