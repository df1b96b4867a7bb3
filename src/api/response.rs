//! Decoding of the main goals response
//!
//! Wire shape:
//!
//! ```text
//! {
//!   "<pod name>": {
//!     "<CRM field name>": { "name": "<label>", "value": true | false | "..." | null },
//!     ...
//!   },
//!   ...
//! }
//! ```
//!
//! Only fields the classifier gives a role are decoded as records; any other
//! field is skipped without looking at its value.
//!
//! Key order matters (it becomes outcome/task order), so decoding walks the
//! order-preserving `serde_json::Map` instead of collecting into a hash map.

use serde_json::Value;
use crate::api::ApiError;
use log::debug;
use crate::models::{RawFieldRecord, RawPodFields, RawResponse};
use crate::normalize::{classify, FieldRole};

pub fn decode_response(body: &str) -> Result<RawResponse, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<RawResponse, ApiError> {
    let pods = match value {
        Value::Object(pods) => pods,
        other => {
            return Err(ApiError::Decode(format!(
                "expected an object keyed by pod name, got {}",
                kind(&other)
            )))
        }
    };

    let mut response = RawResponse::with_capacity(pods.len());
    for (pod_name, fields) in pods {
        let fields = match fields {
            Value::Object(fields) => fields,
            other => {
                return Err(ApiError::Decode(format!(
                    "pod '{}': expected an object of fields, got {}",
                    pod_name,
                    kind(&other)
                )))
            }
        };
        let mut pod_fields = RawPodFields::with_capacity(fields.len());
        for (field_name, record) in fields {
            // Ignored fields (Id, Name, roll-ups) may hold any JSON value
            if classify(&field_name) == FieldRole::Ignored {
                debug!("Skipping ignored field {} in pod {}", field_name, pod_name);
                continue;
            }
            let record: RawFieldRecord = serde_json::from_value(record).map_err(|e| {
                ApiError::Decode(format!("pod '{}', field '{}': {}", pod_name, field_name, e))
            })?;
            pod_fields.push((field_name, record));
        }
        response.push((pod_name, pod_fields));
    }
    Ok(response)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
