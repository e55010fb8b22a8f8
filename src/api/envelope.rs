//! Response envelope decoding
//!
//! Every endpoint answers with `{success, message?, ...payload}`. The payload
//! fields are only present on success, so the body is first read as a JSON
//! object and the payload is decoded afterwards.

use super::error::ApiError;
use crate::types::{OperationLog, OperationRecord, Statistics, Student};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Result of a request that reached the server and returned an envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success { message: Option<String>, payload: T },
    Failure { message: Option<String> },
}

#[cfg(test)]
impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success { message, .. } | Outcome::Failure { message } => message.as_deref(),
        }
    }
}

/// Decode a response body into an outcome carrying payload `T`
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<Outcome<T>, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    let Value::Object(mut fields) = value else {
        return Err(ApiError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    };

    let success = fields
        .remove("success")
        .and_then(|v| v.as_bool())
        .ok_or_else(|| ApiError::InvalidResponse("missing `success` flag".to_string()))?;

    let message = match fields.remove("message") {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    if !success {
        return Ok(Outcome::Failure { message });
    }

    let payload = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::UnexpectedPayload(e.to_string()))?;

    Ok(Outcome::Success { message, payload })
}

/// Payload of envelopes that only carry a message
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ack {}

#[derive(Debug, PartialEq, Deserialize)]
pub(crate) struct StudentsPayload {
    pub students: Vec<Student>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub(crate) struct StudentPayload {
    pub student: Student,
}

#[derive(Debug, PartialEq, Deserialize)]
pub(crate) struct StatisticsPayload {
    pub statistics: Statistics,
}

/// `/stack` and `/queue` answer with the same shape under different keys
#[derive(Debug, PartialEq)]
pub(crate) struct OperationLogPayload(pub OperationLog);

impl<'de> Deserialize<'de> for OperationLogPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut fields: Map<String, Value> = Map::deserialize(deserializer)?;

        let records = fields
            .remove("stack")
            .or_else(|| fields.remove("queue"))
            .ok_or_else(|| <D::Error as serde::de::Error>::missing_field("stack"))?;
        let records: Vec<OperationRecord> =
            serde_json::from_value(records).map_err(<D::Error as serde::de::Error>::custom)?;

        let size = fields
            .get("size")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(records.len());

        Ok(OperationLogPayload(OperationLog { records, size }))
    }
}
