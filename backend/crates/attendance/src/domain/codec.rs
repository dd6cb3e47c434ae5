//! Token Codec
//!
//! Wire format: `{"classId":"CS301","issuedAt":1700000000000,"expiresAt":1700000015000}`.
//! Decoding is structural only; expiry is judged by the validation engine.

use kernel::TimestampMs;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::entities::TokenPayload;
use crate::domain::value_objects::ClassId;

/// Default display horizon recorded in `expiresAt`
pub const EXPIRY_HORIZON_MS: i64 = 15_000;

/// Older codes carry the issuance time under this name
const LEGACY_ISSUED_AT: &str = "timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid QR code format")]
    Malformed,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload<'a> {
    class_id: &'a str,
    issued_at: TimestampMs,
    expires_at: TimestampMs,
}

/// Encodes and decodes token payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCodec {
    expiry_horizon_ms: i64,
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new(EXPIRY_HORIZON_MS)
    }
}

impl TokenCodec {
    pub const fn new(expiry_horizon_ms: i64) -> Self {
        Self { expiry_horizon_ms }
    }

    pub const fn expiry_horizon_ms(&self) -> i64 {
        self.expiry_horizon_ms
    }

    pub fn encode(&self, class_id: ClassId, now_ms: TimestampMs) -> TokenPayload {
        TokenPayload::new(class_id, now_ms, self.expiry_horizon_ms)
    }

    pub fn to_wire(&self, payload: &TokenPayload) -> serde_json::Result<String> {
        serde_json::to_string(&WirePayload {
            class_id: payload.class_id.as_str(),
            issued_at: payload.issued_at_ms,
            expires_at: payload.expires_at_ms,
        })
    }

    /// Parse raw scanned text. Never panics; anything that is not a
    /// well-formed token is `Malformed`.
    pub fn decode(&self, raw: &str) -> Result<TokenPayload, DecodeError> {
        let value: Value = serde_json::from_str(raw).map_err(|_| DecodeError::Malformed)?;
        let fields = value.as_object().ok_or(DecodeError::Malformed)?;

        let class_id = fields
            .get("classId")
            .and_then(Value::as_str)
            .and_then(|s| ClassId::from_scanned(s).ok())
            .ok_or(DecodeError::Malformed)?;

        let issued_at_ms = Self::issued_at(fields)?;

        let expires_at_ms = match fields.get("expiresAt") {
            None | Some(Value::Null) => issued_at_ms.saturating_add(self.expiry_horizon_ms),
            Some(v) => v.as_i64().ok_or(DecodeError::Malformed)?,
        };

        Ok(TokenPayload {
            class_id,
            issued_at_ms,
            expires_at_ms,
        })
    }

    fn issued_at(fields: &Map<String, Value>) -> Result<TimestampMs, DecodeError> {
        fields
            .get("issuedAt")
            .or_else(|| fields.get(LEGACY_ISSUED_AT))
            .and_then(Value::as_i64)
            .filter(|ts| *ts > 0)
            .ok_or(DecodeError::Malformed)
    }
}
