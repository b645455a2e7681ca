use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by a bearer token.
///
/// Registered claims are optional so a decoded token can be inspected
/// before deciding which of them are required. Service-specific claims
/// live in `extra` and are flattened into the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a subject, valid from `issued_at` for `lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Value of the `sub` claim
    /// * `issued_at` - Issuance instant (sub-second precision is dropped)
    /// * `lifetime` - Validity window; `exp = iat + lifetime`
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: Some(subject.to_string()),
            iat: Some(iat),
            exp: Some(iat + lifetime.num_seconds()),
            extra: HashMap::new(),
        }
    }

    /// Set the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Add a custom string claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.extra.insert(
            key.to_string(),
            serde_json::Value::String(value.to_string()),
        );
        self
    }

    /// Read a custom string claim.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }

    /// Whether the token is past its expiry at `now`.
    ///
    /// Compared at full precision: the expiry instant itself is still
    /// valid, any later instant is not. Claims without `exp` never report
    /// expired; callers that require expiry check presence.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp
            .map_or(false, |exp| (now.timestamp(), now.timestamp_subsec_nanos()) > (exp, 0))
    }
}
