use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// Every field is optional on the wire so that a token missing a claim still
/// decodes and can be rejected with a precise `MissingClaim` error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identity key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Coarse permission class of the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build claims for an access token.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is issued to
    /// * `role` - Role of the subject at issuance
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime; expiry is fixed at `issued_at + ttl`
    pub fn issue(
        subject: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: Some(subject.to_string()),
            role: Some(role.to_string()),
            iat: Some(issued_at.timestamp()),
            exp: Some((issued_at + ttl).timestamp()),
        }
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_role(mut self, role: impl ToString) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// A token is expired at and after its `exp` instant.
    ///
    /// Tokens without `exp` count as expired: the validity window must be
    /// fixed at issuance.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= current_timestamp)
    }
}
