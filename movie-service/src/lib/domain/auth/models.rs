use std::fmt;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

/// Custom claim carrying the account id; `sub` carries the username.
pub const USER_ID_CLAIM: &str = "uid";

pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2_000;

/// Well-formed Argon2id digest that matches no password, verified against
/// when the username is unknown.
pub(crate) const UNMATCHABLE_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Startup configuration of the authentication components.
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key.
    pub secret: String,
    pub token_lifetime: chrono::Duration,
    /// Upper bound on each credential store lookup.
    pub lookup_timeout: Duration,
}

impl AuthConfig {
    /// Configuration with the default 7 day lifetime and lookup timeout.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_lifetime: chrono::Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS),
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
        }
    }

    pub fn with_token_lifetime(mut self, lifetime: chrono::Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"**redacted**")
            .field("token_lifetime", &self.token_lifetime)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

/// Username and plaintext password of a login attempt.
///
/// Lives for one verification call; `Debug` hides the password.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Signed bearer token handed to the client at login.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"**redacted**")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = AuthConfig::new("an-example-signing-secret-of-32-bytes");
        let credentials = Credentials::new("alice", "hunter22");

        assert!(!format!("{:?}", config).contains("an-example-signing-secret"));
        assert!(!format!("{:?}", credentials).contains("hunter22"));
        assert!(format!("{:?}", credentials).contains("alice"));
    }

    #[test]
    fn test_unmatchable_digest_is_well_formed() {
        let hasher = auth::PasswordHasher::new();

        assert!(matches!(
            hasher.verify("anything", UNMATCHABLE_DIGEST),
            Ok(false)
        ));
    }
}
