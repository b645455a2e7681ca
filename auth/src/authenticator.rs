use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Password hashing and token signing behind one process-wide key.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create an authenticator signing with `jwt_secret`.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// # Errors
    /// * `PasswordError` - The digest could not be parsed or recomputed
    pub fn verify_password(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, digest)
    }

    /// Sign claims into a bearer token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Verify a bearer token's signature, then its expiry at `now`.
    ///
    /// The signature is checked first, so a tampered token is reported as
    /// such even when it is also past its expiry.
    ///
    /// # Errors
    /// * `InvalidSignature` / `Malformed` - Not produced by this key
    /// * `MissingClaim("exp")` - Token carries no expiry
    /// * `TokenExpired` - `now` is after `exp`
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp"));
        }

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_password_round_trip() {
        let authenticator = Authenticator::new(SECRET);
        let digest = authenticator.hash_password("my_password").unwrap();

        assert!(authenticator.verify_password("my_password", &digest).unwrap());
        assert!(!authenticator.verify_password("not_my_password", &digest).unwrap());
    }

    #[test]
    fn test_validate_within_lifetime() {
        let authenticator = Authenticator::new(SECRET);
        let claims = Claims::for_subject("alice", issued_at(), Duration::days(7));
        let token = authenticator.generate_token(&claims).unwrap();

        let at_issue = authenticator.validate_token(&token, issued_at()).unwrap();
        assert_eq!(at_issue, claims);

        let at_expiry = authenticator.validate_token(&token, issued_at() + Duration::days(7));
        assert!(at_expiry.is_ok());
    }

    #[test]
    fn test_validate_after_lifetime() {
        let authenticator = Authenticator::new(SECRET);
        let claims = Claims::for_subject("alice", issued_at(), Duration::days(7));
        let token = authenticator.generate_token(&claims).unwrap();

        let later = issued_at() + Duration::days(7) + Duration::seconds(1);
        assert_eq!(
            authenticator.validate_token(&token, later),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_validate_just_past_expiry() {
        let authenticator = Authenticator::new(SECRET);
        let claims = Claims::for_subject("alice", issued_at(), Duration::days(7));
        let token = authenticator.generate_token(&claims).unwrap();

        let just_after = issued_at() + Duration::days(7) + Duration::milliseconds(1);
        assert_eq!(
            authenticator.validate_token(&token, just_after),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_validate_requires_expiry() {
        let authenticator = Authenticator::new(SECRET);
        let token = authenticator
            .generate_token(&Claims::new().with_extra("uid", "1"))
            .unwrap();

        assert_eq!(
            authenticator.validate_token(&token, issued_at()),
            Err(JwtError::MissingClaim("exp"))
        );
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let signer = Authenticator::new(b"another_secret_key_at_least_32_bytes");
        let verifier = Authenticator::new(SECRET);
        let claims = Claims::for_subject("alice", issued_at(), Duration::days(7));
        let token = signer.generate_token(&claims).unwrap();

        let much_later = issued_at() + Duration::days(365);
        assert_eq!(
            verifier.validate_token(&token, much_later),
            Err(JwtError::InvalidSignature)
        );
    }
}
