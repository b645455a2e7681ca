use async_trait::async_trait;

use crate::auth::errors::AuthFailure;
use crate::auth::models::Credentials;
use crate::auth::models::IssuedToken;
use crate::user::models::User;

/// Port for the login and bearer-token flow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials and mint a token for the matching account.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `StoreUnavailable` - Credential store failed or timed out
    /// * `TokenIssuance` - Signing failed
    async fn login(&self, credentials: Credentials) -> Result<(User, IssuedToken), AuthFailure>;

    /// Resolve the account behind an `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingToken` - Header absent or not `Bearer <token>`
    /// * `InvalidToken` - Signature, encoding or claims rejected
    /// * `Expired` - Token is past its expiry
    /// * `UnknownSubject` - Account no longer exists
    /// * `StoreUnavailable` - Credential store failed or timed out
    async fn authorize(&self, authorization: Option<&str>) -> Result<User, AuthFailure>;
}
