use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::Clock;
use auth::JwtError;
use chrono::SubsecRound;

use crate::auth::errors::AuthFailure;
use crate::auth::models::AuthConfig;
use crate::auth::models::Credentials;
use crate::auth::models::IssuedToken;
use crate::auth::models::UNMATCHABLE_DIGEST;
use crate::auth::models::USER_ID_CLAIM;
use crate::auth::ports::AuthServicePort;
use crate::user::errors::UserError;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// Run one credential store lookup under `limit`.
///
/// A store error and a timeout both surface as `StoreUnavailable`.
async fn bounded_lookup<F>(limit: Duration, lookup: F) -> Result<Option<User>, AuthFailure>
where
    F: Future<Output = Result<Option<User>, UserError>>,
{
    match tokio::time::timeout(limit, lookup).await {
        Ok(Ok(user)) => Ok(user),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Credential store lookup failed");
            Err(AuthFailure::StoreUnavailable)
        }
        Err(_) => {
            tracing::error!(
                timeout_ms = limit.as_millis() as u64,
                "Credential store lookup timed out"
            );
            Err(AuthFailure::StoreUnavailable)
        }
    }
}

/// Username and password check against the credential store.
pub struct CredentialVerifier<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    lookup_timeout: Duration,
}

impl<UR> CredentialVerifier<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>, config: &AuthConfig) -> Self {
        Self {
            repository,
            authenticator,
            lookup_timeout: config.lookup_timeout,
        }
    }

    /// Resolve the account matching `credentials`.
    ///
    /// Unknown usernames and wrong passwords fail identically, and both
    /// cost one password hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account or wrong password
    /// * `StoreUnavailable` - Lookup failed or timed out
    pub async fn verify(&self, credentials: &Credentials) -> Result<User, AuthFailure> {
        let user = match Username::new(credentials.username.clone()) {
            Ok(username) => {
                bounded_lookup(
                    self.lookup_timeout,
                    self.repository.find_by_username(&username),
                )
                .await?
            }
            Err(_) => None,
        };

        let Some(user) = user else {
            let _ = self
                .authenticator
                .verify_password(&credentials.password, UNMATCHABLE_DIGEST);
            return Err(AuthFailure::InvalidCredentials);
        };

        match self
            .authenticator
            .verify_password(&credentials.password, &user.password_hash)
        {
            Ok(true) => Ok(user),
            Ok(false) => Err(AuthFailure::InvalidCredentials),
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    "Stored password digest could not be checked"
                );
                Err(AuthFailure::InvalidCredentials)
            }
        }
    }
}

/// Mints signed, time-limited bearer tokens.
pub struct TokenIssuer {
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
    token_lifetime: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(authenticator: Arc<Authenticator>, clock: Arc<dyn Clock>, config: &AuthConfig) -> Self {
        Self {
            authenticator,
            clock,
            token_lifetime: config.token_lifetime,
        }
    }

    /// Sign a token for `user`, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `TokenIssuance` - Signing failed
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AuthFailure> {
        let issued_at = self.clock.now().trunc_subsecs(0);
        let claims = Claims::for_subject(user.username.as_str(), issued_at, self.token_lifetime)
            .with_extra(USER_ID_CLAIM, user.id);

        let token = self.authenticator.generate_token(&claims).map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Token signing failed");
            AuthFailure::TokenIssuance
        })?;

        Ok(IssuedToken {
            token,
            expires_at: issued_at + self.token_lifetime,
        })
    }
}

/// Validates bearer tokens and resolves them to the current account.
pub struct TokenVerifier<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
    lookup_timeout: Duration,
}

impl<UR> TokenVerifier<UR>
where
    UR: UserRepository,
{
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            repository,
            authenticator,
            clock,
            lookup_timeout: config.lookup_timeout,
        }
    }

    /// Verify the token carried by an `Authorization` header value.
    pub async fn verify_authorization(
        &self,
        authorization: Option<&str>,
    ) -> Result<User, AuthFailure> {
        let token = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthFailure::MissingToken)?;

        self.verify_request_token(token).await
    }

    /// Verify a raw token and load its account with a fresh lookup.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, encoding or required claims rejected
    /// * `Expired` - Now is past `exp`
    /// * `UnknownSubject` - Account id no longer resolves
    /// * `StoreUnavailable` - Lookup failed or timed out
    pub async fn verify_request_token(&self, token: &str) -> Result<User, AuthFailure> {
        let claims = self
            .authenticator
            .validate_token(token, self.clock.now())
            .map_err(|e| match e {
                JwtError::TokenExpired => AuthFailure::Expired,
                other => {
                    tracing::debug!(error = %other, "Bearer token rejected");
                    AuthFailure::InvalidToken
                }
            })?;

        if claims.sub.is_none() {
            return Err(AuthFailure::InvalidToken);
        }

        let user_id = claims
            .extra_str(USER_ID_CLAIM)
            .and_then(|uid| UserId::from_string(uid).ok())
            .ok_or(AuthFailure::InvalidToken)?;

        bounded_lookup(self.lookup_timeout, self.repository.find_by_id(&user_id))
            .await?
            .ok_or_else(|| {
                tracing::info!(user_id = %user_id, "Token subject no longer exists");
                AuthFailure::UnknownSubject
            })
    }
}

/// Login and per-request authorization over one credential store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    credentials: CredentialVerifier<UR>,
    issuer: TokenIssuer,
    verifier: TokenVerifier<UR>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Wire the verifier, issuer and token verifier around one signing key.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `clock` - Time source for issuance and expiry checks
    /// * `config` - Signing secret, token lifetime and lookup timeout
    pub fn new(repository: Arc<UR>, clock: Arc<dyn Clock>, config: AuthConfig) -> Self {
        let authenticator = Arc::new(Authenticator::new(config.secret.as_bytes()));

        Self {
            credentials: CredentialVerifier::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
                &config,
            ),
            issuer: TokenIssuer::new(Arc::clone(&authenticator), Arc::clone(&clock), &config),
            verifier: TokenVerifier::new(repository, authenticator, clock, &config),
        }
    }

    pub fn credential_verifier(&self) -> &CredentialVerifier<UR> {
        &self.credentials
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn token_verifier(&self) -> &TokenVerifier<UR> {
        &self.verifier
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<(User, IssuedToken), AuthFailure> {
        let user = self.credentials.verify(&credentials).await.map_err(|e| {
            tracing::info!(reason = e.reason(), "Login rejected");
            e
        })?;

        let token = self.issuer.issue(&user)?;
        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok((user, token))
    }

    async fn authorize(&self, authorization: Option<&str>) -> Result<User, AuthFailure> {
        self.verifier.verify_authorization(authorization).await
    }
}
