use thiserror::Error;

/// Failure of a login or of a protected request's token check.
///
/// Every kind is terminal for the current request. Display strings are
/// safe to show to clients; diagnostic detail goes to the log instead.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthFailure {
    /// Unknown username or wrong password (deliberately indistinguishable).
    #[error("Incorrect username or password.")]
    InvalidCredentials,

    #[error("Authorization header with a bearer token is required")]
    MissingToken,

    /// Bad signature, wrong algorithm, broken encoding or missing claims.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    Expired,

    /// Token is genuine but its account no longer exists.
    #[error("Token subject no longer exists")]
    UnknownSubject,

    /// Credential store errored or did not answer in time.
    #[error("Credential store is unavailable")]
    StoreUnavailable,

    #[error("Token could not be issued")]
    TokenIssuance,
}

impl AuthFailure {
    /// Only a store outage is worth retrying at the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthFailure::StoreUnavailable)
    }

    /// Stable machine-readable tag for the failure kind.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "invalid_credentials",
            AuthFailure::MissingToken => "missing_token",
            AuthFailure::InvalidToken => "invalid_token",
            AuthFailure::Expired => "expired",
            AuthFailure::UnknownSubject => "unknown_subject",
            AuthFailure::StoreUnavailable => "store_unavailable",
            AuthFailure::TokenIssuance => "token_issuance",
        }
    }
}
