//! Authentication primitives
//!
//! Store-agnostic building blocks for the login and bearer-token flow:
//! - Password hashing (Argon2id)
//! - JWT signing and verification (HS256, single static key)
//! - An injectable [`Clock`] so expiry is decided by the caller's notion of time
//!
//! User lookup, failure taxonomy and HTTP mapping belong to the service that
//! uses these pieces.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! ```
//!
//! ## Issue and validate a token
//! ```
//! use auth::{Authenticator, Claims, Clock, SystemClock};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let now = SystemClock.now();
//!
//! let claims = Claims::for_subject("alice", now, Duration::days(7));
//! let token = auth.generate_token(&claims).unwrap();
//!
//! let decoded = auth.validate_token(&token, now).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice"));
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
