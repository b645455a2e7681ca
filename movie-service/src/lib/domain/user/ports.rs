use async_trait::async_trait;

use crate::movie::models::MovieId;
use crate::user::errors::UserError;
use crate::user::models::CreateUserCommand;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, password and birth date
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Replace the editable fields of an account.
    ///
    /// # Arguments
    /// * `username` - Current username of the account
    /// * `command` - New username, email, password and birth date
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username belongs to another account
    /// * `EmailAlreadyExists` - New email belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        username: &Username,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Add a movie to the user's favorites (no-op if already present).
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `MovieNotFound` - Movie does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_favorite(&self, username: &Username, movie_id: &MovieId)
        -> Result<User, UserError>;

    /// Remove a movie from the user's favorites (no-op if absent).
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<User, UserError>;

    /// Delete an account.
    ///
    /// Outstanding tokens for the account stop resolving from this point on.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, username: &Username) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Doubles as the credential store of the authentication flow, which only
/// uses `find_by_username` and `find_by_id`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier (None if not found).
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact username (None if not found).
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (None if not found).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Overwrite username, email, password hash and birth date.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Add a favorite with set semantics and return the updated user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn add_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<User, UserError>;

    /// Remove a favorite and return the updated user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn remove_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
