use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::movie::models::MovieId;
use crate::movie::ports::MovieRepository;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::models::CreateUserCommand;
use crate::user::models::Password;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::models::Username;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    repository: Arc<UR>,
    movies: Arc<MR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, MR> UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `movies` - Catalog used to check favorites exist
    pub fn new(repository: Arc<UR>, movies: Arc<MR>) -> Self {
        Self {
            repository,
            movies,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash(&self, password: &Password) -> Result<String, UserError> {
        self.password_hasher
            .hash(password.expose())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()).into())
    }

    async fn require(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    /// Fail if `username` or `email` already belongs to an account other
    /// than `owner`.
    async fn ensure_available(
        &self,
        username: &Username,
        email: &str,
        owner: Option<UserId>,
    ) -> Result<(), UserError> {
        if let Some(existing) = self.repository.find_by_username(username).await? {
            if Some(existing.id) != owner {
                return Err(UserError::UsernameAlreadyExists(username.to_string()));
            }
        }

        if let Some(existing) = self.repository.find_by_email(email).await? {
            if Some(existing.id) != owner {
                return Err(UserError::EmailAlreadyExists(email.to_string()));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<UR, MR> UserServicePort for UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_available(&command.username, command.email.as_str(), None)
            .await?;

        let user = User {
            id: UserId::new(),
            password_hash: self.hash(&command.password)?,
            username: command.username,
            email: command.email,
            birth_date: command.birth_date,
            favorite_movies: BTreeSet::new(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.require(username).await
    }

    async fn update_user(
        &self,
        username: &Username,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.require(username).await?;

        self.ensure_available(&command.username, command.email.as_str(), Some(user.id))
            .await?;

        user.password_hash = self.hash(&command.password)?;
        user.username = command.username;
        user.email = command.email;
        user.birth_date = command.birth_date;

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn add_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<User, UserError> {
        let user = self.require(username).await?;

        self.movies
            .find_by_id(movie_id)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .ok_or_else(|| UserError::MovieNotFound(movie_id.to_string()))?;

        self.repository.add_favorite(&user.id, movie_id).await
    }

    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<User, UserError> {
        let user = self.require(username).await?;
        self.repository.remove_favorite(&user.id, movie_id).await
    }

    async fn delete_user(&self, username: &Username) -> Result<(), UserError> {
        let user = self.require(username).await?;
        self.repository.delete(&user.id).await?;

        tracing::info!(user_id = %user.id, "User deleted");
        Ok(())
    }
}
