use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::movie::errors::MovieError;
use crate::user::errors::UserError;

/// Process-local user store with the same uniqueness rules as Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(users: &HashMap<UserId, User>, user: &User) -> Result<(), UserError> {
        for other in users.values().filter(|other| other.id != user.id) {
            if other.username == user.username {
                return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
            }
            if other.email == user.email {
                return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, &user)?;

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, &user)?;

        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        stored.username = user.username;
        stored.email = user.email;
        stored.password_hash = user.password_hash;
        stored.birth_date = user.birth_date;

        Ok(stored.clone())
    }

    async fn add_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.favorite_movies.insert(*movie_id);
        Ok(user.clone())
    }

    async fn remove_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.favorite_movies.remove(movie_id);
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

/// Process-local catalog, filled with [`InMemoryMovieRepository::insert`].
#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    pub async fn insert(&self, movie: Movie) {
        self.movies.write().await.push(movie);
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|movie| &movie.id == id)
            .cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|movie| movie.title == title)
            .cloned())
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|movie| movie.genre.name == name)
            .map(|movie| movie.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|movie| movie.director.name == name)
            .map(|movie| movie.director.clone()))
    }
}
