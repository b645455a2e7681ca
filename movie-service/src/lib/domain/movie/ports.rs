use async_trait::async_trait;

use crate::movie::errors::MovieError;
use crate::movie::models::Director;
use crate::movie::models::Genre;
use crate::movie::models::Movie;
use crate::movie::models::MovieId;

/// Port for read-only catalog operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    /// List every movie in the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    /// Retrieve a movie by exact title.
    ///
    /// # Errors
    /// * `NotFound` - No movie with this title
    /// * `DatabaseError` - Database operation failed
    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, MovieError>;

    /// Retrieve a genre by name.
    ///
    /// # Errors
    /// * `GenreNotFound` - No movie carries this genre
    /// * `DatabaseError` - Database operation failed
    async fn get_genre(&self, name: &str) -> Result<Genre, MovieError>;

    /// Retrieve a director by name.
    ///
    /// # Errors
    /// * `DirectorNotFound` - No movie is directed by this name
    /// * `DatabaseError` - Database operation failed
    async fn get_director(&self, name: &str) -> Result<Director, MovieError>;
}

/// Persistence operations for the movie catalog.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    /// Retrieve all movies, ordered by title.
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError>;

    /// Retrieve movie by identifier (None if not found).
    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError>;

    /// Retrieve movie by exact title (None if not found).
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError>;

    /// Retrieve the genre of the first movie with this genre name.
    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError>;

    /// Retrieve the director of the first movie with this director name.
    async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError>;
}
