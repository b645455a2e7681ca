use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::movie::errors::MovieError;

const MOVIE_COLUMNS: &str = "id, title, description, genre_name, genre_description, \
     director_name, director_bio, director_birth, director_death, image_path, featured";

/// Movies are stored flat, with genre and director embedded as columns.
#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre_name: String,
    genre_description: String,
    director_name: String,
    director_bio: String,
    director_birth: Option<NaiveDate>,
    director_death: Option<NaiveDate>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: MovieId(row.id),
            title: row.title,
            description: row.description,
            genre: Genre {
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                name: row.director_name,
                bio: row.director_bio,
                birth: row.director_birth,
                death: row.director_death,
            },
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

fn database_error(e: sqlx::Error) -> MovieError {
    MovieError::DatabaseError(e.to_string())
}

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// First movie (by title) whose `column` equals `value`.
    async fn first_where(&self, column: &str, value: &str) -> Result<Option<Movie>, MovieError> {
        let sql =
            format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE {column} = $1 ORDER BY title LIMIT 1");

        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Movie::from))
            .map_err(database_error)
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title");

        sqlx::query_as::<_, MovieRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Movie::from).collect())
            .map_err(database_error)
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");

        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Movie::from))
            .map_err(database_error)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        self.first_where("title", title).await
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError> {
        Ok(self
            .first_where("genre_name", name)
            .await?
            .map(|movie| movie.genre))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError> {
        Ok(self
            .first_where("director_name", name)
            .await?
            .map(|movie| movie.director))
    }
}
