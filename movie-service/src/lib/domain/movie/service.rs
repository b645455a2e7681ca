use std::sync::Arc;

use async_trait::async_trait;

use crate::movie::errors::MovieError;
use crate::movie::models::Director;
use crate::movie::models::Genre;
use crate::movie::models::Movie;
use crate::movie::ports::MovieRepository;
use crate::movie::ports::MovieServicePort;

/// Domain service implementation for catalog lookups.
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        self.repository.list_all().await
    }

    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, MovieError> {
        self.repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| MovieError::NotFound(title.to_string()))
    }

    async fn get_genre(&self, name: &str) -> Result<Genre, MovieError> {
        self.repository
            .find_genre(name)
            .await?
            .ok_or_else(|| MovieError::GenreNotFound(name.to_string()))
    }

    async fn get_director(&self, name: &str) -> Result<Director, MovieError> {
        self.repository
            .find_director(name)
            .await?
            .ok_or_else(|| MovieError::DirectorNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::movie::models::MovieId;

    mock! {
        pub TestMovieRepository {}

        #[async_trait]
        impl MovieRepository for TestMovieRepository {
            async fn list_all(&self) -> Result<Vec<Movie>, MovieError>;
            async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError>;
            async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError>;
            async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError>;
            async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError>;
        }
    }

    fn heat() -> Movie {
        Movie {
            id: MovieId::new(),
            title: "Heat".to_string(),
            description: "A group of professional bank robbers.".to_string(),
            genre: Genre {
                name: "Crime".to_string(),
                description: "Stories about criminals.".to_string(),
            },
            director: Director {
                name: "Michael Mann".to_string(),
                bio: "American director.".to_string(),
                birth: chrono::NaiveDate::from_ymd_opt(1943, 2, 5),
                death: None,
            },
            image_path: None,
            featured: true,
        }
    }

    #[tokio::test]
    async fn test_get_movie_by_title_success() {
        let mut repository = MockTestMovieRepository::new();
        let movie = heat();
        let returned = movie.clone();

        repository
            .expect_find_by_title()
            .withf(|title| title == "Heat")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = MovieService::new(Arc::new(repository));

        assert_eq!(service.get_movie_by_title("Heat").await.unwrap(), movie);
    }

    #[tokio::test]
    async fn test_get_movie_by_title_not_found() {
        let mut repository = MockTestMovieRepository::new();
        repository
            .expect_find_by_title()
            .times(1)
            .returning(|_| Ok(None));

        let service = MovieService::new(Arc::new(repository));
        let result = service.get_movie_by_title("Nope").await;

        assert!(matches!(result, Err(MovieError::NotFound(title)) if title == "Nope"));
    }

    #[tokio::test]
    async fn test_get_genre_and_director() {
        let mut repository = MockTestMovieRepository::new();
        let movie = heat();
        let genre = movie.genre.clone();
        let director = movie.director.clone();

        repository
            .expect_find_genre()
            .times(1)
            .returning(move |_| Ok(Some(genre.clone())));
        repository
            .expect_find_director()
            .times(1)
            .returning(move |_| Ok(Some(director.clone())));

        let service = MovieService::new(Arc::new(repository));

        assert_eq!(service.get_genre("Crime").await.unwrap(), movie.genre);
        assert_eq!(
            service.get_director("Michael Mann").await.unwrap(),
            movie.director
        );
    }

    #[tokio::test]
    async fn test_missing_genre_and_director() {
        let mut repository = MockTestMovieRepository::new();
        repository.expect_find_genre().returning(|_| Ok(None));
        repository.expect_find_director().returning(|_| Ok(None));

        let service = MovieService::new(Arc::new(repository));

        assert!(matches!(
            service.get_genre("Opera").await,
            Err(MovieError::GenreNotFound(_))
        ));
        assert!(matches!(
            service.get_director("Nobody").await,
            Err(MovieError::DirectorNotFound(_))
        ));
    }
}
