#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use auth::ManualClock;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use movie_service::domain::auth::models::AuthConfig;
use movie_service::domain::auth::service::AuthService;
use movie_service::domain::movie::models::Director;
use movie_service::domain::movie::models::Genre;
use movie_service::domain::movie::models::Movie;
use movie_service::domain::movie::models::MovieId;
use movie_service::domain::movie::service::MovieService;
use movie_service::domain::user::service::UserService;
use movie_service::inbound::http::router::create_router;
use movie_service::inbound::http::router::RouterOptions;
use movie_service::outbound::repositories::InMemoryMovieRepository;
use movie_service::outbound::repositories::InMemoryUserRepository;
use reqwest::StatusCode;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub movies: Arc<InMemoryMovieRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let users = Arc::new(InMemoryUserRepository::new());
        let movies = Arc::new(InMemoryMovieRepository::new());

        let router = create_router(
            Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&movies))),
            Arc::new(MovieService::new(Arc::clone(&movies))),
            Arc::new(AuthService::new(
                users,
                Arc::clone(&clock) as Arc<dyn auth::Clock>,
                AuthConfig::new(TEST_SECRET),
            )),
            RouterOptions {
                allowed_origins: vec!["http://localhost:1234".to_string()],
                static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
            },
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            movies,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register an account with the shared test password.
    pub async fn register(&self, username: &str) -> serde_json::Value {
        let response = self
            .post("/users")
            .json(&json!({
                "username": username,
                "pwd": PASSWORD,
                "email": format!("{}@example.com", username),
                "birth_date": "1990-04-12"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "username": username, "pwd": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }

    /// Register and log in, returning the token.
    pub async fn register_and_login(&self, username: &str) -> String {
        self.register(username).await;
        self.login(username, PASSWORD).await
    }

    /// Add a movie directly to the catalog.
    pub async fn seed_movie(&self, title: &str, genre: &str, director: &str) -> Movie {
        let movie = Movie {
            id: MovieId::new(),
            title: title.to_string(),
            description: format!("{} description", title),
            genre: Genre {
                name: genre.to_string(),
                description: format!("{} stories", genre),
            },
            director: Director {
                name: director.to_string(),
                bio: format!("{} biography", director),
                birth: NaiveDate::from_ymd_opt(1950, 1, 1),
                death: None,
            },
            image_path: None,
            featured: false,
        };

        self.movies.insert(movie.clone()).await;
        movie
    }
}
