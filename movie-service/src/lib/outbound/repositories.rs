pub mod memory;
pub mod movie;
pub mod user;

pub use memory::InMemoryMovieRepository;
pub use memory::InMemoryUserRepository;
pub use movie::PostgresMovieRepository;
pub use user::PostgresUserRepository;
