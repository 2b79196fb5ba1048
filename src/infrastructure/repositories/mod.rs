// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;

pub(crate) use error::map_sqlx;
pub use postgres_article::PostgresArticleRepository;
