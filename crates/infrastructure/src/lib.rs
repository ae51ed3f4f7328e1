//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_user_repository;
mod postgres_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_user_repository::PostgresUserRepository;
