//! Application services and ports.

#![forbid(unsafe_code)]

mod user_dto;
mod user_service;

pub use user_dto::UserDto;
pub use user_service::{CreateUserParams, UpdateUserParams, UserRepository, UserService};
