//! Infrastructure layer.
//!
//! Wire-format DTOs and concrete repository implementations. Nothing in
//! here contains business rules; those live in the domain and usecase
//! layers.

pub mod dto;
pub mod repository;
