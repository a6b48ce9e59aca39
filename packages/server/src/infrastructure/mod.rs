//! Infrastructure layer: storage and HTTP DTOs.

pub mod dto;
pub mod repository;
