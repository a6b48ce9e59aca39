//! Infrastructure layer: storage and network implementations of the domain
//! traits.

pub mod repository;
pub mod transport;
