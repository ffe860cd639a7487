//! # Bookstore Core
//!
//! The domain layer shared by the gateway and the backend services.
//! Entities, validation rules and the ports infrastructure must implement.
//! No database, HTTP or framework dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
