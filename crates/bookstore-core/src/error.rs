//! Error types shared by the domain and its repositories.

use thiserror::Error;

/// A request the domain refuses, e.g. an order line with quantity zero.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Storage failures, independent of the database driver.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database unreachable: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    /// No row with the requested id.
    #[error("row not found")]
    NotFound,

    /// A unique index rejected the write.
    #[error("constraint violated: {0}")]
    Constraint(String),
}
