//! # Bookstore Shared
//!
//! Wire types shared by the gateway, the backend services and any Rust client.
//! Kept free of server-side dependencies.

pub mod dto;
pub mod lenient;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
