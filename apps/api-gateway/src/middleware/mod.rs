//! Middleware and request extractors.

pub mod auth;
