//! Data Transfer Objects - request/response types for the APIs.
//!
//! Request fields are optional so handlers can report which required
//! field is missing instead of failing deserialization.

mod auth;
mod catalog;
mod order;
mod payment;
mod user;

pub use auth::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RegistrationResponse, ResetPasswordRequest, VerifyUserRequest,
};
pub use catalog::{CreateCatalogItemRequest, UpdateCatalogItemRequest};
pub use order::{CreateOrderRequest, OrderItemRequest, UpdateStatusRequest};
pub use payment::CreatePaymentRequest;
pub use user::{CreateUserRequest, UpdateUserRequest};
