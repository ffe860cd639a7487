//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod mail;
mod payment;
mod proxy;
mod repository;

pub use auth::{
    AuthError, PasswordService, TokenClaims, TokenError, TokenPayload, TokenPurpose, TokenService,
};
pub use mail::{MailError, MailMessage, Mailer};
pub use payment::PaymentOutcomeDecider;
pub use proxy::{
    ForwardOverrides, Forwarder, ProxiedRequest, ProxiedResponse, ProxyBody, ProxyError,
};
pub use repository::{
    BaseRepository, CatalogRepository, OrderRepository, PaymentRepository, UserRepository,
};
