//! Upstream request forwarding.

mod upstream;

pub use upstream::{HttpForwarder, UpstreamTarget};
