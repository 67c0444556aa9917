//! Outbound service clients.

pub mod design;
pub mod identity;

pub use design::{DesignGateway, GatewayError, RawDesignRequest};
pub use identity::{IdentityClient, IdentityError};
