//! Request extractors shared by route handlers.

pub mod auth;

pub use auth::{RequireAuth, SessionKey};
