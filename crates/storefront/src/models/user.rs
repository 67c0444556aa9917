//! User identity types.
//!
//! Users live in the hosted identity provider; the storefront only consumes
//! the `{id, email, name}` projection and never mutates it locally.

use serde::{Deserialize, Serialize};

use vizifit_core::{Email, UserId};

/// The authenticated user behind a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// Identity-provider user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
}
