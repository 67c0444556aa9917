//! Core types for VIZIFIT.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod complexity;
pub mod email;
pub mod garment;
pub mod id;
pub mod price;
pub mod status;

pub use complexity::Complexity;
pub use email::{Email, EmailError};
pub use garment::Category;
pub use id::*;
pub use price::{Price, PriceError};
pub use status::OrderStatus;
