//! VIZIFIT Core - Shared types library.
//!
//! This crate provides common types used across all VIZIFIT components:
//! - `storefront` - Public-facing storefront service
//! - `integration-tests` - Cross-module integration tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, garment
//!   categories, design complexity tiers, and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
