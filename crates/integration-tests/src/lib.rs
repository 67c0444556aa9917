//! Integration tests for the VIZIFIT storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vizifit-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_engine` - Cart merge rules and total derivation
//! - `checkout_flow` - End-to-end checkout through the state machine
//! - `design_gateway` - Design request validation and prompt composition
//!
//! Tests exercise the storefront logic in-process; no live gateway or
//! identity provider is required.
