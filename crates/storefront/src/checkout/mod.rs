//! Checkout orchestrator.
//!
//! Drives a checkout session through explicit phases:
//!
//! ```text
//! Editing -> Validating -> Processing -> Completed
//!    ^            |
//!    +------------+  (validation failure)
//! ```
//!
//! Submission is split into [`Checkout::begin_submit`] (validation, phase
//! transition to `Processing`) and [`Checkout::complete_submit`] (order
//! snapshot, cart clear, `Completed`). The calling surface runs the simulated
//! processing delay between the two without holding the session locked, which
//! makes the `Processing` busy state observable: a second submission arriving
//! meanwhile is rejected with [`CheckoutError::AlreadyInProgress`] instead of
//! relying on a disabled button.

pub mod coupons;
pub mod forms;

use serde::Serialize;
use thiserror::Error;

pub use forms::{PaymentMethod, ShippingForm, ValidationErrors};

use vizifit_core::Price;

use crate::cart::Cart;
use crate::models::Order;

/// Phase of a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutPhase {
    #[default]
    Editing,
    Validating,
    Processing,
    Completed,
}

/// Errors produced by checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Shipping or payment validation failed; the map holds one message per
    /// failing field.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// The coupon code is not in the coupon table.
    #[error("invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// A coupon was already applied in this checkout session.
    #[error("a coupon has already been applied")]
    CouponAlreadyApplied,

    /// A submission is already processing for this session.
    #[error("checkout is already in progress")]
    AlreadyInProgress,

    /// The cart is empty; there is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// A coupon accepted for the current checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedCoupon {
    /// The code as entered.
    pub code: String,
    /// Discount percentage from the coupon table.
    pub percent: u32,
}

/// Per-session checkout state machine.
#[derive(Debug, Default)]
pub struct Checkout {
    phase: CheckoutPhase,
    coupon: Option<AppliedCoupon>,
}

impl Checkout {
    /// Fresh checkout session in `Editing`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: CheckoutPhase::Editing,
            coupon: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// The applied coupon, if any.
    #[must_use]
    pub const fn coupon(&self) -> Option<&AppliedCoupon> {
        self.coupon.as_ref()
    }

    /// Apply a coupon code, at most once per checkout session.
    ///
    /// A `Completed` checkout rolls over to a fresh session first, so the
    /// next order is not blocked by the previous order's coupon.
    ///
    /// Returns the discount computed against `subtotal`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::CouponAlreadyApplied`] if a coupon is already set
    /// - [`CheckoutError::InvalidCoupon`] for unknown codes
    /// - [`CheckoutError::AlreadyInProgress`] while a submission is processing
    pub fn apply_coupon(&mut self, code: &str, subtotal: Price) -> Result<Price, CheckoutError> {
        if self.phase == CheckoutPhase::Processing {
            return Err(CheckoutError::AlreadyInProgress);
        }
        if self.phase == CheckoutPhase::Completed {
            self.reset();
        }
        if self.coupon.is_some() {
            return Err(CheckoutError::CouponAlreadyApplied);
        }

        let code = code.trim();
        let percent = coupons::discount_percent(code)
            .ok_or_else(|| CheckoutError::InvalidCoupon(code.to_string()))?;

        self.coupon = Some(AppliedCoupon {
            code: code.to_string(),
            percent,
        });
        Ok(subtotal.percent(percent))
    }

    /// Discount against the given subtotal under the applied coupon.
    ///
    /// Recomputed on every call so cart mutations after coupon application
    /// are reflected.
    #[must_use]
    pub fn discount_for(&self, subtotal: Price) -> Price {
        self.coupon
            .as_ref()
            .map_or(Price::ZERO, |c| subtotal.percent(c.percent))
    }

    /// Validate the forms and enter `Processing`.
    ///
    /// On any field error the phase falls back to `Editing` and nothing is
    /// submitted.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadyInProgress`] if already processing
    /// - [`CheckoutError::EmptyCart`] for an empty cart
    /// - [`CheckoutError::Validation`] with the field error map
    pub fn begin_submit(
        &mut self,
        cart: &Cart,
        shipping: &ShippingForm,
        payment: &PaymentMethod,
    ) -> Result<(), CheckoutError> {
        if self.phase == CheckoutPhase::Processing {
            return Err(CheckoutError::AlreadyInProgress);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // A completed checkout rolls over into a fresh one, dropping the
        // spent coupon.
        if self.phase == CheckoutPhase::Completed {
            self.reset();
        }

        self.phase = CheckoutPhase::Validating;

        let mut errors = shipping.validate();
        errors.merge(payment.validate());

        if !errors.is_empty() {
            self.phase = CheckoutPhase::Editing;
            return Err(CheckoutError::Validation(errors));
        }

        self.phase = CheckoutPhase::Processing;
        Ok(())
    }

    /// Snapshot the cart into an [`Order`], clear the cart, and complete.
    ///
    /// Call after a successful [`Checkout::begin_submit`] (and the simulated
    /// processing delay). The order total is the cart subtotal minus the
    /// coupon discount.
    ///
    /// # Errors
    ///
    /// The session lock is not held between the two submission halves, so the
    /// cart may have been emptied in the meantime. An empty cart here falls
    /// back to `Editing` with [`CheckoutError::EmptyCart`] instead of minting
    /// a zero-item order.
    pub fn complete_submit(&mut self, cart: &mut Cart) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            self.phase = CheckoutPhase::Editing;
            return Err(CheckoutError::EmptyCart);
        }

        let subtotal = cart.total_price();
        let total = subtotal.saturating_sub(self.discount_for(subtotal));
        let order = Order::create(cart.snapshot(), total);

        cart.clear();
        self.phase = CheckoutPhase::Completed;
        Ok(order)
    }

    /// Reset to a fresh `Editing` session, dropping any applied coupon.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
