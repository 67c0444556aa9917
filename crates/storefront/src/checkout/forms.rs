//! Checkout form types and field-level validation.
//!
//! Validation never aborts early: every failing field is collected into a
//! [`ValidationErrors`] map so the calling surface can annotate each control.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vizifit_core::Email;

/// Recognized UPI app identifiers.
const UPI_APPS: &[&str] = &["gpay", "phonepe", "paytm", "bhim"];

/// Recognized wallet identifiers.
const WALLETS: &[&str] = &[
    "paytm",
    "mobikwik",
    "amazonpay",
    "freecharge",
    "airtel",
    "jio",
];

/// Field name to message map produced by form validation.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Create an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record an error for a field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// True if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The message recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Merge another error map into this one.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Shipping address form. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl ShippingForm {
    /// Validate all fields, returning every failure at once.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        require(&mut errors, "name", &self.name, "Name is required");
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if Email::parse(self.email.trim()).is_err() {
            errors.insert("email", "Invalid email format");
        }
        require(&mut errors, "phone", &self.phone, "Phone is required");
        require(&mut errors, "address", &self.address, "Address is required");
        require(&mut errors, "city", &self.city, "City is required");
        require(&mut errors, "state", &self.state, "State is required");
        require(&mut errors, "zip", &self.zip, "PIN code is required");

        errors
    }
}

fn require(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

/// Payment selection, one variant per method.
///
/// Each variant carries exactly the fields its method requires, so validation
/// never inspects fields belonging to another method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentMethod {
    Card {
        card_number: String,
        card_holder: String,
        expiry: String,
        cvv: String,
    },
    Upi {
        #[serde(default)]
        upi_id: String,
        #[serde(default)]
        selected_app: String,
    },
    Netbanking {
        bank: String,
    },
    Wallet {
        wallet: String,
    },
    Cod,
}

impl PaymentMethod {
    /// Validate the selected method's sub-form.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        match self {
            Self::Card {
                card_number,
                card_holder,
                expiry,
                cvv,
            } => {
                let digits: String = card_number
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '-')
                    .collect();
                if digits.len() < 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
                    errors.insert("card_number", "Valid card number is required");
                }
                if card_holder.trim().is_empty() {
                    errors.insert("card_holder", "Card holder name is required");
                }
                if expiry.len() != 5 || !is_expiry_format(expiry) {
                    errors.insert("expiry", "Valid expiry date is required");
                }
                if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
                    errors.insert("cvv", "Valid CVV is required");
                }
            }
            Self::Upi {
                upi_id,
                selected_app,
            } => {
                let has_app = UPI_APPS.contains(&selected_app.trim().to_lowercase().as_str());
                if upi_id.trim().is_empty() && !has_app {
                    errors.insert("upi_id", "Please select a UPI app or enter UPI ID");
                } else if !upi_id.trim().is_empty() && !upi_id.contains('@') {
                    errors.insert("upi_id", "Invalid UPI ID format (e.g., name@upi)");
                }
            }
            Self::Netbanking { bank } => {
                if bank.trim().is_empty() {
                    errors.insert("bank", "Please select a bank");
                }
            }
            Self::Wallet { wallet } => {
                if !WALLETS.contains(&wallet.trim().to_lowercase().as_str()) {
                    errors.insert("wallet", "Please select a wallet");
                }
            }
            Self::Cod => {}
        }

        errors
    }
}

/// `MM/YY` with a plausible month.
fn is_expiry_format(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}
