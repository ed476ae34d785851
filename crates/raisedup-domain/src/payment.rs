//! Payment and checkout domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status recorded on a local payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `payment_status` reported by the provider for a checkout session.
///
/// Only `Paid` moves a checkout to the verified state; every other value is
/// reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
    Other(String),
}

impl CheckoutPaymentStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            "unpaid" => Self::Unpaid,
            "no_payment_required" => Self::NoPaymentRequired,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::NoPaymentRequired => "no_payment_required",
            Self::Other(s) => s,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

/// Convert a price in currency units to the provider's minor units (cents),
/// rounding to the nearest cent. Negative prices clamp to 0.
pub fn to_minor_units(price: f64) -> i64 {
    if !price.is_finite() || price <= 0.0 {
        return 0;
    }
    (price * 100.0).round() as i64
}

/// Convert provider minor units back to currency units.
pub fn from_minor_units(amount: i64) -> f64 {
    amount as f64 / 100.0
}
