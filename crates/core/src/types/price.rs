//! Display-only price representation using decimal arithmetic.
//!
//! Catalog prices arrive as JSON numbers (`109.95`). They are kept as a
//! [`Decimal`] so that formatting never shows binary float noise. The cart
//! does no arithmetic on prices; this type exists to carry and render them.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog price in the store's single display currency (US dollars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// True when the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::from_cents(2230).to_string(), "$22.30");
        assert_eq!(Price::from_cents(10995).to_string(), "$109.95");
        assert_eq!(Price::default().to_string(), "$0.00");
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));
    }

    #[test]
    fn test_deserializes_from_json_integer() {
        let price: Price = serde_json::from_str("15").unwrap();
        assert_eq!(price.to_string(), "$15.00");
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(serde_json::from_str::<Price>("\"cheap\"").is_err());
        assert!(serde_json::from_str::<Price>("null").is_err());
    }

    #[test]
    fn test_survives_session_round_trip() {
        let price = Price::from_cents(5599);
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::from_cents(-1).is_negative());
        assert!(!Price::from_cents(0).is_negative());
        assert!(!Price::from_cents(1).is_negative());
    }
}
