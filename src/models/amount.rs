//! This file defines the monetary amount type used by expenses.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A monetary amount in integer minor units (cents).
///
/// Storing cents rather than a binary floating point number avoids rounding
/// drift when amounts are summed. The core never performs currency rounding;
/// whatever the host shell collects is stored as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from a number of cents.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `cents` is negative.
    pub fn new(cents: i64) -> Result<Self, Error> {
        if cents < 0 {
            Err(Error::InvalidAmount)
        } else {
            Ok(Self(cents))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `cents` is not negative. This function
    /// has `_unchecked` in the name but is not `unsafe`: violating the
    /// invariant causes incorrect behaviour but does not affect memory
    /// safety.
    pub fn new_unchecked(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    pub fn as_cents(&self) -> i64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format from the absolute value so a negative amount built via
        // `new_unchecked` renders as "-1.05" rather than "-1.-5".
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();

        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

#[cfg(test)]
mod amount_tests {
    use crate::Error;

    use super::Amount;

    #[test]
    fn new_fails_on_negative_cents() {
        assert_eq!(Amount::new(-1), Err(Error::InvalidAmount));
    }

    #[test]
    fn new_succeeds_on_zero() {
        assert_eq!(Amount::new(0), Ok(Amount::new_unchecked(0)));
    }

    #[test]
    fn display_formats_major_and_minor_units() {
        let amount = Amount::new(1234).unwrap();

        assert_eq!(amount.to_string(), "12.34");
    }

    #[test]
    fn display_pads_minor_units() {
        let amount = Amount::new(105).unwrap();

        assert_eq!(amount.to_string(), "1.05");
    }

    #[test]
    fn display_places_sign_before_major_units() {
        let amount = Amount::new_unchecked(-105);

        assert_eq!(amount.to_string(), "-1.05");
    }
}
