//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (øre, cents, aurar). Prices arrive from
//! the catalog as decimals once and are never handled as floats again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    NOK,
    ISK,
    JPY,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Currency; 6] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::NOK,
        Currency::ISK,
        Currency::JPY,
    ];

    /// (code, symbol, minor-unit digits)
    fn details(&self) -> (&'static str, &'static str, u32) {
        match self {
            Currency::USD => ("USD", "$", 2),
            Currency::EUR => ("EUR", "\u{20ac}", 2),
            Currency::GBP => ("GBP", "\u{00a3}", 2),
            Currency::NOK => ("NOK", "kr ", 2),
            Currency::ISK => ("ISK", "kr ", 0),
            Currency::JPY => ("JPY", "\u{00a5}", 0),
        }
    }

    /// ISO code, e.g. `"NOK"`.
    pub fn code(&self) -> &'static str {
        self.details().0
    }

    /// Display symbol, e.g. `"$"`.
    pub fn symbol(&self) -> &'static str {
        self.details().1
    }

    /// Digits after the decimal point.
    pub fn decimal_places(&self) -> u32 {
        self.details().2
    }

    /// Parse an ISO code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in one currency.
///
/// Serialized as `{"amountCents": 4999, "currency": "USD"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in minor units.
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Whole major units (e.g., dollars).
    ///
    /// ```
    /// use fishmarket_commerce::money::{Money, Currency};
    /// assert_eq!(Money::from_major(10, Currency::USD).amount_cents, 1000);
    /// assert_eq!(Money::from_major(10, Currency::ISK).amount_cents, 10);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// A decimal amount in major units, rounded to the nearest minor unit.
    ///
    /// ```
    /// use fishmarket_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Symbol and amount, e.g. `"$49.99"` or `"kr 1490"`.
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// `self - other`, or `None` across currencies.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        (self.currency == other.currency).then(|| {
            Money::new(
                self.amount_cents.saturating_sub(other.amount_cents),
                self.currency,
            )
        })
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let minor = self.amount_cents.unsigned_abs();
        let places = self.currency.decimal_places();
        let scale = 10_u64.pow(places);
        write!(f, "{}{}{}", sign, self.currency.symbol(), minor / scale)?;
        if places > 0 {
            write!(f, ".{:0width$}", minor % scale, width = places as usize)?;
        }
        Ok(())
    }
}
