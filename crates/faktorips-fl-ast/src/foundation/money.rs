//! Currency amounts.
//!
//! A [`Money`] is a decimal amount with the fixed scale of its currency
//! (two fraction digits for most currencies). Arithmetic between amounts
//! requires equal currencies; results are rounded half-up to the currency
//! scale.
//!
//! # Examples
//!
//! ```
//! # use faktorips_fl_ast::foundation::money::*;
//! let a = Money::parse("10.50EUR").unwrap();
//! let b = Money::parse("0.75 EUR").unwrap();
//! assert_eq!(a.add(&b).unwrap().to_string(), "11.25 EUR");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors raised by money arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Operands carry different currencies.
    #[error("currency mismatch: {left} and {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// Division by a zero decimal.
    #[error("division by zero")]
    DivisionByZero,

    /// The result does not fit the decimal range.
    #[error("money amount overflow")]
    Overflow,
}

/// ISO 4217 currency code (three upper-case ASCII letters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(String);

impl Currency {
    /// Create a currency from its code, or `None` for malformed codes.
    pub fn new(code: &str) -> Option<Self> {
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(Self(code.to_string()))
        } else {
            None
        }
    }

    /// The three-letter code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Number of fraction digits amounts in this currency carry.
    pub fn fraction_digits(&self) -> u32 {
        match self.0.as_str() {
            "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
            | "UGX" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
            "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Amount of money in a currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create an amount, rounding half-up to the currency scale.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        let amount = scaled(amount, currency.fraction_digits());
        Self { amount, currency }
    }

    /// Parse `10.50EUR` or `10.50 EUR`.
    ///
    /// Amounts with more fraction digits than the currency allows are
    /// rejected rather than rounded.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.len() < 4 || !text.is_char_boundary(text.len() - 3) {
            return None;
        }
        let (amount, code) = text.split_at(text.len() - 3);
        let currency = Currency::new(code)?;
        let amount = amount.trim_end();
        if amount.is_empty() || amount.starts_with('+') {
            return None;
        }
        let amount: Decimal = amount.parse().ok()?;
        if amount.scale() > currency.fraction_digits() {
            return None;
        }
        Some(Self::new(amount, currency))
    }

    /// The amount, scaled to the currency's fraction digits.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    fn same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            })
        }
    }

    /// Sum of two amounts in the same currency.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Difference of two amounts in the same currency.
    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        self.same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Multiply by a decimal factor, rounding half-up.
    pub fn multiply(&self, factor: Decimal) -> Result<Money, MoneyError> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Multiply by an integer factor.
    pub fn multiply_int(&self, factor: i32) -> Result<Money, MoneyError> {
        self.multiply(Decimal::from(factor))
    }

    /// Divide by a decimal, rounding half-up.
    pub fn divide(&self, divisor: Decimal) -> Result<Money, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let amount = self
            .amount
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// The negated amount.
    pub fn negate(&self) -> Money {
        Money::new(-self.amount, self.currency.clone())
    }

    /// Order two amounts of the same currency.
    pub fn compare(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }
}

/// Round half-up to `digits` and pad to exactly that scale.
fn scaled(amount: Decimal, digits: u32) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(digits);
    rounded
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn eur(text: &str) -> Money {
        Money::parse(&format!("{text}EUR")).unwrap()
    }

    #[test]
    fn test_parse_pads_to_currency_scale() {
        let m = Money::parse("10EUR").unwrap();
        assert_eq!(m.to_string(), "10.00 EUR");
        assert_eq!(Money::parse("1000 JPY").unwrap().to_string(), "1000 JPY");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Money::parse("10.555EUR").is_none());
        assert!(Money::parse("10eur").is_none());
        assert!(Money::parse("EUR").is_none());
        assert!(Money::parse("1.5 JPY").is_none());
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::parse("1USD").unwrap();
        assert!(matches!(
            eur("1").add(&usd),
            Err(MoneyError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_multiply_rounds_half_up() {
        let m = eur("10.00").multiply(Decimal::from_str("0.125").unwrap()).unwrap();
        assert_eq!(m.to_string(), "1.25 EUR");
        let m = eur("0.05").multiply(Decimal::from_str("0.5").unwrap()).unwrap();
        assert_eq!(m.to_string(), "0.03 EUR");
    }

    #[test]
    fn test_divide() {
        let m = eur("10.00").divide(Decimal::from(3)).unwrap();
        assert_eq!(m.to_string(), "3.33 EUR");
        assert_eq!(eur("1").divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_compare() {
        assert_eq!(eur("1.00").compare(&eur("2")).unwrap(), Ordering::Less);
    }
}
