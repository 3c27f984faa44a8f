use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_CURRENCY_LEN: usize = 10;

/// Normalized currency code (e.g. `BTC`, `ETH`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parse and normalize a currency code to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_CURRENCY_LEN {
            return Err(ValidationError::CurrencyTooLong {
                len,
                max: MAX_CURRENCY_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::CurrencyInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a provider coin symbol.
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        symbol.trim().eq_ignore_ascii_case(&self.0)
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Currency {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Currency {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

/// Which half of a transfer request a currency belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencySide {
    Source,
    Recipient,
}

impl CurrencySide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Recipient => "recipient",
        }
    }
}

impl Display for CurrencySide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_currency() {
        let parsed = Currency::parse(" btc ").expect("currency should parse");
        assert_eq!(parsed.as_str(), "BTC");
    }

    #[test]
    fn rejects_empty_and_invalid_codes() {
        assert_eq!(Currency::parse("  "), Err(ValidationError::EmptyCurrency));

        let err = Currency::parse("BT-C").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::CurrencyInvalidChar { ch: '-', index: 2 }
        ));

        let err = Currency::parse("VERYLONGCOIN").expect_err("must fail");
        assert!(matches!(err, ValidationError::CurrencyTooLong { .. }));
    }

    #[test]
    fn matches_symbols_case_insensitively() {
        let currency = Currency::parse("eth").expect("valid currency");
        assert!(currency.matches_symbol("ETH"));
        assert!(currency.matches_symbol("eth"));
        assert!(!currency.matches_symbol("ETC"));
    }
}
