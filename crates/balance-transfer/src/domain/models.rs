use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Currency, QuoteRejection};

/// Coin supported by the exchange provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub symbol: String,
    pub name: String,
    /// Provider status; an unavailable coin is listed but not currently tradable.
    pub available: bool,
}

impl Coin {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            available: true,
        }
    }

    /// Mark the coin as listed but not currently tradable.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Provider-specific tradable pair built from an input and output coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinPair {
    input: Coin,
    output: Coin,
    code: String,
}

impl CoinPair {
    /// Pair code is `{input}_{output}` in lowercase, e.g. `btc_eth`.
    pub fn new(input: Coin, output: Coin) -> Self {
        let code = format!(
            "{}_{}",
            input.symbol.trim().to_ascii_lowercase(),
            output.symbol.trim().to_ascii_lowercase()
        );
        Self {
            input,
            output,
            code,
        }
    }

    pub fn input(&self) -> &Coin {
        &self.input
    }

    pub fn output(&self) -> &Coin {
        &self.output
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Rate and limits reported by the provider for a pair at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInformation {
    pub pair_code: String,
    /// Recipient units received per source unit.
    pub rate: Decimal,
    pub minimum: Decimal,
    pub maximum: Option<Decimal>,
    /// Fee deducted from the recipient amount, in recipient units.
    pub miner_fee: Decimal,
    #[serde(with = "time::serde::rfc3339")]
    pub fetched_at: OffsetDateTime,
}

/// Estimate of what the recipient receives for a source amount at current rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferQuote {
    pair_code: String,
    source_amount: Decimal,
    recipient_amount: Decimal,
    rate: Decimal,
    miner_fee: Decimal,
    minimum: Decimal,
    maximum: Option<Decimal>,
    #[serde(with = "time::serde::rfc3339")]
    fetched_at: OffsetDateTime,
}

impl TransferQuote {
    /// Derive a quote, rejecting amounts outside provider limits instead of clamping.
    pub fn new(
        source_amount: Decimal,
        market: &MarketInformation,
    ) -> Result<Self, QuoteRejection> {
        if source_amount <= Decimal::ZERO {
            return Err(QuoteRejection::NonPositiveAmount {
                amount: source_amount,
            });
        }
        if market.rate <= Decimal::ZERO {
            return Err(QuoteRejection::NonPositiveRate { rate: market.rate });
        }
        if market.miner_fee < Decimal::ZERO {
            return Err(QuoteRejection::NegativeMinerFee {
                fee: market.miner_fee,
            });
        }
        if source_amount < market.minimum {
            return Err(QuoteRejection::BelowMinimum {
                amount: source_amount,
                minimum: market.minimum,
            });
        }
        if let Some(maximum) = market.maximum {
            if source_amount > maximum {
                return Err(QuoteRejection::AboveMaximum {
                    amount: source_amount,
                    maximum,
                });
            }
        }

        let converted = source_amount
            .checked_mul(market.rate)
            .ok_or(QuoteRejection::Overflow)?;
        let recipient_amount = converted
            .checked_sub(market.miner_fee)
            .ok_or(QuoteRejection::Overflow)?;
        if recipient_amount <= Decimal::ZERO {
            return Err(QuoteRejection::NothingReceived {
                converted,
                fee: market.miner_fee,
            });
        }

        Ok(Self {
            pair_code: market.pair_code.clone(),
            source_amount,
            recipient_amount: recipient_amount.normalize(),
            rate: market.rate,
            miner_fee: market.miner_fee,
            minimum: market.minimum,
            maximum: market.maximum,
            fetched_at: market.fetched_at,
        })
    }

    pub fn pair_code(&self) -> &str {
        &self.pair_code
    }

    pub const fn source_amount(&self) -> Decimal {
        self.source_amount
    }

    pub const fn recipient_amount(&self) -> Decimal {
        self.recipient_amount
    }

    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    pub const fn miner_fee(&self) -> Decimal {
        self.miner_fee
    }

    pub const fn minimum(&self) -> Decimal {
        self.minimum
    }

    pub const fn maximum(&self) -> Option<Decimal> {
        self.maximum
    }

    pub const fn fetched_at(&self) -> OffsetDateTime {
        self.fetched_at
    }
}

/// Exchange order issued by the provider: pay `deposit_amount` into `deposit_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub order_id: String,
    pub pair_code: String,
    pub deposit_address: String,
    pub deposit_amount: Decimal,
    pub withdrawal_address: String,
    pub withdrawal_amount: Option<Decimal>,
    pub quoted_rate: Option<Decimal>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

/// Instruction for a source account to send funds to a crypto address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub currency: Currency,
    pub amount: Decimal,
    pub recipient_crypto_address: String,
}

impl Withdrawal {
    pub fn new(
        currency: Currency,
        amount: Decimal,
        recipient_crypto_address: impl Into<String>,
    ) -> Self {
        Self {
            currency,
            amount,
            recipient_crypto_address: recipient_crypto_address.into(),
        }
    }
}
