use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Currency, CurrencySide};

/// Validation errors raised while building domain values and configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency code cannot be empty")]
    EmptyCurrency,
    #[error("currency code length {len} exceeds max {max}")]
    CurrencyTooLong { len: usize, max: usize },
    #[error("currency code contains invalid character '{ch}' at index {index}")]
    CurrencyInvalidChar { ch: char, index: usize },

    #[error("transfer amount must be positive, got {value}")]
    NonPositiveAmount { value: Decimal },
    #[error("recipient address cannot be empty")]
    EmptyAddress,
    #[error("source and recipient currency are both '{currency}'")]
    SameCurrency { currency: Currency },

    #[error("invalid value for '{key}': '{value}'")]
    InvalidConfig { key: &'static str, value: String },
}

/// Exchange transport error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeErrorKind {
    Unavailable,
    Timeout,
    RateLimited,
    Rejected,
    InvalidResponse,
    Internal,
}

/// Failure reported by the exchange API client.
///
/// The core never retries; `retryable` is advisory for callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeError {
    kind: ExchangeErrorKind,
    message: String,
    retryable: bool,
}

impl ExchangeError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Timeout,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Rejected,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ExchangeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ExchangeErrorKind::Unavailable => "exchange.unavailable",
            ExchangeErrorKind::Timeout => "exchange.timeout",
            ExchangeErrorKind::RateLimited => "exchange.rate_limited",
            ExchangeErrorKind::Rejected => "exchange.rejected",
            ExchangeErrorKind::InvalidResponse => "exchange.invalid_response",
            ExchangeErrorKind::Internal => "exchange.internal",
        }
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ExchangeError {}

/// Failure reported by a source account's withdrawal mechanism.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds { available: Decimal, requested: Decimal },
    #[error("withdrawal rejected: {0}")]
    Rejected(String),
    #[error("account unavailable: {0}")]
    Unavailable(String),
}

/// Reason a [`TransferQuote`](crate::TransferQuote) could not be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteRejection {
    #[error("source amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },
    #[error("market rate must be positive, got {rate}")]
    NonPositiveRate { rate: Decimal },
    #[error("miner fee must not be negative, got {fee}")]
    NegativeMinerFee { fee: Decimal },
    #[error("amount {amount} is below the provider minimum {minimum}")]
    BelowMinimum { amount: Decimal, minimum: Decimal },
    #[error("amount {amount} exceeds the provider maximum {maximum}")]
    AboveMaximum { amount: Decimal, maximum: Decimal },
    #[error("quote arithmetic overflowed")]
    Overflow,
    #[error("miner fee {fee} consumes the converted amount {converted}")]
    NothingReceived { converted: Decimal, fee: Decimal },
}

/// How a caller should react to a [`TransferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferErrorCategory {
    /// The request itself cannot be satisfied; fix the input.
    InputRejected,
    /// The exchange failed; the request may succeed later.
    External,
    /// An exchange order exists but the source account sent nothing.
    PartialFailure,
}

/// Error surfaced by every orchestration operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error(transparent)]
    Transport(#[from] ExchangeError),

    #[error("unsupported {side} currency '{currency}'")]
    UnsupportedCurrency {
        side: CurrencySide,
        currency: Currency,
    },

    #[error("invalid quote: {0}")]
    InvalidQuote(#[from] QuoteRejection),

    #[error("order {order_id} created but withdrawal to {deposit_address} failed: {source}")]
    WithdrawalFailure {
        order_id: String,
        deposit_address: String,
        amount: Decimal,
        #[source]
        source: AccountError,
    },

    #[error("transfer was already attempted (exchange order {order_id})")]
    AlreadyTransferred { order_id: String },
}

impl TransferError {
    pub const fn category(&self) -> TransferErrorCategory {
        match self {
            Self::Transport(_) => TransferErrorCategory::External,
            Self::UnsupportedCurrency { .. }
            | Self::InvalidQuote(_)
            | Self::AlreadyTransferred { .. } => TransferErrorCategory::InputRejected,
            Self::WithdrawalFailure { .. } => TransferErrorCategory::PartialFailure,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport(error) => error.code(),
            Self::UnsupportedCurrency { .. } => "transfer.unsupported_currency",
            Self::InvalidQuote(_) => "transfer.invalid_quote",
            Self::WithdrawalFailure { .. } => "transfer.withdrawal_failure",
            Self::AlreadyTransferred { .. } => "transfer.already_transferred",
        }
    }
}
