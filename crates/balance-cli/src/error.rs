use balance_transfer::{ExchangeError, TransferError, TransferErrorCategory, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::InvalidAmount { .. } => 2,
            Self::Transfer(error) => match error.category() {
                TransferErrorCategory::InputRejected => 3,
                TransferErrorCategory::External => 4,
                TransferErrorCategory::PartialFailure => 5,
            },
            Self::Exchange(_) => 4,
            Self::Serialization(_) => 6,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_transfer::{AccountError, QuoteRejection};
    use rust_decimal::Decimal;

    #[test]
    fn partial_failure_has_its_own_exit_code() {
        let error = CliError::from(TransferError::WithdrawalFailure {
            order_id: String::from("order-1"),
            deposit_address: String::from("dep123"),
            amount: Decimal::ONE,
            source: AccountError::Unavailable(String::from("offline")),
        });
        assert_eq!(error.exit_code(), 5);
    }

    #[test]
    fn input_and_external_failures_differ() {
        let input = CliError::from(TransferError::InvalidQuote(QuoteRejection::Overflow));
        let external = CliError::from(TransferError::Transport(ExchangeError::unavailable("down")));
        assert_eq!(input.exit_code(), 3);
        assert_eq!(external.exit_code(), 4);
    }
}
